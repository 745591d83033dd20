//! Property-based tests for sequencing, escaping, and determinism.
//!
//! Run with: `cargo test --features transmission --test proptest_tests`

#![cfg(feature = "transmission")]

use otmgen::core::*;
use otmgen::transmission::{self, BatchOptions, ReleaseOptions, run_batch};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn sales_line(order_id: &str, item_xid: &str, qty: u64, value: Decimal) -> SalesLine {
    SalesLine {
        order_id: order_id.to_string(),
        ship_from_xid: "110".to_string(),
        ship_to_xid: "10000000000013".to_string(),
        item_xid: item_xid.to_string(),
        qty,
        value,
        currency: CurrencyCode::parse("USD").unwrap(),
        line_xid: None,
    }
}

/// Printable ASCII with at least one non-space character, so the builder's
/// blank-field check never trips.
fn arb_text() -> impl Strategy<Value = String> {
    "[ -~]{1,30}".prop_filter("must not be blank", |s| !s.trim().is_empty())
}

fn arb_item_xid() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,16}"
}

fn arb_value() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

proptest! {
    /// Allocated line ids are `{order}_001..{order}_NNN`, strictly
    /// increasing with no gaps, regardless of how many orders interleave.
    #[test]
    fn line_ids_are_gapless(line_count in 1usize..150) {
        let mut seq = LineSequence::new();
        for n in 1..=line_count {
            let id = seq.allocate("SO_P");
            prop_assert_eq!(id, format!("SO_P_{n:03}"));
        }
        prop_assert_eq!(seq.issued("SO_P"), line_count as u64);
    }

    /// Interleaving a second order never disturbs the first one's sequence.
    #[test]
    fn interleaved_orders_stay_independent(flips in proptest::collection::vec(any::<bool>(), 1..60)) {
        let mut seq = LineSequence::new();
        let (mut a, mut b) = (0u64, 0u64);
        for flip in flips {
            if flip {
                a += 1;
                prop_assert_eq!(seq.allocate("SO_A"), format!("SO_A_{a:03}"));
            } else {
                b += 1;
                prop_assert_eq!(seq.allocate("SO_B"), format!("SO_B_{b:03}"));
            }
        }
    }

    /// Every reserved character surviving in a field value is escaped on the
    /// way out and restored on the way back in.
    #[test]
    fn field_values_round_trip_through_xml(item in arb_text(), ship_to in arb_text()) {
        let mut line = sales_line("SO_RT", &item, 5, Decimal::new(999, 2));
        line.ship_to_xid = ship_to.clone();
        let mut seq = LineSequence::new();
        let doc = transmission::to_release_xml("SO_RT", &[line], &mut seq, &ReleaseOptions::default())
            .unwrap();

        for reserved in ['<', '>', '&'] {
            if item.contains(reserved) {
                let needle = format!("<otm:Xid>{}", item);
                prop_assert!(!doc.xml.contains(&needle));
            }
        }

        let mut reader = quick_xml::Reader::from_str(&doc.xml);
        let mut texts = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::Text(t) => {
                    texts.push(t.unescape().unwrap().into_owned());
                }
                quick_xml::events::Event::Eof => break,
                _ => {}
            }
        }
        prop_assert!(texts.iter().any(|t| t == &item));
        prop_assert!(texts.iter().any(|t| t == &ship_to));
    }

    /// One document per order, one line element per row, ids positional.
    #[test]
    fn document_shape_matches_input(
        items in proptest::collection::vec(arb_item_xid(), 1..25),
        qty in 1u64..100_000,
        value in arb_value(),
    ) {
        let lines: Vec<SalesLine> = items
            .iter()
            .map(|item| sales_line("SO_SHAPE", item, qty, value))
            .collect();
        let mut seq = LineSequence::new();
        let doc = transmission::to_release_xml(
            "SO_SHAPE",
            &lines,
            &mut seq,
            &ReleaseOptions::default(),
        )
        .unwrap();

        prop_assert_eq!(doc.line_ids.len(), items.len());
        prop_assert_eq!(doc.xml.matches("<otm:ReleaseLine>").count(), items.len());
        for (i, id) in doc.line_ids.iter().enumerate() {
            prop_assert_eq!(id, &format!("SO_SHAPE_{:03}", i + 1));
        }
    }

    /// Re-running a batch over identical records yields byte-identical XML.
    #[test]
    fn batches_are_deterministic(
        orders in proptest::collection::vec(("SO_[A-E]", arb_item_xid()), 1..20),
    ) {
        let records: Vec<RawRecord> = orders
            .iter()
            .map(|(order_id, item)| {
                let mut r = RawRecord::new();
                r.set("order_id", order_id.as_str());
                r.set("ship_from_xid", "110");
                r.set("ship_to_xid", "10000000000013");
                r.set("item_xid", item.as_str());
                r.set("qty", "1900");
                r.set("value", "9720");
                r
            })
            .collect();

        let a = run_batch(&records, OrderKind::Sales, &BatchOptions::default());
        let b = run_batch(&records, OrderKind::Sales, &BatchOptions::default());
        prop_assert!(a.is_clean());
        prop_assert_eq!(a.documents.len(), b.documents.len());
        for (x, y) in a.documents.iter().zip(&b.documents) {
            prop_assert_eq!(&x.xml, &y.xml);
            prop_assert_eq!(&x.line_ids, &y.line_ids);
        }
    }
}
