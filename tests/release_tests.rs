#![cfg(feature = "transmission")]

use chrono::NaiveDate;
use otmgen::core::*;
use otmgen::transmission::{self, ReleaseOptions, glog_ns};
use rust_decimal_macros::dec;

fn sales_line(item_xid: &str) -> SalesLine {
    SalesLine {
        order_id: "SO_09000-1128".to_string(),
        ship_from_xid: "110".to_string(),
        ship_to_xid: "10000000000013".to_string(),
        item_xid: item_xid.to_string(),
        qty: 1900,
        value: dec!(9720),
        currency: CurrencyCode::parse("USD").unwrap(),
        line_xid: None,
    }
}

fn two_line_order() -> Vec<SalesLine> {
    vec![
        sales_line("400000002438186"),
        sales_line("300000005438196"),
    ]
}

fn build(lines: &[SalesLine], opts: &ReleaseOptions) -> GeneratedDocument {
    let mut seq = LineSequence::new();
    transmission::to_release_xml("SO_09000-1128", lines, &mut seq, opts).unwrap()
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn release_envelope_structure() {
    let doc = build(&two_line_order(), &ReleaseOptions::default());
    assert!(doc.xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(doc.xml.contains(&format!("xmlns:otm=\"{}\"", glog_ns::OTM)));
    assert!(doc.xml.contains(&format!("xmlns:gtm=\"{}\"", glog_ns::GTM)));
    assert!(doc.xml.contains("<otm:TransmissionBody>"));
    assert!(doc.xml.contains("<otm:GLogXMLElement>"));
    assert!(doc.xml.contains("<otm:Release>"));
    assert!(doc.xml.contains("<otm:Xid>SO_09000-1128</otm:Xid>"));
    assert!(doc.xml.contains("<otm:TransactionCode>IU</otm:TransactionCode>"));
    assert!(doc.xml.contains("<otm:DomainName>THG</otm:DomainName>"));
}

#[test]
fn release_carries_type_and_refnums() {
    let doc = build(&two_line_order(), &ReleaseOptions::default());
    assert!(doc.xml.contains("<otm:Xid>SALES_ORDER</otm:Xid>"));
    assert!(doc.xml.contains("<otm:Xid>ORDER_TYPE</otm:Xid>"));
    assert!(doc.xml.contains("<otm:ReleaseRefnumValue>SALES_ORDER</otm:ReleaseRefnumValue>"));
    assert!(doc.xml.contains("<otm:Xid>DIRECTION</otm:Xid>"));
    assert!(doc.xml.contains("<otm:ReleaseRefnumValue>OUTBOUND</otm:ReleaseRefnumValue>"));
}

#[test]
fn release_carries_locations_and_amounts() {
    let doc = build(&two_line_order(), &ReleaseOptions::default());
    assert!(doc.xml.contains("<otm:ShipFromLocationRef>"));
    assert!(doc.xml.contains("<otm:Xid>110</otm:Xid>"));
    assert!(doc.xml.contains("<otm:Xid>10000000000013</otm:Xid>"));
    assert!(doc.xml.contains("<otm:PackagedItemCount>1900</otm:PackagedItemCount>"));
    assert!(doc.xml.contains("<otm:GlobalCurrencyCode>USD</otm:GlobalCurrencyCode>"));
    assert!(doc.xml.contains("<otm:MonetaryAmount>9720</otm:MonetaryAmount>"));
}

// ---------------------------------------------------------------------------
// Line sequencing — the two-row scenario from the import template
// ---------------------------------------------------------------------------

#[test]
fn two_lines_one_document_sequential_ids() {
    let doc = build(&two_line_order(), &ReleaseOptions::default());
    assert_eq!(doc.order_id, "SO_09000-1128");
    assert_eq!(doc.kind, OrderKind::Sales);
    assert_eq!(
        doc.line_ids,
        vec!["SO_09000-1128_001", "SO_09000-1128_002"]
    );
    assert_eq!(doc.xml.matches("<otm:ReleaseLine>").count(), 2);
    let first = doc.xml.find("SO_09000-1128_001").unwrap();
    let second = doc.xml.find("SO_09000-1128_002").unwrap();
    assert!(first < second);
}

#[test]
fn many_lines_have_no_gaps() {
    let lines: Vec<SalesLine> = (0..12).map(|_| sales_line("400000002438186")).collect();
    let doc = build(&lines, &ReleaseOptions::default());
    let expected: Vec<String> = (1..=12)
        .map(|n| format!("SO_09000-1128_{n:03}"))
        .collect();
    assert_eq!(doc.line_ids, expected);
}

#[test]
fn explicit_line_xid_replaces_allocated_id() {
    let mut lines = two_line_order();
    lines[0].line_xid = Some("SO_09000-1128_CUSTOM".to_string());
    let doc = build(&lines, &ReleaseOptions::default());
    // The allocator still runs positionally, so the second line stays _002.
    assert_eq!(
        doc.line_ids,
        vec!["SO_09000-1128_CUSTOM", "SO_09000-1128_002"]
    );
}

// ---------------------------------------------------------------------------
// Suffix options
// ---------------------------------------------------------------------------

#[test]
fn suffix_in_gid_changes_release_xid_only() {
    let opts = ReleaseOptions::default().release_index(2).suffix_in_gid(true);
    let doc = build(&two_line_order(), &opts);
    assert_eq!(doc.order_id, "SO_09000-1128_R2");
    assert!(doc.xml.contains("<otm:Xid>SO_09000-1128_R2</otm:Xid>"));
    assert_eq!(doc.line_ids[0], "SO_09000-1128_001");
}

#[test]
fn suffix_in_line_ids_changes_line_prefix() {
    let opts = ReleaseOptions::default()
        .release_index(3)
        .suffix_in_line_ids(true);
    let doc = build(&two_line_order(), &opts);
    assert_eq!(
        doc.line_ids,
        vec!["SO_09000-1128_R3_001", "SO_09000-1128_R3_002"]
    );
}

// ---------------------------------------------------------------------------
// Determinism & the configurable creation timestamp
// ---------------------------------------------------------------------------

#[test]
fn output_is_byte_identical_for_identical_input() {
    let a = build(&two_line_order(), &ReleaseOptions::default());
    let b = build(&two_line_order(), &ReleaseOptions::default());
    assert_eq!(a.xml, b.xml);
}

#[test]
fn no_timestamp_by_default() {
    let doc = build(&two_line_order(), &ReleaseOptions::default());
    assert!(!doc.xml.contains("TransmissionCreateDt"));
    assert!(!doc.xml.contains("TimeWindow"));
}

#[test]
fn created_emits_header_timestamp_and_derived_window() {
    let created = GlogDate::from_datetime(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    );
    let opts = ReleaseOptions::default().created(created);
    let doc = build(&two_line_order(), &opts);
    assert!(doc.xml.contains("<otm:TransmissionCreateDt>"));
    assert!(doc.xml.contains("<otm:GLogDate>20250101120000</otm:GLogDate>"));
    // Pickup window is created + 7 days / + 8 days.
    assert!(doc.xml.contains("<otm:GLogDate>20250108120000</otm:GLogDate>"));
    assert!(doc.xml.contains("<otm:GLogDate>20250109120000</otm:GLogDate>"));
}

#[test]
fn fixed_created_keeps_output_deterministic() {
    let created = GlogDate::from_datetime(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    );
    let opts = ReleaseOptions::default().created(created);
    assert_eq!(build(&two_line_order(), &opts).xml, build(&two_line_order(), &opts).xml);
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

#[test]
fn reserved_characters_are_escaped() {
    let mut lines = two_line_order();
    lines[0].item_xid = "A<B>&\"C\"'D'".to_string();
    let doc = build(&lines, &ReleaseOptions::default());
    assert!(doc.xml.contains("A&lt;B&gt;&amp;&quot;C&quot;&apos;D&apos;"));
    assert!(!doc.xml.contains("A<B>"));
}

#[test]
fn escaped_value_round_trips_through_a_parser() {
    let original = "ITEM<&>'\"X";
    let mut lines = two_line_order();
    lines[0].item_xid = original.to_string();
    let doc = build(&lines, &ReleaseOptions::default());

    let mut reader = quick_xml::Reader::from_str(&doc.xml);
    let mut texts = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            quick_xml::events::Event::Text(t) => texts.push(t.unescape().unwrap().into_owned()),
            quick_xml::events::Event::Eof => break,
            _ => {}
        }
    }
    assert!(texts.iter().any(|t| t == original));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn blank_item_xid_fails_with_missing_field() {
    let mut lines = two_line_order();
    lines[1].item_xid = "  ".to_string();
    let mut seq = LineSequence::new();
    let err = transmission::to_release_xml(
        "SO_09000-1128",
        &lines,
        &mut seq,
        &ReleaseOptions::default(),
    )
    .unwrap_err();
    match err {
        OtmError::MissingField {
            order_id,
            line_index,
            field,
        } => {
            assert_eq!(order_id, "SO_09000-1128");
            assert_eq!(line_index, 2);
            assert_eq!(field, "item_xid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_order_cannot_build() {
    let mut seq = LineSequence::new();
    let err =
        transmission::to_release_xml("SO_1", &[], &mut seq, &ReleaseOptions::default())
            .unwrap_err();
    assert!(matches!(err, OtmError::Xml(_)));
}
