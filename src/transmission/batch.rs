use std::collections::HashMap;

use super::release::{ReleaseOptions, to_release_xml};
use super::transorder::{TransOrderOptions, to_transorder_xml};
use crate::core::{
    GeneratedDocument, LineSequence, OrderKind, OtmError, PurchaseLine, RawRecord, RowDefaults,
    SalesLine, ValidationError, normalize_purchase_row, normalize_sales_row,
};

/// Options for one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub defaults: RowDefaults,
    pub release: ReleaseOptions,
    pub transorder: TransOrderOptions,
}

/// A record that failed normalization, keyed by its 0-based position in the
/// input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub error: ValidationError,
}

/// An order whose document could not be built from its normalized lines.
#[derive(Debug)]
pub struct BuildError {
    pub order_id: String,
    pub error: OtmError,
}

/// The result of one batch run: one document per distinct order id that
/// survived, plus everything that went wrong along the way.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Documents in first-seen order of their order ids.
    pub documents: Vec<GeneratedDocument>,
    /// Normalization failures, one per bad record.
    pub row_errors: Vec<RowError>,
    /// Build failures, one per failed order id.
    pub build_errors: Vec<BuildError>,
}

impl BatchOutcome {
    /// True when every record normalized and every document built.
    pub fn is_clean(&self) -> bool {
        self.row_errors.is_empty() && self.build_errors.is_empty()
    }
}

/// Run a whole import set through normalize → group → build.
///
/// A bad record never aborts the batch: its error is recorded against the
/// record's position and the remaining records proceed. Grouping preserves
/// first-seen order of order ids and encounter order of lines within each.
/// A build failure for one order id is recorded without blocking the others.
///
/// Each run owns a fresh [`LineSequence`], so identical input yields
/// identical documents, and concurrent sessions running their own batches
/// cannot interfere.
pub fn run_batch(records: &[RawRecord], kind: OrderKind, opts: &BatchOptions) -> BatchOutcome {
    match kind {
        OrderKind::Sales => run_sales(records, opts),
        OrderKind::Purchase => run_purchase(records, opts),
    }
}

fn run_sales(records: &[RawRecord], opts: &BatchOptions) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut groups: Vec<(String, Vec<SalesLine>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        match normalize_sales_row(record, &opts.defaults) {
            Ok(line) => {
                let slot = *index.entry(line.order_id.clone()).or_insert_with(|| {
                    groups.push((line.order_id.clone(), Vec::new()));
                    groups.len() - 1
                });
                groups[slot].1.push(line);
            }
            Err(error) => outcome.row_errors.push(RowError { row, error }),
        }
    }

    let mut seq = LineSequence::new();
    for (order_id, lines) in &groups {
        match to_release_xml(order_id, lines, &mut seq, &opts.release) {
            Ok(doc) => outcome.documents.push(doc),
            Err(error) => outcome.build_errors.push(BuildError {
                order_id: order_id.clone(),
                error,
            }),
        }
    }
    outcome
}

fn run_purchase(records: &[RawRecord], opts: &BatchOptions) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    // Each group keeps the index of its first record so header overrides can
    // be read from it.
    let mut groups: Vec<(String, Vec<PurchaseLine>, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        match normalize_purchase_row(record, &opts.defaults) {
            Ok(line) => {
                let slot = *index.entry(line.po_xid.clone()).or_insert_with(|| {
                    groups.push((line.po_xid.clone(), Vec::new(), row));
                    groups.len() - 1
                });
                groups[slot].1.push(line);
            }
            Err(error) => outcome.row_errors.push(RowError { row, error }),
        }
    }

    for (po_xid, lines, first_row) in &groups {
        let header = header_overrides(&opts.transorder, &records[*first_row]);
        match to_transorder_xml(po_xid, lines, &header) {
            Ok(doc) => outcome.documents.push(doc),
            Err(error) => outcome.build_errors.push(BuildError {
                order_id: po_xid.clone(),
                error,
            }),
        }
    }
    outcome
}

/// Apply per-order header columns from the group's first record, when the
/// import file carries them.
fn header_overrides(base: &TransOrderOptions, record: &RawRecord) -> TransOrderOptions {
    let mut opts = base.clone();
    let mut set = |target: &mut String, field: &str| {
        if let Some(value) = record.get(field) {
            *target = value.to_string();
        }
    };
    set(&mut opts.supplier_id, "supplier_id");
    set(&mut opts.supplier_name, "supplier_name");
    set(&mut opts.le_name, "le_name");
    set(&mut opts.buyer, "buyer");
    set(&mut opts.supplier_site_name, "supplier_site_name");
    set(&mut opts.revision_num, "revision_num");
    opts
}
