use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw tabular record — a case-insensitive map of column name to cell
/// value, as handed over by whatever parsed the import file or form.
///
/// Blank cells count as absent: `get` returns `None` for values that are
/// empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a header row and one data row.
    /// Surplus cells are ignored; short rows leave trailing columns absent.
    pub fn from_row(headers: &[&str], cells: &[&str]) -> Self {
        let mut record = Self::new();
        for (header, cell) in headers.iter().zip(cells) {
            record.set(*header, *cell);
        }
        record
    }

    /// Set a field. Column names are matched case-insensitively.
    pub fn set(&mut self, field: impl AsRef<str>, value: impl Into<String>) {
        self.fields
            .insert(field.as_ref().to_lowercase(), value.into());
    }

    /// Get a field value, trimmed. Blank values come back as `None`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(&field.to_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// ISO 4217 style currency code: exactly 3 ASCII letters, upper-cased.
///
/// Validation is format-only — any 3-letter code is accepted, matching the
/// permissiveness of the import surface this feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and upper-case a currency code. `None` unless exactly 3 ASCII
    /// alphabetic characters.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(s.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The import surface's fallback currency.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A GLog timestamp — fixed-width `YYYYMMDDHHMMSS` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlogDate(NaiveDateTime);

impl GlogDate {
    pub const FORMAT: &'static str = "%Y%m%d%H%M%S";

    /// Parse the 14-digit wire format. `None` on any deviation.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDateTime::parse_from_str(s, Self::FORMAT).ok().map(Self)
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Render the 14-digit wire form.
    pub fn format(&self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl std::fmt::Display for GlogDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

/// Timezone offset in `±HH:MM` form, preserved verbatim on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TzOffset(String);

impl TzOffset {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let b = s.as_bytes();
        let well_formed = b.len() == 6
            && (b[0] == b'+' || b[0] == b'-')
            && b[1].is_ascii_digit()
            && b[2].is_ascii_digit()
            && b[3] == b':'
            && b[4].is_ascii_digit()
            && b[5].is_ascii_digit();
        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TzOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which flavor of order document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Order Release payload.
    Sales,
    /// TransOrder payload.
    Purchase,
}

impl OrderKind {
    /// OTM order type code carried in the document.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Sales => "SALES_ORDER",
            Self::Purchase => "PURCHASE_ORDER",
        }
    }
}

/// One normalized Sales Order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesLine {
    /// Groups lines into one Release document.
    pub order_id: String,
    pub ship_from_xid: String,
    pub ship_to_xid: String,
    pub item_xid: String,
    /// Positive packaged item count.
    pub qty: u64,
    /// Non-negative declared value.
    pub value: Decimal,
    pub currency: CurrencyCode,
    /// Explicit ReleaseLineGid override. When absent the line id is
    /// allocated sequentially at build time.
    pub line_xid: Option<String>,
}

/// One normalized Purchase Order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// Groups lines into one TransOrder document.
    pub po_xid: String,
    pub supplier_ship_from_xid: String,
    pub dc_ship_to_xid: String,
    pub packaged_item_xid: String,
    pub qty: u64,
    pub declared_value: Decimal,
    pub item_number: Option<String>,
    /// Caller-supplied positive line number — part of the TransOrderLineGid,
    /// distinct from any generated release line id. Falls back to the line's
    /// 1-based position within its order at build time.
    pub line_number: Option<u32>,
    /// Caller-supplied positive schedule number.
    pub schedule_number: u32,
    pub currency: CurrencyCode,
    pub early_pickup: GlogDate,
    pub late_pickup: GlogDate,
    pub tz_id: String,
    pub tz_offset: TzOffset,
    pub plan_from_location_xid: String,
}

/// A finished XML payload for one order id.
///
/// Created once per distinct order id after all its lines are normalized;
/// immutable thereafter. Held only in memory until downloaded or posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Document identifier — the Release/TransOrder Gid Xid.
    pub order_id: String,
    pub kind: OrderKind,
    /// The complete XML text.
    pub xml: String,
    /// Line identifiers contributing to this document, in document order.
    pub line_ids: Vec<String>,
}
