use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::error::{ValidationError, ViolationKind};
use super::types::*;

/// Fallback values for optional import columns, applied during row
/// normalization. Mirrors the defaults of the import templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefaults {
    /// Currency used when a row has no `currency` cell.
    pub currency: CurrencyCode,
    /// Purchase pickup window start when `early_pickup_dt` is absent.
    pub early_pickup: GlogDate,
    /// Purchase pickup window end when `late_pickup_dt` is absent.
    pub late_pickup: GlogDate,
    pub tz_id: String,
    pub tz_offset: TzOffset,
    pub plan_from_location_xid: String,
}

impl Default for RowDefaults {
    fn default() -> Self {
        let early = NaiveDate::from_ymd_opt(2025, 7, 18)
            .and_then(|d| d.and_hms_opt(10, 27, 0))
            .expect("valid timestamp literal");
        let late = NaiveDate::from_ymd_opt(2025, 7, 25)
            .and_then(|d| d.and_hms_opt(10, 27, 0))
            .expect("valid timestamp literal");
        Self {
            currency: CurrencyCode::usd(),
            early_pickup: GlogDate::from_datetime(early),
            late_pickup: GlogDate::from_datetime(late),
            tz_id: "Asia/Taipei".to_string(),
            tz_offset: TzOffset::parse("+08:00").expect("valid offset literal"),
            plan_from_location_xid: "CNNGB".to_string(),
        }
    }
}

/// Normalize one raw Sales Order record into a typed [`SalesLine`].
///
/// Required columns: `order_id`, `ship_from_xid`, `ship_to_xid`, `item_xid`,
/// `qty`, `value`. Optional: `currency` (falls back to the default),
/// `release_line_id` / `line_number` (drive the ReleaseLineGid, otherwise
/// lines are auto-sequenced at build time).
///
/// Pure — no side effects; returns the first violation found.
pub fn normalize_sales_row(
    record: &RawRecord,
    defaults: &RowDefaults,
) -> Result<SalesLine, ValidationError> {
    let order_id = require(record, "order_id")?.to_string();
    let ship_from_xid = require(record, "ship_from_xid")?.to_string();
    let ship_to_xid = require(record, "ship_to_xid")?.to_string();
    let item_xid = require(record, "item_xid")?.to_string();
    let qty = parse_count(record, "qty")?;
    let value = parse_amount(record, "value")?;
    let currency = parse_currency_or(record, "currency", &defaults.currency)?;

    // Explicit line id wins over an explicit line number; with neither the
    // builder allocates ids sequentially.
    let line_xid = match record.get("release_line_id") {
        Some(explicit) => Some(explicit.to_string()),
        None => parse_opt_positive_u32(record, "line_number")?
            .map(|n| format!("{order_id}_{n:03}")),
    };

    Ok(SalesLine {
        order_id,
        ship_from_xid,
        ship_to_xid,
        item_xid,
        qty,
        value,
        currency,
        line_xid,
    })
}

/// Normalize one raw Purchase Order record into a typed [`PurchaseLine`].
///
/// Required columns: `po_xid`, `supplier_ship_from_xid`, `dc_ship_to_xid`,
/// `packaged_item_xid`, `qty`, `declared_value`. Everything else falls back
/// to [`RowDefaults`] or a positional value, and is validated when present.
pub fn normalize_purchase_row(
    record: &RawRecord,
    defaults: &RowDefaults,
) -> Result<PurchaseLine, ValidationError> {
    let po_xid = require(record, "po_xid")?.to_string();
    let supplier_ship_from_xid = require(record, "supplier_ship_from_xid")?.to_string();
    let dc_ship_to_xid = require(record, "dc_ship_to_xid")?.to_string();
    let packaged_item_xid = require(record, "packaged_item_xid")?.to_string();
    let qty = parse_count(record, "qty")?;
    let declared_value = parse_amount(record, "declared_value")?;
    let item_number = record.get("item_number").map(str::to_string);
    let line_number = parse_opt_positive_u32(record, "line_number")?;
    let schedule_number = parse_opt_positive_u32(record, "schedule_number")?.unwrap_or(1);
    let currency = parse_currency_or(record, "currency", &defaults.currency)?;
    let early_pickup = parse_glog_or(record, "early_pickup_dt", defaults.early_pickup)?;
    let late_pickup = parse_glog_or(record, "late_pickup_dt", defaults.late_pickup)?;
    let tz_id = record
        .get("tz_id")
        .unwrap_or(&defaults.tz_id)
        .to_string();
    let tz_offset = parse_tz_or(record, "tz_offset", &defaults.tz_offset)?;
    let plan_from_location_xid = record
        .get("plan_from_location_xid")
        .unwrap_or(&defaults.plan_from_location_xid)
        .to_string();

    Ok(PurchaseLine {
        po_xid,
        supplier_ship_from_xid,
        dc_ship_to_xid,
        packaged_item_xid,
        qty,
        declared_value,
        item_number,
        line_number,
        schedule_number,
        currency,
        early_pickup,
        late_pickup,
        tz_id,
        tz_offset,
        plan_from_location_xid,
    })
}

fn require<'a>(record: &'a RawRecord, field: &str) -> Result<&'a str, ValidationError> {
    record.get(field).ok_or_else(|| ValidationError::missing(field))
}

/// Required positive integer count. Accepts decimal renderings of whole
/// numbers ("1900.0"), which spreadsheet exports produce.
fn parse_count(record: &RawRecord, field: &str) -> Result<u64, ValidationError> {
    let raw = require(record, field)?;
    let not_numeric = || {
        ValidationError::new(
            field,
            ViolationKind::NotNumeric,
            format!("'{raw}' is not a positive integer"),
        )
    };
    let value: Decimal = raw.parse().map_err(|_| not_numeric())?;
    if value.is_sign_negative() || value.is_zero() || value.fract() != Decimal::ZERO {
        return Err(not_numeric());
    }
    value.to_u64().ok_or_else(not_numeric)
}

/// Required non-negative decimal amount.
fn parse_amount(record: &RawRecord, field: &str) -> Result<Decimal, ValidationError> {
    let raw = require(record, field)?;
    let value: Decimal = raw.parse().map_err(|_| {
        ValidationError::new(
            field,
            ViolationKind::NotNumeric,
            format!("'{raw}' is not a decimal number"),
        )
    })?;
    if value.is_sign_negative() {
        return Err(ValidationError::new(
            field,
            ViolationKind::NotNumeric,
            format!("'{raw}' must not be negative"),
        ));
    }
    Ok(value)
}

/// Optional positive integer (line / schedule numbers).
fn parse_opt_positive_u32(
    record: &RawRecord,
    field: &str,
) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = record.get(field) else {
        return Ok(None);
    };
    raw.parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .map(Some)
        .ok_or_else(|| {
            ValidationError::new(
                field,
                ViolationKind::NotNumeric,
                format!("'{raw}' is not a positive integer"),
            )
        })
}

fn parse_currency_or(
    record: &RawRecord,
    field: &str,
    default: &CurrencyCode,
) -> Result<CurrencyCode, ValidationError> {
    match record.get(field) {
        None => Ok(default.clone()),
        Some(raw) => CurrencyCode::parse(raw).ok_or_else(|| {
            ValidationError::new(
                field,
                ViolationKind::BadCurrencyCode,
                format!("'{raw}' is not a 3-letter currency code"),
            )
        }),
    }
}

fn parse_glog_or(
    record: &RawRecord,
    field: &str,
    default: GlogDate,
) -> Result<GlogDate, ValidationError> {
    match record.get(field) {
        None => Ok(default),
        Some(raw) => GlogDate::parse(raw).ok_or_else(|| {
            ValidationError::new(
                field,
                ViolationKind::BadDateFormat,
                format!("'{raw}' does not match YYYYMMDDHHMMSS"),
            )
        }),
    }
}

fn parse_tz_or(
    record: &RawRecord,
    field: &str,
    default: &TzOffset,
) -> Result<TzOffset, ValidationError> {
    match record.get(field) {
        None => Ok(default.clone()),
        Some(raw) => TzOffset::parse(raw).ok_or_else(|| {
            ValidationError::new(
                field,
                ViolationKind::BadDateFormat,
                format!("'{raw}' does not match ±HH:MM"),
            )
        }),
    }
}
