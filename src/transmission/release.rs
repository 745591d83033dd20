use chrono::Duration;

use super::glog_ns;
use super::xml_utils::{GlogWriter, format_decimal};
use crate::core::{GeneratedDocument, GlogDate, LineSequence, OrderKind, OtmError, SalesLine};

/// Options shaping one Release document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// OTM domain name stamped into every Gid.
    pub domain: String,
    /// Which release this is when one base xid fans out into several
    /// documents (`_R1`, `_R2`, …).
    pub release_index: u32,
    /// Append `_R{release_index}` to the Release Gid.
    pub suffix_in_gid: bool,
    /// Use the suffixed xid as the prefix for generated line ids.
    pub suffix_in_line_ids: bool,
    /// Transmission creation timestamp. When set, the envelope carries
    /// `TransmissionCreateDt` and a pickup `TimeWindow` derived from it
    /// (+7 days / +8 days); when `None` both are omitted and the output is
    /// byte-identical for identical input.
    pub created: Option<GlogDate>,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            domain: "THG".to_string(),
            release_index: 1,
            suffix_in_gid: false,
            suffix_in_line_ids: false,
            created: None,
        }
    }
}

impl ReleaseOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn release_index(mut self, index: u32) -> Self {
        self.release_index = index;
        self
    }

    pub fn suffix_in_gid(mut self, on: bool) -> Self {
        self.suffix_in_gid = on;
        self
    }

    pub fn suffix_in_line_ids(mut self, on: bool) -> Self {
        self.suffix_in_line_ids = on;
        self
    }

    pub fn created(mut self, created: GlogDate) -> Self {
        self.created = Some(created);
        self
    }
}

/// Build one Order Release document from the lines of a single order.
///
/// `lines` must all belong to `order_id` and arrive in encounter order; each
/// line without an explicit `line_xid` gets the next id from `seq`. Ship-from
/// and ship-to locations are taken from the first line.
///
/// # Errors
///
/// [`OtmError::MissingField`] when a required xid is blank (line index
/// 1-based, 0 for header fields); [`OtmError::Xml`] when there are no lines.
pub fn to_release_xml(
    order_id: &str,
    lines: &[SalesLine],
    seq: &mut LineSequence,
    opts: &ReleaseOptions,
) -> Result<GeneratedDocument, OtmError> {
    let missing = |line_index: usize, field: &str| OtmError::MissingField {
        order_id: order_id.to_string(),
        line_index,
        field: field.to_string(),
    };

    if order_id.trim().is_empty() {
        return Err(missing(0, "order_id"));
    }
    let first = lines
        .first()
        .ok_or_else(|| OtmError::Xml(format!("cannot build Release '{order_id}' with no lines")))?;
    if first.ship_from_xid.trim().is_empty() {
        return Err(missing(0, "ship_from_xid"));
    }
    if first.ship_to_xid.trim().is_empty() {
        return Err(missing(0, "ship_to_xid"));
    }
    for (i, line) in lines.iter().enumerate() {
        if line.item_xid.trim().is_empty() {
            return Err(missing(i + 1, "item_xid"));
        }
    }

    let suffixed = format!("{order_id}_R{}", opts.release_index);
    let release_xid = if opts.suffix_in_gid {
        suffixed.clone()
    } else {
        order_id.to_string()
    };
    let line_prefix = if opts.suffix_in_line_ids {
        suffixed.as_str()
    } else {
        order_id
    };

    let domain = opts.domain.as_str();
    let mut w = GlogWriter::new()?;

    w.start_with_attrs(
        "Transmission",
        &[("xmlns:otm", glog_ns::OTM), ("xmlns:gtm", glog_ns::GTM)],
    )?;
    w.start("TransmissionHeader")?;
    if let Some(created) = &opts.created {
        w.glog_date("TransmissionCreateDt", created)?;
    }
    w.end("TransmissionHeader")?;

    w.start("TransmissionBody")?;
    w.start("GLogXMLElement")?;
    w.start("Release")?;

    w.gid("ReleaseGid", Some(domain), &release_xid)?;
    w.text("TransactionCode", super::TRANSACTION_CODE)?;

    w.location_ref("ShipFromLocationRef", domain, &first.ship_from_xid)?;
    w.location_ref("ShipToLocationRef", domain, &first.ship_to_xid)?;

    // Pickup window derived from the creation timestamp; absent otherwise.
    if let Some(created) = &opts.created {
        let early = GlogDate::from_datetime(created.datetime() + Duration::days(7));
        let late = GlogDate::from_datetime(early.datetime() + Duration::days(1));
        w.start("TimeWindow")?;
        w.glog_date("EarlyPickupDt", &early)?;
        w.glog_date("LatePickupDt", &late)?;
        w.end("TimeWindow")?;
    }

    let mut line_ids = Vec::with_capacity(lines.len());
    for line in lines {
        // The allocator runs over every line so auto-ids stay positional;
        // an explicit line xid replaces the allocated one.
        let allocated = seq.allocate(line_prefix);
        let line_xid = line.line_xid.clone().unwrap_or(allocated);

        w.start("ReleaseLine")?;
        w.gid("ReleaseLineGid", Some(domain), &line_xid)?;
        w.text("TransactionCode", super::TRANSACTION_CODE)?;

        w.start("PackagedItemRef")?;
        w.gid("PackagedItemGid", Some(domain), &line.item_xid)?;
        w.end("PackagedItemRef")?;

        w.start("ItemQuantity")?;
        w.text("PackagedItemCount", &line.qty.to_string())?;
        w.start("DeclaredValue")?;
        w.start("FinancialAmount")?;
        w.text("GlobalCurrencyCode", line.currency.as_str())?;
        w.text("MonetaryAmount", &format_decimal(line.value))?;
        w.end("FinancialAmount")?;
        w.end("DeclaredValue")?;
        w.end("ItemQuantity")?;

        w.end("ReleaseLine")?;
        line_ids.push(line_xid);
    }

    w.gid("ReleaseTypeGid", None, OrderKind::Sales.type_code())?;

    write_release_refnum(&mut w, domain, "ORDER_TYPE", OrderKind::Sales.type_code())?;
    write_release_refnum(&mut w, domain, "DIRECTION", "OUTBOUND")?;

    w.end("Release")?;
    w.end("GLogXMLElement")?;
    w.end("TransmissionBody")?;
    w.end("Transmission")?;

    Ok(GeneratedDocument {
        order_id: release_xid,
        kind: OrderKind::Sales,
        xml: w.into_string()?,
        line_ids,
    })
}

fn write_release_refnum(
    w: &mut GlogWriter,
    domain: &str,
    qualifier: &str,
    value: &str,
) -> Result<(), OtmError> {
    w.start("ReleaseRefnum")?;
    w.gid("ReleaseRefnumQualifierGid", Some(domain), qualifier)?;
    w.text("ReleaseRefnumValue", value)?;
    w.end("ReleaseRefnum")?;
    Ok(())
}
