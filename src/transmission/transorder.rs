use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::glog_ns;
use super::xml_utils::{GlogWriter, format_decimal};
use crate::core::{GeneratedDocument, GlogDate, OrderKind, OtmError, PurchaseLine};

/// Header-level options shaping one TransOrder document. Defaults match the
/// import template; import surfaces may override any of them per order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransOrderOptions {
    /// OTM domain name stamped into every Gid.
    pub domain: String,
    /// Release method xid; `None` means `AUTO_CALC - {domain}`.
    pub release_method_xid: Option<String>,
    pub supplier_id: String,
    pub supplier_name: String,
    pub le_name: String,
    pub buyer: String,
    pub supplier_site_name: String,
    pub revision_num: String,
    /// Header flex-field strings (ship method, flag, freight terms).
    pub ff_attr2: String,
    pub ff_attr3: String,
    pub ff_attr4: String,
    /// Header and line flex-field number.
    pub ff_number1: String,
    /// Header flex-field date.
    pub ff_date1: GlogDate,
    pub rate_to_base: Decimal,
    pub func_currency_amount: Decimal,
}

impl Default for TransOrderOptions {
    fn default() -> Self {
        let ff_date1 = NaiveDate::from_ymd_opt(2025, 9, 25)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp literal");
        Self {
            domain: "THG".to_string(),
            release_method_xid: None,
            supplier_id: "10010".to_string(),
            supplier_name: "BPT - PRO POWER CO LTD".to_string(),
            le_name: "THE HILLMAN GROUP".to_string(),
            buyer: "THE HILLMAN GROUP".to_string(),
            supplier_site_name: "KAOHSIUNG CITY".to_string(),
            revision_num: "0".to_string(),
            ff_attr2: "SHIP METHOD".to_string(),
            ff_attr3: "Y".to_string(),
            ff_attr4: "FREIGHT TERMS".to_string(),
            ff_number1: "100000019476400".to_string(),
            ff_date1: GlogDate::from_datetime(ff_date1),
            rate_to_base: Decimal::ONE,
            func_currency_amount: Decimal::ZERO,
        }
    }
}

impl TransOrderOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    fn release_method(&self) -> String {
        self.release_method_xid
            .clone()
            .unwrap_or_else(|| format!("AUTO_CALC - {}", self.domain))
    }
}

/// Build one TransOrder document from the lines of a single purchase order.
///
/// `lines` must all belong to `po_xid` and arrive in encounter order. The
/// supplier and DC locations are taken from the first line. Each line's gid
/// is `{po_xid}-{line:03}-{schedule:03}`, with the line number falling back
/// to the line's 1-based position.
///
/// Output is byte-identical for identical input — the TransOrder envelope
/// carries no generation timestamp.
///
/// # Errors
///
/// [`OtmError::MissingField`] when a required xid is blank (line index
/// 1-based, 0 for header fields); [`OtmError::Xml`] when there are no lines.
pub fn to_transorder_xml(
    po_xid: &str,
    lines: &[PurchaseLine],
    opts: &TransOrderOptions,
) -> Result<GeneratedDocument, OtmError> {
    let missing = |line_index: usize, field: &str| OtmError::MissingField {
        order_id: po_xid.to_string(),
        line_index,
        field: field.to_string(),
    };

    if po_xid.trim().is_empty() {
        return Err(missing(0, "po_xid"));
    }
    let first = lines.first().ok_or_else(|| {
        OtmError::Xml(format!("cannot build TransOrder '{po_xid}' with no lines"))
    })?;
    if first.supplier_ship_from_xid.trim().is_empty() {
        return Err(missing(0, "supplier_ship_from_xid"));
    }
    if first.dc_ship_to_xid.trim().is_empty() {
        return Err(missing(0, "dc_ship_to_xid"));
    }
    for (i, line) in lines.iter().enumerate() {
        if line.packaged_item_xid.trim().is_empty() {
            return Err(missing(i + 1, "packaged_item_xid"));
        }
        if line.plan_from_location_xid.trim().is_empty() {
            return Err(missing(i + 1, "plan_from_location_xid"));
        }
    }

    let domain = opts.domain.as_str();
    let supplier = first.supplier_ship_from_xid.as_str();
    let dc = first.dc_ship_to_xid.as_str();
    let mut w = GlogWriter::new()?;

    w.start_with_attrs(
        "Transmission",
        &[("xmlns:otm", glog_ns::OTM), ("xmlns:gtm", glog_ns::GTM)],
    )?;
    w.empty("TransmissionHeader")?;

    w.start("TransmissionBody")?;
    w.start("GLogXMLElement")?;
    w.start("TransOrder")?;

    // Header
    w.start("TransOrderHeader")?;
    w.gid("TransOrderGid", Some(domain), po_xid)?;
    w.text("TransactionCode", super::TRANSACTION_CODE)?;
    w.gid("ReleaseMethodGid", Some(domain), &opts.release_method())?;

    w.start("InvolvedParty")?;
    w.gid("InvolvedPartyQualifierGid", None, "SHIP FROM")?;
    w.location_ref("InvolvedPartyLocationRef", domain, supplier)?;
    w.start("ContactRef")?;
    w.start("Contact")?;
    w.gid("ContactGid", Some(domain), supplier)?;
    w.end("Contact")?;
    w.end("ContactRef")?;
    w.end("InvolvedParty")?;

    w.gid("OrderTypeGid", None, OrderKind::Purchase.type_code())?;

    write_order_refnum(&mut w, domain, "SUPPLIER_ID", &opts.supplier_id)?;
    write_order_refnum(&mut w, domain, "SUPPLIER_NAME", &opts.supplier_name)?;
    write_order_refnum(&mut w, domain, "LE_NAME", &opts.le_name)?;
    write_order_refnum(&mut w, domain, "BUYER", &opts.buyer)?;
    write_order_refnum(&mut w, domain, "SUPPLIER_SITE_NAME", &opts.supplier_site_name)?;
    write_order_refnum(&mut w, domain, "REVISION_NUM", &opts.revision_num)?;

    w.start("FlexFieldStrings")?;
    w.text("Attribute2", &opts.ff_attr2)?;
    w.text("Attribute3", &opts.ff_attr3)?;
    w.text("Attribute4", &opts.ff_attr4)?;
    w.end("FlexFieldStrings")?;
    w.start("FlexFieldNumbers")?;
    w.text("AttributeNumber1", &opts.ff_number1)?;
    w.end("FlexFieldNumbers")?;
    w.start("FlexFieldDates")?;
    w.glog_date("AttributeDate1", &opts.ff_date1)?;
    w.end("FlexFieldDates")?;
    w.empty("FlexFieldCurrencies")?;
    w.end("TransOrderHeader")?;

    // Lines
    w.start("TransOrderLineDetail")?;
    let mut line_ids = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let line_number = line.line_number.unwrap_or(idx as u32 + 1);
        let line_xid = format!("{po_xid}-{line_number:03}-{:03}", line.schedule_number);

        w.start("TransOrderLine")?;
        w.gid("TransOrderLineGid", Some(domain), &line_xid)?;
        w.text("TransactionCode", super::TRANSACTION_CODE)?;

        w.start("PackagedItemRef")?;
        w.gid("PackagedItemGid", Some(domain), &line.packaged_item_xid)?;
        w.end("PackagedItemRef")?;

        w.location_ref("ShipFromLocationRef", domain, supplier)?;
        w.location_ref("ShipToLocationRef", domain, dc)?;

        w.start("ItemQuantity")?;
        w.text("PackagedItemCount", &line.qty.to_string())?;
        w.start("DeclaredValue")?;
        w.start("FinancialAmount")?;
        w.text("GlobalCurrencyCode", line.currency.as_str())?;
        w.text("MonetaryAmount", &format_decimal(line.declared_value))?;
        w.text("RateToBase", &format_decimal(opts.rate_to_base))?;
        w.text("FuncCurrencyAmount", &format_decimal(opts.func_currency_amount))?;
        w.end("FinancialAmount")?;
        w.end("DeclaredValue")?;
        w.end("ItemQuantity")?;

        w.start("TimeWindow")?;
        write_tz_date(&mut w, "EarlyPickupDt", &line.early_pickup, line)?;
        write_tz_date(&mut w, "LatePickupDt", &line.late_pickup, line)?;
        w.end("TimeWindow")?;

        w.start("PlanFromLocationGid")?;
        w.gid("LocationGid", Some(domain), &line.plan_from_location_xid)?;
        w.end("PlanFromLocationGid")?;

        write_line_refnum(&mut w, domain, "LINE_NUMBER", &line_number.to_string())?;
        write_line_refnum(&mut w, domain, "SCHEDULE_NUMBER", &line.schedule_number.to_string())?;
        if let Some(item_number) = &line.item_number {
            write_line_refnum(&mut w, domain, "ITEM_NUMBER", item_number)?;
        }

        w.start("FlexFieldStrings")?;
        w.text("Attribute1", "COUNTRY_OF_ORIGIN")?;
        w.text("Attribute2", "UOMCODE")?;
        w.end("FlexFieldStrings")?;
        w.start("FlexFieldNumbers")?;
        w.text("AttributeNumber1", &opts.ff_number1)?;
        w.text("AttributeNumber2", &opts.ff_number1)?;
        w.end("FlexFieldNumbers")?;
        w.empty("FlexFieldDates")?;

        w.end("TransOrderLine")?;
        line_ids.push(line_xid);
    }
    w.end("TransOrderLineDetail")?;

    w.end("TransOrder")?;
    w.end("GLogXMLElement")?;
    w.end("TransmissionBody")?;
    w.end("Transmission")?;

    Ok(GeneratedDocument {
        order_id: po_xid.to_string(),
        kind: OrderKind::Purchase,
        xml: w.into_string()?,
        line_ids,
    })
}

fn write_tz_date(
    w: &mut GlogWriter,
    wrapper: &str,
    date: &GlogDate,
    line: &PurchaseLine,
) -> Result<(), OtmError> {
    w.start(wrapper)?;
    w.text("GLogDate", &date.format())?;
    w.text("TZId", &line.tz_id)?;
    w.text("TZOffset", line.tz_offset.as_str())?;
    w.end(wrapper)?;
    Ok(())
}

fn write_order_refnum(
    w: &mut GlogWriter,
    domain: &str,
    qualifier: &str,
    value: &str,
) -> Result<(), OtmError> {
    w.start("OrderRefnum")?;
    w.gid("OrderRefnumQualifierGid", Some(domain), qualifier)?;
    w.text("OrderRefnumValue", value)?;
    w.end("OrderRefnum")?;
    Ok(())
}

fn write_line_refnum(
    w: &mut GlogWriter,
    domain: &str,
    qualifier: &str,
    value: &str,
) -> Result<(), OtmError> {
    w.start("OrderLineRefnum")?;
    w.gid("OrderLineRefnumQualifierGid", Some(domain), qualifier)?;
    w.text("OrderLineRefnumValue", value)?;
    w.end("OrderLineRefnum")?;
    Ok(())
}
