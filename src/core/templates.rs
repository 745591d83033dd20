//! Import column templates for the two order kinds.
//!
//! The engine itself consumes already-split rows ([`super::RawRecord`]); these
//! constants document the expected column sets and give import surfaces a
//! downloadable starting point. `release_line_id` and `line_number` on the
//! Sales template are optional and drive the ReleaseLineGid when present.

/// Sales Order CSV template: header row plus two sample lines sharing one
/// order id.
pub const SALES_CSV_TEMPLATE: &str = "\
order_id,ship_from_xid,ship_to_xid,item_xid,qty,value,currency,release_line_id,line_number
SO_09000-1128,110,10000000000013,400000002438186,1900,9720,USD,SO_09000-1128_001,1
SO_09000-1128,110,10000000000013,300000005438196,1900,9720,USD,SO_09000-1128_002,2
";

/// Purchase Order CSV template: header row plus one sample line.
pub const PURCHASE_CSV_TEMPLATE: &str = "\
po_xid,supplier_ship_from_xid,dc_ship_to_xid,packaged_item_xid,qty,declared_value,item_number,line_number,schedule_number,currency,early_pickup_dt,late_pickup_dt,tz_id,tz_offset,plan_from_location_xid,supplier_id,supplier_name,le_name,buyer,supplier_site_name,revision_num
PO_09000-1128,300000016179177,110,400000004438186,2800,9702,116783,1,1,USD,20250718102700,20250725102700,Asia/Taipei,+08:00,CNNGB,10010,BPT - PRO POWER CO LTD,THE HILLMAN GROUP,THE HILLMAN GROUP,KAOHSIUNG CITY,0
";
