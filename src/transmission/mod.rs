//! GLog XML transmission generation — Order Release and TransOrder.
//!
//! Builds the two OTM payload flavors from normalized order lines, and runs
//! whole import sets through the normalize → group → build pipeline.
//!
//! # Example
//!
//! ```no_run
//! use otmgen::core::*;
//! use otmgen::transmission::{self, ReleaseOptions};
//!
//! let lines: Vec<SalesLine> = todo!(); // normalize_sales_row over an import set
//! let mut seq = LineSequence::new();
//! let doc = transmission::to_release_xml(
//!     "SO_09000-1128",
//!     &lines,
//!     &mut seq,
//!     &ReleaseOptions::default(),
//! )
//! .unwrap();
//! assert!(doc.xml.starts_with("<?xml"));
//! ```

mod batch;
mod release;
mod transorder;
pub(crate) mod xml_utils;

pub use batch::{BatchOptions, BatchOutcome, BuildError, RowError, run_batch};
pub use release::{ReleaseOptions, to_release_xml};
pub use transorder::{TransOrderOptions, to_transorder_xml};
pub use xml_utils::format_decimal;

/// OTM transaction code for insert-or-update, stamped on every document and
/// line.
pub const TRANSACTION_CODE: &str = "IU";

/// GLog transmission namespace URIs.
pub mod glog_ns {
    pub const OTM: &str = "http://xmlns.oracle.com/apps/otm/transmission/v6.4";
    pub const GTM: &str = "http://xmlns.oracle.com/apps/gtm/transmission/v6.4";
}
