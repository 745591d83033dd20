//! # otmgen
//!
//! Order payload generation for Oracle Transportation Management (OTM):
//! turns tabular order records into GLog XML transmissions — Sales Order
//! "Order Release" and Purchase Order "TransOrder" — and optionally posts
//! them to an integration endpoint guarded against non-dev/test targets.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Pickup timestamps use the fixed-width GLog wire format `YYYYMMDDHHMMSS`.
//!
//! ## Quick Start
//!
//! ```rust
//! use otmgen::core::*;
//!
//! let mut record = RawRecord::new();
//! record.set("order_id", "SO_09000-1128");
//! record.set("ship_from_xid", "110");
//! record.set("ship_to_xid", "10000000000013");
//! record.set("item_xid", "400000002438186");
//! record.set("qty", "1900");
//! record.set("value", "9720");
//! record.set("currency", "usd");
//!
//! let line = normalize_sales_row(&record, &RowDefaults::default()).unwrap();
//! assert_eq!(line.qty, 1900);
//! assert_eq!(line.currency.as_str(), "USD");
//!
//! let mut seq = LineSequence::new();
//! assert_eq!(seq.allocate("SO_09000-1128"), "SO_09000-1128_001");
//! assert_eq!(seq.allocate("SO_09000-1128"), "SO_09000-1128_002");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Order line types, row normalization, line-id sequencing |
//! | `transmission` | Release / TransOrder XML generation and batch building |
//! | `post` | Endpoint guard, HTTP posting, ack classification |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "transmission")]
pub mod transmission;

#[cfg(feature = "post")]
pub mod post;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
