//! Posting generated payloads to OTM — endpoint guard, HTTP send, ack
//! classification.
//!
//! The guard is the only thing standing between a generated payload and a
//! production OTM instance, so every send funnels through it.
//!
//! # Example
//!
//! ```ignore
//! use otmgen::post::*;
//!
//! // Pure check, no network
//! assert!(check_endpoint("https://pod-dev.example.com/GC3/servlet").allowed);
//!
//! // Guarded post (async, requires network)
//! let target = PostTarget::new("https://pod-dev.example.com/GC3/servlet", "user", "pass");
//! let ack_body = post_payload(&target, &doc.xml).await?;
//! let ack = classify_ack(&ack_body);
//! assert_eq!(ack.status, AckStatus::Ok);
//! ```

mod ack;
mod guard;
mod send;

pub use ack::{Ack, AckStatus, classify_ack};
pub use guard::{EndpointDecision, REASON_NOT_NONPROD, check_endpoint};
pub use send::{PostError, PostTarget, post_payload};
