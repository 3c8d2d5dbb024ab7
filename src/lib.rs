//! Meridian decodes IANA TZif binary time zone data and POSIX TZ strings,
//! resolves UTC/local conversions against them, and does calendar arithmetic
//! across the full signed 64-bit Unix timestamp range.
//!
//! ### Features
//! - **TZif** parsing (RFC 8536, versions 2 and 3)
//! - **POSIX TZ string** parsing, both as a TZif footer and standalone
//! - **Offset resolution** for any instant, explicit history or projected
//!   recurrence rule
//! - **Calendar arithmetic** correct far outside the range most `time_t`
//!   implementations bother with
//! - **Serde** serializing and deserializing (with feature flag `serde`)
//!
//! ### Example
//! ```rust
//! use meridian::{Region, Time};
//!
//! let berlin = Region::from_posix_tz("CET-1CEST,M3.5.0,M10.5.0/3", "Europe/Berlin").unwrap();
//! let t = Time::from_unix(1_719_835_200).with_region(&berlin);
//!
//! assert_eq!(t.shortname(), "CEST");
//! assert!(t.is_dst());
//! ```
//!
//! To load a region from the system `zoneinfo` tree instead, see
//! [`loader::load_by_name`].

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calendar;
mod errors;
pub mod loader;
mod posix;
mod region;
mod resolver;
#[cfg(feature = "serde")]
mod serde_impl;
mod time;
mod tzif;

pub use self::calendar::{Date, Hms};
pub use self::errors::TzError;
pub use self::posix::{parse_posix_tz, RecurrenceRule, TransitionDate};
pub use self::region::{Record, Region};
pub use self::time::Time;
