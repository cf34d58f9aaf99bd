//! Platform-agnostic types for environmental health and safety readings.
//!
//! This crate provides shared types that can be used by both native
//! (ehs-core, ehs-service, ehs-cli) and WebAssembly (ehs-wasm) builds.
//!
//! # Features
//!
//! - Reading sets and the recommendation they produce
//! - The [`Status`] severity scale with its display attributes
//! - Personal health profiles and their oxygen limits
//! - Error types for parsing
//!
//! # Example
//!
//! ```
//! use ehs_types::{Readings, Recommendation, Status};
//!
//! let readings = Readings::new(80.0, 35.0).with_oxygen(20.5);
//! assert_eq!(readings.oxygen_level, Some(20.5));
//!
//! let safe = Recommendation::safe();
//! assert_eq!(safe.status, Status::Safe);
//! assert_eq!(safe.status.label(), "Status: SAFE");
//! ```

pub mod error;
pub mod profile;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use profile::{Condition, HealthProfile};
pub use types::{Readings, Recommendation, SAFE_PRIMARY_ACTION, SAFE_SECONDARY_ACTION, Status};
