//! Request normalization and validation.
//!
//! # Data Flow
//! ```text
//! request body
//!     → payload.rs (decode to a JSON object, else MalformedBody)
//!     → action_signal.rs (string → "0101…")
//!     → row_data.rs (string or value → JSON text)
//!     → scalar.rs (14 optional numeric parameters)
//!     → request.rs (assemble CanonicalRequest or ValidationFailure)
//! ```
//!
//! # Design Decisions
//! - Every function here is pure; nothing is cached between requests
//! - Unreadable optional parameters read as absent unless strict mode is on
//! - Unknown payload keys are ignored, never forwarded

pub mod action_signal;
pub mod error;
pub mod payload;
pub mod request;
pub mod row_data;
pub mod scalar;

pub use action_signal::normalize_action_signal;
pub use error::ValidationFailure;
pub use payload::{decode_payload, RawPayload};
pub use request::{normalize, CanonicalRequest, Parameters, RequestNormalizer};
pub use row_data::normalize_row_data;
pub use scalar::{coerce_float, coerce_int};
