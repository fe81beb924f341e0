//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http handlers produce:
//!     → logging.rs (structured log events with request ID)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```

pub mod logging;
pub mod metrics;
