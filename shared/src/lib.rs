//! Shared types for the teashop POS
//!
//! Domain models, request payloads and the optimistic cart estimator
//! used by both the backend core and the ordering UIs.

pub mod cart;
pub mod models;
pub mod request;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Cart re-exports (for convenient access)
pub use cart::{CartTotals, estimate_totals};
