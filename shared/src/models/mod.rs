//! Data models
//!
//! Shared between the backend core and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod menu_item;
pub mod order;
pub mod promotion;

// Re-exports
pub use menu_item::*;
pub use order::*;
pub use promotion::*;
