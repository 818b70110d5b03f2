//! Database access layer
//!
//! Helpers that run inside the order transaction take
//! `impl sqlx::Executor`, so the same function works against the pool or
//! a live transaction.

pub mod menu;
pub mod orders;
pub mod promotions;
