//! The Order Ledger
//!
//! Turns a submitted cart into a durable financial record: resolves the
//! promotion against "now", recomputes discount and totals server-side,
//! claims the daily receipt number and writes header plus line items as
//! one transaction.

pub mod discount;
pub mod order_number;
pub mod resolver;
pub mod writer;

pub use discount::compute_discount;
pub use resolver::resolve;
pub use writer::{create_order, create_order_at};
