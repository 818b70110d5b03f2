//! Storefront backend core for the teashop POS
//!
//! Houses the Order Ledger: promotion resolution, discount calculation,
//! daily receipt numbering and atomic order persistence, backed by
//! PostgreSQL. A transport shell mounts this library; no HTTP lives
//! here.

pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logger;
pub mod money;
pub mod state;

pub use config::Config;
pub use error::{LedgerError, LedgerResult};
pub use ledger::{create_order, create_order_at};
pub use state::AppState;
