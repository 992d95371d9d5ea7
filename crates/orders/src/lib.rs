//! Orders domain module: an append-only order ledger.
//!
//! Orders reference products by id only; the ledger never checks that the
//! product exists.

pub mod ledger;
pub mod order;

pub use ledger::OrderLedger;
pub use order::{NewOrder, Order, OrderId};
