//! HTTP API: routing, request/response mapping, and server wiring for the
//! catalog, order ledger and review board.

pub mod app;
pub mod middleware;
