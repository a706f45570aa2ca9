//! HTTP transport for shelf-life classification: server wiring, routing and
//! request/response mapping. All business rules live in `shelfwatch-inventory`.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
