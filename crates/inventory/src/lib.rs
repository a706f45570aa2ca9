//! Shelf-life classification for inventory batches.
//!
//! This crate contains the business rules only, implemented as deterministic
//! pure functions (no IO, no HTTP, no storage):
//! - [`normalize`] turns any accepted payload shape into an ordered list of records;
//! - [`classify`] buckets those records by expiration status against a reference date;
//! - [`evaluate`] runs both for one request.

pub mod batch;
pub mod classify;
pub mod dates;
pub mod delimited;
pub mod item;
pub mod normalize;
pub mod payload;
pub mod summary;

pub use batch::evaluate;
pub use classify::{classify, classify_at, Classification};
pub use item::{Computed, EnrichedItem, Item, LeadTime, Status};
pub use normalize::normalize;
pub use payload::Payload;
pub use summary::FlagSummary;
