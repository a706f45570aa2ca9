//! One request's worth of work: normalize, then classify.

use tracing::info;

use shelfwatch_core::InventoryResult;

use crate::classify::{classify, Classification};
use crate::normalize::normalize;
use crate::payload::Payload;

/// Normalize `payload` and classify it against `reference`.
///
/// Pure apart from logging; concurrent calls share nothing.
pub fn evaluate(payload: Payload, reference: &str) -> InventoryResult<Classification> {
    let shape = payload.shape();
    let items = normalize(payload)?;
    let result = classify(&items, reference)?;

    info!(
        shape,
        reference,
        items = items.len(),
        approaching = result.approaching.len(),
        expired = result.expired.len(),
        "classified product batch"
    );

    Ok(result)
}
