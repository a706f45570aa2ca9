//! Expiration classification.
//!
//! Model:
//! - `daysRemaining = expiration - reference`, in whole calendar days.
//! - `withdrawal = expiration - DiasRetiro`.
//! - Expired items (negative days remaining) go to `expired`; items whose
//!   withdrawal date has been reached go to `approaching`; the rest stay out
//!   of both buckets but still get a `false` row in the flag summary.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use shelfwatch_core::{Entity, InventoryError, InventoryResult, ItemId};

use crate::dates::parse_calendar_date;
use crate::item::{EnrichedItem, Item, Status};
use crate::summary::FlagSummary;

/// Complete result of classifying one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Withdrawal date reached, not yet expired.
    pub approaching: Vec<EnrichedItem>,
    pub expired: Vec<EnrichedItem>,
    /// Base64 of the `id;flag` table, see [`FlagSummary`].
    pub flag_summary: String,
}

impl Classification {
    pub fn decode_summary(&self) -> InventoryResult<FlagSummary> {
        FlagSummary::decode(&self.flag_summary)
    }
}

/// Classify `items` against the reference date text.
///
/// Fails with [`InventoryError::InvalidReferenceDate`] before looking at any
/// item if `reference` does not parse.
pub fn classify(items: &[Value], reference: &str) -> InventoryResult<Classification> {
    let reference_date = parse_calendar_date(reference)
        .ok_or_else(|| InventoryError::invalid_reference_date(reference))?;
    classify_at(items, reference_date)
}

/// Classify `items` against an already-parsed reference date.
///
/// The first invalid item aborts the batch; no partial result is returned.
pub fn classify_at(items: &[Value], reference: NaiveDate) -> InventoryResult<Classification> {
    let mut approaching = Vec::new();
    let mut expired = Vec::new();
    let mut ids: Vec<ItemId> = Vec::with_capacity(items.len());
    let mut flagged: HashSet<ItemId> = HashSet::new();

    for (idx, raw) in items.iter().enumerate() {
        let item = Item::from_record(idx + 1, raw)?;
        let computed = item.assess(reference)?;
        let status = computed.status;

        debug!(
            item = %item.id(),
            status = status.as_str(),
            days_remaining = computed.days_remaining,
            "classified item"
        );

        match status {
            Status::Expired => expired.push(item.enrich(computed)),
            Status::Critical => approaching.push(item.enrich(computed)),
            Status::Normal => {}
        }
        if status != Status::Normal {
            flagged.insert(item.id().clone());
        }
        ids.push(item.id().clone());
    }

    let mut summary = FlagSummary::new();
    for id in ids {
        let hit = flagged.contains(&id);
        summary.push(id, hit);
    }
    debug!(summary = %summary.to_text(), "built flag summary");

    Ok(Classification {
        approaching,
        expired,
        flag_summary: summary.encode(),
    })
}
