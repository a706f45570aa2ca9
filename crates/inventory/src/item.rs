use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shelfwatch_core::{Entity, InventoryError, InventoryResult, ItemId};

use crate::dates::{format_day_month_year, parse_calendar_date};

/// Field carrying the item identifier, as emitted by the upstream producer.
pub const ID_FIELD: &str = "_id";
/// Fallback identifier field.
pub const ALT_ID_FIELD: &str = "id";
pub const CUSTOMER_DATA_FIELD: &str = "customerData";
pub const EXPIRATION_FIELD: &str = "FechaVencimiento";
pub const LEAD_TIME_FIELD: &str = "DiasRetiro";
/// Sub-object holding the derived fields on enriched copies.
pub const COMPUTED_FIELD: &str = "computed";

/// One inventory record, validated just enough to be classified.
///
/// The record keeps every field it arrived with; classification only reads
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    record: Map<String, Value>,
}

impl Item {
    /// Validate a raw record. `position` is the 1-based input position, used
    /// to locate records that carry no identifier.
    pub fn from_record(position: usize, value: &Value) -> InventoryResult<Self> {
        let Value::Object(record) = value else {
            return Err(InventoryError::malformed(
                format!("item #{position}"),
                "item",
                "expected a JSON object",
            ));
        };

        let id = record
            .get(ID_FIELD)
            .and_then(ItemId::from_json)
            .or_else(|| record.get(ALT_ID_FIELD).and_then(ItemId::from_json))
            .ok_or_else(|| {
                InventoryError::malformed(
                    format!("item #{position}"),
                    ID_FIELD,
                    "missing string or numeric identifier",
                )
            })?;
        // The id is written into the `id;flag` summary, one row per line.
        let id: ItemId = id.as_str().parse().map_err(|_| {
            InventoryError::malformed(
                format!("item #{position}"),
                ID_FIELD,
                "identifier contains a line break",
            )
        })?;

        match record.get(CUSTOMER_DATA_FIELD) {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(InventoryError::malformed(
                    format!("item {id}"),
                    CUSTOMER_DATA_FIELD,
                    "expected a JSON object",
                ));
            }
            None => {
                return Err(InventoryError::malformed(
                    format!("item {id}"),
                    CUSTOMER_DATA_FIELD,
                    "missing",
                ));
            }
        }

        Ok(Self {
            id,
            record: record.clone(),
        })
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    fn customer_data(&self) -> Option<&Map<String, Value>> {
        self.record.get(CUSTOMER_DATA_FIELD).and_then(Value::as_object)
    }

    fn customer_field(&self, name: &str) -> Option<&Value> {
        self.customer_data().and_then(|data| data.get(name))
    }

    pub fn expiration_date(&self) -> InventoryResult<NaiveDate> {
        match self.customer_field(EXPIRATION_FIELD) {
            Some(Value::String(raw)) => parse_calendar_date(raw)
                .ok_or_else(|| InventoryError::invalid_expiration(self.id.clone(), raw.as_str())),
            Some(other) => Err(InventoryError::invalid_expiration(
                self.id.clone(),
                other.to_string(),
            )),
            None => Err(InventoryError::invalid_expiration(self.id.clone(), "<missing>")),
        }
    }

    pub fn lead_time(&self) -> InventoryResult<LeadTime> {
        LeadTime::from_json(&self.id, self.customer_field(LEAD_TIME_FIELD))
    }

    /// Derive the shelf-life fields against `reference`.
    pub fn assess(&self, reference: NaiveDate) -> InventoryResult<Computed> {
        let expiration = self.expiration_date()?;
        let lead_time = self.lead_time()?;

        let withdrawal = expiration
            .checked_sub_days(Days::new(lead_time.days()))
            .ok_or_else(|| {
                InventoryError::invalid_lead_time(self.id.clone(), lead_time.days().to_string())
            })?;

        let days_remaining = expiration.signed_duration_since(reference).num_days();
        let status = Status::decide(days_remaining, reference, withdrawal);

        Ok(Computed {
            days_remaining,
            withdrawal_date: withdrawal,
            formatted_expiration: format_day_month_year(expiration),
            formatted_withdrawal: format_day_month_year(withdrawal),
            status,
        })
    }

    /// Copy of this record with `computed` attached.
    ///
    /// A pre-existing `computed` field on the input is replaced in the copy.
    pub fn enrich(&self, computed: Computed) -> EnrichedItem {
        let mut record = self.record.clone();
        record.remove(COMPUTED_FIELD);
        EnrichedItem {
            id: self.id.clone(),
            record,
            computed,
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Withdrawal lead time, in whole days before expiration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LeadTime(u64);

impl LeadTime {
    pub fn days(&self) -> u64 {
        self.0
    }

    /// Interpret a `DiasRetiro` value.
    ///
    /// Missing and falsy values (`null`, `false`, `0`, `""`) mean no lead
    /// time. Integral numbers and decimal strings are accepted; anything
    /// negative, fractional or non-numeric is rejected.
    pub fn from_json(item: &ItemId, value: Option<&Value>) -> InventoryResult<Self> {
        let invalid = |v: &Value| InventoryError::invalid_lead_time(item.clone(), v.to_string());

        let Some(value) = value else {
            return Ok(Self::default());
        };

        match value {
            Value::Null | Value::Bool(false) => Ok(Self::default()),
            Value::Number(n) => {
                if let Some(days) = n.as_u64() {
                    return Ok(Self(days));
                }
                n.as_f64()
                    .and_then(whole_days)
                    .map(Self)
                    .ok_or_else(|| invalid(value))
            }
            Value::String(s) if s.trim().is_empty() => Ok(Self::default()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(whole_days)
                .map(Self)
                .ok_or_else(|| invalid(value)),
            _ => Err(invalid(value)),
        }
    }
}

fn whole_days(days: f64) -> Option<u64> {
    if days == 0.0 {
        return Some(0);
    }
    if !days.is_finite() || days < 0.0 || days.fract() != 0.0 || days > u32::MAX as f64 {
        return None;
    }
    Some(days as u64)
}

/// Shelf-life status of one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Past its expiration date.
    Expired,
    /// Withdrawal date reached but not yet expired.
    Critical,
    Normal,
}

impl Status {
    /// First match wins: expired, then withdrawal reached, then normal.
    pub fn decide(days_remaining: i64, reference: NaiveDate, withdrawal: NaiveDate) -> Self {
        if days_remaining < 0 {
            Status::Expired
        } else if reference >= withdrawal {
            Status::Critical
        } else {
            Status::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Expired => "EXPIRED",
            Status::Critical => "CRITICAL",
            Status::Normal => "NORMAL",
        }
    }
}

/// Derived shelf-life fields for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computed {
    pub days_remaining: i64,
    pub withdrawal_date: NaiveDate,
    pub formatted_expiration: String,
    pub formatted_withdrawal: String,
    pub status: Status,
}

/// A copy of an input record with its [`Computed`] fields attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedItem {
    #[serde(skip)]
    id: ItemId,
    #[serde(flatten)]
    record: Map<String, Value>,
    computed: Computed,
}

impl EnrichedItem {
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn computed(&self) -> &Computed {
        &self.computed
    }

    pub fn status(&self) -> Status {
        self.computed.status
    }
}

impl Entity for EnrichedItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
