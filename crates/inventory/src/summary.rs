//! Per-item flag summary, shipped as one base64 string.
//!
//! Decoded, the summary is a small `;`-separated table:
//!
//! ```text
//! id;flag
//! A1;true
//! B2;false
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use shelfwatch_core::{InventoryError, InventoryResult, ItemId};

pub const HEADER: &str = "id;flag";

/// One `(id, flag)` row per input item, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSummary {
    rows: Vec<(ItemId, bool)>,
}

impl FlagSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ItemId, flagged: bool) {
        self.rows.push((id, flagged));
    }

    pub fn rows(&self) -> &[(ItemId, bool)] {
        &self.rows
    }

    /// The plain-text table, rows joined by `\n` with no trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = String::from(HEADER);
        for (id, flagged) in &self.rows {
            text.push('\n');
            text.push_str(id.as_str());
            text.push(';');
            text.push_str(if *flagged { "true" } else { "false" });
        }
        text
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_text())
    }

    /// Reverse of [`FlagSummary::encode`].
    pub fn decode(encoded: &str) -> InventoryResult<Self> {
        let bad = |reason: String| InventoryError::malformed("summary", "flagSummary", reason);

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| bad(format!("invalid base64: {e}")))?;
        let text = String::from_utf8(bytes).map_err(|e| bad(format!("invalid utf-8: {e}")))?;

        let mut lines = text.split('\n');
        match lines.next() {
            Some(HEADER) => {}
            other => return Err(bad(format!("expected header {HEADER:?}, found {other:?}"))),
        }

        let mut summary = Self::new();
        for (idx, line) in lines.enumerate() {
            // Identifiers may themselves contain `;`; the flag never does.
            let (id, flag) = line
                .rsplit_once(';')
                .ok_or_else(|| bad(format!("row {}: missing `;`", idx + 1)))?;
            let flagged = match flag {
                "true" => true,
                "false" => false,
                other => return Err(bad(format!("row {}: invalid flag {other:?}", idx + 1))),
            };
            summary.push(id.parse()?, flagged);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlagSummary {
        let mut s = FlagSummary::new();
        s.push(ItemId::new("A1"), true);
        s.push(ItemId::new("B2"), false);
        s
    }

    #[test]
    fn text_layout_matches_consumers() {
        assert_eq!(sample().to_text(), "id;flag\nA1;true\nB2;false");
        assert_eq!(FlagSummary::new().to_text(), "id;flag");
    }

    #[test]
    fn encodes_with_padded_standard_alphabet() {
        assert_eq!(FlagSummary::new().encode(), "aWQ7ZmxhZw==");
    }

    #[test]
    fn decode_reverses_encode() {
        assert_eq!(FlagSummary::decode(&sample().encode()).unwrap(), sample());

        let mut odd = FlagSummary::new();
        odd.push(ItemId::new("lot;7"), true);
        assert_eq!(FlagSummary::decode(&odd.encode()).unwrap(), odd);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(FlagSummary::decode("***").is_err());
        assert!(FlagSummary::decode(&STANDARD.encode("id,flag\nA1,true")).is_err());
        assert!(FlagSummary::decode(&STANDARD.encode("id;flag\nA1;maybe")).is_err());
        assert!(FlagSummary::decode(&STANDARD.encode("id;flag\nA1")).is_err());
    }
}
