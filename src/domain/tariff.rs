//! HS code reference table.
//!
//! The feed is loaded once at startup and never mutated afterwards. Records are validated
//! one by one; malformed ones are rejected instead of being defaulted to a zero rate.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use super::entities::TariffEntry;
use super::error::CalculationError;

/// Raw record as it appears in the feed file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TariffRecord {
    #[serde(rename = "hsCode", default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "saarcothersCN", default)]
    pub rate: Option<RawRate>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRate {
    Number(f64),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum TariffFeedError {
    #[error("tariff feed is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("tariff feed contains no valid records ({rejected} rejected)")]
    Empty { rejected: usize },
}

/// Removes every whitespace character, the canonical form used as lookup key.
pub fn normalize_code(raw: &str) -> String {
    raw.chars().filter(|ch| !ch.is_whitespace()).collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TariffTable {
    entries: Vec<TariffEntry>,
    index: HashMap<String, usize>,
}

impl TariffTable {
    /// Parses a JSON feed and validates every record. Only a feed that is not a JSON array
    /// fails as a whole; a record of the wrong shape is rejected on its own.
    pub fn from_json(json: &str) -> Result<(Self, Vec<RejectedRecord>), TariffFeedError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Self::build(values.into_iter().map(|value| {
            serde_json::from_value::<TariffRecord>(value)
                .map_err(|err| format!("malformed record: {err}"))
        }))
    }

    pub fn from_records(
        records: impl IntoIterator<Item = TariffRecord>,
    ) -> Result<(Self, Vec<RejectedRecord>), TariffFeedError> {
        Self::build(records.into_iter().map(Ok))
    }

    fn build(
        records: impl Iterator<Item = Result<TariffRecord, String>>,
    ) -> Result<(Self, Vec<RejectedRecord>), TariffFeedError> {
        let mut table = TariffTable::default();
        let mut rejected = Vec::new();

        for (index, record) in records.enumerate() {
            match record.and_then(validate_record) {
                Ok(entry) if table.index.contains_key(&entry.code) => {
                    rejected.push(RejectedRecord {
                        index,
                        reason: format!("duplicate HS code {}", entry.code),
                    });
                }
                Ok(entry) => {
                    table.index.insert(entry.code.clone(), table.entries.len());
                    table.entries.push(entry);
                }
                Err(reason) => rejected.push(RejectedRecord { index, reason }),
            }
        }

        if table.entries.is_empty() {
            return Err(TariffFeedError::Empty {
                rejected: rejected.len(),
            });
        }

        Ok((table, rejected))
    }

    /// Exact match on the whitespace-free code. No case folding and no partial matches.
    pub fn lookup(&self, raw_code: &str) -> Result<&TariffEntry, CalculationError> {
        let code = normalize_code(raw_code);
        self.index
            .get(&code)
            .map(|&idx| &self.entries[idx])
            .ok_or(CalculationError::TariffNotFound(code))
    }

    /// Entries whose code starts with the normalized prefix, in feed order.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<&TariffEntry> {
        let prefix = normalize_code(prefix);
        if prefix.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.code.starts_with(&prefix))
            .take(limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_record(record: TariffRecord) -> Result<TariffEntry, String> {
    let code = record
        .code
        .as_deref()
        .map(normalize_code)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| "missing HS code".to_string())?;

    let rate_percent = match record.rate {
        Some(RawRate::Number(value)) => value,
        Some(RawRate::Text(text)) => text
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("unparseable rate {text:?} for {code}"))?,
        None => return Err(format!("missing rate for {code}")),
    };

    if !rate_percent.is_finite() || rate_percent < 0.0 {
        return Err(format!("rate {rate_percent} for {code} is out of range"));
    }

    Ok(TariffEntry {
        code,
        description: record.description.unwrap_or_default().trim().to_string(),
        rate_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEED: &str = r#"[
        { "hsCode": "0301 95 00", "description": "Dogfish and other sharks", "saarcothersCN": "5" },
        { "hsCode": "85171300", "description": "Smartphones", "saarcothersCN": 10 },
        { "hsCode": "85171800", "description": "Other telephone sets", "saarcothersCN": "15%" }
    ]"#;

    fn table() -> TariffTable {
        TariffTable::from_json(FEED).unwrap().0
    }

    #[test]
    fn lookup_ignores_whitespace() {
        let table = table();
        let spaced = table.lookup(" 0301 95 00 ").unwrap();
        let compact = table.lookup("03019500").unwrap();
        assert_eq!(spaced, compact);
        assert_eq!(compact.rate_percent, 5.0);
        assert_eq!(compact.code, "03019500");
    }

    #[test]
    fn lookup_is_idempotent() {
        let table = table();
        let first = table.lookup("8517 1300").unwrap().clone();
        let second = table.lookup("8517 1300").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_or_empty_code_is_not_found() {
        let table = table();
        assert_eq!(
            table.lookup("99999999"),
            Err(CalculationError::TariffNotFound("99999999".into()))
        );
        assert_eq!(
            table.lookup("   "),
            Err(CalculationError::TariffNotFound(String::new()))
        );
    }

    #[test]
    fn lookup_does_not_match_prefixes() {
        assert!(table().lookup("8517").is_err());
    }

    #[test]
    fn malformed_records_are_rejected_not_zeroed() {
        let feed = r#"[
            { "hsCode": "01012100", "description": "Horses", "saarcothersCN": "abc" },
            { "hsCode": "", "description": "No code", "saarcothersCN": "5" },
            { "hsCode": "01012900", "description": "Other horses" },
            { "hsCode": "01013000", "description": "Asses", "saarcothersCN": "-1" },
            { "hsCode": "01019000", "description": "Mules", "saarcothersCN": "10" },
            { "hsCode": "0101 9000", "description": "Mules again", "saarcothersCN": "12" }
        ]"#;
        let (table, rejected) = TariffTable::from_json(feed).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("01019000").unwrap().rate_percent, 10.0);
        assert!(table.lookup("01012100").is_err());
        let indices: Vec<_> = rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn wrongly_typed_record_does_not_sink_the_feed() {
        let feed = r#"[
            { "hsCode": "03019500", "description": "Live fish", "saarcothersCN": "5" },
            { "hsCode": 85171300, "description": "Smartphones", "saarcothersCN": "10" },
            { "hsCode": "85171800", "description": { "en": "Phones" }, "saarcothersCN": "15" },
            "not a record"
        ]"#;
        let (table, rejected) = TariffTable::from_json(feed).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("03019500").unwrap().rate_percent, 5.0);
        let indices: Vec<_> = rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(rejected[0].reason.starts_with("malformed record"));
    }

    #[test]
    fn feed_without_valid_records_fails() {
        let feed = r#"[{ "hsCode": "", "saarcothersCN": "5" }]"#;
        assert!(matches!(
            TariffTable::from_json(feed),
            Err(TariffFeedError::Empty { rejected: 1 })
        ));
        assert!(matches!(
            TariffTable::from_json("{"),
            Err(TariffFeedError::Decode(_))
        ));
    }

    #[test]
    fn suggestions_follow_feed_order() {
        let table = table();
        let codes: Vec<_> = table
            .suggestions("8517 1", 5)
            .into_iter()
            .map(|entry| entry.code.as_str())
            .collect();
        assert_eq!(codes, vec!["85171300", "85171800"]);
        assert!(table.suggestions("", 5).is_empty());
        assert_eq!(table.suggestions("8", 1).len(), 1);
    }
}
