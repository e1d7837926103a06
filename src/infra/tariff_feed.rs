//! Loads the HS code reference table at startup.

use std::{fs, path::Path};

use thiserror::Error;

use crate::domain::tariff::RejectedRecord;
use crate::domain::{TariffFeedError, TariffTable};
use crate::util::{assets, persistence};

#[derive(Debug, Error)]
pub enum TariffLoadError {
    #[error("bundled tariff feed is missing")]
    MissingBundledFeed,
    #[error(transparent)]
    Feed(#[from] TariffFeedError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TariffSource {
    Bundled,
    Override,
}

/// Prefers the override file in the config directory, falling back to the bundled feed
/// when the override is absent or unusable.
pub fn load_tariff_table() -> Result<(TariffTable, TariffSource), TariffLoadError> {
    if let Some(path) = persistence::tariff_override_file().filter(|path| path.exists()) {
        match load_file(&path) {
            Ok(table) => return Ok((table, TariffSource::Override)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring tariff override")
            }
        }
    }

    let feed = assets::tariff_feed().ok_or(TariffLoadError::MissingBundledFeed)?;
    let table = parse_feed(&feed, "bundled")?;
    Ok((table, TariffSource::Bundled))
}

fn load_file(path: &Path) -> Result<TariffTable, String> {
    let content = fs::read_to_string(path).map_err(|err| err.to_string())?;
    parse_feed(&content, &path.display().to_string()).map_err(|err| err.to_string())
}

fn parse_feed(json: &str, origin: &str) -> Result<TariffTable, TariffFeedError> {
    let (table, rejected) = TariffTable::from_json(json)?;
    log_rejections(origin, &rejected);
    tracing::info!(origin, entries = table.len(), "loaded tariff table");
    Ok(table)
}

fn log_rejections(origin: &str, rejected: &[RejectedRecord]) {
    for record in rejected {
        tracing::warn!(origin, index = record.index, reason = %record.reason, "rejected tariff record");
    }
}
