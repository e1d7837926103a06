use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

const MAIN_CSS_PATH: &str = "/assets/main.css";
const TARIFF_FEED_PATH: &str = "/assets/hs_codes.json";

/// Returns the contents of `assets/main.css`, or an empty stylesheet if it is missing.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text(MAIN_CSS_PATH).unwrap_or_default())
        .as_str()
}

/// The HS code feed bundled with the binary.
pub fn tariff_feed() -> Option<String> {
    load_text(TARIFF_FEED_PATH)
}

fn load_text(path: &str) -> Option<String> {
    let asset = load_asset(path)?;
    match String::from_utf8(asset.into_owned()) {
        Ok(text) => Some(text),
        Err(_) => {
            tracing::error!(path, "embedded asset is not valid UTF-8");
            None
        }
    }
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let canonical = canonical_asset_path(path);
    let asset = EmbeddedAssets::get(&canonical).map(|file| file.data);
    if asset.is_none() {
        tracing::error!(path, "failed to locate embedded asset");
    }
    asset
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TariffTable;

    #[test]
    fn asset_paths_are_canonicalized() {
        assert_eq!(canonical_asset_path("/assets/main.css"), "main.css");
        assert_eq!(canonical_asset_path("hs_codes.json"), "hs_codes.json");
    }

    #[test]
    fn bundled_feed_is_valid() {
        let feed = tariff_feed().expect("bundled feed");
        let (table, rejected) = TariffTable::from_json(&feed).unwrap();
        assert!(rejected.is_empty(), "{rejected:?}");
        assert_eq!(table.lookup("0301 95 00").unwrap().rate_percent, 5.0);
    }
}
