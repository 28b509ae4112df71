//! Tunables of the browsing engine.

use serde::Deserialize;

/// Entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Remaining scroll distance (px) below which the next page is requested.
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 100.0;

/// Delay before reloading the listing after an upload batch.
pub const DEFAULT_RELOAD_DELAY_MS: u32 = 1000;

/// Engine configuration.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub page_size: u32,
    pub scroll_threshold_px: f64,
    pub reload_delay_ms: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
        }
    }
}

impl BrowserConfig {
    /// Page size as used for requests; never zero.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BrowserConfig = serde_json::from_str(r#"{"page_size": 20}"#).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.scroll_threshold_px, DEFAULT_SCROLL_THRESHOLD_PX);
        assert_eq!(config.reload_delay_ms, DEFAULT_RELOAD_DELAY_MS);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let config = BrowserConfig {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_page_size(), 1);
    }
}
