//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Title shown until `/api/config` answers.
pub const APP_NAME: &str = "netdisk";

// =============================================================================
// Network Configuration
// =============================================================================

/// Prefix of every drive API endpoint (same origin).
pub const API_BASE: &str = "/api";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 15000;

/// How often a running upload is checked for progress.
pub const UPLOAD_POLL_MS: u32 = 100;

// =============================================================================
// Persisted State
// =============================================================================

/// localStorage key for the login token.
pub const TOKEN_KEY: &str = "token";

/// localStorage key for the grid/list preference.
pub const VIEW_MODE_KEY: &str = "viewMode";

/// localStorage key holding a tracing filter directive (e.g. `debug`).
pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";

/// Filter used when `LOG_LEVEL` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// Explorer Configuration
// =============================================================================

/// Delay between the last keystroke and the search request.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 4000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
