//! Tracing setup for the browser.
//!
//! Events are formatted by `tracing-subscriber` and written to the devtools
//! console, one `console.*` call per event. The filter comes from the
//! `LOG_LEVEL` localStorage key (any `EnvFilter` directive), so verbose logs
//! can be switched on in production without a rebuild.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::storage;
use crate::config::DEFAULT_LOG_FILTER;

/// Buffers one formatted event and flushes it to the console on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }

        let line: wasm_bindgen::JsValue = line.into();
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// [`MakeWriter`] routing each event to the console method of its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Build the filter from localStorage, falling back to [`DEFAULT_LOG_FILTER`].
fn env_filter() -> EnvFilter {
    storage::log_level()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(ConsoleMakeWriter),
        )
        .try_init();
}
