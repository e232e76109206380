//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Most verbose level emitted by this build.
#[must_use]
pub const fn max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn format_record(record: &Record<'_>) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        #[cfg(target_arch = "wasm32")]
        {
            match record.level() {
                Level::Error => gloo::console::error!(line),
                Level::Warn => gloo::console::warn!(line),
                Level::Info => gloo::console::info!(line),
                Level::Debug | Level::Trace => gloo::console::debug!(line),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if record.level() <= Level::Warn {
                eprintln!("{line}");
            }
        }
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend.
///
/// # Errors
///
/// Returns an error when another logger was installed first.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(max_level()))
}
