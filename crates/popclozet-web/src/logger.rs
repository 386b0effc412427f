//! `log` backend that writes to the browser console
//!
//! Records come out as `[carousel] DEBUG carousel: settled on slide 2`, the
//! bracket holding the last segment of the record's target.

use ::log::{Level, LevelFilter, Log, Metadata, Record};

use crate::log;

/// Level used when the page config does not name one
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= ::log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            log(&format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    let module = record.target().rsplit("::").next().unwrap_or("page");
    format!("[{}] {} {}", module, level_label(record.level()), record.args())
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Parse a level name such as `"debug"`; unknown names fall back to the default
pub fn parse_level(name: Option<&str>) -> LevelFilter {
    match name.map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => level,
        Some(Err(_)) => {
            log(&format!("[page] unknown log level, using {}", DEFAULT_LEVEL));
            DEFAULT_LEVEL
        }
        None => DEFAULT_LEVEL,
    }
}

/// Install the console logger. A second boot only adjusts the level.
pub fn init(level: LevelFilter) {
    if ::log::set_logger(&LOGGER).is_err() {
        ::log::debug!("console logger already installed");
    }
    ::log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_last_target_segment() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("signup[hero]: rejected with status 503"))
                .level(Level::Warn)
                .target("popclozet_motion::signup")
                .build(),
        );
        assert_eq!(line, "[signup] WARN signup[hero]: rejected with status 503");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(parse_level(None), DEFAULT_LEVEL);
    }
}
