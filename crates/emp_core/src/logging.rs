//! Process-wide logger for the employee records server.
//!
//! Log lines go to size-rotated files under an absolute directory; warnings
//! and errors are echoed to stderr. Messages use `event=... module=...
//! status=...` pairs and never carry employee personal data (names, mail
//! addresses, photos).
//!
//! The logger can be started once. Asking again with identical settings is a
//! no-op; asking with different settings fails and leaves the running logger
//! untouched.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::panic::PanicHookInfo;
use std::path::PathBuf;
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "emp_management";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    dir: PathBuf,
}

impl LogSettings {
    fn parse(level: &str, dir: &str) -> Result<Self, String> {
        let level = match LevelFilter::from_str(level.trim()) {
            Ok(LevelFilter::Off) | Err(_) => {
                return Err(format!(
                    "log level `{}` is not one of trace, debug, info, warn, error",
                    level.trim()
                ))
            }
            Ok(filter) => filter,
        };

        let dir = PathBuf::from(dir.trim());
        if dir.as_os_str().is_empty() {
            return Err("log directory is empty".to_string());
        }
        if dir.is_relative() {
            return Err(format!(
                "log directory `{}` is not an absolute path",
                dir.display()
            ));
        }

        Ok(Self { level, dir })
    }

    fn level_name(&self) -> &'static str {
        match self.level {
            LevelFilter::Trace => "trace",
            LevelFilter::Debug => "debug",
            LevelFilter::Info => "info",
            LevelFilter::Warn => "warn",
            LevelFilter::Error | LevelFilter::Off => "error",
        }
    }

    fn conflict_with(&self, running: &LogSettings) -> Option<String> {
        if self.dir != running.dir {
            return Some(format!(
                "logger already writes to `{}`, cannot move it to `{}`",
                running.dir.display(),
                self.dir.display()
            ));
        }
        if self.level != running.level {
            return Some(format!(
                "logger already runs at `{}`, cannot change it to `{}`",
                running.level_name(),
                self.level_name()
            ));
        }
        None
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts file logging at `level` under the absolute directory `log_dir`.
///
/// # Errors
/// - `level` is not `trace`, `debug`, `info`, `warn` or `error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - A logger is already running with other settings.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;

    match requested.conflict_with(&active.settings) {
        Some(conflict) => Err(conflict),
        None => Ok(()),
    }
}

/// `(level, log_dir)` of the running logger, `None` before [`init_logging`].
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.settings.level_name(), active.settings.dir.clone()))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.dir).map_err(|err| {
        format!(
            "cannot create log directory `{}`: {err}",
            settings.dir.display()
        )
    })?;

    let files = FileSpec::default()
        .directory(settings.dir.as_path())
        .basename(LOG_FILE_BASENAME);
    let handle = Logger::try_with_str(settings.level_name())
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level_name()))?
        .log_to_file(files)
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .duplicate_to_stderr(Duplicate::Warn)
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    if PANIC_HOOK.set(()).is_ok() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            error!(
                "event=panic module=logging status=error location={} payload={}",
                panic_location(info),
                one_line(&panic_payload(info), PANIC_PAYLOAD_LIMIT)
            );
            previous(info);
        }));
    }

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        settings.level_name(),
        settings.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn panic_location(info: &PanicHookInfo<'_>) -> String {
    info.location()
        .map_or_else(|| "unknown".to_string(), |at| format!("{}:{}", at.file(), at.line()))
}

fn panic_payload(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<non-string payload>".to_string())
}

/// Flattens `value` onto one line and caps it at `limit` characters.
fn one_line(value: &str, limit: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut capped: String = flat.chars().take(limit).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, LogSettings};
    use log::LevelFilter;

    fn temp_dir_str() -> String {
        std::env::temp_dir()
            .to_str()
            .expect("temp dir should be valid UTF-8")
            .to_string()
    }

    #[test]
    fn level_names_are_case_insensitive() {
        let dir = temp_dir_str();
        let settings = LogSettings::parse(" WARN ", &dir).expect("WARN should parse");
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(settings.level_name(), "warn");

        assert!(LogSettings::parse("verbose", &dir).is_err());
        assert!(LogSettings::parse("off", &dir).is_err());
    }

    #[test]
    fn log_dir_must_be_absolute() {
        let error = LogSettings::parse("info", "logs/dev").expect_err("relative dir");
        assert!(error.contains("absolute"));
        assert!(LogSettings::parse("info", "  ").is_err());
    }

    #[test]
    fn conflicts_name_the_running_value() {
        let dir = temp_dir_str();
        let running = LogSettings::parse("info", &dir).expect("settings should parse");
        let louder = LogSettings::parse("debug", &dir).expect("settings should parse");

        assert!(running.conflict_with(&running).is_none());
        let conflict = louder
            .conflict_with(&running)
            .expect("level change should conflict");
        assert!(conflict.contains("`info`"));
    }

    #[test]
    fn one_line_flattens_and_caps() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn second_init_must_match_the_first() {
        let base = tempfile::tempdir().expect("temp dir should be created");
        let log_dir = base.path().join("logs");
        let other_dir = base.path().join("other");
        let log_dir_str = log_dir.to_str().expect("temp dir should be valid UTF-8");
        let other_dir_str = other_dir.to_str().expect("temp dir should be valid UTF-8");

        init_logging("info", log_dir_str).expect("first init should succeed");
        init_logging("INFO", log_dir_str).expect("same settings should be accepted");

        let level_error = init_logging("debug", log_dir_str).expect_err("level conflict");
        assert!(level_error.contains("cannot change"));

        let dir_error = init_logging("info", other_dir_str).expect_err("directory conflict");
        assert!(dir_error.contains("cannot move"));

        let (level, dir) = logging_status().expect("logger should be running");
        assert_eq!(level, "info");
        assert_eq!(dir, log_dir);
    }
}
