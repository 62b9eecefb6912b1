//! Terminal logger with an optional plain-text log file.
//!
//! `info` and below go to stdout, `warn` and `error` to stderr. Every record
//! is also written to the log file, if one is attached, with ANSI escape
//! codes stripped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CliLogger {
    timestamps: AtomicBool,
    file: Mutex<Option<BufWriter<File>>>,
}

static LOGGER: CliLogger = CliLogger {
    timestamps: AtomicBool::new(false),
    file: Mutex::new(None),
};

/// Install the logger. `--quiet` keeps warnings and errors only; `--verbose`
/// adds debug records and timestamps.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    LOGGER.timestamps.store(verbose, Ordering::Relaxed);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Start copying every record into `path`, truncating it.
///
/// A file that is already attached stays attached.
pub(crate) fn attach_logfile(path: &Path) -> io::Result<bool> {
    let mut slot = LOGGER.file.lock().map_err(|_| io::Error::other("log file lock poisoned"))?;
    if slot.is_some() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    *slot = Some(BufWriter::new(File::create(path)?));
    Ok(true)
}

/// Flush the log file, if any.
pub(crate) fn flush() {
    LOGGER.flush();
}

fn format_line(level: Level, message: &str, timestamp: Option<&str>) -> String {
    let prefix = match level {
        Level::Error => "error: ",
        Level::Warn | Level::Info => "",
        Level::Debug => "debug: ",
        Level::Trace => "trace: ",
    };
    match timestamp {
        Some(ts) => format!("[{ts}] {prefix}{message}"),
        None => format!("{prefix}{message}"),
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = self
            .timestamps
            .load(Ordering::Relaxed)
            .then(|| chrono::Local::now().format("%H:%M:%S%.3f").to_string());
        let line = format_line(record.level(), &record.args().to_string(), timestamp.as_deref());

        if record.level() <= Level::Warn {
            let _ = writeln!(io::stderr().lock(), "{line}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{line}");
        }

        if let Ok(mut slot) = self.file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut slot) = self.file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = file.flush();
            }
        }
    }
}
