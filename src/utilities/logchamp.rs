//! joe: logchamp
//! joe: call it logchamp
//! joe: please

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::{Color, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::macros;

struct Logger<W: Write = BufWriter<File>> {
    file: Mutex<W>,
    file_failed: AtomicBool,
}

impl Logger {
    fn new(filename: &str) -> io::Result<Self> {
        Ok(Self::with_file(BufWriter::new(File::create(filename)?)))
    }
}

impl<W: Write> Logger<W> {
    fn with_file(file: W) -> Self {
        Self { file: Mutex::new(file), file_failed: AtomicBool::new(false) }
    }

    fn on_file(&self, operation: impl FnOnce(&mut W) -> io::Result<()>) {
        let result = match self.file.lock() {
            Ok(mut file) => operation(&mut *file),
            Err(_) => Err(io::Error::other("log file lock poisoned")),
        };

        if let Err(err) = result {
            self.report_file_error(&err);
        }
    }

    /// Complains on stderr the first time only, a broken log file would
    /// otherwise drown every line.
    fn report_file_error(&self, err: &io::Error) -> bool {
        let first = !self.file_failed.swap(true, Ordering::Relaxed);
        if first {
            eprintln!("cannot write log file: {err}");
        }
        first
    }
}

fn is_own_target(target: &str) -> bool {
    target.split("::").next() == Some("popup_fetch")
}

impl<W: Write + Send> Log for Logger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        is_own_target(metadata.target()) || metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = time::OffsetDateTime::now_utc()
            .format(macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .unwrap_or_default();
        let target = record.target();
        let level = record.level().as_str();
        let args = record.args();

        let color = match record.level() {
            Level::Error => Color::BrightRed,
            Level::Warn => Color::BrightYellow,
            Level::Info => Color::BrightCyan,
            Level::Debug => Color::Magenta,
            Level::Trace => Color::Green,
        };

        // stdout carries the rendered region
        eprintln!("{} {} {args}", timestamp.color(Color::BrightBlack), level.color(color));

        self.on_file(|file| writeln!(file, "{timestamp} [{target} {level}] {args}"));
    }

    fn flush(&self) {
        self.on_file(|file| file.flush());
    }
}

#[derive(Debug)]
pub enum InitError {
    LogFile(io::Error),
    AlreadySet(SetLoggerError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogFile(err) => write!(f, "cannot create log file: {err}"),
            Self::AlreadySet(err) => write!(f, "{err}"),
        }
    }
}

pub fn init(filename: &str) -> Result<(), InitError> {
    let logger = Logger::new(filename).map_err(InitError::LogFile)?;
    log::set_boxed_logger(Box::new(logger)).map_err(InitError::AlreadySet)?;
    log::set_max_level(LevelFilter::Debug);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_own_target() {
        assert!(is_own_target("popup_fetch"));
        assert!(is_own_target("popup_fetch::widget"));
        assert!(!is_own_target("reqwest::connect"));
        assert!(!is_own_target("popup_fetch_other"));
    }

    struct BrokenFile;

    impl Write for BrokenFile {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_file_errors_are_reported_once() {
        let logger = Logger::with_file(BrokenFile);

        logger.on_file(|file| writeln!(file, "first"));
        assert!(logger.file_failed.load(Ordering::Relaxed));
        assert!(!logger.report_file_error(&io::Error::other("again")));

        logger.flush();
        assert!(logger.file_failed.load(Ordering::Relaxed));
    }

    #[test]
    fn test_file_receives_lines() {
        let logger = Logger::with_file(Vec::new());

        logger.on_file(|file| writeln!(file, "2026-10-17 00:00:00 [popup_fetch INFO] ready"));
        logger.flush();

        assert!(!logger.file_failed.load(Ordering::Relaxed));
        assert_eq!(
            String::from_utf8(logger.file.lock().unwrap().clone()).unwrap(),
            "2026-10-17 00:00:00 [popup_fetch INFO] ready\n"
        );
    }
}
