//! `log` backend that writes to stderr

use std::io::Write;
use std::sync::Once;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;
static TEST_SETUP: Once = Once::new();

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let stderr = std::io::stderr();
            let mut locked = stderr.lock();
            writeln!(
                locked,
                "{:5} [{:>28}:{:3}] {}",
                record.level(),
                record.target().chars().take(28).collect::<String>(),
                record.line().unwrap_or(0),
                record.args()
            )
            .unwrap_or(());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger at `level`. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Idempotent trace-level setup for tests
pub fn setup() {
    TEST_SETUP.call_once(|| {
        if init(LevelFilter::Trace).is_err() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}
