//! Configuration diagnostics as seen by a host's logger.
//!
//! Lives in its own test binary: `log` allows one global logger per process,
//! so nothing else here may install one.

use block_breakout_engine::{BlockCategory, BreakoutConfig, Classifier};
use log::{Level, LevelFilter, Log, Metadata, Record};
use pretty_assertions::assert_eq;
use std::sync::Mutex;

/// Keeps every record at `Level::Warn` or above
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CapturingLogger {
    fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn overlapping_types_log_one_error_each() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let _clean = Classifier::new(BreakoutConfig::editorial());
    assert_eq!(LOGGER.take(), vec![]);

    let classifier = Classifier::new(BreakoutConfig::new(["blockquote"], ["blockquote"]));
    assert_eq!(
        LOGGER.take(),
        vec![(
            Level::Error,
            "The block `blockquote` was redundantly specified in `breakoutBlocks` as well as `doubleBreakoutBlocks`. This is probably an error.".to_string()
        )]
    );
    assert_eq!(classifier.classify("blockquote"), BlockCategory::SingleBreakout);

    let _two = Classifier::new(BreakoutConfig::new(
        ["code-block", "blockquote"],
        ["blockquote", "code-block"],
    ));
    let logged: Vec<_> = LOGGER.take().into_iter().map(|(_, message)| message).collect();
    assert_eq!(logged.len(), 2);
    assert!(logged[0].contains("`blockquote`"));
    assert!(logged[1].contains("`code-block`"));
}
