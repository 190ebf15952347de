//! `CrossingReport` — per-train timing table, written as CSV.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::debug;
use mts_core::TrainSpec;
use mts_sim::{Dispatch, TrackObserver};

use crate::{CrossingRow, OutputResult};

/// A [`TrackObserver`] that collects one [`CrossingRow`] per train.
///
/// Rows are kept in memory during the run; call
/// [`write_csv`][Self::write_csv] afterwards.
#[derive(Default)]
pub struct CrossingReport {
    rows: Mutex<BTreeMap<u32, CrossingRow>>,
}

impl CrossingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the rows so far, ordered by train id.
    pub fn rows(&self) -> Vec<CrossingRow> {
        self.lock().values().cloned().collect()
    }

    /// Write the rows to a new CSV file at `path`.
    pub fn write_csv(&self, path: &Path) -> OutputResult<()> {
        let file = File::create(path)?;
        self.write_csv_to(file)?;
        debug!("crossing report written to {}", path.display());
        Ok(())
    }

    /// Write a header plus one record per train to `writer`.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> OutputResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in self.lock().values() {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u32, CrossingRow>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, train: &TrainSpec, f: impl FnOnce(&mut CrossingRow)) {
        let mut rows = self.lock();
        let row = rows.entry(train.id.0).or_insert_with(|| CrossingRow {
            train:     train.id.0,
            direction: train.direction.label(),
            priority:  train.priority.label(),
            sequence:  None,
            rule:      None,
            ready_ms:  None,
            on_ms:     None,
            off_ms:    None,
        });
        f(row);
    }
}

fn millis(at: Duration) -> u64 {
    u64::try_from(at.as_millis()).unwrap_or(u64::MAX)
}

impl TrackObserver for CrossingReport {
    fn on_ready(&self, train: &TrainSpec, at: Duration) {
        self.update(train, |row| row.ready_ms = Some(millis(at)));
    }

    fn on_dispatch(&self, dispatch: &Dispatch) {
        let sel = dispatch.selection;
        let mut rows = self.lock();
        let sequence = rows.values().filter(|r| r.sequence.is_some()).count() as u32;
        // Ready always precedes dispatch, so the row exists.
        if let Some(row) = rows.get_mut(&sel.train.0) {
            row.sequence = Some(sequence);
            row.rule = Some(sel.rule.label());
        }
    }

    fn on_enter(&self, train: &TrainSpec, at: Duration) {
        self.update(train, |row| row.on_ms = Some(millis(at)));
    }

    fn on_exit(&self, train: &TrainSpec, at: Duration) {
        self.update(train, |row| row.off_ms = Some(millis(at)));
    }
}
