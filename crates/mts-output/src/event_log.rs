//! `EventLog<W>` — the human-readable run log.
//!
//! ```text
//! 00:00:00.3 Train  0 is ready to go West
//! 00:00:00.3 Train  0 is ON the main track going West
//! 00:00:01.0 Train  0 is OFF the main track after going West
//! ```

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::warn;
use mts_core::{Direction, TrainId, TrainSpec, format_elapsed};
use mts_sim::TrackObserver;

use crate::{OutputError, OutputResult};

/// The three event kinds written to the log.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    Ready,
    On,
    Off,
}

/// Format one log line, without the trailing newline.
pub fn format_event(at: Duration, train: TrainId, direction: Direction, event: Event) -> String {
    let ts = format_elapsed(at);
    let id = train.0;
    match event {
        Event::Ready => format!("{ts} Train {id:>2} is ready to go {direction}"),
        Event::On => format!("{ts} Train {id:>2} is ON the main track going {direction}"),
        Event::Off => format!("{ts} Train {id:>2} is OFF the main track after going {direction}"),
    }
}

struct Sink<W> {
    writer:     W,
    last_error: Option<OutputError>,
}

/// A [`TrackObserver`] that writes one line per ready/ON/OFF event.
///
/// Each line is formatted first, then written and flushed while holding the
/// log's mutex, so lines from different train threads never interleave.
///
/// Write errors are stored because observer callbacks have no return value.
/// After `sim.run()` returns, check with [`take_error`][Self::take_error].
/// Once a write has failed, later events are dropped.
pub struct EventLog<W: Write + Send> {
    sink: Mutex<Sink<W>>,
}

impl<W: Write + Send> EventLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            sink: Mutex::new(Sink { writer, last_error: None }),
        }
    }

    /// Take the first write error (if any).
    pub fn take_error(&self) -> Option<OutputError> {
        self.lock().last_error.take()
    }

    /// Unwrap the inner writer (e.g. a `Vec<u8>` in tests).
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner).writer
    }

    /// Write `event` for `train` at `at`.
    pub fn record(&self, at: Duration, train: &TrainSpec, event: Event) {
        let line = format_event(at, train.id, train.direction, event);
        let mut sink = self.lock();
        if sink.last_error.is_some() {
            return;
        }
        if let Err(e) = write_line(&mut sink.writer, &line) {
            warn!("event log write failed: {e}");
            sink.last_error = Some(e);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sink<W>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> OutputResult<()> {
    writeln!(writer, "{line}")?;
    writer.flush()?;
    Ok(())
}

impl<W: Write + Send> TrackObserver for EventLog<W> {
    fn on_ready(&self, train: &TrainSpec, at: Duration) {
        self.record(at, train, Event::Ready);
    }

    fn on_enter(&self, train: &TrainSpec, at: Duration) {
        self.record(at, train, Event::On);
    }

    fn on_exit(&self, train: &TrainSpec, at: Duration) {
        self.record(at, train, Event::Off);
    }

    fn on_sim_end(&self, _elapsed: Duration) {
        let mut sink = self.lock();
        if sink.last_error.is_none() {
            if let Err(e) = sink.writer.flush() {
                sink.last_error = Some(e.into());
            }
        }
    }
}
