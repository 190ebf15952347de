//! `mts-output` — run output for the mts track scheduler.
//!
//! Two [`mts_sim::TrackObserver`] implementations are provided:
//!
//! | Type             | Output                                                 |
//! |------------------|--------------------------------------------------------|
//! | `EventLog<W>`    | one text line per ready/ON/OFF event, to any `Write`   |
//! | `CrossingReport` | one CSV row per train with ready/on/off times in ms    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use mts_output::{CrossingReport, EventLog};
//!
//! let log = EventLog::new(File::create("output.txt")?);
//! let report = CrossingReport::new();
//! sim.run(&(&log, &report))?;
//! if let Some(e) = log.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! report.write_csv(Path::new("crossings.csv"))?;
//! ```

pub mod error;
pub mod event_log;
pub mod report;
pub mod row;


pub use error::{OutputError, OutputResult};
pub use event_log::{Event, EventLog, format_event};
pub use report::CrossingReport;
pub use row::CrossingRow;
