//! Train-list loader.
//!
//! # Format
//!
//! One train per line, three whitespace-separated fields:
//!
//! ```text
//! E 3 4
//! w 6 7
//! W 2 1
//! ```
//!
//! | Field   | Meaning                                                     |
//! |---------|-------------------------------------------------------------|
//! | 1       | `E`/`W` high priority, `e`/`w` low priority                 |
//! | 2       | loading time, integer in `1..=99`                           |
//! | 3       | crossing time, integer in `1..=99`                          |
//!
//! Blank lines are skipped and do not consume an id.  Anything after the
//! third field is ignored.  Train ids are assigned in file order from 0.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use mts_core::{TrainId, TrainSpec};

use crate::{InputError, InputResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every train described in the file at `path`.
pub fn load_trains_file(path: &Path) -> InputResult<Vec<TrainSpec>> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let trains = load_trains_reader(file)?;
    debug!("loaded {} trains from {}", trains.len(), path.display());
    Ok(trains)
}

/// Like [`load_trains_file`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading stdin.
pub fn load_trains_reader<R: Read>(reader: R) -> InputResult<Vec<TrainSpec>> {
    let mut trains = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let id = TrainId::try_from(trains.len()).map_err(|_| InputError::Malformed {
            line:   i + 1,
            reason: "too many trains".into(),
        })?;
        trains.push(parse_line(&line, id, i + 1)?);
    }

    Ok(trains)
}

/// Parse one non-blank line into a [`TrainSpec`] with the given `id`.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line: &str, id: TrainId, line_no: usize) -> InputResult<TrainSpec> {
    let malformed = |reason: String| InputError::Malformed { line: line_no, reason };

    let mut fields = line.split_whitespace();
    let (Some(code), Some(load), Some(cross)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed(format!("expected `<dir> <load> <cross>`, got {:?}", line.trim())));
    };

    let mut chars = code.chars();
    let (Some(code), None) = (chars.next(), chars.next()) else {
        return Err(malformed(format!("direction must be a single character, got {code:?}")));
    };

    let load = parse_units(load).ok_or_else(|| malformed(format!("invalid loading time {load:?}")))?;
    let cross =
        parse_units(cross).ok_or_else(|| malformed(format!("invalid crossing time {cross:?}")))?;

    TrainSpec::from_code(id, code, load, cross)
        .map_err(|cause| InputError::Invalid { line: line_no, cause })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_units(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}
