//! Plain data row types written by the crossing report.

use serde::Serialize;

/// One train's passage through the run, times in ms since start.
///
/// Fields are `None` for stages the train never reached (an aborted run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossingRow {
    pub train:     u32,
    pub direction: &'static str,
    pub priority:  &'static str,
    /// 0-based position in dispatch order.
    pub sequence:  Option<u32>,
    pub rule:      Option<&'static str>,
    pub ready_ms:  Option<u64>,
    pub on_ms:     Option<u64>,
    pub off_ms:    Option<u64>,
}

impl CrossingRow {
    /// Time spent queued, once the train got the track.
    pub fn wait_ms(&self) -> Option<u64> {
        Some(self.on_ms?.saturating_sub(self.ready_ms?))
    }
}
