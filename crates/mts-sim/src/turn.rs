//! One-shot per-train turn signal.
//!
//! Each train owns a bounded(1) channel.  The dispatcher puts `Granted` in
//! the slot while holding the scheduling lock; the train takes it out after
//! releasing the lock.  Because the slot buffers the message, a grant sent
//! before the train starts waiting is not lost, and there is no flag to
//! re-check on wakeup.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::trace;

/// What a waiting train is told.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Turn {
    /// The track is yours.
    Granted,
    /// The run was aborted; do not cross.
    Revoked,
}

pub struct TurnSignal {
    tx: Sender<Turn>,
    rx: Receiver<Turn>,
}

impl TurnSignal {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    /// Give the owning train the track.
    ///
    /// Returns `false` if an earlier turn is still unconsumed, which means the
    /// same train was selected twice.
    pub fn grant(&self) -> bool {
        self.tx.try_send(Turn::Granted).is_ok()
    }

    /// Tell the owning train to give up.  A pending grant wins: the train
    /// already selected still crosses.
    pub fn revoke(&self) {
        if let Err(TrySendError::Full(_)) = self.tx.try_send(Turn::Revoked) {
            trace!("revoke ignored: a turn is already pending");
        }
    }

    /// Block until a turn arrives.
    pub fn wait(&self) -> Turn {
        self.rx.recv().unwrap_or(Turn::Revoked)
    }

    /// `true` if a turn is sitting in the slot.
    pub fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

impl Default for TurnSignal {
    fn default() -> Self {
        Self::new()
    }
}
