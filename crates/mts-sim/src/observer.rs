//! Observer trait for the event log and other run recorders.

use std::time::Duration;

use mts_core::TrainSpec;

use crate::Dispatch;

/// Callbacks invoked from the train and dispatcher threads.
///
/// Every method may be called concurrently from several threads, so
/// implementors take `&self` and do their own locking.  `on_ready`,
/// `on_enter` and `on_exit` are called without the scheduling lock held;
/// `on_dispatch` is called with it held and must not block for long.
///
/// All methods have default no-op implementations.
///
/// # Example: count crossings
///
/// ```rust,ignore
/// struct Crossings(AtomicUsize);
///
/// impl TrackObserver for Crossings {
///     fn on_exit(&self, _train: &TrainSpec, _at: Duration) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait TrackObserver: Send + Sync {
    /// A train finished loading and is about to queue.
    fn on_ready(&self, _train: &TrainSpec, _at: Duration) {}

    /// The dispatcher gave the track to a train.
    fn on_dispatch(&self, _dispatch: &Dispatch) {}

    /// A train is on the main track.
    fn on_enter(&self, _train: &TrainSpec, _at: Duration) {}

    /// A train left the main track.
    fn on_exit(&self, _train: &TrainSpec, _at: Duration) {}

    /// Called once after every thread has been joined, whether or not the run
    /// succeeded.
    fn on_sim_end(&self, _elapsed: Duration) {}
}

/// A [`TrackObserver`] that does nothing.
pub struct NoopObserver;

impl TrackObserver for NoopObserver {}

/// Fan every callback out to both observers, first `A` then `B`.
impl<A: TrackObserver, B: TrackObserver> TrackObserver for (A, B) {
    fn on_ready(&self, train: &TrainSpec, at: Duration) {
        self.0.on_ready(train, at);
        self.1.on_ready(train, at);
    }

    fn on_dispatch(&self, dispatch: &Dispatch) {
        self.0.on_dispatch(dispatch);
        self.1.on_dispatch(dispatch);
    }

    fn on_enter(&self, train: &TrainSpec, at: Duration) {
        self.0.on_enter(train, at);
        self.1.on_enter(train, at);
    }

    fn on_exit(&self, train: &TrainSpec, at: Duration) {
        self.0.on_exit(train, at);
        self.1.on_exit(train, at);
    }

    fn on_sim_end(&self, elapsed: Duration) {
        self.0.on_sim_end(elapsed);
        self.1.on_sim_end(elapsed);
    }
}

impl<T: TrackObserver + ?Sized> TrackObserver for &T {
    fn on_ready(&self, train: &TrainSpec, at: Duration) {
        (**self).on_ready(train, at);
    }

    fn on_dispatch(&self, dispatch: &Dispatch) {
        (**self).on_dispatch(dispatch);
    }

    fn on_enter(&self, train: &TrainSpec, at: Duration) {
        (**self).on_enter(train, at);
    }

    fn on_exit(&self, train: &TrainSpec, at: Duration) {
        (**self).on_exit(train, at);
    }

    fn on_sim_end(&self, elapsed: Duration) {
        (**self).on_sim_end(elapsed);
    }
}
