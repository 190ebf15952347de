//! Unit tests for mts-dispatch.

use mts_core::{Direction, Priority, TrainId};

use crate::{
    DispatchError, DispatchPolicy, DispatchRule, FairnessPolicy, ReadyQueue, ReadyQueues,
    Selection, TrackState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

use Direction::{East, West};
use Priority::{High, Low};

/// Track state after completing crossings in `dirs`, in order.
fn track_after(dirs: &[Direction]) -> TrackState {
    let mut track = TrackState::new();
    for (i, &d) in dirs.iter().enumerate() {
        let t = TrainId(1_000 + i as u32);
        track.occupy(t).unwrap();
        track.release(t, d).unwrap();
    }
    track
}

/// Drain `queues` by repeatedly selecting and immediately crossing.
fn drain(queues: &mut ReadyQueues, track: &mut TrackState) -> Vec<Selection> {
    let mut out = Vec::new();
    while let Some(s) = FairnessPolicy.select(queues, track) {
        track.occupy(s.train).unwrap();
        track.release(s.train, s.direction).unwrap();
        out.push(s);
    }
    out
}

fn ids(selections: &[Selection]) -> Vec<u32> {
    selections.iter().map(|s| s.train.0).collect()
}

// ── ReadyQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ready_queue {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut q = ReadyQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.peek(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn orders_by_ready_time() {
        let mut q = ReadyQueue::new();
        q.push(TrainId(0), 300);
        q.push(TrainId(1), 100);
        q.push(TrainId(2), 200);
        assert_eq!(q.pop(), Some(TrainId(1)));
        assert_eq!(q.pop(), Some(TrainId(2)));
        assert_eq!(q.pop(), Some(TrainId(0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn ties_broken_by_lower_id() {
        let mut q = ReadyQueue::new();
        q.push(TrainId(9), 50);
        q.push(TrainId(3), 50);
        q.push(TrainId(5), 50);
        let order: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|t| t.0).collect();
        assert_eq!(order, vec![3, 5, 9]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = ReadyQueue::new();
        q.push(TrainId(4), 10);
        let head = q.peek().unwrap();
        assert_eq!((head.train, head.ready_ns), (TrainId(4), 10));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn duplicate_entry_rejected() {
        let mut q = ReadyQueue::new();
        assert!(q.push(TrainId(1), 10));
        assert!(!q.push(TrainId(1), 10));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn same_train_at_new_time_rejected() {
        let mut q = ReadyQueue::new();
        assert!(q.push(TrainId(0), 5));
        assert!(!q.push(TrainId(0), 6));
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop(), Some(TrainId(0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn train_can_requeue_after_pop() {
        let mut q = ReadyQueue::new();
        q.push(TrainId(2), 5);
        assert!(q.contains(TrainId(2)));
        assert_eq!(q.pop(), Some(TrainId(2)));
        assert!(!q.contains(TrainId(2)));
        assert!(q.push(TrainId(2), 9));
    }

    #[test]
    fn same_train_in_two_lanes_rejected() {
        let mut qs = ReadyQueues::new();
        assert!(qs.push(East, High, TrainId(7), 1));
        assert!(!qs.push(West, Low, TrainId(7), 2));
        assert!(!qs.push(East, High, TrainId(7), 3));
        assert_eq!(qs.len(), 1);
        assert!(qs.contains(TrainId(7)));
    }

    #[test]
    fn each_entry_popped_once() {
        let mut q = ReadyQueue::new();
        for i in 0..50u32 {
            q.push(TrainId(i), u64::from(i % 7));
        }
        let mut seen: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|t| t.0).collect();
        assert_eq!(seen.len(), 50);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn lanes_are_independent() {
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 1);
        qs.push(West, Low, TrainId(1), 1);
        assert_eq!(qs.len(), 2);
        assert!(qs.has_ready(East));
        assert!(qs.has_ready(West));
        assert!(qs.lane(East, Low).is_empty());
        assert!(qs.lane(West, High).is_empty());
        assert_eq!(qs.lane_mut(West, Low).pop(), Some(TrainId(1)));
        assert!(!qs.has_ready(West));
    }
}

// ── TrackState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod track {
    use super::*;

    #[test]
    fn starts_free_and_uncrossed() {
        let t = TrackState::new();
        assert!(t.is_free());
        assert!(!t.has_ever_crossed());
        assert_eq!(t.last_direction(), None);
        assert_eq!(t.consecutive(), 0);
        assert_eq!(t.forced_direction(), None);
    }

    #[test]
    fn single_holder() {
        let mut t = TrackState::new();
        t.occupy(TrainId(1)).unwrap();
        assert_eq!(
            t.occupy(TrainId(2)),
            Err(DispatchError::TrackOccupied { holder: TrainId(1), requested: TrainId(2) })
        );
        assert_eq!(t.occupant(), Some(TrainId(1)));
    }

    #[test]
    fn only_holder_may_release() {
        let mut t = TrackState::new();
        t.occupy(TrainId(1)).unwrap();
        assert!(matches!(
            t.release(TrainId(2), East),
            Err(DispatchError::NotOnTrack { train: TrainId(2), holder: Some(TrainId(1)) })
        ));
        assert!(!t.is_free());
        t.release(TrainId(1), East).unwrap();
        assert!(t.is_free());
    }

    #[test]
    fn streak_increments_and_resets() {
        let t = track_after(&[West, West, West]);
        assert_eq!(t.last_direction(), Some(West));
        assert_eq!(t.consecutive(), 3);
        assert_eq!(t.forced_direction(), Some(East));

        let t = track_after(&[West, West, East]);
        assert_eq!(t.last_direction(), Some(East));
        assert_eq!(t.consecutive(), 1);
        assert_eq!(t.forced_direction(), None);
    }

    #[test]
    fn first_crossing_sets_streak_to_one() {
        let t = track_after(&[East]);
        assert!(t.has_ever_crossed());
        assert_eq!(t.consecutive(), 1);
        assert_eq!(t.crossings(), 1);
    }

    #[test]
    fn streak_limit_is_two() {
        assert_eq!(track_after(&[East]).forced_direction(), None);
        assert_eq!(track_after(&[East, East]).forced_direction(), Some(West));
    }
}

// ── FairnessPolicy ────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use super::*;

    #[test]
    fn nothing_ready_selects_nothing() {
        let mut qs = ReadyQueues::new();
        assert_eq!(FairnessPolicy.select(&mut qs, &TrackState::new()), None);
        assert_eq!(FairnessPolicy.select(&mut qs, &track_after(&[West, West])), None);
    }

    #[test]
    fn opening_bias_prefers_west() {
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 1);
        qs.push(West, Low, TrainId(1), 5);
        let s = FairnessPolicy.select(&mut qs, &TrackState::new()).unwrap();
        assert_eq!(s.train, TrainId(1));
        assert_eq!(s.rule, DispatchRule::OpeningBias);
    }

    #[test]
    fn opening_bias_prefers_west_high_over_west_low() {
        let mut qs = ReadyQueues::new();
        qs.push(West, Low, TrainId(0), 1);
        qs.push(West, High, TrainId(1), 9);
        let s = FairnessPolicy.select(&mut qs, &TrackState::new()).unwrap();
        assert_eq!(s.train, TrainId(1));
    }

    #[test]
    fn opening_without_west_falls_back_to_priority() {
        let mut qs = ReadyQueues::new();
        qs.push(East, Low, TrainId(0), 1);
        qs.push(East, High, TrainId(1), 9);
        let s = FairnessPolicy.select(&mut qs, &TrackState::new()).unwrap();
        assert_eq!(s.train, TrainId(1));
        assert_eq!(s.rule, DispatchRule::Priority);
    }

    #[test]
    fn opening_bias_only_applies_once() {
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 1);
        qs.push(West, High, TrainId(1), 5);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[East])).unwrap();
        assert_eq!(s.train, TrainId(0));
        assert_eq!(s.rule, DispatchRule::Priority);
    }

    #[test]
    fn high_beats_earlier_low() {
        let mut qs = ReadyQueues::new();
        qs.push(East, Low, TrainId(0), 1);
        qs.push(East, High, TrainId(1), 100);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West])).unwrap();
        assert_eq!(s.train, TrainId(1));
    }

    #[test]
    fn same_priority_earlier_ready_wins_across_directions() {
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 20);
        qs.push(West, High, TrainId(1), 10);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[East])).unwrap();
        assert_eq!(s.train, TrainId(1));
    }

    #[test]
    fn same_priority_same_time_lower_id_wins() {
        let mut qs = ReadyQueues::new();
        qs.push(West, Low, TrainId(4), 10);
        qs.push(East, Low, TrainId(2), 10);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West])).unwrap();
        assert_eq!(s.train, TrainId(2));

        let mut qs = ReadyQueues::new();
        qs.push(West, Low, TrainId(1), 10);
        qs.push(East, Low, TrainId(2), 10);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West])).unwrap();
        assert_eq!(s.train, TrainId(1));
    }

    #[test]
    fn streak_forces_opposite_regardless_of_priority() {
        let mut qs = ReadyQueues::new();
        qs.push(West, High, TrainId(0), 1);
        qs.push(East, Low, TrainId(1), 50);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West, West, West])).unwrap();
        assert_eq!(s.train, TrainId(1));
        assert_eq!(s.direction, East);
        assert_eq!(s.rule, DispatchRule::StreakBreak);
    }

    #[test]
    fn streak_prefers_high_on_opposite_side() {
        let mut qs = ReadyQueues::new();
        qs.push(East, Low, TrainId(0), 1);
        qs.push(East, High, TrainId(1), 50);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West, West])).unwrap();
        assert_eq!(s.train, TrainId(1));
    }

    #[test]
    fn streak_with_empty_opposite_falls_through() {
        let mut qs = ReadyQueues::new();
        qs.push(West, Low, TrainId(0), 1);
        let s = FairnessPolicy.select(&mut qs, &track_after(&[West, West])).unwrap();
        assert_eq!(s.train, TrainId(0));
        assert_eq!(s.rule, DispatchRule::Priority);
    }

    #[test]
    fn select_pops_exactly_one() {
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 1);
        qs.push(West, High, TrainId(1), 2);
        qs.push(West, Low, TrainId(2), 3);
        FairnessPolicy.select(&mut qs, &TrackState::new()).unwrap();
        assert_eq!(qs.len(), 2);
    }
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn four_train_scenario() {
        // E 1 2 / w 1 1 / W 1 1 / e 1 1, ready in id order.
        let mut qs = ReadyQueues::new();
        qs.push(East, High, TrainId(0), 100);
        qs.push(West, Low, TrainId(1), 101);
        qs.push(West, High, TrainId(2), 102);
        qs.push(East, Low, TrainId(3), 103);

        let order = drain(&mut qs, &mut TrackState::new());
        assert_eq!(ids(&order), vec![2, 0, 1, 3]);
        assert_eq!(order[0].rule, DispatchRule::OpeningBias);
    }

    #[test]
    fn every_train_dispatched_exactly_once() {
        let mut qs = ReadyQueues::new();
        for i in 0..40u32 {
            let d = if i % 3 == 0 { East } else { West };
            let p = if i % 2 == 0 { High } else { Low };
            qs.push(d, p, TrainId(i), u64::from(i / 4));
        }
        let mut order = ids(&drain(&mut qs, &mut TrackState::new()));
        assert!(qs.is_empty());
        order.sort_unstable();
        assert_eq!(order, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn no_three_in_a_row_while_opposite_waits() {
        // Heavily west-skewed load with a few east trains waiting throughout.
        let mut qs = ReadyQueues::new();
        for i in 0..12u32 {
            qs.push(West, High, TrainId(i), u64::from(i));
        }
        for i in 12..16u32 {
            qs.push(East, Low, TrainId(i), u64::from(i));
        }

        let mut track = TrackState::new();
        let mut dirs = Vec::new();
        loop {
            let east_waiting = qs.has_ready(East);
            let west_waiting = qs.has_ready(West);
            let Some(s) = FairnessPolicy.select(&mut qs, &track) else { break };

            // A third consecutive crossing is only allowed if the other side
            // had nobody waiting at this decision.
            if track.consecutive() >= 2 && track.last_direction() == Some(s.direction) {
                let other_waiting = match s.direction {
                    East => west_waiting,
                    West => east_waiting,
                };
                assert!(!other_waiting, "streak extended while opposite side waited");
            }

            track.occupy(s.train).unwrap();
            track.release(s.train, s.direction).unwrap();
            dirs.push(s.direction);
        }

        assert_eq!(dirs.len(), 16);
        // W W E W W E W W E W W E W W W W
        assert_eq!(&dirs[..3], &[West, West, East]);
        assert_eq!(&dirs[12..], &[West, West, West, West]);
    }

    #[test]
    fn fairness_counters_after_www() {
        let track = track_after(&[West, West, West]);
        assert_eq!(track.consecutive(), 3);

        let mut qs = ReadyQueues::new();
        qs.push(West, High, TrainId(0), 0);
        qs.push(West, High, TrainId(1), 1);
        qs.push(East, Low, TrainId(2), 99);
        let s = FairnessPolicy.select(&mut qs, &track).unwrap();
        assert_eq!(s.direction, East);
    }
}
