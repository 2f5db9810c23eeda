// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visited/path animation scheduler.
//!
//! The animator owns no grid state. It turns a search result into a timed stream of
//! [`AnimationEvent`]s that the board applies as they come due. Every scheduled step carries the
//! generation that created it; [`Animator::cancel`] bumps the generation so nothing from an older
//! run can ever mark a cell.

mod timer;

use std::time::{Duration, Instant};

pub use timer::TimerQueue;

use crate::model::Coord;
use crate::run::{MAX_SPEED, MIN_SPEED};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Visited,
    Path,
    Settled,
    Cancelled,
}

/// Something the board must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// Mark `coord` (entry `index` of the visited sequence) as visited.
    Visited { index: usize, coord: Coord },
    /// The visited sweep finished.
    PathStarted { found: bool },
    OnPath(Coord),
    /// The animation finished; editing may resume.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    MarkVisited(usize),
    BeginPath,
    MarkPath(usize),
    Settle,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    generation: u64,
    step: Step,
}

/// Per-step delays for a given speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    full: Duration,
    half: Duration,
}

impl Pace {
    /// `full = (201 - speed)` ms, `half = full / 2`; `speed` is clamped to `[10, 200]`.
    pub fn for_speed(speed: u32) -> Self {
        let speed = u64::from(speed.clamp(MIN_SPEED, MAX_SPEED));
        let micros = (201 - speed) * 1_000;
        Self { full: Duration::from_micros(micros), half: Duration::from_micros(micros / 2) }
    }

    pub fn full(self) -> Duration {
        self.full
    }

    pub fn half(self) -> Duration {
        self.half
    }
}

#[derive(Debug, Default)]
pub struct Animator {
    generation: u64,
    phase: Phase,
    timers: TimerQueue<Scheduled>,
    last_visited: Vec<Coord>,
    last_path: Vec<Coord>,
    pace: Option<Pace>,
    running: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_visited(&self) -> &[Coord] {
        &self.last_visited
    }

    pub fn last_path(&self) -> &[Coord] {
        &self.last_path
    }

    pub fn can_replay(&self) -> bool {
        !self.last_visited.is_empty() && !self.last_path.is_empty()
    }

    /// Earliest pending deadline, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    /// Starts animating `visited` then `path`, replacing anything in flight.
    pub fn start(&mut self, visited: Vec<Coord>, path: Vec<Coord>, speed: u32, now: Instant) {
        self.cancel();
        self.last_visited = visited;
        self.last_path = path;
        self.launch(speed, now);
    }

    /// Replays the stored sequences. Returns false (and does nothing) when there is nothing
    /// complete to replay.
    pub fn replay(&mut self, speed: u32, now: Instant) -> bool {
        if !self.can_replay() {
            return false;
        }
        self.cancel();
        self.launch(speed, now);
        true
    }

    /// Stops scheduling. Marks already applied stay applied.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.timers.clear();
        if self.running {
            self.phase = Phase::Cancelled;
        }
        self.running = false;
    }

    /// Cancels and forgets the stored sequences.
    pub fn reset(&mut self) {
        self.cancel();
        self.last_visited.clear();
        self.last_path.clear();
        self.pace = None;
        self.phase = Phase::Idle;
    }

    /// Returns the next event due at `now`, advancing the phase machine.
    pub fn poll(&mut self, now: Instant) -> Option<AnimationEvent> {
        loop {
            let (due, scheduled) = self.timers.pop_due(now)?;
            if scheduled.generation != self.generation {
                continue;
            }
            if let Some(event) = self.fire(due, scheduled.step) {
                return Some(event);
            }
        }
    }

    fn launch(&mut self, speed: u32, now: Instant) {
        let pace = Pace::for_speed(speed);
        self.pace = Some(pace);
        self.phase = Phase::Visited;
        self.running = true;

        let mut due = now;
        for index in 0..self.last_visited.len() {
            self.schedule(due, Step::MarkVisited(index));
            due += pace.half;
        }
        self.schedule(due, Step::BeginPath);
    }

    fn schedule(&mut self, due: Instant, step: Step) {
        self.timers.schedule(due, Scheduled { generation: self.generation, step });
    }

    fn fire(&mut self, due: Instant, step: Step) -> Option<AnimationEvent> {
        let pace = self.pace?;
        match step {
            Step::MarkVisited(index) => {
                let coord = *self.last_visited.get(index)?;
                Some(AnimationEvent::Visited { index, coord })
            }
            Step::BeginPath => {
                self.phase = Phase::Path;
                let found = !self.last_path.is_empty();
                if found {
                    let mut at = due;
                    for index in 0..self.last_path.len() {
                        self.schedule(at, Step::MarkPath(index));
                        at += pace.full;
                    }
                } else {
                    self.schedule(due + pace.half, Step::Settle);
                }
                Some(AnimationEvent::PathStarted { found })
            }
            Step::MarkPath(index) => {
                let coord = *self.last_path.get(index)?;
                if index + 1 == self.last_path.len() {
                    self.schedule(due + pace.half, Step::Settle);
                }
                Some(AnimationEvent::OnPath(coord))
            }
            Step::Settle => {
                self.phase = Phase::Settled;
                self.running = false;
                Some(AnimationEvent::Settled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::rstest;

    use super::{AnimationEvent, Animator, Pace, Phase};
    use crate::model::Coord;

    fn coords(raw: &[(usize, usize)]) -> Vec<Coord> {
        raw.iter().copied().map(Coord::from).collect()
    }

    /// Polls at every pending deadline and records `(offset, event)`.
    fn drain(animator: &mut Animator, t0: Instant) -> Vec<(Duration, AnimationEvent)> {
        let mut out = Vec::new();
        while let Some(due) = animator.next_due() {
            while let Some(event) = animator.poll(due) {
                out.push((due - t0, event));
            }
        }
        out
    }

    #[rstest]
    #[case(50, 151_000, 75_500)]
    #[case(200, 1_000, 500)]
    #[case(10, 191_000, 95_500)]
    #[case(500, 1_000, 500)]
    fn pace_follows_speed(#[case] speed: u32, #[case] full_us: u64, #[case] half_us: u64) {
        let pace = Pace::for_speed(speed);
        assert_eq!(pace.full(), Duration::from_micros(full_us));
        assert_eq!(pace.half(), Duration::from_micros(half_us));
    }

    #[test]
    fn speed_50_offsets() {
        let t0 = Instant::now();
        let visited = coords(&[(0, 0), (0, 1), (0, 2)]);
        let path = coords(&[(0, 0), (0, 1), (0, 2)]);
        let mut animator = Animator::new();
        animator.start(visited, path, 50, t0);

        let events = drain(&mut animator, t0);
        let half = Duration::from_micros(75_500);
        let full = Duration::from_micros(151_000);

        let visited_at: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, AnimationEvent::Visited { .. }))
            .map(|(at, _)| *at)
            .collect();
        assert_eq!(visited_at, vec![Duration::ZERO, half, half * 2]);

        let path_at: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, AnimationEvent::OnPath(_)))
            .map(|(at, _)| *at)
            .collect();
        let transition = half * 3;
        assert_eq!(path_at, vec![transition, transition + full, transition + full * 2]);

        assert_eq!(events.last(), Some(&(transition + full * 2 + half, AnimationEvent::Settled)));
        assert_eq!(animator.phase(), Phase::Settled);
        assert!(!animator.is_running());
    }

    #[test]
    fn late_poll_does_not_shift_offsets() {
        let t0 = Instant::now();
        let mut animator = Animator::new();
        animator.start(coords(&[(0, 0), (0, 1)]), coords(&[(0, 0), (0, 1)]), 50, t0);

        // One poll far in the future drains everything, still in schedule order.
        let late = t0 + Duration::from_secs(5);
        let events: Vec<_> = std::iter::from_fn(|| animator.poll(late)).collect();
        assert_eq!(
            events,
            vec![
                AnimationEvent::Visited { index: 0, coord: Coord::new(0, 0) },
                AnimationEvent::Visited { index: 1, coord: Coord::new(0, 1) },
                AnimationEvent::PathStarted { found: true },
                AnimationEvent::OnPath(Coord::new(0, 0)),
                AnimationEvent::OnPath(Coord::new(0, 1)),
                AnimationEvent::Settled,
            ]
        );
    }

    #[test]
    fn cancel_then_start_applies_no_stale_marks() {
        let t0 = Instant::now();
        let mut animator = Animator::new();
        animator.start(coords(&[(5, 5), (5, 6), (5, 7)]), coords(&[(5, 5)]), 50, t0);
        let first = animator.poll(t0);
        assert_eq!(first, Some(AnimationEvent::Visited { index: 0, coord: Coord::new(5, 5) }));

        animator.cancel();
        assert_eq!(animator.phase(), Phase::Cancelled);
        assert!(!animator.is_running());

        let t1 = t0 + Duration::from_millis(1);
        animator.start(coords(&[(1, 1)]), coords(&[(1, 1)]), 200, t1);
        let events = drain(&mut animator, t0);
        let stale = [Coord::new(5, 5), Coord::new(5, 6), Coord::new(5, 7)];
        for (_, event) in events {
            match event {
                AnimationEvent::Visited { coord, .. } | AnimationEvent::OnPath(coord) => {
                    assert!(!stale.contains(&coord), "stale mark {coord}")
                }
                _ => {}
            }
        }
    }

    #[test]
    fn replay_reproduces_the_same_marks() {
        let t0 = Instant::now();
        let mut animator = Animator::new();
        animator.start(coords(&[(0, 0), (1, 0), (1, 1)]), coords(&[(0, 0), (1, 1)]), 120, t0);
        let first: Vec<_> = drain(&mut animator, t0).into_iter().map(|(_, e)| e).collect();

        let t1 = t0 + Duration::from_secs(10);
        assert!(animator.replay(120, t1));
        let second: Vec<_> = drain(&mut animator, t1).into_iter().map(|(_, e)| e).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_path_settles_half_after_transition() {
        let t0 = Instant::now();
        let mut animator = Animator::new();
        animator.start(coords(&[(0, 0), (0, 1)]), Vec::new(), 50, t0);

        let events = drain(&mut animator, t0);
        let half = Duration::from_micros(75_500);
        assert_eq!(
            events[2..],
            [
                (half * 2, AnimationEvent::PathStarted { found: false }),
                (half * 3, AnimationEvent::Settled),
            ]
        );
        assert!(!animator.can_replay());
        assert!(!animator.replay(50, t0));
    }

    #[test]
    fn reset_forgets_sequences() {
        let t0 = Instant::now();
        let mut animator = Animator::new();
        animator.start(coords(&[(0, 0)]), coords(&[(0, 0)]), 50, t0);
        animator.reset();

        assert_eq!(animator.phase(), Phase::Idle);
        assert!(animator.last_visited().is_empty());
        assert_eq!(animator.poll(t0 + Duration::from_secs(1)), None);
    }
}
