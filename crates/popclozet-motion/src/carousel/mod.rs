//! Slide carousel
//!
//! Holds an ordered list of slides and moves between them. Every move takes
//! the transition lock for [`CarouselConfig::lock_ms`]; moves requested while
//! locked are dropped. Manual navigation stops autoplay for good.
//!
//! The carousel owns no timers. Callers feed it the current time and ask
//! [`Carousel::next_deadline`] when to call [`Carousel::tick`] again.

mod config;
mod phase;

pub use config::{CarouselConfig, AUTOPLAY_INTERVAL_MS, SLIDE_TRANSITION_MS};
pub use phase::Direction;

use std::fmt;

use serde::Serialize;
use crate::error::CarouselError;
use phase::{Autoplay, Phase};

/// Default navigation lock after a move
pub const LOCK_DURATION_MS: u32 = 700;

/// State published to subscribers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSnapshot {
    pub index: usize,
    pub direction: Direction,
    pub transitioning: bool,
    pub autoplaying: bool,
}

/// Handle returned by [`Carousel::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CarouselSnapshot)>;

/// What caused a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    User,
    Autoplay,
}

/// Carousel over slides of type `T`
pub struct Carousel<T> {
    items: Vec<T>,
    config: CarouselConfig,
    index: usize,
    direction: Direction,
    phase: Phase,
    autoplay: Autoplay,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<T> Carousel<T> {
    /// Create a carousel showing the first item, with autoplay armed from `now_ms`
    pub fn new(items: Vec<T>, config: CarouselConfig, now_ms: f64) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        config.validate()?;

        Ok(Self {
            items,
            config,
            index: 0,
            direction: Direction::None,
            phase: Phase::Idle,
            autoplay: Autoplay::Running {
                next_at_ms: now_ms + f64::from(config.autoplay_interval_ms),
            },
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Direction of the move currently holding the lock
    pub fn in_flight(&self) -> Option<Direction> {
        match self.phase {
            Phase::Transitioning { direction, .. } => Some(direction),
            Phase::Idle => None,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The slide being shown
    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.index,
            direction: self.direction,
            transitioning: self.is_transitioning(),
            autoplaying: self.is_autoplaying(),
        }
    }

    /// Earliest time at which [`Carousel::tick`] has work to do.
    ///
    /// Autoplay never fires during a transition, so the lock release comes first.
    pub fn next_deadline(&self) -> Option<f64> {
        self.phase.deadline().or_else(|| self.autoplay.deadline())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Advance one slide. Returns false if locked.
    pub fn next(&mut self, now_ms: f64) -> bool {
        let target = (self.index + 1) % self.len();
        self.begin_move(target, Direction::Forward, Trigger::User, now_ms)
    }

    /// Go back one slide. Returns false if locked.
    pub fn previous(&mut self, now_ms: f64) -> bool {
        let target = (self.index + self.len() - 1) % self.len();
        self.begin_move(target, Direction::Backward, Trigger::User, now_ms)
    }

    /// Jump to `index`. Returns `Ok(false)` if locked or already there.
    pub fn go_to(&mut self, index: usize, now_ms: f64) -> Result<bool, CarouselError> {
        if index >= self.len() {
            return Err(CarouselError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        if index == self.index {
            return Ok(false);
        }
        let direction = Direction::between(self.index, index);
        Ok(self.begin_move(index, direction, Trigger::User, now_ms))
    }

    /// Release an expired lock and fire autoplay if due. Returns true if
    /// the snapshot changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut changed = false;

        if let Phase::Transitioning { until_ms, .. } = self.phase {
            if now_ms >= until_ms {
                self.phase = Phase::Idle;
                log::debug!("carousel: settled on slide {}", self.index);
                self.notify();
                changed = true;
            }
        }

        if let Autoplay::Running { next_at_ms } = self.autoplay {
            if now_ms >= next_at_ms && !self.is_transitioning() {
                let target = (self.index + 1) % self.len();
                changed |= self.begin_move(target, Direction::Forward, Trigger::Autoplay, now_ms);
            }
        }

        changed
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Register a listener called with the new snapshot after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&CarouselSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn begin_move(&mut self, target: usize, direction: Direction, trigger: Trigger, now_ms: f64) -> bool {
        if self.is_transitioning() {
            log::trace!("carousel: move to {} dropped, transition in flight", target);
            return false;
        }

        self.index = target;
        self.direction = direction;
        self.phase = Phase::Transitioning {
            direction,
            until_ms: now_ms + f64::from(self.config.lock_ms),
        };

        match trigger {
            Trigger::User => {
                if self.autoplay.is_running() {
                    log::debug!("carousel: manual navigation, autoplay stopped");
                }
                self.autoplay = Autoplay::Stopped;
            }
            Trigger::Autoplay => {
                self.autoplay = Autoplay::Running {
                    next_at_ms: now_ms + f64::from(self.config.autoplay_interval_ms),
                };
            }
        }

        log::debug!("carousel: -> slide {} ({:?}, {:?})", target, direction, trigger);
        self.notify();
        true
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl<T> fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("index", &self.index)
            .field("direction", &self.direction)
            .field("phase", &self.phase)
            .field("autoplay", &self.autoplay)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn slides(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    fn carousel(n: usize) -> Carousel<usize> {
        Carousel::new(slides(n), CarouselConfig::default(), 0.0).unwrap()
    }

    #[test]
    fn test_empty_is_rejected() {
        let err = Carousel::<u8>::new(Vec::new(), CarouselConfig::default(), 0.0).unwrap_err();
        assert_eq!(err, CarouselError::Empty);
    }

    #[test]
    fn test_initial_state() {
        let c = carousel(3);
        assert_eq!(c.index(), 0);
        assert_eq!(c.direction(), Direction::None);
        assert!(!c.is_transitioning());
        assert!(c.is_autoplaying());
        assert_eq!(c.next_deadline(), Some(5000.0));
    }

    #[test]
    fn test_next_wraps_around() {
        let mut c = carousel(3);
        let mut now = 0.0;
        for _ in 0..3 {
            assert!(c.next(now));
            now += 700.0;
            c.tick(now);
        }
        assert_eq!(c.index(), 0);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn test_previous_wraps_around() {
        let mut c = carousel(4);
        assert!(c.previous(0.0));
        assert_eq!(c.index(), 3);
        assert_eq!(c.direction(), Direction::Backward);
        assert!(!c.is_autoplaying());
    }

    #[test]
    fn test_moves_are_locked_while_transitioning() {
        let mut c = carousel(5);
        assert!(c.next(0.0));
        assert!(!c.next(100.0));
        assert!(!c.previous(200.0));
        assert_eq!(c.go_to(4, 300.0), Ok(false));
        assert_eq!(c.index(), 1);
        assert_eq!(c.in_flight(), Some(Direction::Forward));

        // Lock releases exactly at the deadline
        assert!(!c.tick(699.0));
        assert!(c.tick(700.0));
        assert!(!c.is_transitioning());
        assert!(c.previous(700.0));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_go_to_direction_and_no_op() {
        let mut c = carousel(5);
        assert_eq!(c.go_to(0, 0.0), Ok(false));
        assert!(c.is_autoplaying());

        assert_eq!(c.go_to(3, 0.0), Ok(true));
        assert_eq!(c.direction(), Direction::Forward);
        c.tick(700.0);

        assert_eq!(c.go_to(1, 700.0), Ok(true));
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn test_go_to_out_of_range() {
        let mut c = carousel(2);
        assert_eq!(c.go_to(2, 0.0), Err(CarouselError::IndexOutOfRange { index: 2, len: 2 }));
        assert!(c.is_autoplaying());
    }

    #[test]
    fn test_autoplay_advances_without_stopping() {
        let mut c = carousel(3);
        assert!(!c.tick(4999.0));
        assert!(c.tick(5000.0));
        assert_eq!(c.index(), 1);
        assert_eq!(c.direction(), Direction::Forward);
        assert!(c.is_autoplaying());
        assert!(c.is_transitioning());

        assert_eq!(c.next_deadline(), Some(5700.0));
        c.tick(5700.0);
        assert_eq!(c.next_deadline(), Some(10000.0));
        c.tick(10000.0);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_manual_navigation_stops_autoplay_forever() {
        let mut c = carousel(3);
        c.tick(5000.0);
        c.tick(5700.0);
        assert!(c.previous(6000.0));
        assert!(!c.is_autoplaying());

        c.tick(6700.0);
        let index = c.index();
        for t in 1..20 {
            c.tick(6700.0 + f64::from(t) * 5000.0);
        }
        assert_eq!(c.index(), index);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_single_item_still_locks() {
        let mut c = carousel(1);
        assert!(c.next(0.0));
        assert_eq!(c.index(), 0);
        assert!(c.is_transitioning());
        assert!(!c.is_autoplaying());
        assert!(!c.previous(10.0));
        c.tick(700.0);
        assert!(c.previous(700.0));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_subscribers_see_moves_and_settles() {
        let mut c = carousel(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = c.subscribe(move |snapshot| sink.borrow_mut().push(*snapshot));

        c.next(0.0);
        c.next(10.0);
        c.tick(700.0);
        {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[0].index, 1);
            assert!(seen[0].transitioning);
            assert!(!seen[0].autoplaying);
            assert!(!seen[1].transitioning);
        }

        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.next(700.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_current_item() {
        let mut c = Carousel::new(vec!["a", "b"], CarouselConfig::default(), 0.0).unwrap();
        c.previous(0.0);
        assert_eq!(*c.current(), "b");
    }
}
