//! Navigation bar state
//!
//! Compact-on-scroll styling, mobile menu, and active link tracking.

mod scroll_spy;

pub use scroll_spy::{ScrollSpy, Section, PROBE_OFFSET_PX};

/// Scroll distance after which the bar switches to its compact style
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;

/// Navigation bar state
#[derive(Clone, Debug)]
pub struct NavState {
    spy: ScrollSpy,
    scrolled_threshold: f64,
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    pub fn new(spy: ScrollSpy) -> Self {
        Self {
            spy,
            scrolled_threshold: SCROLLED_THRESHOLD_PX,
            scrolled: false,
            menu_open: false,
        }
    }

    pub fn with_scrolled_threshold(mut self, threshold: f64) -> Self {
        self.scrolled_threshold = threshold;
        self
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn active_section(&self) -> Option<&str> {
        self.spy.active()
    }

    pub fn spy_mut(&mut self) -> &mut ScrollSpy {
        &mut self.spy
    }

    /// Feed a scroll position. Returns true if anything visible changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.scrolled_threshold;
        let scrolled_changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        let section_changed = self.spy.update(scroll_y);
        scrolled_changed || section_changed
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// A navigation link was followed; the mobile menu closes.
    ///
    /// Returns false if `id` is not a known section.
    pub fn navigate_to(&mut self, id: &str) -> bool {
        if !self.spy.sections().iter().any(|s| s.id == id) {
            return false;
        }
        self.menu_open = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> NavState {
        NavState::new(ScrollSpy::new(vec![
            Section::new("how-it-works", 600.0, 500.0),
            Section::new("faq", 1100.0, 500.0),
        ]))
    }

    #[test]
    fn test_scrolled_threshold() {
        let mut nav = nav();
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(51.0));
        assert!(nav.is_scrolled());
        assert!(nav.on_scroll(0.0));
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn test_navigation_closes_menu() {
        let mut nav = nav();
        assert!(nav.toggle_menu());
        assert!(nav.is_menu_open());
        assert!(!nav.navigate_to("pricing"));
        assert!(nav.is_menu_open());
        assert!(nav.navigate_to("faq"));
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_scroll_reports_section_change() {
        let mut nav = nav();
        nav.on_scroll(100.0);
        assert!(nav.on_scroll(1000.0));
        assert_eq!(nav.active_section(), Some("faq"));
    }
}
