//! Active-section tracking for in-page navigation links

use serde::{Deserialize, Serialize};

/// Default distance below the viewport top used as the probe line
pub const PROBE_OFFSET_PX: f64 = 150.0;

/// A page section linked from the navigation bar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Document offset of the section's top edge
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    #[inline]
    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Tracks which section sits under the probe line
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    probe_offset: f64,
    active: Option<String>,
}

impl ScrollSpy {
    pub fn new(sections: Vec<Section>) -> Self {
        Self::with_probe_offset(sections, PROBE_OFFSET_PX)
    }

    pub fn with_probe_offset(sections: Vec<Section>, probe_offset: f64) -> Self {
        Self {
            sections,
            probe_offset,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Replace section geometry (after layout changes)
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    /// Recompute for a scroll position. Returns true if the active section
    /// changed. When no section is under the probe the previous one stays.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let probe = scroll_y + self.probe_offset;
        let Some(hit) = self.sections.iter().find(|s| s.contains(probe)) else {
            return false;
        };
        if self.active.as_deref() == Some(hit.id.as_str()) {
            return false;
        }
        log::trace!("nav: active section -> #{}", hit.id);
        self.active = Some(hit.id.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ScrollSpy {
        ScrollSpy::new(vec![
            Section::new("benefits", 800.0, 600.0),
            Section::new("testimonials", 1400.0, 900.0),
            Section::new("faq", 2300.0, 700.0),
        ])
    }

    #[test]
    fn test_probe_is_offset_from_top() {
        let mut spy = page();
        assert!(!spy.update(0.0));
        assert_eq!(spy.active(), None);

        assert!(spy.update(650.0));
        assert_eq!(spy.active(), Some("benefits"));

        assert!(spy.update(1250.0));
        assert_eq!(spy.active(), Some("testimonials"));
    }

    #[test]
    fn test_gap_keeps_previous() {
        let mut spy = page();
        spy.update(2200.0);
        assert_eq!(spy.active(), Some("faq"));
        assert!(!spy.update(5000.0));
        assert_eq!(spy.active(), Some("faq"));
    }

    #[test]
    fn test_same_section_is_not_a_change() {
        let mut spy = page();
        assert!(spy.update(700.0));
        assert!(!spy.update(710.0));
    }
}
