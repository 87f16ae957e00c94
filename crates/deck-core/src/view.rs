//! Projection of navigation state onto the deck chrome.

use serde::{Deserialize, Serialize};

use crate::navigation::Navigator;
use crate::sections::SectionMap;

/// Label of the next button on every slide but the last.
pub const NEXT_LABEL: &str = "Next";
/// Label of the next button on the last slide.
pub const COMPLETE_LABEL: &str = "Complete";

/// Rendered state of a navigation button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    pub disabled: bool,
    pub opacity: f32,
    /// Visible text, `None` leaves the host's text untouched
    pub label: Option<String>,
}

impl ButtonState {
    fn new(disabled: bool, disabled_opacity: f32, label: Option<&str>) -> Self {
        Self {
            disabled,
            opacity: if disabled { disabled_opacity } else { 1.0 },
            label: label.map(str::to_string),
        }
    }
}

/// Everything UI sync writes after a navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideView {
    pub current: usize,
    pub total: usize,
    /// One-based counter text
    pub counter: String,
    pub section: String,
    /// `dots[i]` is true for the active indicator
    pub dots: Vec<bool>,
    pub previous: ButtonState,
    pub next: ButtonState,
    pub progress: f64,
}

impl SlideView {
    /// Project the navigator's position.
    pub fn project(nav: &Navigator, sections: &SectionMap, disabled_opacity: f32) -> Self {
        let current = nav.current();
        let last = nav.is_last();
        Self {
            current,
            total: nav.total(),
            counter: (current + 1).to_string(),
            section: sections.label(current).to_string(),
            dots: (0..nav.total()).map(|i| i == current).collect(),
            previous: ButtonState::new(nav.is_first(), disabled_opacity, None),
            next: ButtonState::new(
                last,
                disabled_opacity,
                Some(if last { COMPLETE_LABEL } else { NEXT_LABEL }),
            ),
            progress: nav.progress(),
        }
    }

    /// Index of the active indicator dot.
    pub fn active_dot(&self) -> Option<usize> {
        self.dots.iter().position(|active| *active)
    }
}

/// Accessible label for a slide region.
pub fn slide_label(index: usize, total: usize, sections: &SectionMap) -> String {
    format!("Slide {} of {}: {}", index + 1, total, sections.label(index))
}

/// Accessible label for an indicator dot.
pub fn dot_label(index: usize) -> String {
    format!("Go to slide {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_at(index: usize) -> SlideView {
        let mut nav = Navigator::new(20);
        nav.go_to(index);
        SlideView::project(&nav, &SectionMap::nuclear_society(), 0.5)
    }

    #[test]
    fn first_slide() {
        let view = view_at(0);
        assert_eq!(view.counter, "1");
        assert_eq!(view.section, "Introduction");
        assert!(view.previous.disabled);
        assert_eq!(view.previous.opacity, 0.5);
        assert!(!view.next.disabled);
        assert_eq!(view.next.opacity, 1.0);
        assert_eq!(view.next.label.as_deref(), Some("Next"));
        assert_eq!(view.active_dot(), Some(0));
    }

    #[test]
    fn last_slide_reads_complete() {
        let view = view_at(19);
        assert_eq!(view.counter, "20");
        assert!(view.next.disabled);
        assert_eq!(view.next.label.as_deref(), Some("Complete"));
        assert!(!view.previous.disabled);
    }

    #[test]
    fn exactly_one_dot_active() {
        let view = view_at(9);
        assert_eq!(view.dots.len(), 20);
        assert_eq!(view.dots.iter().filter(|d| **d).count(), 1);
        assert_eq!(view.active_dot(), Some(9));
        assert_eq!(view.section, "Challenges");
    }

    #[test]
    fn labels() {
        let sections = SectionMap::nuclear_society();
        assert_eq!(slide_label(6, 20, &sections), "Slide 7 of 20: India's Program");
        assert_eq!(dot_label(0), "Go to slide 1");
    }
}
