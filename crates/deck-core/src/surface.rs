//! The host document as seen by the controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chart::ChartTarget;
use crate::error::Result;
use crate::view::ButtonState;

/// Addressable pieces of the deck markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Element {
    Slide(usize),
    PreviousButton,
    NextButton,
    Counter,
    Total,
    Section,
    DotContainer,
    Dot(usize),
    Chart(ChartTarget),
}

impl Element {
    /// DOM id (or selector for positional elements).
    pub fn selector(&self) -> String {
        match self {
            Element::Slide(i) => format!("[data-slide=\"{}\"]", i + 1),
            Element::PreviousButton => "#prevBtn".into(),
            Element::NextButton => "#nextBtn".into(),
            Element::Counter => "#currentSlide".into(),
            Element::Total => "#totalSlides".into(),
            Element::Section => "#sectionName".into(),
            Element::DotContainer => "#navDots".into(),
            Element::Dot(i) => format!("#navDots .nav-dot:nth-child({})", i + 1),
            Element::Chart(target) => format!("#{}", target.element_id()),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

/// Write access to the deck markup.
///
/// Every method reports [`Error::MissingElement`](crate::Error::MissingElement)
/// when the element is absent; the controller logs and skips such updates.
pub trait Surface {
    /// Number of slide regions present in the document.
    fn slide_count(&self) -> usize;

    /// Toggle the active marker on a slide region.
    fn set_slide_active(&mut self, index: usize, active: bool) -> Result<()>;

    /// Replace the text content of a text element.
    fn set_text(&mut self, element: Element, text: &str) -> Result<()>;

    /// Set an element's accessible label and role.
    fn set_label(&mut self, element: Element, label: &str, role: Option<&str>) -> Result<()>;

    /// Apply disabled flag, opacity and label to a navigation button.
    fn set_button(&mut self, element: Element, state: &ButtonState) -> Result<()>;

    /// Replace the indicator row with `count` focusable dots.
    fn build_dots(&mut self, count: usize, labels: &[String]) -> Result<()>;

    /// Toggle the active marker on one indicator dot.
    fn set_dot_active(&mut self, index: usize, active: bool) -> Result<()>;

    /// Laid-out width of a chart container, `None` when unknown.
    fn chart_width(&self, target: ChartTarget) -> Option<f64> {
        let _ = target;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_markup_ids() {
        assert_eq!(Element::PreviousButton.selector(), "#prevBtn");
        assert_eq!(Element::Slide(0).selector(), "[data-slide=\"1\"]");
        assert_eq!(
            Element::Chart(ChartTarget::FlowDiagram).to_string(),
            "#sankeyChart"
        );
    }
}
