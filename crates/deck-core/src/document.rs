//! In-memory deck document.
//!
//! Mirrors the markup contract closely enough to drive the controller without
//! a browser: hosts serialize it to clients, tests assert against it.

use std::collections::HashMap;

use serde::Serialize;

use crate::chart::ChartTarget;
use crate::error::{Error, Result};
use crate::surface::{Element, Surface};
use crate::view::ButtonState;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Region {
    pub active: bool,
    pub label: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub text: String,
    pub disabled: bool,
    pub opacity: f32,
    pub label: Option<String>,
}

impl Button {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            disabled: false,
            opacity: 1.0,
            label: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dot {
    pub active: bool,
    pub label: String,
    pub focusable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextNode {
    pub text: String,
}

/// The deck markup, with every optional element individually removable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    slides: Vec<Region>,
    previous: Option<Button>,
    next: Option<Button>,
    counter: Option<TextNode>,
    total: Option<TextNode>,
    section: Option<TextNode>,
    dots: Option<Vec<Dot>>,
    #[serde(skip)]
    chart_widths: HashMap<ChartTarget, f64>,
}

impl Document {
    /// A document with `slides` regions and every chrome element present.
    pub fn new(slides: usize) -> Self {
        Self {
            slides: vec![Region::default(); slides],
            previous: Some(Button::new("Previous")),
            next: Some(Button::new("Next")),
            counter: Some(TextNode::default()),
            total: Some(TextNode::default()),
            section: Some(TextNode::default()),
            dots: Some(Vec::new()),
            chart_widths: HashMap::new(),
        }
    }

    /// Remove an optional element.
    pub fn without(mut self, element: Element) -> Self {
        match element {
            Element::PreviousButton => self.previous = None,
            Element::NextButton => self.next = None,
            Element::Counter => self.counter = None,
            Element::Total => self.total = None,
            Element::Section => self.section = None,
            Element::DotContainer => self.dots = None,
            Element::Slide(_) | Element::Dot(_) | Element::Chart(_) => {}
        }
        self
    }

    /// Record the laid-out width of a chart container.
    pub fn set_chart_width(&mut self, target: ChartTarget, width: f64) {
        self.chart_widths.insert(target, width);
    }

    /// Indices of slides carrying the active marker.
    pub fn active_slides(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn slide(&self, index: usize) -> Option<&Region> {
        self.slides.get(index)
    }

    pub fn button(&self, element: Element) -> Option<&Button> {
        match element {
            Element::PreviousButton => self.previous.as_ref(),
            Element::NextButton => self.next.as_ref(),
            _ => None,
        }
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.text_node(element).map(|n| n.text.as_str())
    }

    pub fn dots(&self) -> Option<&[Dot]> {
        self.dots.as_deref()
    }

    /// Indices of dots carrying the active marker.
    pub fn active_dots(&self) -> Vec<usize> {
        self.dots
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, d)| d.active)
            .map(|(i, _)| i)
            .collect()
    }

    fn text_node(&self, element: Element) -> Option<&TextNode> {
        match element {
            Element::Counter => self.counter.as_ref(),
            Element::Total => self.total.as_ref(),
            Element::Section => self.section.as_ref(),
            _ => None,
        }
    }

    fn text_node_mut(&mut self, element: Element) -> Option<&mut TextNode> {
        match element {
            Element::Counter => self.counter.as_mut(),
            Element::Total => self.total.as_mut(),
            Element::Section => self.section.as_mut(),
            _ => None,
        }
    }

    fn button_mut(&mut self, element: Element) -> Option<&mut Button> {
        match element {
            Element::PreviousButton => self.previous.as_mut(),
            Element::NextButton => self.next.as_mut(),
            _ => None,
        }
    }
}

impl Surface for Document {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_slide_active(&mut self, index: usize, active: bool) -> Result<()> {
        let region = self
            .slides
            .get_mut(index)
            .ok_or(Error::MissingElement(Element::Slide(index)))?;
        region.active = active;
        Ok(())
    }

    fn set_text(&mut self, element: Element, text: &str) -> Result<()> {
        let node = self
            .text_node_mut(element)
            .ok_or(Error::MissingElement(element))?;
        node.text = text.to_string();
        Ok(())
    }

    fn set_label(&mut self, element: Element, label: &str, role: Option<&str>) -> Result<()> {
        match element {
            Element::Slide(index) => {
                let region = self
                    .slides
                    .get_mut(index)
                    .ok_or(Error::MissingElement(element))?;
                region.label = Some(label.to_string());
                region.role = role.map(str::to_string);
            }
            Element::PreviousButton | Element::NextButton => {
                let button = self
                    .button_mut(element)
                    .ok_or(Error::MissingElement(element))?;
                button.label = Some(label.to_string());
            }
            Element::Dot(index) => {
                let dot = self
                    .dots
                    .as_mut()
                    .and_then(|dots| dots.get_mut(index))
                    .ok_or(Error::MissingElement(element))?;
                dot.label = label.to_string();
            }
            _ => return Err(Error::MissingElement(element)),
        }
        Ok(())
    }

    fn set_button(&mut self, element: Element, state: &ButtonState) -> Result<()> {
        let button = self
            .button_mut(element)
            .ok_or(Error::MissingElement(element))?;
        button.disabled = state.disabled;
        button.opacity = state.opacity;
        if let Some(label) = &state.label {
            button.text = label.clone();
        }
        Ok(())
    }

    fn build_dots(&mut self, count: usize, labels: &[String]) -> Result<()> {
        let dots = self
            .dots
            .as_mut()
            .ok_or(Error::MissingElement(Element::DotContainer))?;
        *dots = (0..count)
            .map(|i| Dot {
                active: false,
                label: labels.get(i).cloned().unwrap_or_default(),
                focusable: true,
            })
            .collect();
        Ok(())
    }

    fn set_dot_active(&mut self, index: usize, active: bool) -> Result<()> {
        let dot = self
            .dots
            .as_mut()
            .ok_or(Error::MissingElement(Element::DotContainer))?
            .get_mut(index)
            .ok_or(Error::MissingElement(Element::Dot(index)))?;
        dot.active = active;
        Ok(())
    }

    fn chart_width(&self, target: ChartTarget) -> Option<f64> {
        self.chart_widths.get(&target).copied()
    }
}
