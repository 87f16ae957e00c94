//! The presentation controller.
//!
//! Owns the slide index and drives everything hanging off it: the slide
//! regions' active markers, the counter/section/dots/buttons chrome, and the
//! deferred chart construction. All operations run to completion on the
//! caller's thread; deferred work waits in a [`TaskQueue`] until the host
//! calls [`Controller::run_due`].

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::{investment_chart, workforce_chart, ChartRenderer, ChartSpec, ChartTarget};
use crate::config::ControllerConfig;
use crate::content::{ContentMap, LoadedFlags};
use crate::data::{Datasets, FlowLink};
use crate::error::{Error, Result};
use crate::flow::FlowDiagram;
use crate::input::{InputEvent, InputRouter, NavRequest};
use crate::navigation::{Navigator, Transition};
use crate::schedule::{Task, TaskQueue, TaskReason};
use crate::sections::SectionMap;
use crate::surface::{Element, Surface};
use crate::view::{dot_label, slide_label, SlideView};

/// What handling one input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InputOutcome {
    /// The slide index changed
    pub navigated: bool,
    /// The host must suppress the event's default action
    pub prevent_default: bool,
}

/// Slide deck controller over a host surface and chart renderer.
pub struct Controller<S, R> {
    config: ControllerConfig,
    nav: Navigator,
    sections: SectionMap,
    content: ContentMap,
    datasets: Datasets,
    flags: LoadedFlags,
    queue: TaskQueue,
    input: InputRouter,
    surface: S,
    renderer: R,
}

impl<S: Surface, R: ChartRenderer> Controller<S, R> {
    /// Create a controller positioned on the first slide.
    pub fn new(config: ControllerConfig, surface: S, renderer: R) -> Result<Self> {
        config.validate()?;
        if surface.slide_count() != config.total_slides {
            return Err(Error::InvalidConfig(format!(
                "deck has {} slides but the document has {} slide regions",
                config.total_slides,
                surface.slide_count()
            )));
        }
        Ok(Self {
            nav: Navigator::new(config.total_slides),
            input: InputRouter::new(config.swipe_threshold, config.visibility_threshold),
            sections: SectionMap::default(),
            content: ContentMap::default(),
            datasets: Datasets::default(),
            flags: LoadedFlags::default(),
            queue: TaskQueue::new(),
            config,
            surface,
            renderer,
        })
    }

    /// Replace the flow diagram's links; a drawn diagram is redrawn on its next dispatch.
    pub fn set_flow_links(&mut self, links: Vec<FlowLink>) {
        self.datasets.energy_flow = links;
        self.flags.clear(ChartTarget::FlowDiagram);
    }

    /// Prepare the document and show the first slide.
    ///
    /// Writes the total count and accessible labels, builds the indicator
    /// dots, marks the current slide active and schedules its chart.
    pub fn init(&mut self, now: Instant) {
        let total = self.nav.total();
        tolerate(self.surface.set_text(Element::Total, &total.to_string()));
        tolerate(self.surface.set_label(
            Element::PreviousButton,
            "Go to previous slide",
            None,
        ));
        tolerate(self.surface.set_label(Element::NextButton, "Go to next slide", None));
        for index in 0..total {
            let label = slide_label(index, total, &self.sections);
            tolerate(
                self.surface
                    .set_label(Element::Slide(index), &label, Some("region")),
            );
        }
        let labels: Vec<String> = (0..total).map(dot_label).collect();
        tolerate(self.surface.build_dots(total, &labels));

        self.mark_active(self.nav.current());
        self.sync();
        self.dispatch(self.nav.current(), TaskReason::Startup, now);
        info!(total, "presentation initialized");
    }

    /// Route one raw input event.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> InputOutcome {
        let translation = self.input.translate(event);
        let navigated = match translation.request {
            Some(request) => self.apply(request, now),
            None => false,
        };
        InputOutcome {
            navigated,
            prevent_default: translation.prevent_default,
        }
    }

    /// Navigate to a slide. Out-of-range and redundant requests are ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        let transition = self.nav.go_to(index);
        self.finish(transition, now)
    }

    pub fn next(&mut self, now: Instant) -> bool {
        let transition = self.nav.next();
        self.finish(transition, now)
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        let transition = self.nav.previous();
        self.finish(transition, now)
    }

    /// A slide crossed the visibility threshold while scrolling.
    pub fn on_visibility(&mut self, index: usize, ratio: f64, now: Instant) -> bool {
        self.handle(InputEvent::Visibility { index, ratio }, now).navigated
    }

    /// Viewport resized: redraw the current slide's chart once things settle.
    pub fn on_resize(&mut self, now: Instant) {
        let current = self.nav.current();
        let Some(target) = self.content.chart_for(current) else {
            return;
        };
        self.flags.clear(target);
        let task = self.queue.schedule(
            target,
            current,
            TaskReason::Resize,
            now,
            self.config.resize_debounce,
        );
        debug!(chart = %target, generation = task.generation, "redraw scheduled after resize");
    }

    /// Run every deferred task due at `now`; returns how many charts were drawn.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let due = self.queue.take_due(now);
        due.iter().filter(|task| self.execute(task)).count()
    }

    /// Earliest pending deferred task.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Current projection of the deck chrome.
    pub fn view(&self) -> SlideView {
        SlideView::project(&self.nav, &self.sections, self.config.disabled_opacity)
    }

    pub fn current(&self) -> usize {
        self.nav.current()
    }

    pub fn total(&self) -> usize {
        self.nav.total()
    }

    pub fn is_loaded(&self, target: ChartTarget) -> bool {
        self.flags.is_loaded(target)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentMap {
        &self.content
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn apply(&mut self, request: NavRequest, now: Instant) -> bool {
        match request {
            NavRequest::Previous => self.previous(now),
            NavRequest::Next => self.next(now),
            NavRequest::GoTo { index } => self.go_to(index, now),
            NavRequest::First => self.go_to(self.nav.first_index(), now),
            NavRequest::Last => self.go_to(self.nav.last_index(), now),
            NavRequest::Reveal { index, ratio } => self.reveal(index, ratio, now),
            NavRequest::Resize => {
                self.on_resize(now);
                false
            }
        }
    }

    fn finish(&mut self, transition: Option<Transition>, now: Instant) -> bool {
        let Some(transition) = transition else {
            debug!(current = self.nav.current(), "navigation ignored");
            return false;
        };
        self.mark_active(transition.to);
        self.sync();
        self.dispatch(transition.to, TaskReason::Navigation, now);
        debug!(from = transition.from, to = transition.to, "navigated");
        true
    }

    /// Scroll-driven navigation; the host's visibility mechanism owns the
    /// active markers, so only the chrome and content follow.
    fn reveal(&mut self, index: usize, ratio: f64, now: Instant) -> bool {
        let Some(transition) = self.nav.go_to(index) else {
            return false;
        };
        self.sync();
        self.dispatch(transition.to, TaskReason::Navigation, now);
        debug!(from = transition.from, to = transition.to, ratio, "slide revealed");
        true
    }

    fn mark_active(&mut self, index: usize) {
        for slide in 0..self.nav.total() {
            let result = self.surface.set_slide_active(slide, slide == index);
            if slide == index {
                tolerate(result);
            }
        }
    }

    fn sync(&mut self) {
        let view = self.view();
        tolerate(self.surface.set_text(Element::Counter, &view.counter));
        tolerate(self.surface.set_text(Element::Section, &view.section));
        for (index, active) in view.dots.iter().enumerate() {
            if let Err(e) = self.surface.set_dot_active(index, *active) {
                debug!(error = %e, "skipping indicator update");
                break;
            }
        }
        tolerate(self.surface.set_button(Element::PreviousButton, &view.previous));
        tolerate(self.surface.set_button(Element::NextButton, &view.next));
    }

    fn dispatch(&mut self, index: usize, reason: TaskReason, now: Instant) {
        let Some(target) = self.content.chart_for(index) else {
            return;
        };
        if self.flags.is_loaded(target) {
            debug!(chart = %target, "chart already drawn");
            return;
        }
        let delay = self.config.load_delay;
        self.queue.schedule(target, index, reason, now, delay);
        if delay.is_zero() {
            self.run_due(now);
        }
    }

    /// Draw a chart if the task is still meaningful.
    fn execute(&mut self, task: &Task) -> bool {
        if !self.nav.contains(task.slide) || task.slide != self.nav.current() {
            debug!(chart = %task.target, slide = task.slide, "slide no longer current, skipping draw");
            return false;
        }
        if !self.queue.is_latest(task) {
            debug!(chart = %task.target, generation = task.generation, "superseded draw skipped");
            return false;
        }
        if self.flags.is_loaded(task.target) {
            return false;
        }
        let spec = self.build_spec(task.target);
        match self.renderer.render(task.target, &spec) {
            Ok(()) => {
                self.flags.mark(task.target);
                info!(chart = %task.target, reason = ?task.reason, "chart drawn");
                true
            }
            Err(e) => {
                warn!(chart = %task.target, error = %e, "chart construction failed");
                false
            }
        }
    }

    fn build_spec(&self, target: ChartTarget) -> ChartSpec {
        match target {
            ChartTarget::FlowDiagram => ChartSpec::Flow(FlowDiagram::layout(
                &self.datasets.energy_flow,
                self.surface.chart_width(target),
            )),
            ChartTarget::Investment => {
                ChartSpec::Series(investment_chart(&self.datasets.investments))
            }
            ChartTarget::Workforce => ChartSpec::Series(workforce_chart(&self.datasets.workforce)),
        }
    }
}

fn tolerate(result: Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "skipping update");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::chart::ChartLog;
    use crate::document::Document;
    use crate::error::Error;
    use crate::input::Key;
    use proptest::prelude::*;

    type TestController = Controller<Document, ChartLog>;

    const SETTLE: Duration = Duration::from_millis(300);

    fn controller() -> (TestController, Instant) {
        let now = Instant::now();
        let mut c = Controller::new(ControllerConfig::default(), Document::new(20), ChartLog::new())
            .unwrap();
        c.init(now);
        (c, now)
    }

    fn assert_synced(c: &TestController, index: usize) {
        let doc = c.surface();
        assert_eq!(c.current(), index);
        assert_eq!(doc.active_slides(), vec![index]);
        assert_eq!(doc.active_dots(), vec![index]);
        assert_eq!(doc.text(Element::Counter), Some((index + 1).to_string().as_str()));
        assert_eq!(
            doc.text(Element::Section),
            Some(SectionMap::nuclear_society().label(index))
        );
    }

    #[test]
    fn init_prepares_document() {
        let (c, _) = controller();
        let doc = c.surface();
        assert_eq!(doc.text(Element::Total), Some("20"));
        assert_eq!(doc.dots().unwrap().len(), 20);
        assert_eq!(doc.dots().unwrap()[3].label, "Go to slide 4");
        assert!(doc.dots().unwrap()[3].focusable);
        assert_eq!(
            doc.slide(0).unwrap().label.as_deref(),
            Some("Slide 1 of 20: Introduction")
        );
        assert_eq!(doc.slide(0).unwrap().role.as_deref(), Some("region"));
        assert_eq!(
            doc.button(Element::NextButton).unwrap().label.as_deref(),
            Some("Go to next slide")
        );
        assert_synced(&c, 0);
    }

    #[test]
    fn go_to_activates_exactly_one_region() {
        let (mut c, now) = controller();
        assert!(c.go_to(7, now));
        assert_synced(&c, 7);
    }

    #[test]
    fn out_of_range_navigation_is_silently_ignored() {
        let (mut c, now) = controller();
        c.go_to(4, now);
        assert!(!c.go_to(20, now));
        assert!(!c.go_to(usize::MAX, now));
        assert_synced(&c, 4);
    }

    #[test]
    fn redundant_navigation_is_noop() {
        let (mut c, now) = controller();
        c.go_to(4, now);
        assert!(!c.go_to(4, now));
        assert_synced(&c, 4);
    }

    #[test]
    fn next_at_last_and_previous_at_first_are_noops() {
        let (mut c, now) = controller();
        assert!(!c.previous(now));
        assert_eq!(c.current(), 0);
        c.go_to(19, now);
        assert!(!c.next(now));
        assert_eq!(c.current(), 19);
    }

    #[test]
    fn buttons_follow_position() {
        let (mut c, now) = controller();
        {
            let prev = c.surface().button(Element::PreviousButton).unwrap();
            assert!(prev.disabled);
            assert_eq!(prev.opacity, 0.5);
        }
        c.go_to(19, now);
        let doc = c.surface();
        let next = doc.button(Element::NextButton).unwrap();
        assert!(next.disabled);
        assert_eq!(next.text, "Complete");
        assert!(!doc.button(Element::PreviousButton).unwrap().disabled);

        c.previous(now);
        let next = c.surface().button(Element::NextButton).unwrap();
        assert!(!next.disabled);
        assert_eq!(next.opacity, 1.0);
        assert_eq!(next.text, "Next");
    }

    #[test]
    fn keyboard_navigation() {
        let (mut c, now) = controller();
        let outcome = c.handle(InputEvent::Key { key: Key::Space }, now);
        assert!(outcome.navigated);
        assert!(outcome.prevent_default);
        assert_eq!(c.current(), 1);

        c.handle(InputEvent::Key { key: Key::End }, now);
        assert_eq!(c.current(), 19);
        c.handle(InputEvent::Key { key: Key::ArrowUp }, now);
        assert_eq!(c.current(), 18);
        c.handle(InputEvent::Key { key: Key::Home }, now);
        assert_synced(&c, 0);
    }

    #[test]
    fn swipe_of_sixty_pixels_advances_once() {
        let (mut c, now) = controller();
        c.handle(InputEvent::TouchStart { x: 200.0, y: 50.0 }, now);
        let outcome = c.handle(InputEvent::TouchEnd { x: 140.0, y: 50.0 }, now);
        assert!(outcome.navigated);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn swipe_of_thirty_pixels_does_nothing() {
        let (mut c, now) = controller();
        c.handle(InputEvent::TouchStart { x: 200.0, y: 50.0 }, now);
        let outcome = c.handle(InputEvent::TouchEnd { x: 170.0, y: 50.0 }, now);
        assert!(!outcome.navigated);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn dot_activation() {
        let (mut c, now) = controller();
        c.handle(InputEvent::Dot { index: 11 }, now);
        assert_synced(&c, 11);
        c.handle(InputEvent::DotKey { index: 3, key: Key::Enter }, now);
        assert_synced(&c, 3);
    }

    #[test]
    fn flow_diagram_drawn_once_after_delay() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 0);
        assert_eq!(c.run_due(now + Duration::from_millis(50)), 0);
        assert_eq!(c.run_due(now + Duration::from_millis(100)), 1);
        assert!(c.is_loaded(ChartTarget::FlowDiagram));

        c.go_to(2, now + SETTLE);
        c.run_due(now + SETTLE * 2);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 1);
    }

    #[test]
    fn revisiting_a_drawn_slide_does_not_redraw() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        c.run_due(now + SETTLE);
        c.go_to(3, now + SETTLE);
        c.go_to(2, now + SETTLE);
        c.run_due(now + SETTLE * 3);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 1);
    }

    #[test]
    fn quick_bounce_draws_once() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        c.go_to(3, now);
        c.go_to(2, now);
        c.run_due(now + SETTLE);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 1);
    }

    #[test]
    fn stale_task_for_left_slide_skips() {
        let (mut c, now) = controller();
        c.go_to(5, now);
        c.go_to(6, now);
        assert_eq!(c.run_due(now + SETTLE), 0);
        assert!(!c.is_loaded(ChartTarget::Investment));

        c.go_to(5, now + SETTLE);
        assert_eq!(c.run_due(now + SETTLE * 2), 1);
    }

    #[test]
    fn resize_allows_exactly_one_redraw() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        c.run_due(now + SETTLE);

        let later = now + SETTLE;
        c.on_resize(later);
        c.on_resize(later + Duration::from_millis(10));
        c.on_resize(later + Duration::from_millis(20));
        c.run_due(later + SETTLE * 2);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 2);

        c.run_due(later + SETTLE * 4);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 2);
    }

    #[test]
    fn resize_uses_new_container_width() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        c.run_due(now + SETTLE);
        c.surface_mut().set_chart_width(ChartTarget::FlowDiagram, 1200.0);
        c.handle(InputEvent::Resize, now + SETTLE);
        c.run_due(now + SETTLE * 3);
        let Some(ChartSpec::Flow(diagram)) = c.renderer().latest(ChartTarget::FlowDiagram) else {
            panic!("flow diagram not drawn");
        };
        assert_eq!(diagram.width, 1160.0);
    }

    #[test]
    fn resize_on_plain_slide_schedules_nothing() {
        let (mut c, now) = controller();
        c.go_to(1, now);
        c.on_resize(now);
        assert_eq!(c.pending_tasks(), 0);
    }

    #[test]
    fn each_chart_has_its_slide() {
        let (mut c, now) = controller();
        c.go_to(5, now);
        c.run_due(now + SETTLE);
        c.go_to(12, now + SETTLE);
        c.run_due(now + SETTLE * 2);
        assert_eq!(c.renderer().count(ChartTarget::Investment), 1);
        assert_eq!(c.renderer().count(ChartTarget::Workforce), 1);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 0);
    }

    #[test]
    fn zero_delay_draws_synchronously() {
        let now = Instant::now();
        let config = ControllerConfig {
            load_delay: Duration::ZERO,
            ..Default::default()
        };
        let mut c = Controller::new(config, Document::new(20), ChartLog::new()).unwrap();
        c.init(now);
        c.go_to(2, now);
        assert!(c.is_loaded(ChartTarget::FlowDiagram));
        assert_eq!(c.pending_tasks(), 0);
    }

    #[test]
    fn visibility_moves_index_without_touching_regions() {
        let (mut c, now) = controller();
        assert!(!c.on_visibility(4, 0.3, now));
        assert!(c.on_visibility(4, 0.6, now));
        assert_eq!(c.current(), 4);
        let doc = c.surface();
        assert_eq!(doc.active_slides(), vec![0]);
        assert_eq!(doc.active_dots(), vec![4]);
        assert_eq!(doc.text(Element::Counter), Some("5"));
    }

    #[test]
    fn missing_elements_do_not_block_navigation() {
        let now = Instant::now();
        let doc = Document::new(20)
            .without(Element::Counter)
            .without(Element::DotContainer)
            .without(Element::PreviousButton);
        let mut c = Controller::new(ControllerConfig::default(), doc, ChartLog::new()).unwrap();
        c.init(now);
        assert!(c.next(now));
        assert_eq!(c.current(), 1);
        assert_eq!(c.surface().text(Element::Section), Some("Motivation"));
        assert_eq!(c.surface().active_slides(), vec![1]);
    }

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render(&mut self, target: ChartTarget, _spec: &ChartSpec) -> Result<()> {
            Err(Error::Render {
                target,
                reason: "no 2d context".into(),
            })
        }
    }

    #[test]
    fn render_failure_leaves_deck_usable() {
        let now = Instant::now();
        let mut c =
            Controller::new(ControllerConfig::default(), Document::new(20), FailingRenderer)
                .unwrap();
        c.init(now);
        c.go_to(5, now);
        assert_eq!(c.run_due(now + SETTLE), 0);
        assert!(!c.is_loaded(ChartTarget::Investment));
        assert!(c.next(now + SETTLE));
        assert_eq!(c.current(), 6);
    }

    #[test]
    fn new_flow_links_force_redraw() {
        let (mut c, now) = controller();
        c.go_to(2, now);
        c.run_due(now + SETTLE);
        c.set_flow_links(vec![FlowLink::new("Nuclear", "Electricity", 90.0)]);
        assert!(!c.is_loaded(ChartTarget::FlowDiagram));
        c.go_to(3, now + SETTLE);
        c.go_to(2, now + SETTLE);
        c.run_due(now + SETTLE * 2);
        assert_eq!(c.renderer().count(ChartTarget::FlowDiagram), 2);
    }

    #[test]
    fn slide_count_must_match_document() {
        let result = Controller::new(ControllerConfig::default(), Document::new(5), ChartLog::new());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let config = ControllerConfig {
            total_slides: 5,
            ..Default::default()
        };
        let now = Instant::now();
        let mut c = Controller::new(config, Document::new(5), ChartLog::new()).unwrap();
        c.init(now);
        assert!(!c.go_to(10, now));
        assert!(c.go_to(4, now));
        assert_eq!(c.surface().active_slides(), vec![4]);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ControllerConfig {
            total_slides: 0,
            ..Default::default()
        };
        assert!(Controller::new(config, Document::new(0), ChartLog::new()).is_err());
    }

    proptest! {
        #[test]
        fn one_active_region_after_any_go_to(targets in proptest::collection::vec(0usize..40, 1..32)) {
            let (mut c, now) = controller();
            for target in targets {
                let before = c.current();
                c.go_to(target, now);
                let expected = if target < 20 { target } else { before };
                prop_assert_eq!(c.current(), expected);
                prop_assert_eq!(c.surface().active_slides(), vec![expected]);
                prop_assert_eq!(c.surface().active_dots(), vec![expected]);
            }
        }
    }
}
