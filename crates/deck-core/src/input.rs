//! Input adapters.
//!
//! Each raw event maps onto at most one navigation request. Touch gestures are
//! the only adapter with state: the start point is remembered until the
//! matching end event arrives.

use serde::{Deserialize, Serialize};

/// Keyboard keys the deck reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Home,
    End,
    /// Any key without a binding
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            " " | "Spacebar" | "Space" => Key::Space,
            "Enter" => Key::Enter,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => Key::Other,
        }
    }
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Previous button activated
    PreviousButton,
    /// Next button activated
    NextButton,
    /// Indicator dot clicked
    Dot { index: usize },
    /// Key pressed while an indicator dot has focus
    DotKey { index: usize, key: Key },
    /// Key pressed anywhere on the page
    Key { key: Key },
    /// Finger down
    TouchStart { x: f64, y: f64 },
    /// Finger up
    TouchEnd { x: f64, y: f64 },
    /// A complete touch gesture, judged without the start/end pairing
    Gesture {
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    },
    /// A slide region's visible fraction changed
    Visibility { index: usize, ratio: f64 },
    /// Viewport resized
    Resize,
}

/// Navigation requested by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavRequest {
    Previous,
    Next,
    GoTo { index: usize },
    First,
    Last,
    /// Slide became visible through scrolling; active markers are owned by the host
    Reveal { index: usize, ratio: f64 },
    Resize,
}

/// Result of translating one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub request: Option<NavRequest>,
    /// Host must suppress the browser's default action (page scroll on Space)
    pub prevent_default: bool,
}

impl Translation {
    fn none() -> Self {
        Self::default()
    }

    fn handled(request: NavRequest) -> Self {
        Self {
            request: Some(request),
            prevent_default: true,
        }
    }

    fn passive(request: Option<NavRequest>) -> Self {
        Self {
            request,
            prevent_default: false,
        }
    }
}

/// Direction of a recognised swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

impl Swipe {
    /// Leftward travel moves forward.
    fn request(self) -> NavRequest {
        match self {
            Swipe::Left => NavRequest::Next,
            Swipe::Right => NavRequest::Previous,
        }
    }
}

/// Remembers where a touch gesture started.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
    threshold: f64,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Finish a gesture.
    ///
    /// Short gestures and gestures that travel further vertically than
    /// horizontally are ignored.
    pub fn end(&mut self, x: f64, y: f64) -> Option<Swipe> {
        let start = self.start.take()?;
        self.classify(start, (x, y))
    }

    /// Judge a gesture from both of its points.
    pub fn classify(&self, start: (f64, f64), end: (f64, f64)) -> Option<Swipe> {
        let dx = start.0 - end.0;
        let dy = start.1 - end.1;
        if dx.abs() <= self.threshold || dy.abs() > dx.abs() {
            return None;
        }
        if dx > 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    }
}

/// Translates raw events into navigation requests.
#[derive(Debug, Clone)]
pub struct InputRouter {
    swipe: SwipeTracker,
    visibility_threshold: f64,
}

impl InputRouter {
    pub fn new(swipe_threshold: f64, visibility_threshold: f64) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
            visibility_threshold,
        }
    }

    /// Translate one event.
    pub fn translate(&mut self, event: InputEvent) -> Translation {
        match event {
            InputEvent::PreviousButton => Translation::handled(NavRequest::Previous),
            InputEvent::NextButton => Translation::handled(NavRequest::Next),
            InputEvent::Dot { index } => Translation::handled(NavRequest::GoTo { index }),
            InputEvent::DotKey { index, key } => match key {
                Key::Enter | Key::Space => Translation::handled(NavRequest::GoTo { index }),
                _ => Translation::none(),
            },
            InputEvent::Key { key } => match key {
                Key::ArrowLeft | Key::ArrowUp => Translation::handled(NavRequest::Previous),
                Key::ArrowRight | Key::ArrowDown | Key::Space => {
                    Translation::handled(NavRequest::Next)
                }
                Key::Home => Translation::handled(NavRequest::First),
                Key::End => Translation::handled(NavRequest::Last),
                Key::Enter | Key::Other => Translation::none(),
            },
            InputEvent::TouchStart { x, y } => {
                self.swipe.begin(x, y);
                Translation::none()
            }
            InputEvent::TouchEnd { x, y } => {
                Translation::passive(self.swipe.end(x, y).map(Swipe::request))
            }
            InputEvent::Gesture {
                start_x,
                start_y,
                end_x,
                end_y,
            } => Translation::passive(
                self.swipe
                    .classify((start_x, start_y), (end_x, end_y))
                    .map(Swipe::request),
            ),
            InputEvent::Visibility { index, ratio } => {
                let request = (ratio >= self.visibility_threshold)
                    .then_some(NavRequest::Reveal { index, ratio });
                Translation::passive(request)
            }
            InputEvent::Resize => Translation::passive(Some(NavRequest::Resize)),
        }
    }
}
