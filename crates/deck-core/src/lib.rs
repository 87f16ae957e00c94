//! Reactor Deck Core
//!
//! Slide navigation and lazy content for the nuclear society presentation.
//!
//! # Architecture
//!
//! - **Navigation**: a single slide index bounded by the slide count
//! - **Input**: buttons, keys, dots, swipes and scroll visibility mapped to navigation
//! - **View**: counter, section label, indicator dots and button states
//! - **Content**: per-slide charts drawn once, after a short settle delay
//!
//! The host document sits behind [`Surface`]; drawing sits behind
//! [`ChartRenderer`]. [`Document`] and [`ChartLog`] are in-memory versions of
//! both.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use deck_core::{ChartLog, ChartTarget, Controller, ControllerConfig, Document};
//!
//! let now = Instant::now();
//! let mut deck = Controller::new(ControllerConfig::default(), Document::new(20), ChartLog::new())?;
//! deck.init(now);
//! deck.go_to(2, now);
//! deck.run_due(now + Duration::from_millis(100));
//! assert!(deck.is_loaded(ChartTarget::FlowDiagram));
//! # Ok::<(), deck_core::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod content;
pub mod controller;
pub mod data;
pub mod document;
pub mod error;
pub mod flow;
pub mod input;
pub mod navigation;
pub mod schedule;
pub mod sections;
pub mod surface;
pub mod view;

pub use chart::{ChartLog, ChartRenderer, ChartSpec, ChartTarget};
pub use config::{ControllerConfig, TOTAL_SLIDES};
pub use content::{ContentMap, LoadedFlags};
pub use controller::{Controller, InputOutcome};
pub use data::{Datasets, FlowLink};
pub use document::Document;
pub use error::{Error, Result};
pub use flow::FlowDiagram;
pub use input::{InputEvent, Key};
pub use navigation::Navigator;
pub use sections::SectionMap;
pub use surface::{Element, Surface};
pub use view::{ButtonState, SlideView};
