//! Reactor Deck Server
//!
//! Hosts the nuclear society presentation over HTTP and WebSocket. A single
//! controller holds the slide state; browsers send input events and render
//! the projected view, chart specifications and table bodies it serves.
//!
//! # Routes
//!
//! - `GET /` presentation page, `GET /health`
//! - `GET /api/deck` and `POST /api/deck/{next,previous,goto,key,dot,swipe,visible,resize}`
//! - `GET /api/tables`, `GET /api/charts`
//! - `GET /ws` command channel
//! - `/data/*` CSV files when the data source is a local directory

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod ws;

pub use api::build_router;
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use state::{AppState, ChartStatus, DeckResponse, TableBody};
