//! Shared host state.
//!
//! One controller serves every client. Deferred chart tasks are driven by a
//! background task that sleeps until the controller's earliest deadline and
//! is woken whenever an input may have scheduled something sooner.

use std::sync::Arc;
use std::time::Instant;

use deck_core::{
    ChartLog, ChartSpec, ChartTarget, Controller, ControllerConfig, Document, InputEvent,
    InputOutcome, SlideView,
};
use deck_tables::{
    load_flow_links, CsvSource, LoadedTable, RowOrigin, TableId, TableLoader, TableOutcome,
    TableSink, Tables, FLOW_RESOURCE,
};
use serde::Serialize;
use tokio::sync::{Notify, RwLock};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::error::Result;

/// The controller as hosted: an in-memory document and a recording renderer.
pub type Deck = Controller<Document, ChartLog>;

/// Result of one input or navigation request.
#[derive(Debug, Clone, Serialize)]
pub struct DeckResponse {
    pub navigated: bool,
    pub prevent_default: bool,
    pub view: SlideView,
}

/// Draw state of one chart container.
#[derive(Debug, Clone, Serialize)]
pub struct ChartStatus {
    pub target: ChartTarget,
    pub element_id: &'static str,
    pub slide: Option<usize>,
    pub loaded: bool,
    pub draws: usize,
    pub spec: Option<ChartSpec>,
}

/// One table body as served to the page.
#[derive(Debug, Clone, Serialize)]
pub struct TableBody {
    pub table: TableId,
    pub body_id: String,
    pub columns: [&'static str; 4],
    pub rows: usize,
    pub html: String,
    #[serde(flatten)]
    pub origin: RowOrigin,
}

#[derive(Debug, Default)]
struct TableState {
    tables: Tables,
    outcomes: Vec<TableOutcome>,
}

/// Shared application state.
pub struct AppState {
    deck: RwLock<Deck>,
    tables: RwLock<TableState>,
    wake: Notify,
}

impl AppState {
    /// Build the controller and show the first slide.
    pub fn new(config: ControllerConfig) -> Result<Arc<Self>> {
        let document = Document::new(config.total_slides);
        let mut deck = Controller::new(config, document, ChartLog::new())?;
        deck.init(Instant::now());
        Ok(Arc::new(Self {
            deck: RwLock::new(deck),
            tables: RwLock::new(TableState::default()),
            wake: Notify::new(),
        }))
    }

    /// Populate the tables and flow diagram links from `source`.
    ///
    /// Every table loads on its own task and is published the moment it
    /// settles, so a hanging fetch holds back only its own table.
    pub async fn load_data<S>(self: &Arc<Self>, source: S) -> Vec<TableOutcome>
    where
        S: CsvSource + Send + Sync + 'static,
    {
        let loader = Arc::new(TableLoader::new(source));
        let mut tasks = JoinSet::new();
        for table in TableId::ALL {
            let loader = Arc::clone(&loader);
            let state = Arc::clone(self);
            tasks.spawn(async move {
                let loaded = loader.load(table).await;
                state.publish(&loaded).await
            });
        }

        let links = load_flow_links(loader.source(), FLOW_RESOURCE).await;
        self.deck.write().await.set_flow_links(links);

        let mut outcomes = Vec::with_capacity(TableId::ALL.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!(error = %e, "table load task failed"),
            }
        }
        outcomes.sort_by_key(|o| o.table);
        let remote = outcomes
            .iter()
            .filter(|o| o.origin == RowOrigin::Remote)
            .count();
        info!(remote, fallback = outcomes.len() - remote, "tables populated");
        outcomes
    }

    /// Load data in the background; the host serves navigation meanwhile.
    pub fn spawn_load<S>(self: &Arc<Self>, source: S) -> JoinHandle<Vec<TableOutcome>>
    where
        S: CsvSource + Send + Sync + 'static,
    {
        let state = Arc::clone(self);
        tokio::spawn(async move { state.load_data(source).await })
    }

    async fn publish(&self, loaded: &LoadedTable) -> TableOutcome {
        let outcome = loaded.outcome();
        let mut state = self.tables.write().await;
        state.tables.replace_body(loaded);
        state.outcomes.retain(|o| o.table != loaded.table);
        state.outcomes.push(outcome.clone());
        outcome
    }

    /// Route one raw input event.
    pub async fn input(&self, event: InputEvent) -> DeckResponse {
        self.update(|deck, now| deck.handle(event, now)).await
    }

    pub async fn go_to(&self, index: usize) -> DeckResponse {
        self.update(|deck, now| navigated(deck.go_to(index, now))).await
    }

    pub async fn next(&self) -> DeckResponse {
        self.update(|deck, now| navigated(deck.next(now))).await
    }

    pub async fn previous(&self) -> DeckResponse {
        self.update(|deck, now| navigated(deck.previous(now))).await
    }

    /// Viewport resized, optionally reporting the new chart container width.
    pub async fn resize(&self, width: Option<f64>) -> DeckResponse {
        self.update(|deck, now| {
            if let Some(width) = width {
                for target in ChartTarget::ALL {
                    deck.surface_mut().set_chart_width(target, width);
                }
            }
            deck.handle(InputEvent::Resize, now)
        })
        .await
    }

    pub async fn view(&self) -> SlideView {
        self.deck.read().await.view()
    }

    pub async fn document(&self) -> Document {
        self.deck.read().await.surface().clone()
    }

    pub async fn charts(&self) -> Vec<ChartStatus> {
        let deck = self.deck.read().await;
        ChartTarget::ALL
            .into_iter()
            .map(|target| ChartStatus {
                target,
                element_id: target.element_id(),
                slide: deck.content().slide_for(target),
                loaded: deck.is_loaded(target),
                draws: deck.renderer().count(target),
                spec: deck.renderer().latest(target).cloned(),
            })
            .collect()
    }

    pub async fn tables(&self) -> Vec<TableBody> {
        let state = self.tables.read().await;
        state
            .tables
            .iter()
            .map(|loaded| TableBody {
                table: loaded.table,
                body_id: loaded.table.body_id(),
                columns: loaded.table.columns(),
                rows: loaded.rows.len(),
                html: loaded.html(),
                origin: loaded.origin.clone(),
            })
            .collect()
    }

    pub async fn table_outcomes(&self) -> Vec<TableOutcome> {
        let mut outcomes = self.tables.read().await.outcomes.clone();
        outcomes.sort_by_key(|o| o.table);
        outcomes
    }

    /// Run every deferred task that is due now.
    pub async fn run_due(&self) -> usize {
        self.deck.write().await.run_due(Instant::now())
    }

    /// Start the background task that runs deferred chart work.
    pub fn spawn_driver(self: &Arc<Self>) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            state.drive().await;
        })
    }

    async fn drive(&self) {
        loop {
            let deadline = self.deck.read().await.next_deadline();
            match deadline {
                Some(deadline) => {
                    let deadline = tokio::time::Instant::from_std(deadline);
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {
                            let drawn = self.run_due().await;
                            if drawn > 0 {
                                debug!(drawn, "deferred charts drawn");
                            }
                        }
                        _ = self.wake.notified() => {}
                    }
                }
                None => self.wake.notified().await,
            }
        }
    }

    async fn update(&self, f: impl FnOnce(&mut Deck, Instant) -> InputOutcome) -> DeckResponse {
        let mut deck = self.deck.write().await;
        let outcome = f(&mut *deck, Instant::now());
        let view = deck.view();
        let scheduled = deck.pending_tasks() > 0;
        drop(deck);
        if scheduled {
            self.wake.notify_one();
        }
        DeckResponse {
            navigated: outcome.navigated,
            prevent_default: outcome.prevent_default,
            view,
        }
    }
}

fn navigated(navigated: bool) -> InputOutcome {
    InputOutcome {
        navigated,
        prevent_default: false,
    }
}
