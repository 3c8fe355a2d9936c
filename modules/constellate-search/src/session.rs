//! Search session: the single owner of the displayed search state.
//!
//! Each `start` bumps a generation counter, resets the state and spawns the
//! pipeline. The running pipeline never touches the state directly; it sends
//! `SearchEvent`s tagged with its generation, and `apply` drops anything from
//! a superseded generation. A newer search therefore can never be overwritten
//! by a slower, older one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use constellate_common::{ConstellateError, PipelineResult, SearchStage};

use crate::search::SearchPipeline;
use crate::traits::ArenaSource;
use crate::url_match::domain_token;

#[derive(Debug, Clone)]
pub struct SearchEvent {
    pub generation: u64,
    pub kind: SearchEventKind,
}

#[derive(Debug, Clone)]
pub enum SearchEventKind {
    StageStarted(SearchStage),
    Completed(Box<PipelineResult>),
    Failed(ConstellateError),
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub generation: u64,
    pub busy: bool,
    pub stage: Option<SearchStage>,
    pub error: Option<ConstellateError>,
    pub result: PipelineResult,
}

pub struct SearchSession<S: ?Sized> {
    pipeline: Arc<SearchPipeline<S>>,
    state: SearchState,
    events_tx: mpsc::UnboundedSender<SearchEvent>,
    events_rx: mpsc::UnboundedReceiver<SearchEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl<S: ArenaSource + ?Sized + 'static> SearchSession<S> {
    pub fn new(pipeline: SearchPipeline<S>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            pipeline: Arc::new(pipeline),
            state: SearchState::default(),
            events_tx,
            events_rx,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a new search, superseding any search still in flight.
    ///
    /// State is reset before anything else. Invalid input is recorded as the
    /// session error and returned without spawning a run. Must be called
    /// from within a tokio runtime.
    pub fn start(&mut self, candidate: &str) -> Result<u64, ConstellateError> {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            debug!(generation = self.state.generation, "Aborted superseded search");
        }

        let generation = self.state.generation + 1;
        self.state = SearchState {
            generation,
            busy: true,
            ..Default::default()
        };

        if let Err(err) = domain_token(candidate) {
            warn!(candidate, error = %err, "Rejected search input");
            self.state.busy = false;
            self.state.error = Some(err.clone());
            return Err(err);
        }

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.events_tx.clone();
        let candidate = candidate.to_string();

        self.in_flight = Some(tokio::spawn(async move {
            let progress = tx.clone();
            let outcome = pipeline
                .run_with_progress(&candidate, |stage| {
                    let _ = progress.send(SearchEvent {
                        generation,
                        kind: SearchEventKind::StageStarted(stage),
                    });
                })
                .await;

            let kind = match outcome {
                Ok(result) => SearchEventKind::Completed(Box::new(result)),
                Err(err) => SearchEventKind::Failed(err),
            };
            let _ = tx.send(SearchEvent { generation, kind });
        }));

        info!(generation, "Search started");
        Ok(generation)
    }

    /// Apply one event. Returns false if it belonged to a superseded search.
    pub fn apply(&mut self, event: SearchEvent) -> bool {
        if event.generation != self.state.generation {
            debug!(
                stale = event.generation,
                current = self.state.generation,
                "Dropping event from superseded search"
            );
            return false;
        }

        match event.kind {
            SearchEventKind::StageStarted(stage) => {
                self.state.stage = Some(stage);
            }
            SearchEventKind::Completed(result) => {
                self.state.result = *result;
                self.finish();
            }
            SearchEventKind::Failed(err) => {
                warn!(generation = event.generation, error = %err, "Search failed");
                self.state.error = Some(err);
                self.finish();
            }
        }
        true
    }

    /// Drain events until the current search is idle, then return the state.
    pub async fn wait(&mut self) -> &SearchState {
        while self.state.busy {
            match self.events_rx.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
        &self.state
    }

    fn finish(&mut self) {
        self.state.busy = false;
        self.state.stage = None;
        self.in_flight = None;
    }
}
