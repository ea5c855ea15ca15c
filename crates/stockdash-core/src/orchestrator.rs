//! Coordinates the roster, price history and prediction fetches
//!
//! The orchestrator is the single writer of [`DashboardState`]. Commands
//! take `&self`, so a presentation layer can keep one orchestrator behind an
//! `Arc` and issue commands from any task. Every write is published through a
//! `watch` channel; subscribers re-render from the latest state.
//!
//! # Selection fencing
//!
//! Each [`select_company`](DataOrchestrator::select_company) call opens a new
//! selection generation. History and prediction responses are applied only
//! while their generation is still current, so a slow response for an
//! earlier selection can never overwrite data for the company now on screen.
//!
//! # Roster fetches
//!
//! Roster fetches are not fenced: when several overlap, the last one to
//! settle decides the roster. `loading.companies` stays set until every
//! outstanding roster fetch has settled or been dropped.

use crate::api::{HttpStockApi, StockApi};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::model::RosterEntry;
use crate::state::{DashboardState, ErrorState, Resource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Owner of the dashboard's client-side state
pub struct DataOrchestrator {
    api: Arc<dyn StockApi>,
    config: Arc<DashboardConfig>,
    state: watch::Sender<DashboardState>,
    initialized: AtomicBool,
}

impl DataOrchestrator {
    /// Create an orchestrator without fetching anything yet
    pub fn new(api: Arc<dyn StockApi>, config: DashboardConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            api,
            config: Arc::new(config),
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Build an HTTP-backed orchestrator and load the initial roster
    pub async fn connect(config: DashboardConfig) -> Result<Self> {
        let api = HttpStockApi::new(&config)?;
        let orchestrator = Self::new(Arc::new(api), config);
        orchestrator.initialize().await;
        Ok(orchestrator)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Load the roster with default parameters
    ///
    /// Runs once per orchestrator; later calls return immediately.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("Orchestrator already initialized");
            return;
        }

        info!("Loading company roster");
        self.fetch_companies(false).await;
    }

    /// Re-fetch the roster, asking the service to bypass its cache
    ///
    /// The selection, price history and prediction are left as they are.
    pub async fn refresh_data(&self) {
        info!("Refreshing company roster");
        self.fetch_companies(true).await;
    }

    /// Make `company` the selection and load its history and prediction
    ///
    /// The previous history and prediction are cleared, and both loading
    /// flags raised, in the same update that changes the selection. Both
    /// fetches then run concurrently; a
    /// failure in one leaves the other untouched and only empties its own
    /// slot.
    pub async fn select_company(&self, company: &RosterEntry) {
        let symbol = company.symbol.clone();
        let mut generation = 0;

        self.state.send_modify(|state| {
            state.selection_generation += 1;
            generation = state.selection_generation;
            state.selected_company = Some(company.clone());
            state.stock_data = Vec::new();
            state.prediction = None;
            state.loading.stock_data = true;
            state.loading.prediction = true;
        });

        info!(symbol = %symbol, generation, "Selected company");

        tokio::join!(
            self.load_stock_data(&symbol, generation),
            self.load_prediction(&symbol, generation),
        );
    }

    /// Select the roster entry with `symbol`, if the roster has one
    ///
    /// Returns `false` without touching state when the symbol is unknown.
    pub async fn select_symbol(&self, symbol: &str) -> bool {
        let entry = self.state.borrow().find_company(symbol).cloned();
        match entry {
            Some(entry) => {
                self.select_company(&entry).await;
                true
            }
            None => {
                warn!(symbol, "Symbol is not in the current roster");
                false
            }
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it
    ///
    /// `read` must not block; the orchestrator cannot publish while it runs.
    pub fn with_state<R>(&self, read: impl FnOnce(&DashboardState) -> R) -> R {
        read(&self.state.borrow())
    }

    /// Receiver that is notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    async fn fetch_companies(&self, refresh: bool) {
        let request = RosterRequest::begin(&self.state);

        let result = self
            .api
            .get_companies(refresh, self.config.companies_limit)
            .await;

        request.settle(|state| match result {
            Ok(companies) => {
                debug!(count = companies.len(), refresh, "Roster loaded");
                state.companies = companies.into_iter().map(RosterEntry::new).collect();
                state.error = None;
            }
            Err(err) => {
                warn!("Failed to fetch companies: {}", err);
                state.error = Some(ErrorState::new(Resource::Companies, err.to_string()));
            }
        });
    }

    async fn load_stock_data(&self, symbol: &str, generation: u64) {
        if !self.is_current(generation) {
            return;
        }

        let result = self
            .api
            .get_stock_data(symbol, self.config.history_days)
            .await;
        if let Err(err) = &result {
            warn!(symbol, "Failed to fetch stock data: {}", err);
        }

        let applied = self.update_selection(generation, |state| {
            state.stock_data = result.unwrap_or_default();
            state.loading.stock_data = false;
        });
        if applied {
            debug!(symbol, "Stock data settled");
        } else {
            debug!(symbol, generation, "Discarded stock data for a superseded selection");
        }
    }

    async fn load_prediction(&self, symbol: &str, generation: u64) {
        if !self.is_current(generation) {
            return;
        }

        let result = self.api.get_prediction(symbol).await;
        if let Err(err) = &result {
            warn!(symbol, "Failed to fetch prediction: {}", err);
        }

        let applied = self.update_selection(generation, |state| {
            state.prediction = result.ok().flatten();
            state.loading.prediction = false;
        });
        if applied {
            debug!(symbol, "Prediction settled");
        } else {
            debug!(symbol, generation, "Discarded prediction for a superseded selection");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().selection_generation == generation
    }

    /// Apply `update` only while `generation` is the current selection
    fn update_selection(&self, generation: u64, update: impl FnOnce(&mut DashboardState)) -> bool {
        self.state.send_if_modified(|state| {
            if state.selection_generation != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

/// One outstanding roster fetch
///
/// Counted in `roster_requests` from `begin` until it settles or is dropped,
/// so an abandoned fetch cannot keep `loading.companies` raised.
struct RosterRequest<'a> {
    state: &'a watch::Sender<DashboardState>,
    settled: bool,
}

impl<'a> RosterRequest<'a> {
    fn begin(state: &'a watch::Sender<DashboardState>) -> Self {
        state.send_modify(|state| {
            state.roster_requests += 1;
            state.loading.companies = true;
        });
        Self {
            state,
            settled: false,
        }
    }

    /// Release the request and apply its outcome in one update
    fn settle(mut self, apply: impl FnOnce(&mut DashboardState)) {
        self.settled = true;
        self.state.send_modify(|state| {
            Self::release(state);
            apply(state);
        });
    }

    fn release(state: &mut DashboardState) {
        state.roster_requests = state.roster_requests.saturating_sub(1);
        state.loading.companies = state.roster_requests > 0;
    }
}

impl Drop for RosterRequest<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Roster fetch abandoned before settling");
            self.state.send_modify(Self::release);
        }
    }
}
