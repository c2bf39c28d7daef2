use std::sync::Arc;

use crate::config::Config;
use crate::scoring::{ScoringEngine, TieBreaker};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScoringEngine>,
    pub tie_breaker: TieBreaker,
    pub config: Config,
}

impl AppState {
    pub fn new(engine: ScoringEngine, config: Config) -> Self {
        Self {
            engine: Arc::new(engine),
            tie_breaker: TieBreaker::from_seed(config.tiebreak_seed),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<ScoringEngine> {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}

impl FromRef<AppState> for TieBreaker {
    fn from_ref(state: &AppState) -> Self {
        state.tie_breaker.clone()
    }
}
