use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::AppResult;
use crate::handler::{
    create_prediction, get_breed, health, index, list_breeds, list_predictions, predict_page,
};
use crate::scorer::MockScorer;
use crate::store::ResultStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ResultStore,
    pub scorer: MockScorer,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config, catalog: Arc<Catalog>) -> AppResult<Self> {
        let store = ResultStore::initialize(&config.database_url, catalog.clone()).await?;
        Ok(Self {
            store,
            scorer: MockScorer::new(catalog),
            config: Arc::new(config),
        })
    }
}

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.max_upload_bytes;

    let api_routes = Router::new()
        .route("/breeds", get(list_breeds))
        .route("/breeds/{name}", get(get_breed))
        .route("/predictions", get(list_predictions).post(create_prediction));

    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_page))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
