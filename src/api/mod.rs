//! HTTP surface of the service.
//!
//! Mounts the client collection under `/api/v1/client` and a liveness
//! route at `/`. Handlers check existence before patching or deleting.

use axum::{
    Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::service::ClientService;

pub mod error;
pub mod handlers;
pub mod payload;
pub mod validation;

pub use error::{ApiError, ApiResult, FieldError, NOT_FOUND_MESSAGE};

/// Route prefix for the client collection.
pub const CLIENT_PREFIX: &str = "/api/v1/client";

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub clients: ClientService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            clients: ClientService::default(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let collection = get(handlers::list_clients).post(handlers::create_client);
    let item = get(handlers::get_client)
        .patch(handlers::patch_client)
        .delete(handlers::delete_client);

    Router::new()
        .route("/", get(handlers::root))
        .route(CLIENT_PREFIX, collection.clone())
        .route(&format!("{CLIENT_PREFIX}/"), collection)
        .route(&format!("{CLIENT_PREFIX}/:client_id"), item)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
