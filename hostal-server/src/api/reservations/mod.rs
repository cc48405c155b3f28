//! Reservation API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/quote", get(handler::quote))
        .route("/availability", get(handler::availability))
        .route("/totals", get(handler::totals))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/cancel", put(handler::cancel))
        .route("/{id}/finalize", put(handler::finalize))
        .route("/{id}/services", put(handler::assign_services))
}
