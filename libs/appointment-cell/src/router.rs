use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::SharedScheduler;

pub fn patient_routes(scheduler: SharedScheduler) -> Router {
    Router::new()
        .route("/", post(handlers::create_patient).get(handlers::list_patients))
        .route(
            "/{patient_id}",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .with_state(scheduler)
}

pub fn appointment_routes(scheduler: SharedScheduler) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .route("/availability", get(handlers::check_availability))
        .route("/cancel", post(handlers::cancel_appointment))
        .with_state(scheduler)
}
