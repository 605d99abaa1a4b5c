use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::{appointment_routes, patient_routes, SharedScheduler};
use doctor_cell::router::doctor_routes;
use doctor_cell::services::ProviderDirectory;

pub fn create_router(directory: Arc<ProviderDirectory>, scheduler: SharedScheduler) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Scheduler API is running!" }))
        .nest("/providers", doctor_routes(directory))
        .nest("/patients", patient_routes(scheduler.clone()))
        .nest("/appointments", appointment_routes(scheduler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use appointment_cell::{services, ClinicScheduler};
    use patient_cell::services::IdentifierGenerator;

    fn app() -> Router {
        let directory = Arc::new(ProviderDirectory::clinic_default().unwrap());
        let scheduler = services::shared(ClinicScheduler::new(
            directory.clone(),
            IdentifierGenerator::with_seed(1000..=9999, 10_000, 3),
        ));
        create_router(directory, scheduler)
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cells_are_mounted() {
        let app = app();
        for uri in ["/providers", "/patients", "/appointments", "/appointments/availability?time=9:00"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        }
    }
}
