use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{clients, coaches, exercises, health, workouts};
use crate::repositories::SessionRepository;

pub fn create_router(
    coaches_state: coaches::CoachesState,
    clients_state: clients::ClientsState,
    workouts_state: workouts::WorkoutsState,
    exercises_state: exercises::ExercisesState,
    session_repo: SessionRepository,
    cors_origins: &str,
) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        // Coach routes
        .route("/coaches", get(coaches::list).post(coaches::register))
        .route("/coaches/login", post(coaches::login))
        .route("/coaches/logout", post(coaches::logout))
        .route("/coaches/me", get(coaches::me))
        .route(
            "/coaches/{id}",
            get(coaches::show)
                .put(coaches::replace)
                .patch(coaches::patch)
                .delete(coaches::delete),
        )
        .route("/coaches/{id}/clients", get(coaches::clients))
        .with_state(coaches_state)
        // Client routes
        .route("/clients", get(clients::list).post(clients::create))
        .route(
            "/clients/{id}",
            get(clients::show)
                .put(clients::replace)
                .patch(clients::patch)
                .delete(clients::delete),
        )
        .with_state(clients_state)
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/{id}",
            get(workouts::show)
                .put(workouts::update)
                .patch(workouts::update)
                .delete(workouts::delete),
        )
        .route("/workouts/by-client/{client_id}", get(workouts::by_client))
        .with_state(workouts_state)
        // Exercise catalog routes
        .route("/exercises", get(exercises::list))
        .route("/exercises/{id}", get(exercises::show))
        .route("/exercises/{id}/weights", get(exercises::weights))
        .route("/load-weights", get(exercises::load_weights))
        .route(
            "/load-weights/by-exercise/{id}",
            get(exercises::load_weights_by_exercise),
        )
        .with_state(exercises_state)
        // Session repository for the bearer-token extractor
        .layer(Extension(session_repo))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// `*` (or nothing) allows any origin; otherwise a comma-separated list.
pub fn cors_layer(origins: &str) -> CorsLayer {
    let origins = origins.trim();
    let allow_origin = if origins.is_empty() || origins == "*" {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if list.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(list)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
