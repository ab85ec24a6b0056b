#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;

use proft::db::{create_memory_pool, DbPool};
use proft::migrations::run_migrations_for_tests;
use proft::models::{Client, Coach, NewClient, NewCoach};
use proft::repositories::{
    ClientRepository, CoachRepository, ExerciseRepository, SessionRepository, WorkoutRepository,
};

pub const TEST_SESSION_TTL_SECS: i64 = 3600;
pub const TEST_PASSWORD: &str = "correct-horse";

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    use proft::handlers::{clients, coaches, exercises, workouts};

    let coach_repo = CoachRepository::new(pool.clone());
    let client_repo = ClientRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone(), TEST_SESSION_TTL_SECS);

    let coaches_state = coaches::CoachesState {
        coach_repo: coach_repo.clone(),
        client_repo: client_repo.clone(),
        session_repo: session_repo.clone(),
    };
    let clients_state = clients::ClientsState {
        client_repo: client_repo.clone(),
        coach_repo,
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo,
        client_repo,
        exercise_repo: exercise_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState { exercise_repo };

    proft::routes::create_router(
        coaches_state,
        clients_state,
        workouts_state,
        exercises_state,
        session_repo,
        "*",
    )
}

pub async fn create_test_coach(pool: &DbPool, email: &str, profile_name: &str) -> Coach {
    let coach_repo = CoachRepository::new(pool.clone());
    coach_repo
        .create(
            NewCoach {
                name: "Ana".to_string(),
                last_name: "Lopez".to_string(),
                profile_name: profile_name.to_string(),
                phone: "555-0100".to_string(),
                email: email.to_string(),
                city: "Madrid".to_string(),
                time_zone: "Europe/Madrid".to_string(),
                training_speciality: "strength".to_string(),
            },
            TEST_PASSWORD,
        )
        .await
        .unwrap()
}

pub async fn create_test_client(
    pool: &DbPool,
    coach_id: &str,
    email: &str,
    profile_name: &str,
) -> Client {
    let client_repo = ClientRepository::new(pool.clone());
    client_repo
        .create(NewClient {
            coach_id: coach_id.to_string(),
            name: "Luis".to_string(),
            last_name: "Garcia".to_string(),
            profile_name: profile_name.to_string(),
            phone: "555-0199".to_string(),
            email: email.to_string(),
            city: "Sevilla".to_string(),
            time_zone: "UTC".to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_session_token(pool: &DbPool, coach: &Coach) -> String {
    let session_repo = SessionRepository::new(pool.clone(), TEST_SESSION_TTL_SECS);
    session_repo.create(&coach.id).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
