mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use proft::db::DbPool;
use proft::models::Client;

fn squat_payload(client_id: &str) -> Value {
    json!({
        "client_id": client_id,
        "exercise_id": 1,
        "units": "kg",
        "rm": 100,
        "rm_percentage": 50,
        "max_repetitions": 12,
        "rir_repetitions": 2,
        "cc_tempo": 1,
        "iso_tempo_one": 1,
        "ecc_tempo": 2,
        "iso_tempo_two": 1,
        "reps": 10,
        "sets": 3,
        "rom": 100,
        "weight": 50,
        "repetitions": 10,
        "total_rest": 60
    })
}

async fn seed_client(pool: &DbPool) -> Client {
    let coach = common::create_test_coach(pool, "coach@example.com", "coach").await;
    common::create_test_client(pool, &coach.id, "client@example.com", "client").await
}

async fn create_workout(pool: &DbPool, payload: &Value) -> Value {
    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::json_request("POST", "/workouts", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await
}

async fn workout_count(pool: &DbPool) -> i64 {
    let conn = pool.get().unwrap();
    conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
        .unwrap()
}

#[tokio::test]
async fn test_create_workout_derives_metrics() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let body = create_workout(&pool, &squat_payload(&client.id)).await;

    assert_eq!(body["total_tempo"], 5);
    assert_eq!(body["tut"], 150);
    assert_eq!(body["total_rest"], 60);
    assert_eq!(body["density"], 7.14);
    assert_eq!(body["client_id"], client.id.as_str());
    assert_eq!(body["exercise_id"], 1);
    assert_eq!(body["exercise_name"], "Back Squat");
    assert_eq!(body["exercise_time"], 0);
}

#[tokio::test]
async fn test_create_workout_ignores_client_supplied_derived_values() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let mut payload = squat_payload(&client.id);
    payload["total_tempo"] = json!(99);
    payload["tut"] = json!(999);
    payload["density"] = json!(123.0);

    let body = create_workout(&pool, &payload).await;

    assert_eq!(body["total_tempo"], 5);
    assert_eq!(body["tut"], 150);
    assert_eq!(body["density"], 7.14);
}

#[tokio::test]
async fn test_create_workout_accepts_numeric_strings() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let mut payload = squat_payload(&client.id);
    payload["reps"] = json!("10");
    payload["weight"] = json!(" 50.0 ");
    payload["exercise_id"] = json!("1");

    let body = create_workout(&pool, &payload).await;

    assert_eq!(body["reps"], 10);
    assert_eq!(body["weight"], 50.0);
    assert_eq!(body["tut"], 150);
}

#[tokio::test]
async fn test_create_workout_missing_tempo_is_rejected() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let app = common::create_test_app(pool.clone());

    let mut payload = squat_payload(&client.id);
    payload.as_object_mut().unwrap().remove("cc_tempo");

    let response = app
        .oneshot(common::json_request("POST", "/workouts", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(details.contains(&"cc_tempo is required and must be a number"));
    assert_eq!(workout_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_workout_rejects_overflowing_tut() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let app = common::create_test_app(pool.clone());

    let mut payload = squat_payload(&client.id);
    payload["cc_tempo"] = json!(1_i64 << 62);
    payload["tut"] = json!(7);

    let response = app
        .oneshot(common::json_request("POST", "/workouts", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["details"], json!(["tut is out of range"]));
    assert_eq!(workout_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_workout_reports_every_bad_field() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let app = common::create_test_app(pool.clone());

    let mut payload = squat_payload(&client.id);
    payload["reps"] = json!("ten");
    payload["sets"] = json!(true);
    payload["weight"] = json!("heavy");
    payload["units"] = json!("");

    let response = app
        .oneshot(common::json_request("POST", "/workouts", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 4);
    assert!(details.contains(&json!("reps must be an integer")));
    assert!(details.contains(&json!("sets must be an integer")));
    assert!(details.contains(&json!("weight must be a number")));
    assert!(details.contains(&json!("units is required")));
}

#[tokio::test]
async fn test_create_workout_identity_checks() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let cases = [
        (json!(null), json!(1), StatusCode::BAD_REQUEST, "client_id is required"),
        (
            json!("nope"),
            json!(1),
            StatusCode::NOT_FOUND,
            "Client nope not found",
        ),
        (
            json!(client.id),
            json!(null),
            StatusCode::BAD_REQUEST,
            "exercise_id is required",
        ),
        (
            json!(client.id),
            json!("squat"),
            StatusCode::BAD_REQUEST,
            "exercise_id must be an integer",
        ),
        (
            json!(client.id),
            json!(999),
            StatusCode::NOT_FOUND,
            "Exercise 999 not found",
        ),
    ];

    for (client_id, exercise_id, status, message) in cases {
        let mut payload = squat_payload(&client.id);
        payload["client_id"] = client_id;
        payload["exercise_id"] = exercise_id;

        let app = common::create_test_app(pool.clone());
        let response = app
            .oneshot(common::json_request("POST", "/workouts", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), status, "{}", message);
        let body = common::body_json(response).await;
        assert_eq!(body["error"], message);
    }
    assert_eq!(workout_count(&pool).await, 0);
}

#[tokio::test]
async fn test_create_workout_rejects_non_object_body() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::json_request("POST", "/workouts", &json!([1, 2, 3])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_patch_reps_keeps_stored_tempo() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let mut payload = squat_payload(&client.id);
    payload["ecc_tempo"] = json!(1);
    payload["total_rest"] = json!(0);
    let created = create_workout(&pool, &payload).await;
    assert_eq!(created["total_tempo"], 4);

    let id = created["id"].as_str().unwrap();
    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/workouts/{}", id),
            &json!({ "reps": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["total_tempo"], 4);
    assert_eq!(body["reps"], 5);
    assert_eq!(body["tut"], 60);
    assert_eq!(body["cc_tempo"], 1);
    assert_eq!(body["sets"], 3);
}

#[tokio::test]
async fn test_update_rest_per_set_recomputes_density() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;

    let mut payload = squat_payload(&client.id);
    payload["sets"] = json!(4);
    let created = create_workout(&pool, &payload).await;
    assert_eq!(created["tut"], 200);
    assert_eq!(created["density"], 7.69);

    let id = created["id"].as_str().unwrap();
    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::json_request(
            "PUT",
            &format!("/workouts/{}", id),
            &json!({ "rest_per_set": 30 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["total_rest"], 90);
    assert_eq!(body["density"], 6.9);
}

#[tokio::test]
async fn test_invalid_update_leaves_row_untouched() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let created = create_workout(&pool, &squat_payload(&client.id)).await;
    let id = created["id"].as_str().unwrap();

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/workouts/{}", id),
            &json!({ "reps": "lots", "sets": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::get_request(&format!("/workouts/{}", id)))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["reps"], 10);
    assert_eq!(body["sets"], 3);
    assert_eq!(body["tut"], 150);
}

#[tokio::test]
async fn test_patch_units_only_keeps_metrics() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let created = create_workout(&pool, &squat_payload(&client.id)).await;
    let id = created["id"].as_str().unwrap();

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/workouts/{}", id),
            &json!({ "units": "lbs" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["units"], "lbs");
    assert_eq!(body["density"], 7.14);
}

#[tokio::test]
async fn test_update_unknown_workout_returns_404() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            "/workouts/missing",
            &json!({ "reps": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_filter_workouts() {
    let pool = common::setup_test_db();
    let coach = common::create_test_coach(&pool, "coach@example.com", "coach").await;
    let first = common::create_test_client(&pool, &coach.id, "a@example.com", "a").await;
    let second = common::create_test_client(&pool, &coach.id, "b@example.com", "b").await;

    create_workout(&pool, &squat_payload(&first.id)).await;
    let mut bench = squat_payload(&first.id);
    bench["exercise_id"] = json!(2);
    let newest = create_workout(&pool, &bench).await;
    create_workout(&pool, &squat_payload(&second.id)).await;

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::get_request(&format!(
            "/workouts?client_id={}",
            first.id
        )))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], newest["id"]);

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::get_request("/workouts?exercise_id=2"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::get_request("/workouts?limit=1&offset=1"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_workouts_by_client() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    create_workout(&pool, &squat_payload(&client.id)).await;

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(common::get_request(&format!(
            "/workouts/by-client/{}",
            client.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(common::get_request("/workouts/by-client/ghost"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_workout() {
    let pool = common::setup_test_db();
    let client = seed_client(&pool).await;
    let created = create_workout(&pool, &squat_payload(&client.id)).await;
    let id = created["id"].as_str().unwrap();

    let app = common::create_test_app(pool.clone());
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/workouts/{}", id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "deleted");
    assert_eq!(body["id"], id);
    assert_eq!(workout_count(&pool).await, 0);

    let app = common::create_test_app(pool);
    let response = app
        .oneshot(common::get_request(&format!("/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
