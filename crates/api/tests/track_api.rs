//! HTTP-level integration tests for the track catalog and play endpoints.
//!
//! Tests cover catalog listing, track detail, and the listen-gated play
//! endpoint with its denial payloads.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, post_json, post_json_auth};
use griot_db::models::track::{CreateTrack, Track};
use griot_db::repositories::TrackRepo;
use griot_ledger::EntitlementLedger;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert a catalog track directly in the database.
async fn seed_track(pool: &PgPool, title: &str, price: i64) -> Track {
    TrackRepo::create(
        pool,
        &CreateTrack {
            title: title.to_string(),
            artist: "Orchestra Baobab".to_string(),
            price,
            file_path: format!("tracks/{}.mp3", title.to_lowercase().replace(' ', "-")),
            duration_secs: Some(289),
            cover_path: None,
        },
    )
    .await
    .expect("track creation should succeed")
}

/// Register a listener via the API and return their token and user id.
async fn register_listener(app: Router, email: &str) -> (String, i64) {
    let body = serde_json::json!({
        "name": "Test Listener",
        "email": email,
        "password": "long-enough"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_i64().unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Catalog tests
// ---------------------------------------------------------------------------

/// The catalog lists all tracks newest first and never exposes storage keys.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_tracks_newest_first(pool: PgPool) {
    seed_track(&pool, "Utru Horas", 500).await;
    seed_track(&pool, "Coumba", 300).await;
    let (app, _gateway) = common::build_test_app(pool);

    let response = get(app, "/api/v1/tracks").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Coumba");
    assert_eq!(data[1]["title"], "Utru Horas");
    assert!(
        data[0].get("file_path").is_none(),
        "storage keys must never appear in catalog responses"
    );
}

/// Track detail returns the full public representation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_track_by_id(pool: PgPool) {
    let track = seed_track(&pool, "Utru Horas", 500).await;
    let (app, _gateway) = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/tracks/{}", track.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], track.id);
    assert_eq!(json["data"]["title"], "Utru Horas");
    assert_eq!(json["data"]["artist"], "Orchestra Baobab");
    assert_eq!(json["data"]["price"], 500);
    assert_eq!(json["data"]["duration_secs"], 289);
    assert!(json["data"].get("file_path").is_none());
}

/// An unknown track id returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_track_returns_404(pool: PgPool) {
    let (app, _gateway) = common::build_test_app(pool);

    let response = get(app, "/api/v1/tracks/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Play endpoint tests
// ---------------------------------------------------------------------------

/// The play endpoint requires authentication.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_requires_auth(pool: PgPool) {
    let track = seed_track(&pool, "Utru Horas", 500).await;
    let (app, _gateway) = common::build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/tracks/{}/play", track.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Playing a track the user has not purchased is denied with the track's
/// price in the payload, so the client can prompt a purchase directly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_unpurchased_track_denied(pool: PgPool) {
    let track = seed_track(&pool, "Utru Horas", 500).await;
    let (app, _gateway) = common::build_test_app(pool);
    let (token, _user_id) = register_listener(app.clone(), "awa@example.sn").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/tracks/{}/play", track.id),
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_ENTITLED");
    assert_eq!(json["data"]["track_id"], track.id);
    assert_eq!(json["data"]["price"], 500);
}

/// A purchased track plays: one listen is spent and the response carries a
/// presigned URL for the audio object.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_returns_presigned_url(pool: PgPool) {
    let track = seed_track(&pool, "Utru Horas", 500).await;
    let (app, _gateway) = common::build_test_app(pool.clone());
    let (token, user_id) = register_listener(app.clone(), "awa@example.sn").await;

    EntitlementLedger::new(pool)
        .grant(user_id, track.id)
        .await
        .expect("grant should succeed");

    let response = post_json_auth(
        app,
        &format!("/api/v1/tracks/{}/play", track.id),
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["remaining_listens"], 9);
    assert_eq!(json["data"]["track"]["id"], track.id);
    assert_eq!(json["data"]["track"]["title"], "Utru Horas");

    // Path-style presigned URL: bucket then object key, signature in query.
    let play_url = json["data"]["play_url"].as_str().unwrap();
    assert!(
        play_url.contains("/music-files/tracks/utru-horas.mp3"),
        "play URL should address the track's object, got: {play_url}"
    );
    assert!(
        play_url.contains("X-Amz-Signature="),
        "play URL should be presigned, got: {play_url}"
    );
}

/// Once the listen balance reaches zero the play endpoint denies with a
/// zeroed count and does not issue a URL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_exhausts_listens(pool: PgPool) {
    let track = seed_track(&pool, "Utru Horas", 500).await;
    let (app, _gateway) = common::build_test_app(pool.clone());
    let (token, user_id) = register_listener(app.clone(), "awa@example.sn").await;

    // A single-listen grant keeps the test short.
    EntitlementLedger::with_grant_listens(pool, 1)
        .grant(user_id, track.id)
        .await
        .expect("grant should succeed");

    let uri = format!("/api/v1/tracks/{}/play", track.id);

    let first = post_json_auth(app.clone(), &uri, serde_json::json!({}), &token).await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = body_json(first).await;
    assert_eq!(json["data"]["remaining_listens"], 0);

    let second = post_json_auth(app, &uri, serde_json::json!({}), &token).await;
    assert_eq!(second.status(), StatusCode::FORBIDDEN);
    let json = body_json(second).await;
    assert_eq!(json["code"], "NO_REMAINING_LISTENS");
    assert_eq!(json["data"]["track_id"], track.id);
    assert_eq!(json["data"]["remaining_listens"], 0);
    assert!(json["data"].get("play_url").is_none());
}

/// Playing a nonexistent track returns 404 even when authenticated.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_unknown_track_returns_404(pool: PgPool) {
    let (app, _gateway) = common::build_test_app(pool);
    let (token, _user_id) = register_listener(app.clone(), "awa@example.sn").await;

    let response =
        post_json_auth(app, "/api/v1/tracks/9999/play", serde_json::json!({}), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
