use axum::{
    body::Body,
    http::Request,
    response::Json,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::Settings;
use crate::db;
use crate::models::ApiResponse;

mod fixtures;
mod news;
pub mod response;
mod standings;
mod teams;

pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let pool = db::create_pool(&settings.database_url).await?;
    db::bootstrap(&pool).await?;

    let app = create_router().with_state(pool);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Matchday API server listening on {}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router() -> Router<SqlitePool> {
    Router::new()
        .route("/health", get(health_check))
        .merge(teams::routes())
        .merge(fixtures::routes())
        .merge(standings::routes())
        .merge(news::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        uri = %request.uri()
                    )
                }))
                .layer(CorsLayer::permissive()),
        )
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Matchday API is running", "ok"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{date, player, season, team, test_pool};
    use crate::models::Gender;
    use axum::body::to_bytes;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(pool: &SqlitePool, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = create_router().with_state(pool.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_running() {
        let pool = test_pool().await;
        let (status, body) = call(&pool, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Matchday API is running");
    }

    #[tokio::test]
    async fn season_id_is_checked_before_lookup() {
        let pool = test_pool().await;

        let (status, body) = call(&pool, Method::GET, "/season/stats/top_scorers/get", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Season ID is required");

        let (status, body) = call(&pool, Method::GET, "/season/stats/top_scorers/get?season_id=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid Season ID");

        let (status, body) = call(&pool, Method::GET, "/standings/league/mens/get?season_id=99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Season not found");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn unknown_gender_segment_is_rejected() {
        let pool = test_pool().await;
        let (status, body) = call(&pool, Method::GET, "/standings/league/mixed/get?season_id=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid gender 'mixed'");
    }

    #[tokio::test]
    async fn self_assist_is_a_validation_error() {
        let pool = test_pool().await;
        let goal = json!({
            "match_id": 1,
            "player_id": 5,
            "scoring_team_id": 1,
            "assist_provider_id": 5,
            "minute": 12
        });
        let (status, body) = call(&pool, Method::POST, "/match_event/goal/create/", Some(goal)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let pool = test_pool().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/team/create/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = create_router().with_state(pool).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn news_items_live_under_the_news_item_prefix() {
        let pool = test_pool().await;
        let item = json!({
            "featured_image": "https://img.example/derby.png",
            "title": "Derby day",
            "subtitle": "Top of the table clash",
            "text": "Kick-off at four.",
            "tag": 7
        });
        let (status, body) = call(&pool, Method::POST, "/news-item/create/", Some(item)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&pool, Method::GET, &format!("/news-item/get?id={}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["tag"]["name"], "Match Report");

        let (status, _) = call(&pool, Method::DELETE, &format!("/news-item/delete/{}/", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&pool, Method::GET, &format!("/news-item/get?id={}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fan_registration_nests_the_favourite_team() {
        let pool = test_pool().await;
        let favourite = team(&pool, "Delta").await;
        let fan = json!({
            "username": "adwoa",
            "first_name": "Adwoa",
            "last_name": "Mensah",
            "email": "adwoa@example.com",
            "phone_no": "0551112222",
            "birth_date": "2002-08-19",
            "fav_team": favourite.id
        });
        let (status, body) = call(&pool, Method::POST, "/fan/create/", Some(fan.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["fav_team"]["name"], "Delta");
        assert_eq!(body["data"]["is_active"], false);

        let (status, body) = call(&pool, Method::POST, "/fan/create/", Some(fan)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
    }

    #[tokio::test]
    async fn league_table_is_created_then_served() {
        let pool = test_pool().await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        for name in ["Delta", "Echo", "Foxtrot"] {
            let t = team(&pool, name).await;
            player(&pool, "Kofi", name, Gender::Men, t.id).await;
        }

        let (status, body) = call(
            &pool,
            Method::POST,
            "/standings/league/mens/create/",
            Some(json!({ "season_id": s.id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["standings_teams"].as_array().unwrap().len(), 3);

        let (status, body) = call(&pool, Method::POST, "/standings/league/mens/create/", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Season ID is required");

        let uri = format!("/standings/league/mens/get?season_id={}", s.id);
        let (status, body) = call(&pool, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let tables = body["data"].as_array().unwrap();
        assert_eq!(tables.len(), 1);
        for row in tables[0]["standings_teams"].as_array().unwrap() {
            assert_eq!(row["points"], 0);
        }
    }
}
