use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::SqlitePool;

use super::response::{created, done, ok, ApiResult, IdQuery, OneOrMany, Payload};
use crate::db;
use crate::models::{NewNewsItem, NewNewsItemTag, NewsItemTag, NewsItemUpdate, NewsItemView};
use crate::services::{news, parse_id, LeagueError};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/news-item-tag/create/", post(create_tag))
        .route("/news-item-tag/get/", get(get_tags))
        .route("/news-item/create/", post(create_item))
        .route("/news-item/update/{id}/", patch(update_item))
        .route("/news-item/delete/{id}/", delete(delete_item))
        .route("/news-item/get", get(get_items))
        .route("/news-item/get/", get(get_items))
}

async fn create_tag(State(pool): State<SqlitePool>, Payload(tag): Payload<NewNewsItemTag>) -> ApiResult<NewsItemTag> {
    let id = db::insert_tag(&pool, &tag).await?;
    let tag = db::get_tag(&pool, id)
        .await?
        .ok_or_else(|| LeagueError::not_found("News tag"))?;
    created("News tag created successfully", tag)
}

async fn get_tags(State(pool): State<SqlitePool>) -> ApiResult<Vec<NewsItemTag>> {
    ok("News tags retrieved successfully", db::list_tags(&pool).await?)
}

async fn create_item(State(pool): State<SqlitePool>, Payload(item): Payload<NewNewsItem>) -> ApiResult<NewsItemView> {
    created("News item created successfully", news::create_item(&pool, item).await?)
}

async fn update_item(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<NewsItemUpdate>,
) -> ApiResult<NewsItemView> {
    let item_id = parse_id(Some(&id), "News item")?;
    ok("News item updated successfully", news::update_item(&pool, item_id, changes).await?)
}

async fn delete_item(State(pool): State<SqlitePool>, Path(id): Path<String>) -> ApiResult<()> {
    news::delete_item(&pool, parse_id(Some(&id), "News item")?).await?;
    done("News item deleted successfully")
}

async fn get_items(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<NewsItemView>> {
    match query.id.as_deref() {
        Some(raw) => {
            let item = news::find_item(&pool, parse_id(Some(raw), "News item")?).await?;
            ok("News item retrieved successfully", OneOrMany::One(news::item_view(&pool, item).await?))
        }
        None => ok("News retrieved successfully", OneOrMany::Many(news::list_items(&pool).await?)),
    }
}
