use chrono::Utc;
use sqlx::SqlitePool;

use crate::db;
use crate::models::{NewNewsItem, NewsItem, NewsItemUpdate, NewsItemView};
use crate::services::LeagueError;

fn check_item(featured_image: &str, title: &str) -> Result<(), LeagueError> {
    if featured_image.trim().is_empty() {
        return Err(LeagueError::validation("A featured image is required"));
    }
    if title.trim().is_empty() {
        return Err(LeagueError::validation("Title cannot be empty"));
    }
    Ok(())
}

async fn check_tag(pool: &SqlitePool, tag_id: Option<i64>) -> Result<(), LeagueError> {
    if let Some(tag_id) = tag_id {
        db::get_tag(pool, tag_id)
            .await?
            .ok_or_else(|| LeagueError::validation("News tag does not exist"))?;
    }
    Ok(())
}

pub async fn find_item(pool: &SqlitePool, item_id: i64) -> Result<NewsItem, LeagueError> {
    db::get_news_item(pool, item_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("News item"))
}

pub async fn item_view(pool: &SqlitePool, item: NewsItem) -> Result<NewsItemView, LeagueError> {
    let tag = match item.tag_id {
        Some(id) => db::get_tag(pool, id).await?,
        None => None,
    };
    Ok(NewsItemView::new(item, tag))
}

pub async fn create_item(pool: &SqlitePool, request: NewNewsItem) -> Result<NewsItemView, LeagueError> {
    let featured_image = request.featured_image.unwrap_or_default();
    check_item(&featured_image, &request.title)?;
    check_tag(pool, request.tag_id).await?;

    let id = db::insert_news_item(
        pool,
        &featured_image,
        &request.title,
        &request.subtitle,
        request.pub_date.unwrap_or_else(Utc::now),
        &request.text,
        request.author.as_deref(),
        request.tag_id,
    )
    .await?;
    tracing::info!("Published news item {} ({})", request.title, id);
    item_view(pool, find_item(pool, id).await?).await
}

pub async fn update_item(pool: &SqlitePool, item_id: i64, changes: NewsItemUpdate) -> Result<NewsItemView, LeagueError> {
    let mut item = find_item(pool, item_id).await?;
    changes.apply(&mut item);
    check_item(&item.featured_image, &item.title)?;
    check_tag(pool, item.tag_id).await?;
    db::update_news_item(pool, &item).await?;
    item_view(pool, item).await
}

pub async fn delete_item(pool: &SqlitePool, item_id: i64) -> Result<(), LeagueError> {
    if !db::delete_news_item(pool, item_id).await? {
        return Err(LeagueError::not_found("News item"));
    }
    tracing::info!("Deleted news item {}", item_id);
    Ok(())
}

pub async fn list_items(pool: &SqlitePool) -> Result<Vec<NewsItemView>, LeagueError> {
    let items = db::list_news_items(pool).await?;
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        views.push(item_view(pool, item).await?);
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    fn draft(image: Option<&str>) -> NewNewsItem {
        NewNewsItem {
            featured_image: image.map(str::to_string),
            title: "Derby day".to_string(),
            subtitle: "Elite host Red Army".to_string(),
            pub_date: None,
            text: "Kick-off at four.".to_string(),
            author: Some("Sports desk".to_string()),
            tag_id: Some(7),
        }
    }

    #[tokio::test]
    async fn news_needs_an_image_and_nests_its_tag() {
        let pool = test_pool().await;
        assert!(matches!(
            create_item(&pool, draft(None)).await,
            Err(LeagueError::Validation(_))
        ));

        let view = create_item(&pool, draft(Some("https://img.example/derby.png"))).await.unwrap();
        assert_eq!(view.tag.map(|t| t.name), Some("Match Report".to_string()));

        delete_item(&pool, view.id).await.unwrap();
        assert!(matches!(delete_item(&pool, view.id).await, Err(LeagueError::NotFound(_))));
    }
}
