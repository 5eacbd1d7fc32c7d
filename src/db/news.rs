use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::DbResult;
use crate::models::{NewNewsItemTag, NewsItem, NewsItemTag};

pub async fn insert_tag(pool: &SqlitePool, tag: &NewNewsItemTag) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO news_item_tags (name) VALUES (?)")
        .bind(&tag.name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_tag(pool: &SqlitePool, tag_id: i64) -> DbResult<Option<NewsItemTag>> {
    sqlx::query_as::<_, NewsItemTag>("SELECT * FROM news_item_tags WHERE id = ?")
        .bind(tag_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_tags(pool: &SqlitePool) -> DbResult<Vec<NewsItemTag>> {
    sqlx::query_as::<_, NewsItemTag>("SELECT * FROM news_item_tags ORDER BY id")
        .fetch_all(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_news_item(
    pool: &SqlitePool,
    featured_image: &str,
    title: &str,
    subtitle: &str,
    pub_date: DateTime<Utc>,
    text: &str,
    author: Option<&str>,
    tag_id: Option<i64>,
) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO news_items (featured_image, title, subtitle, pub_date, text, author, tag_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(featured_image)
    .bind(title)
    .bind(subtitle)
    .bind(pub_date)
    .bind(text)
    .bind(author)
    .bind(tag_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_news_item(pool: &SqlitePool, item: &NewsItem) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE news_items
        SET featured_image = ?, title = ?, subtitle = ?, pub_date = ?, text = ?, author = ?, tag_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&item.featured_image)
    .bind(&item.title)
    .bind(&item.subtitle)
    .bind(item.pub_date)
    .bind(&item.text)
    .bind(&item.author)
    .bind(item.tag_id)
    .bind(item.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_news_item(pool: &SqlitePool, item_id: i64) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM news_items WHERE id = ?")
        .bind(item_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn get_news_item(pool: &SqlitePool, item_id: i64) -> DbResult<Option<NewsItem>> {
    sqlx::query_as::<_, NewsItem>("SELECT * FROM news_items WHERE id = ?")
        .bind(item_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_news_items(pool: &SqlitePool) -> DbResult<Vec<NewsItem>> {
    sqlx::query_as::<_, NewsItem>("SELECT * FROM news_items ORDER BY pub_date DESC, id DESC")
        .fetch_all(pool)
        .await
}
