use sqlx::SqlitePool;

use super::DbResult;
use crate::models::{Fan, NewFan};

/// `fav_team_id` must already be resolved by the caller.
pub async fn insert_fan(pool: &SqlitePool, fan: &NewFan, fav_team_id: i64) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO fans (username, first_name, last_name, email, phone_no, birth_date, is_active, fav_team_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(fan.username.trim())
    .bind(fan.first_name.trim())
    .bind(fan.last_name.trim())
    .bind(fan.email.trim())
    .bind(fan.phone_no.trim())
    .bind(fan.birth_date)
    .bind(fan.is_active)
    .bind(fav_team_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_fan(pool: &SqlitePool, fan_id: i64) -> DbResult<Option<Fan>> {
    sqlx::query_as::<_, Fan>("SELECT * FROM fans WHERE id = ?")
        .bind(fan_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_fans(pool: &SqlitePool) -> DbResult<Vec<Fan>> {
    sqlx::query_as::<_, Fan>("SELECT * FROM fans ORDER BY username, id")
        .fetch_all(pool)
        .await
}
