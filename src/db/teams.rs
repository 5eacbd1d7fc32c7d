use sqlx::{SqliteExecutor, SqlitePool};

use super::DbResult;
use crate::models::{Gender, NewTeam, Team};

pub async fn insert_team(pool: &SqlitePool, team: &NewTeam) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO teams (name, name_abbreviation, logo_url, color, twitter_url, is_active)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&team.name)
    .bind(&team.name_abbreviation)
    .bind(&team.logo_url)
    .bind(&team.color)
    .bind(&team.twitter_url)
    .bind(team.is_active)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_team(pool: &SqlitePool, team: &Team) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE teams
        SET name = ?, name_abbreviation = ?, logo_url = ?, color = ?, twitter_url = ?, is_active = ?
        WHERE id = ?
        "#,
    )
    .bind(&team.name)
    .bind(&team.name_abbreviation)
    .bind(&team.logo_url)
    .bind(&team.color)
    .bind(&team.twitter_url)
    .bind(team.is_active)
    .bind(team.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_team<'e, E: SqliteExecutor<'e>>(executor: E, team_id: i64) -> DbResult<Option<Team>> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = ?")
        .bind(team_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_teams(pool: &SqlitePool) -> DbResult<Vec<Team>> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY name, id")
        .fetch_all(pool)
        .await
}

/// Teams with at least one roster player of `gender`, in name order.
pub async fn teams_with_roster<'e, E: SqliteExecutor<'e>>(executor: E, gender: Gender) -> DbResult<Vec<Team>> {
    sqlx::query_as::<_, Team>(
        r#"
        SELECT t.* FROM teams t
        WHERE EXISTS (SELECT 1 FROM players p WHERE p.team_id = t.id AND p.gender = ?)
        ORDER BY t.name, t.id
        "#,
    )
    .bind(gender)
    .fetch_all(executor)
    .await
}
