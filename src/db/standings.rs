use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use super::DbResult;
use crate::models::{Standings, StandingsTeam};

pub async fn insert_standings(
    conn: &mut SqliteConnection,
    season_id: i64,
    competition_id: i64,
    name: &str,
) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO standings (season_id, competition_id, name) VALUES (?, ?, ?)")
        .bind(season_id)
        .bind(competition_id)
        .bind(name)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Adds a team to a group with every counter at zero.
pub async fn insert_standings_team(conn: &mut SqliteConnection, standings_id: i64, team_id: i64) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO standings_teams (standings_id, team_id) VALUES (?, ?)")
        .bind(standings_id)
        .bind(team_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Groups of one season and competition, in name order.
pub async fn find_standings<'e, E: SqliteExecutor<'e>>(
    executor: E,
    season_id: i64,
    competition_id: i64,
) -> DbResult<Vec<Standings>> {
    sqlx::query_as::<_, Standings>(
        "SELECT * FROM standings WHERE season_id = ? AND competition_id = ? ORDER BY name, id",
    )
    .bind(season_id)
    .bind(competition_id)
    .fetch_all(executor)
    .await
}

pub async fn season_standings(pool: &SqlitePool, season_id: i64) -> DbResult<Vec<Standings>> {
    sqlx::query_as::<_, Standings>("SELECT * FROM standings WHERE season_id = ? ORDER BY competition_id, name, id")
        .bind(season_id)
        .fetch_all(pool)
        .await
}

pub async fn standings_teams<'e, E: SqliteExecutor<'e>>(executor: E, standings_id: i64) -> DbResult<Vec<StandingsTeam>> {
    sqlx::query_as::<_, StandingsTeam>("SELECT * FROM standings_teams WHERE standings_id = ? ORDER BY id")
        .bind(standings_id)
        .fetch_all(executor)
        .await
}

/// Writes every counter and derived column of one row.
pub async fn update_standings_team(conn: &mut SqliteConnection, row: &StandingsTeam) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE standings_teams
        SET matches_played = ?, matches_won = ?, matches_drawn = ?, matches_lost = ?,
            goals_for = ?, goals_against = ?, goal_difference = ?, points = ?
        WHERE id = ?
        "#,
    )
    .bind(row.matches_played)
    .bind(row.matches_won)
    .bind(row.matches_drawn)
    .bind(row.matches_lost)
    .bind(row.goals_for)
    .bind(row.goals_against)
    .bind(row.goal_difference)
    .bind(row.points)
    .bind(row.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Returns false when no group had that id.
pub async fn delete_standings(pool: &SqlitePool, standings_id: i64) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM standings WHERE id = ?")
        .bind(standings_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
