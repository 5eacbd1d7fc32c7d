use serde::Serialize;
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

use super::DbResult;
use crate::models::{EventType, Gender, Goal, MatchEvent, Substitution};

/// A Goal row joined with the event that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GoalRecord {
    pub goal_id: i64,
    pub match_event_id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub minute: i64,
    pub scoring_team_id: i64,
    pub assist_provider_id: Option<i64>,
}

const GOAL_RECORD_COLUMNS: &str = r#"
    SELECT g.id AS goal_id, g.match_event_id, e.match_id, e.player_id, e.minute,
           g.scoring_team_id, g.assist_provider_id
    FROM goals g
    JOIN match_events e ON e.id = g.match_event_id
"#;

pub async fn insert_match_event<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_id: i64,
    event_type: EventType,
    player_id: i64,
    minute: i64,
) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO match_events (match_id, event_type, player_id, minute) VALUES (?, ?, ?, ?)")
        .bind(match_id)
        .bind(event_type)
        .bind(player_id)
        .bind(minute)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_goal<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_event_id: i64,
    scoring_team_id: i64,
    assist_provider_id: Option<i64>,
) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO goals (match_event_id, scoring_team_id, assist_provider_id) VALUES (?, ?, ?)")
        .bind(match_event_id)
        .bind(scoring_team_id)
        .bind(assist_provider_id)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_substitution<'e, E: SqliteExecutor<'e>>(
    executor: E,
    match_event_id: i64,
    player_out_id: i64,
    player_in_id: i64,
) -> DbResult<i64> {
    let result =
        sqlx::query("INSERT INTO substitutions (match_event_id, player_out_id, player_in_id) VALUES (?, ?, ?)")
            .bind(match_event_id)
            .bind(player_out_id)
            .bind(player_in_id)
            .execute(executor)
            .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_match_event(pool: &SqlitePool, event_id: i64) -> DbResult<Option<MatchEvent>> {
    sqlx::query_as::<_, MatchEvent>("SELECT * FROM match_events WHERE id = ?")
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

/// Events of a match in minute order.
pub async fn match_events(pool: &SqlitePool, match_id: i64) -> DbResult<Vec<MatchEvent>> {
    sqlx::query_as::<_, MatchEvent>("SELECT * FROM match_events WHERE match_id = ? ORDER BY minute, id")
        .bind(match_id)
        .fetch_all(pool)
        .await
}

pub async fn goal_for_event(pool: &SqlitePool, match_event_id: i64) -> DbResult<Option<Goal>> {
    sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE match_event_id = ?")
        .bind(match_event_id)
        .fetch_optional(pool)
        .await
}

pub async fn substitution_for_event(pool: &SqlitePool, match_event_id: i64) -> DbResult<Option<Substitution>> {
    sqlx::query_as::<_, Substitution>("SELECT * FROM substitutions WHERE match_event_id = ?")
        .bind(match_event_id)
        .fetch_optional(pool)
        .await
}

/// Goals of a match, optionally limited to those credited to one team.
pub async fn match_goals(pool: &SqlitePool, match_id: i64, team_id: Option<i64>) -> DbResult<Vec<GoalRecord>> {
    let sql = format!(
        "{} WHERE e.match_id = ? AND (? IS NULL OR g.scoring_team_id = ?) ORDER BY e.minute, g.id",
        GOAL_RECORD_COLUMNS
    );
    sqlx::query_as::<_, GoalRecord>(&sql)
        .bind(match_id)
        .bind(team_id)
        .bind(team_id)
        .fetch_all(pool)
        .await
}

/// Goals scored in finished matches of a season and competition, optionally one stage.
pub async fn ended_goals_in_scope<'e, E: SqliteExecutor<'e>>(
    executor: E,
    season_id: i64,
    competition_id: i64,
    stage_id: Option<i64>,
) -> DbResult<Vec<GoalRecord>> {
    let sql = format!(
        r#"{}
        JOIN matches m ON m.id = e.match_id
        JOIN match_days d ON d.id = m.match_day_id
        WHERE d.season_id = ? AND m.competition_id = ? AND m.has_ended = 1
          AND (? IS NULL OR m.stage_id = ?)
        ORDER BY g.id"#,
        GOAL_RECORD_COLUMNS
    );
    sqlx::query_as::<_, GoalRecord>(&sql)
        .bind(season_id)
        .bind(competition_id)
        .bind(stage_id)
        .bind(stage_id)
        .fetch_all(executor)
        .await
}

/// Every goal of a season in competitions of `gender`.
pub async fn season_goals(pool: &SqlitePool, season_id: i64, gender: Gender) -> DbResult<Vec<GoalRecord>> {
    let sql = format!(
        r#"{}
        JOIN matches m ON m.id = e.match_id
        JOIN match_days d ON d.id = m.match_day_id
        JOIN competitions c ON c.id = m.competition_id
        WHERE d.season_id = ? AND c.gender = ?
        ORDER BY g.id"#,
        GOAL_RECORD_COLUMNS
    );
    sqlx::query_as::<_, GoalRecord>(&sql)
        .bind(season_id)
        .bind(gender)
        .fetch_all(pool)
        .await
}

/// Events of one kind in a season, limited to competitions of `gender`.
pub async fn season_events(
    pool: &SqlitePool,
    season_id: i64,
    gender: Gender,
    event_type: EventType,
) -> DbResult<Vec<MatchEvent>> {
    sqlx::query_as::<_, MatchEvent>(
        r#"
        SELECT e.* FROM match_events e
        JOIN matches m ON m.id = e.match_id
        JOIN match_days d ON d.id = m.match_day_id
        JOIN competitions c ON c.id = m.competition_id
        WHERE d.season_id = ? AND c.gender = ? AND e.event_type = ?
        ORDER BY e.id
        "#,
    )
    .bind(season_id)
    .bind(gender)
    .bind(event_type)
    .fetch_all(pool)
    .await
}

/// Goals credited to a team in any finished match.
pub async fn ended_goals_for_team(pool: &SqlitePool, team_id: i64) -> DbResult<Vec<GoalRecord>> {
    let sql = format!(
        r#"{}
        JOIN matches m ON m.id = e.match_id
        WHERE g.scoring_team_id = ? AND m.has_ended = 1
        ORDER BY g.id"#,
        GOAL_RECORD_COLUMNS
    );
    sqlx::query_as::<_, GoalRecord>(&sql)
        .bind(team_id)
        .fetch_all(pool)
        .await
}
