use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use super::DbResult;
use crate::models::{
    Competition, Gender, Match, MatchDay, NewMatch, NewMatchDay, NewReferee, NewSeason, Referee, Season, Stage,
};

// --- referees ---

pub async fn insert_referee(pool: &SqlitePool, referee: &NewReferee) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO referees (first_name, last_name) VALUES (?, ?)")
        .bind(&referee.first_name)
        .bind(&referee.last_name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_referee<'e, E: SqliteExecutor<'e>>(executor: E, referee_id: i64) -> DbResult<Option<Referee>> {
    sqlx::query_as::<_, Referee>("SELECT * FROM referees WHERE id = ?")
        .bind(referee_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_referees(pool: &SqlitePool) -> DbResult<Vec<Referee>> {
    sqlx::query_as::<_, Referee>("SELECT * FROM referees ORDER BY last_name, first_name, id")
        .fetch_all(pool)
        .await
}

// --- seasons ---

pub async fn insert_season(pool: &SqlitePool, season: &NewSeason) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO seasons (name, start_date, end_date) VALUES (?, ?, ?)")
        .bind(&season.name)
        .bind(season.start_date)
        .bind(season.end_date)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_season(pool: &SqlitePool, season: &Season) -> DbResult<()> {
    sqlx::query("UPDATE seasons SET name = ?, start_date = ?, end_date = ? WHERE id = ?")
        .bind(&season.name)
        .bind(season.start_date)
        .bind(season.end_date)
        .bind(season.id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_season<'e, E: SqliteExecutor<'e>>(executor: E, season_id: i64) -> DbResult<Option<Season>> {
    sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = ?")
        .bind(season_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_seasons(pool: &SqlitePool) -> DbResult<Vec<Season>> {
    sqlx::query_as::<_, Season>("SELECT * FROM seasons ORDER BY start_date DESC, id DESC")
        .fetch_all(pool)
        .await
}

/// Season with the most recent start date.
pub async fn latest_season(pool: &SqlitePool) -> DbResult<Option<Season>> {
    sqlx::query_as::<_, Season>("SELECT * FROM seasons ORDER BY start_date DESC, id DESC LIMIT 1")
        .fetch_optional(pool)
        .await
}

// --- competitions and stages ---

pub async fn list_competitions(pool: &SqlitePool) -> DbResult<Vec<Competition>> {
    sqlx::query_as::<_, Competition>("SELECT * FROM competitions ORDER BY name, gender")
        .fetch_all(pool)
        .await
}

pub async fn get_competition<'e, E: SqliteExecutor<'e>>(
    executor: E,
    competition_id: i64,
) -> DbResult<Option<Competition>> {
    sqlx::query_as::<_, Competition>("SELECT * FROM competitions WHERE id = ?")
        .bind(competition_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_competition<'e, E: SqliteExecutor<'e>>(
    executor: E,
    name: &str,
    gender: Gender,
) -> DbResult<Option<Competition>> {
    sqlx::query_as::<_, Competition>("SELECT * FROM competitions WHERE name = ? AND gender = ?")
        .bind(name)
        .bind(gender)
        .fetch_optional(executor)
        .await
}

pub async fn list_stages(pool: &SqlitePool) -> DbResult<Vec<Stage>> {
    sqlx::query_as::<_, Stage>("SELECT * FROM stages ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get_stage<'e, E: SqliteExecutor<'e>>(executor: E, stage_id: i64) -> DbResult<Option<Stage>> {
    sqlx::query_as::<_, Stage>("SELECT * FROM stages WHERE id = ?")
        .bind(stage_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_stage<'e, E: SqliteExecutor<'e>>(executor: E, name: &str) -> DbResult<Option<Stage>> {
    sqlx::query_as::<_, Stage>("SELECT * FROM stages WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await
}

// --- match days ---

pub async fn insert_match_day(pool: &SqlitePool, match_day: &NewMatchDay) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO match_days (number, date, season_id) VALUES (?, ?, ?)")
        .bind(match_day.number)
        .bind(match_day.date)
        .bind(match_day.season_id)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_match_day(pool: &SqlitePool, match_day: &MatchDay) -> DbResult<()> {
    sqlx::query("UPDATE match_days SET number = ?, date = ?, season_id = ? WHERE id = ?")
        .bind(match_day.number)
        .bind(match_day.date)
        .bind(match_day.season_id)
        .bind(match_day.id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_match_day<'e, E: SqliteExecutor<'e>>(executor: E, match_day_id: i64) -> DbResult<Option<MatchDay>> {
    sqlx::query_as::<_, MatchDay>("SELECT * FROM match_days WHERE id = ?")
        .bind(match_day_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_match_days(pool: &SqlitePool) -> DbResult<Vec<MatchDay>> {
    sqlx::query_as::<_, MatchDay>("SELECT * FROM match_days ORDER BY date, number, id")
        .fetch_all(pool)
        .await
}

pub async fn season_match_days(pool: &SqlitePool, season_id: i64) -> DbResult<Vec<MatchDay>> {
    sqlx::query_as::<_, MatchDay>("SELECT * FROM match_days WHERE season_id = ? ORDER BY number, id")
        .bind(season_id)
        .fetch_all(pool)
        .await
}

// --- matches ---

pub async fn insert_match(pool: &SqlitePool, m: &NewMatch) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO matches
        (home_team_id, away_team_id, match_day_id, competition_id, referee_id, stage_id, match_time)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(m.home_team_id)
    .bind(m.away_team_id)
    .bind(m.match_day_id)
    .bind(m.competition_id)
    .bind(m.referee_id)
    .bind(m.stage_id)
    .bind(m.match_time)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_match(pool: &SqlitePool, m: &Match) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE matches
        SET home_team_id = ?, away_team_id = ?, match_day_id = ?, competition_id = ?, referee_id = ?,
            stage_id = ?, match_time = ?, home_team_score = ?, away_team_score = ?,
            has_started = ?, has_ended = ?
        WHERE id = ?
        "#,
    )
    .bind(m.home_team_id)
    .bind(m.away_team_id)
    .bind(m.match_day_id)
    .bind(m.competition_id)
    .bind(m.referee_id)
    .bind(m.stage_id)
    .bind(m.match_time)
    .bind(m.home_team_score)
    .bind(m.away_team_score)
    .bind(m.has_started)
    .bind(m.has_ended)
    .bind(m.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Adds one goal to the home or away side of the scoreline.
pub async fn increment_score(conn: &mut SqliteConnection, match_id: i64, home: bool) -> DbResult<()> {
    let sql = if home {
        "UPDATE matches SET home_team_score = home_team_score + 1 WHERE id = ?"
    } else {
        "UPDATE matches SET away_team_score = away_team_score + 1 WHERE id = ?"
    };
    sqlx::query(sql).bind(match_id).execute(&mut *conn).await?;
    Ok(())
}

pub async fn get_match<'e, E: SqliteExecutor<'e>>(executor: E, match_id: i64) -> DbResult<Option<Match>> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_matches(pool: &SqlitePool) -> DbResult<Vec<Match>> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT m.* FROM matches m
        JOIN match_days d ON d.id = m.match_day_id
        ORDER BY d.date, m.match_time, m.id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn match_day_matches(pool: &SqlitePool, match_day_id: i64) -> DbResult<Vec<Match>> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE match_day_id = ? ORDER BY match_time, id")
        .bind(match_day_id)
        .fetch_all(pool)
        .await
}

/// Matches of a season split by whether they have ended: fixtures oldest first,
/// results newest first.
pub async fn season_matches(pool: &SqlitePool, season_id: i64, ended: bool) -> DbResult<Vec<Match>> {
    let sql = if ended {
        r#"
        SELECT m.* FROM matches m
        JOIN match_days d ON d.id = m.match_day_id
        WHERE d.season_id = ? AND m.has_ended = 1
        ORDER BY d.date DESC, d.number DESC, m.match_time DESC, m.id DESC
        "#
    } else {
        r#"
        SELECT m.* FROM matches m
        JOIN match_days d ON d.id = m.match_day_id
        WHERE d.season_id = ? AND m.has_ended = 0
        ORDER BY d.date, d.number, m.match_time, m.id
        "#
    };
    sqlx::query_as::<_, Match>(sql).bind(season_id).fetch_all(pool).await
}

/// Finished matches in a season and competition, optionally limited to one stage.
pub async fn ended_matches_in_scope<'e, E: SqliteExecutor<'e>>(
    executor: E,
    season_id: i64,
    competition_id: i64,
    stage_id: Option<i64>,
) -> DbResult<Vec<Match>> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT m.* FROM matches m
        JOIN match_days d ON d.id = m.match_day_id
        WHERE d.season_id = ? AND m.competition_id = ? AND m.has_ended = 1
          AND (? IS NULL OR m.stage_id = ?)
        ORDER BY m.id
        "#,
    )
    .bind(season_id)
    .bind(competition_id)
    .bind(stage_id)
    .bind(stage_id)
    .fetch_all(executor)
    .await
}

/// Finished matches in a season whose competition belongs to `gender`.
pub async fn ended_season_matches_by_gender(pool: &SqlitePool, season_id: i64, gender: Gender) -> DbResult<Vec<Match>> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT m.* FROM matches m
        JOIN match_days d ON d.id = m.match_day_id
        JOIN competitions c ON c.id = m.competition_id
        WHERE d.season_id = ? AND c.gender = ? AND m.has_ended = 1
        ORDER BY m.id
        "#,
    )
    .bind(season_id)
    .bind(gender)
    .fetch_all(pool)
    .await
}

/// Every finished match the team took part in, across all seasons.
pub async fn ended_matches_for_team(pool: &SqlitePool, team_id: i64) -> DbResult<Vec<Match>> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE has_ended = 1 AND (home_team_id = ? OR away_team_id = ?) ORDER BY id",
    )
    .bind(team_id)
    .bind(team_id)
    .fetch_all(pool)
    .await
}
