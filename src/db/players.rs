use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use super::DbResult;
use crate::models::{Coach, Gender, NewCoach, NewPlayer, NewPlayerPosition, Player, PlayerPosition, Transfer};

// --- positions ---

pub async fn insert_position(pool: &SqlitePool, position: &NewPlayerPosition) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO player_positions (name, name_abbreviation) VALUES (?, ?)")
        .bind(&position.name)
        .bind(&position.name_abbreviation)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_position(pool: &SqlitePool, position_id: i64) -> DbResult<Option<PlayerPosition>> {
    sqlx::query_as::<_, PlayerPosition>("SELECT * FROM player_positions WHERE id = ?")
        .bind(position_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_positions(pool: &SqlitePool) -> DbResult<Vec<PlayerPosition>> {
    sqlx::query_as::<_, PlayerPosition>("SELECT * FROM player_positions ORDER BY id")
        .fetch_all(pool)
        .await
}

// --- players ---

pub async fn insert_player(pool: &SqlitePool, player: &NewPlayer) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO players
        (first_name, last_name, gender, birth_date, year_group, major, is_active, team_id, position_id, image)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&player.first_name)
    .bind(&player.last_name)
    .bind(player.gender)
    .bind(player.birth_date)
    .bind(&player.year_group)
    .bind(&player.major)
    .bind(player.is_active)
    .bind(player.team_id)
    .bind(player.position_id)
    .bind(&player.image)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_player(pool: &SqlitePool, player: &Player) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE players
        SET first_name = ?, last_name = ?, gender = ?, birth_date = ?, year_group = ?, major = ?,
            is_active = ?, team_id = ?, position_id = ?, image = ?
        WHERE id = ?
        "#,
    )
    .bind(&player.first_name)
    .bind(&player.last_name)
    .bind(player.gender)
    .bind(player.birth_date)
    .bind(&player.year_group)
    .bind(&player.major)
    .bind(player.is_active)
    .bind(player.team_id)
    .bind(player.position_id)
    .bind(&player.image)
    .bind(player.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_player<'e, E: SqliteExecutor<'e>>(executor: E, player_id: i64) -> DbResult<Option<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
        .bind(player_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_players(pool: &SqlitePool) -> DbResult<Vec<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM players ORDER BY last_name, first_name, id")
        .fetch_all(pool)
        .await
}

pub async fn team_players(pool: &SqlitePool, team_id: i64, gender: Gender) -> DbResult<Vec<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT * FROM players WHERE team_id = ? AND gender = ? ORDER BY last_name, first_name, id",
    )
    .bind(team_id)
    .bind(gender)
    .fetch_all(pool)
    .await
}

/// Goals the player has scored across every recorded match.
pub async fn goals_in_history(pool: &SqlitePool, player_id: i64) -> DbResult<i64> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM goals g
        JOIN match_events e ON e.id = g.match_event_id
        WHERE e.player_id = ?
        "#,
    )
    .bind(player_id)
    .fetch_one(pool)
    .await
}

// --- coaches ---

pub async fn insert_coach(pool: &SqlitePool, coach: &NewCoach) -> DbResult<i64> {
    let result = sqlx::query(
        "INSERT INTO coaches (first_name, last_name, team_id, is_active, gender) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&coach.first_name)
    .bind(&coach.last_name)
    .bind(coach.team_id)
    .bind(coach.is_active)
    .bind(coach.gender)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_coach(pool: &SqlitePool, coach_id: i64) -> DbResult<Option<Coach>> {
    sqlx::query_as::<_, Coach>("SELECT * FROM coaches WHERE id = ?")
        .bind(coach_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_coaches(pool: &SqlitePool) -> DbResult<Vec<Coach>> {
    sqlx::query_as::<_, Coach>("SELECT * FROM coaches ORDER BY last_name, first_name, id")
        .fetch_all(pool)
        .await
}

// --- transfers ---

pub async fn insert_transfer(
    conn: &mut SqliteConnection,
    player_id: i64,
    from_team_id: Option<i64>,
    to_team_id: i64,
    date: NaiveDate,
) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO transfers (player_id, from_team_id, to_team_id, date) VALUES (?, ?, ?, ?)")
        .bind(player_id)
        .bind(from_team_id)
        .bind(to_team_id)
        .bind(date)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn set_player_team(conn: &mut SqliteConnection, player_id: i64, team_id: i64) -> DbResult<()> {
    sqlx::query("UPDATE players SET team_id = ? WHERE id = ?")
        .bind(team_id)
        .bind(player_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn get_transfer(pool: &SqlitePool, transfer_id: i64) -> DbResult<Option<Transfer>> {
    sqlx::query_as::<_, Transfer>("SELECT * FROM transfers WHERE id = ?")
        .bind(transfer_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_transfers(pool: &SqlitePool) -> DbResult<Vec<Transfer>> {
    sqlx::query_as::<_, Transfer>("SELECT * FROM transfers ORDER BY date DESC, id DESC")
        .fetch_all(pool)
        .await
}
