pub mod events;
pub mod fans;
pub mod fixtures;
pub mod news;
pub mod players;
pub mod seed;
pub mod standings;
pub mod teams;

pub use events::*;
pub use fans::*;
pub use fixtures::*;
pub use news::*;
pub use players::*;
pub use seed::seed_defaults;
pub use standings::*;
pub use teams::*;

use anyhow::Result;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;

/// Query helpers return the raw driver error; the service layer decides how it surfaces.
pub type DbResult<T> = std::result::Result<T, sqlx::Error>;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    // Strip the "sqlite:" prefix to get the file path, create parent dir if needed
    let file_path = database_url
        .strip_prefix("sqlite:///")
        .or_else(|| database_url.strip_prefix("sqlite://"))
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if !file_path.starts_with(":memory:") {
        if let Some(parent) = std::path::Path::new(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}

/// Creates the schema, then inserts the default rows. Safe to call on every start.
pub async fn bootstrap(pool: &SqlitePool) -> Result<()> {
    init_database_with_pool(pool).await?;
    seed_defaults(pool).await?;
    Ok(())
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        name_abbreviation TEXT NOT NULL UNIQUE,
        logo_url TEXT NOT NULL,
        color TEXT NOT NULL,
        twitter_url TEXT NOT NULL UNIQUE,
        is_active INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fans (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone_no TEXT NOT NULL UNIQUE,
        birth_date TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 0,
        fav_team_id INTEGER NOT NULL REFERENCES teams (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_positions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        name_abbreviation TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        gender TEXT NOT NULL CHECK (gender IN ('M', 'W')),
        birth_date TEXT NOT NULL,
        year_group TEXT NOT NULL,
        major TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        team_id INTEGER REFERENCES teams (id) ON DELETE SET NULL,
        position_id INTEGER REFERENCES player_positions (id) ON DELETE SET NULL,
        image TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS coaches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        team_id INTEGER REFERENCES teams (id) ON DELETE SET NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        gender TEXT NOT NULL CHECK (gender IN ('M', 'W'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS referees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS seasons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS competitions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        gender TEXT NOT NULL CHECK (gender IN ('M', 'W')),
        UNIQUE (name, gender)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS match_days (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number INTEGER NOT NULL,
        date TEXT NOT NULL,
        season_id INTEGER REFERENCES seasons (id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        home_team_id INTEGER NOT NULL REFERENCES teams (id),
        away_team_id INTEGER NOT NULL REFERENCES teams (id),
        match_day_id INTEGER NOT NULL REFERENCES match_days (id),
        competition_id INTEGER NOT NULL REFERENCES competitions (id),
        referee_id INTEGER NOT NULL REFERENCES referees (id),
        stage_id INTEGER REFERENCES stages (id),
        match_time TEXT NOT NULL,
        home_team_score INTEGER NOT NULL DEFAULT 0,
        away_team_score INTEGER NOT NULL DEFAULT 0,
        has_started INTEGER NOT NULL DEFAULT 0,
        has_ended INTEGER NOT NULL DEFAULT 0,
        CHECK (home_team_id <> away_team_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS match_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_id INTEGER NOT NULL REFERENCES matches (id) ON DELETE CASCADE,
        event_type TEXT NOT NULL,
        player_id INTEGER NOT NULL REFERENCES players (id),
        minute INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS goals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_event_id INTEGER NOT NULL UNIQUE REFERENCES match_events (id) ON DELETE CASCADE,
        scoring_team_id INTEGER NOT NULL REFERENCES teams (id),
        assist_provider_id INTEGER REFERENCES players (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS substitutions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        match_event_id INTEGER NOT NULL UNIQUE REFERENCES match_events (id) ON DELETE CASCADE,
        player_out_id INTEGER NOT NULL REFERENCES players (id),
        player_in_id INTEGER NOT NULL REFERENCES players (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS standings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        season_id INTEGER NOT NULL REFERENCES seasons (id) ON DELETE CASCADE,
        competition_id INTEGER NOT NULL REFERENCES competitions (id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        UNIQUE (season_id, competition_id, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS standings_teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        standings_id INTEGER NOT NULL REFERENCES standings (id) ON DELETE CASCADE,
        team_id INTEGER NOT NULL REFERENCES teams (id) ON DELETE CASCADE,
        matches_played INTEGER NOT NULL DEFAULT 0,
        matches_won INTEGER NOT NULL DEFAULT 0,
        matches_drawn INTEGER NOT NULL DEFAULT 0,
        matches_lost INTEGER NOT NULL DEFAULT 0,
        goals_for INTEGER NOT NULL DEFAULT 0,
        goals_against INTEGER NOT NULL DEFAULT 0,
        goal_difference INTEGER NOT NULL DEFAULT 0,
        points INTEGER NOT NULL DEFAULT 0,
        UNIQUE (standings_id, team_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_item_tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        featured_image TEXT NOT NULL,
        title TEXT NOT NULL,
        subtitle TEXT NOT NULL,
        pub_date TEXT NOT NULL,
        text TEXT NOT NULL,
        author TEXT,
        tag_id INTEGER REFERENCES news_item_tags (id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transfers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_id INTEGER NOT NULL REFERENCES players (id) ON DELETE CASCADE,
        from_team_id INTEGER REFERENCES teams (id),
        to_team_id INTEGER NOT NULL REFERENCES teams (id),
        date TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_players_team_gender ON players(team_id, gender)",
    "CREATE INDEX IF NOT EXISTS idx_match_days_season ON match_days(season_id)",
    "CREATE INDEX IF NOT EXISTS idx_matches_match_day ON matches(match_day_id)",
    "CREATE INDEX IF NOT EXISTS idx_matches_competition ON matches(competition_id)",
    "CREATE INDEX IF NOT EXISTS idx_match_events_match ON match_events(match_id)",
    "CREATE INDEX IF NOT EXISTS idx_standings_teams_standings ON standings_teams(standings_id)",
];

/// Called from the CLI where no pool exists yet.
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let pool = create_pool(database_url).await?;
    bootstrap(&pool).await?;
    Ok(pool)
}

/// Called from the server so schema creation shares the main pool.
pub async fn init_database_with_pool(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
