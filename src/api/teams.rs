use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;

use super::response::{created, gender_segment, ok, ApiResult, IdQuery, OneOrMany, Payload, TeamQuery};
use crate::db;
use crate::models::{
    Coach, FanView, NewCoach, NewFan, NewPlayer, NewPlayerPosition, NewTeam, NewTransfer, PlayerPosition, PlayerUpdate,
    PlayerView, Team, TeamStats, TeamUpdate, TransferView,
};
use crate::services::{fans, parse_id, roster};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/team/create/", post(create_team))
        .route("/team/update/{id}/", patch(update_team))
        .route("/team/get", get(get_teams))
        .route("/team/get/", get(get_teams))
        .route("/team/players/{gender}/get", get(get_team_players))
        .route("/team/stats/get", get(get_team_stats))
        .route("/player/create/", post(create_player))
        .route("/player/update/{id}/", patch(update_player))
        .route("/player/get", get(get_players))
        .route("/player/get/", get(get_players))
        .route("/player_position/create/", post(create_position))
        .route("/player_position/get/", get(get_positions))
        .route("/coach/create/", post(create_coach))
        .route("/coach/get/", get(get_coaches))
        .route("/player/transfer/create/", post(create_transfer))
        .route("/player/transfer/get/", get(get_transfers))
        .route("/fan/create/", post(create_fan))
        .route("/fan/get", get(get_fans))
        .route("/fan/get/", get(get_fans))
}

// POST /team/create/
async fn create_team(State(pool): State<SqlitePool>, Payload(team): Payload<NewTeam>) -> ApiResult<Team> {
    created("Team created successfully", roster::create_team(&pool, team).await?)
}

// PATCH /team/update/{id}/
async fn update_team(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<TeamUpdate>,
) -> ApiResult<Team> {
    let team_id = parse_id(Some(&id), "Team")?;
    ok("Team updated successfully", roster::update_team(&pool, team_id, changes).await?)
}

// GET /team/get[?id=]
async fn get_teams(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<Team>> {
    match query.id.as_deref() {
        Some(raw) => {
            let team = roster::find_team(&pool, parse_id(Some(raw), "Team")?).await?;
            ok("Team retrieved successfully", OneOrMany::One(team))
        }
        None => ok("Teams retrieved successfully", OneOrMany::Many(db::list_teams(&pool).await?)),
    }
}

// GET /team/players/{gender}/get?team_id=
async fn get_team_players(
    State(pool): State<SqlitePool>,
    Path(gender): Path<String>,
    Query(query): Query<TeamQuery>,
) -> ApiResult<Vec<PlayerView>> {
    let gender = gender_segment(&gender)?;
    let team_id = parse_id(query.team_id.as_deref(), "Team")?;
    let players = roster::team_roster(&pool, team_id, gender).await?;
    ok("Players retrieved successfully", players)
}

// GET /team/stats/get?team_id=
async fn get_team_stats(State(pool): State<SqlitePool>, Query(query): Query<TeamQuery>) -> ApiResult<TeamStats> {
    let team_id = parse_id(query.team_id.as_deref(), "Team")?;
    ok("Team stats retrieved successfully", roster::team_stats(&pool, team_id).await?)
}

async fn create_player(State(pool): State<SqlitePool>, Payload(player): Payload<NewPlayer>) -> ApiResult<PlayerView> {
    created("Player created successfully", roster::create_player(&pool, player).await?)
}

async fn update_player(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<PlayerUpdate>,
) -> ApiResult<PlayerView> {
    let player_id = parse_id(Some(&id), "Player")?;
    ok("Player updated successfully", roster::update_player(&pool, player_id, changes).await?)
}

async fn get_players(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<PlayerView>> {
    match query.id.as_deref() {
        Some(raw) => {
            let player = roster::find_player(&pool, parse_id(Some(raw), "Player")?).await?;
            ok("Player retrieved successfully", OneOrMany::One(roster::player_view(&pool, player).await?))
        }
        None => ok("Players retrieved successfully", OneOrMany::Many(roster::list_players(&pool).await?)),
    }
}

async fn create_position(
    State(pool): State<SqlitePool>,
    Payload(position): Payload<NewPlayerPosition>,
) -> ApiResult<PlayerPosition> {
    created("Position created successfully", roster::create_position(&pool, position).await?)
}

async fn get_positions(State(pool): State<SqlitePool>) -> ApiResult<Vec<PlayerPosition>> {
    ok("Positions retrieved successfully", db::list_positions(&pool).await?)
}

async fn create_coach(State(pool): State<SqlitePool>, Payload(coach): Payload<NewCoach>) -> ApiResult<Coach> {
    created("Coach created successfully", roster::create_coach(&pool, coach).await?)
}

async fn get_coaches(State(pool): State<SqlitePool>) -> ApiResult<Vec<Coach>> {
    ok("Coaches retrieved successfully", db::list_coaches(&pool).await?)
}

// POST /player/transfer/create/
async fn create_transfer(
    State(pool): State<SqlitePool>,
    Payload(transfer): Payload<NewTransfer>,
) -> ApiResult<TransferView> {
    created("Transfer completed successfully", roster::create_transfer(&pool, transfer).await?)
}

async fn get_transfers(State(pool): State<SqlitePool>) -> ApiResult<Vec<TransferView>> {
    ok("Transfers retrieved successfully", roster::list_transfers(&pool).await?)
}

// POST /fan/create/
async fn create_fan(State(pool): State<SqlitePool>, Payload(fan): Payload<NewFan>) -> ApiResult<FanView> {
    created("Fan registered successfully", fans::create_fan(&pool, fan).await?)
}

async fn get_fans(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<FanView>> {
    match query.id.as_deref() {
        Some(raw) => {
            let fan = fans::find_fan(&pool, parse_id(Some(raw), "Fan")?).await?;
            ok("Fan retrieved successfully", OneOrMany::One(fans::fan_view(&pool, fan).await?))
        }
        None => ok("Fans retrieved successfully", OneOrMany::Many(fans::list_fans(&pool).await?)),
    }
}
