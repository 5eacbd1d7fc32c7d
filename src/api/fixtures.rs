use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;

use super::response::{created, ok, ApiResult, IdQuery, MatchQuery, OneOrMany, Payload, SeasonQuery};
use crate::db;
use crate::models::{
    CardType, Competition, GoalView, MatchDayUpdate, MatchDayView, MatchEventView, MatchUpdate, MatchView, NewCard,
    NewGoal, NewMatch, NewMatchDay, NewReferee, NewSeason, NewSubstitution, Referee, Season, SeasonUpdate, Stage,
};
use crate::services::{events, fixtures, parse_id, LeagueError};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/referee/create/", post(create_referee))
        .route("/referee/get", get(get_referees))
        .route("/referee/get/", get(get_referees))
        .route("/season/create/", post(create_season))
        .route("/season/update/{id}/", patch(update_season))
        .route("/season/get", get(get_seasons))
        .route("/season/get/", get(get_seasons))
        .route("/match_day/create/", post(create_match_day))
        .route("/match_day/update/{id}/", patch(update_match_day))
        .route("/match_day/get", get(get_match_days))
        .route("/match_day/get/", get(get_match_days))
        .route("/season/match_days/get", get(get_season_match_days))
        .route("/match_day/matches/get", get(get_match_day_matches))
        .route("/competition/get/", get(get_competitions))
        .route("/stage/get/", get(get_stages))
        .route("/match/create/", post(create_match))
        .route("/match/update/{id}/", patch(update_match))
        .route("/match/get", get(get_matches))
        .route("/match/get/", get(get_matches))
        .route("/season/fixtures/get", get(get_season_fixtures))
        .route("/season/results/get", get(get_season_results))
        .route("/season/results/latest/get", get(get_latest_results))
        .route("/match_event/goal/create/", post(create_goal))
        .route("/match_event/yellow_card/create/", post(create_yellow_card))
        .route("/match_event/red_card/create/", post(create_red_card))
        .route("/match_event/substitution/create/", post(create_substitution))
        .route("/match_event/get", get(get_match_events))
        .route("/match_event/team/get", get(get_team_match_events))
        .route("/match/goals/get", get(get_match_goals))
}

async fn create_referee(State(pool): State<SqlitePool>, Payload(referee): Payload<NewReferee>) -> ApiResult<Referee> {
    created("Referee created successfully", fixtures::create_referee(&pool, referee).await?)
}

async fn get_referees(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<Referee>> {
    match query.id.as_deref() {
        Some(raw) => {
            let referee = db::get_referee(&pool, parse_id(Some(raw), "Referee")?)
                .await?
                .ok_or_else(|| LeagueError::not_found("Referee"))?;
            ok("Referee retrieved successfully", OneOrMany::One(referee))
        }
        None => ok("Referees retrieved successfully", OneOrMany::Many(db::list_referees(&pool).await?)),
    }
}

// --- seasons ---

async fn create_season(State(pool): State<SqlitePool>, Payload(season): Payload<NewSeason>) -> ApiResult<Season> {
    created("Season created successfully", fixtures::create_season(&pool, season).await?)
}

async fn update_season(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<SeasonUpdate>,
) -> ApiResult<Season> {
    let season_id = parse_id(Some(&id), "Season")?;
    ok("Season updated successfully", fixtures::update_season(&pool, season_id, changes).await?)
}

async fn get_seasons(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<Season>> {
    match query.id.as_deref() {
        Some(raw) => {
            let season = fixtures::find_season(&pool, parse_id(Some(raw), "Season")?).await?;
            ok("Season retrieved successfully", OneOrMany::One(season))
        }
        None => ok("Seasons retrieved successfully", OneOrMany::Many(db::list_seasons(&pool).await?)),
    }
}

// --- match days ---

async fn create_match_day(
    State(pool): State<SqlitePool>,
    Payload(match_day): Payload<NewMatchDay>,
) -> ApiResult<MatchDayView> {
    created("Match day created successfully", fixtures::create_match_day(&pool, match_day).await?)
}

async fn update_match_day(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<MatchDayUpdate>,
) -> ApiResult<MatchDayView> {
    let match_day_id = parse_id(Some(&id), "Match day")?;
    ok("Match day updated successfully", fixtures::update_match_day(&pool, match_day_id, changes).await?)
}

async fn get_match_days(
    State(pool): State<SqlitePool>,
    Query(query): Query<IdQuery>,
) -> ApiResult<OneOrMany<MatchDayView>> {
    match query.id.as_deref() {
        Some(raw) => {
            let match_day = fixtures::find_match_day(&pool, parse_id(Some(raw), "Match day")?).await?;
            ok("Match day retrieved successfully", OneOrMany::One(fixtures::match_day_view(&pool, match_day).await?))
        }
        None => {
            let views = fixtures::match_day_views(&pool, db::list_match_days(&pool).await?).await?;
            ok("Match days retrieved successfully", OneOrMany::Many(views))
        }
    }
}

// GET /season/match_days/get?season_id=
async fn get_season_match_days(
    State(pool): State<SqlitePool>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<MatchDayView>> {
    let season = fixtures::find_season(&pool, query.season_id()?).await?;
    let views = fixtures::match_day_views(&pool, db::season_match_days(&pool, season.id).await?).await?;
    ok("Match days retrieved successfully", views)
}

// GET /match_day/matches/get?id=
async fn get_match_day_matches(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<Vec<MatchView>> {
    let match_day = fixtures::find_match_day(&pool, parse_id(query.id.as_deref(), "Match day")?).await?;
    let views = fixtures::match_views(&pool, db::match_day_matches(&pool, match_day.id).await?).await?;
    ok("Matches retrieved successfully", views)
}

async fn get_competitions(State(pool): State<SqlitePool>) -> ApiResult<Vec<Competition>> {
    ok("Competitions retrieved successfully", db::list_competitions(&pool).await?)
}

async fn get_stages(State(pool): State<SqlitePool>) -> ApiResult<Vec<Stage>> {
    ok("Stages retrieved successfully", db::list_stages(&pool).await?)
}

// --- matches ---

async fn create_match(State(pool): State<SqlitePool>, Payload(new_match): Payload<NewMatch>) -> ApiResult<MatchView> {
    created("Match created successfully", fixtures::create_match(&pool, new_match).await?)
}

async fn update_match(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Payload(changes): Payload<MatchUpdate>,
) -> ApiResult<MatchView> {
    let match_id = parse_id(Some(&id), "Match")?;
    ok("Match updated successfully", fixtures::update_match(&pool, match_id, changes).await?)
}

async fn get_matches(State(pool): State<SqlitePool>, Query(query): Query<IdQuery>) -> ApiResult<OneOrMany<MatchView>> {
    match query.id.as_deref() {
        Some(raw) => {
            let m = fixtures::find_match(&pool, parse_id(Some(raw), "Match")?).await?;
            ok("Match retrieved successfully", OneOrMany::One(fixtures::match_view(&pool, m).await?))
        }
        None => {
            let views = fixtures::match_views(&pool, db::list_matches(&pool).await?).await?;
            ok("Matches retrieved successfully", OneOrMany::Many(views))
        }
    }
}

// GET /season/fixtures/get?season_id=
async fn get_season_fixtures(
    State(pool): State<SqlitePool>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<MatchView>> {
    ok("Fixtures retrieved successfully", fixtures::season_fixtures(&pool, query.season_id()?).await?)
}

// GET /season/results/get?season_id=
async fn get_season_results(
    State(pool): State<SqlitePool>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<MatchView>> {
    ok("Results retrieved successfully", fixtures::season_results(&pool, query.season_id()?).await?)
}

async fn get_latest_results(State(pool): State<SqlitePool>) -> ApiResult<Vec<MatchView>> {
    ok("Results retrieved successfully", fixtures::latest_results(&pool).await?)
}

// --- match events ---

// POST /match_event/goal/create/
async fn create_goal(State(pool): State<SqlitePool>, Payload(goal): Payload<NewGoal>) -> ApiResult<MatchEventView> {
    created("Goal recorded successfully", events::record_goal(&pool, goal).await?)
}

async fn create_card(pool: SqlitePool, card: CardType, request: NewCard) -> ApiResult<MatchEventView> {
    let view = events::record_card(&pool, card, request).await?;
    created(format!("{} recorded successfully", view.event_type.label()), view)
}

async fn create_yellow_card(State(pool): State<SqlitePool>, Payload(card): Payload<NewCard>) -> ApiResult<MatchEventView> {
    create_card(pool, CardType::Yellow, card).await
}

async fn create_red_card(State(pool): State<SqlitePool>, Payload(card): Payload<NewCard>) -> ApiResult<MatchEventView> {
    create_card(pool, CardType::Red, card).await
}

async fn create_substitution(
    State(pool): State<SqlitePool>,
    Payload(substitution): Payload<NewSubstitution>,
) -> ApiResult<MatchEventView> {
    created("Substitution recorded successfully", events::record_substitution(&pool, substitution).await?)
}

// GET /match_event/get?match_id=
async fn get_match_events(
    State(pool): State<SqlitePool>,
    Query(query): Query<MatchQuery>,
) -> ApiResult<Vec<MatchEventView>> {
    let views = events::match_event_views(&pool, query.match_id()?, None).await?;
    ok("Match events retrieved successfully", views)
}

// GET /match_event/team/get?match_id=&team_id=
async fn get_team_match_events(
    State(pool): State<SqlitePool>,
    Query(query): Query<MatchQuery>,
) -> ApiResult<Vec<MatchEventView>> {
    let match_id = query.match_id()?;
    let team_id = parse_id(query.team_id.as_deref(), "Team")?;
    let views = events::match_event_views(&pool, match_id, Some(team_id)).await?;
    ok("Match events retrieved successfully", views)
}

// GET /match/goals/get?match_id=[&team_id=]
async fn get_match_goals(State(pool): State<SqlitePool>, Query(query): Query<MatchQuery>) -> ApiResult<Vec<GoalView>> {
    let views = events::match_goal_views(&pool, query.match_id()?, query.optional_team_id()?).await?;
    ok("Goals retrieved successfully", views)
}
