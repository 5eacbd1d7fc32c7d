use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;

use super::response::{created, done, gender_segment, ok, ApiResult, Payload, SeasonQuery};
use crate::models::{CardType, CleanSheetRanking, CompetitionKind, CreateStandingsRequest, PlayerRanking, StandingsView};
use crate::services::{parse_id, LeagueError, StandingsAggregator, StatsRanker};

pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/standings/league/{gender}/create/", post(create_league))
        .route("/standings/fa_cup/group/{gender}/create/", post(create_cup_groups))
        .route("/standings/league/{gender}/update/{season_id}/", patch(update_league))
        .route("/standings/fa_cup/group/{gender}/update/{season_id}/", patch(update_cup_groups))
        .route("/standings/league/{gender}/get", get(get_league))
        .route("/standings/fa_cup/group/{gender}/get", get(get_cup_groups))
        .route("/standings/season/get", get(get_season_standings))
        .route("/standings/{gender}/latest/get/", get(get_latest))
        .route("/standings/delete/{id}/", delete(delete_standings))
        .route("/season/stats/top_scorers/get", get(top_scorers))
        .route("/season/stats/top_assisters/get", get(top_assisters))
        .route("/season/stats/yellow_cards/get", get(yellow_cards))
        .route("/season/stats/red_cards/get", get(red_cards))
        .route("/season/stats/clean_sheets/get", get(clean_sheets))
}

fn season_from_body(request: &CreateStandingsRequest) -> Result<i64, LeagueError> {
    request.season_id.ok_or_else(|| LeagueError::missing_id("Season"))
}

// POST /standings/league/{gender}/create/
async fn create_league(
    State(pool): State<SqlitePool>,
    Path(gender): Path<String>,
    Payload(request): Payload<CreateStandingsRequest>,
) -> ApiResult<StandingsView> {
    let gender = gender_segment(&gender)?;
    let season_id = season_from_body(&request)?;
    let view = StandingsAggregator::new(pool).create_league(season_id, gender).await?;
    created(format!("{} league table created successfully", gender.possessive()), view)
}

// POST /standings/fa_cup/group/{gender}/create/
async fn create_cup_groups(
    State(pool): State<SqlitePool>,
    Path(gender): Path<String>,
    Payload(request): Payload<CreateStandingsRequest>,
) -> ApiResult<Vec<StandingsView>> {
    let gender = gender_segment(&gender)?;
    let season_id = season_from_body(&request)?;
    let mut rng = StdRng::from_entropy();
    let views = StandingsAggregator::new(pool)
        .create_cup_groups(season_id, gender, &mut rng)
        .await?;
    created(format!("{} FA Cup groups drawn successfully", gender.possessive()), views)
}

async fn recompute(pool: SqlitePool, gender: String, season_id: String, kind: CompetitionKind) -> ApiResult<()> {
    let gender = gender_segment(&gender)?;
    let season_id = parse_id(Some(&season_id), "Season")?;
    StandingsAggregator::new(pool).recompute(season_id, gender, kind).await?;
    done("Standings updated successfully")
}

// PATCH /standings/league/{gender}/update/{season_id}/
async fn update_league(
    State(pool): State<SqlitePool>,
    Path((gender, season_id)): Path<(String, String)>,
) -> ApiResult<()> {
    recompute(pool, gender, season_id, CompetitionKind::League).await
}

// PATCH /standings/fa_cup/group/{gender}/update/{season_id}/
async fn update_cup_groups(
    State(pool): State<SqlitePool>,
    Path((gender, season_id)): Path<(String, String)>,
) -> ApiResult<()> {
    recompute(pool, gender, season_id, CompetitionKind::Cup).await
}

async fn current(pool: SqlitePool, gender: String, query: SeasonQuery, kind: CompetitionKind) -> ApiResult<Vec<StandingsView>> {
    let gender = gender_segment(&gender)?;
    let season_id = query.season_id()?;
    let views = StandingsAggregator::new(pool).current(season_id, gender, kind).await?;
    ok("Standings retrieved successfully", views)
}

// GET /standings/league/{gender}/get?season_id=
async fn get_league(
    State(pool): State<SqlitePool>,
    Path(gender): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<StandingsView>> {
    current(pool, gender, query, CompetitionKind::League).await
}

// GET /standings/fa_cup/group/{gender}/get?season_id=
async fn get_cup_groups(
    State(pool): State<SqlitePool>,
    Path(gender): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<StandingsView>> {
    current(pool, gender, query, CompetitionKind::Cup).await
}

async fn get_season_standings(
    State(pool): State<SqlitePool>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<StandingsView>> {
    let views = StandingsAggregator::new(pool).season_views(query.season_id()?).await?;
    ok("Standings retrieved successfully", views)
}

async fn get_latest(State(pool): State<SqlitePool>, Path(gender): Path<String>) -> ApiResult<Vec<StandingsView>> {
    let gender = gender_segment(&gender)?;
    ok("Standings retrieved successfully", StandingsAggregator::new(pool).latest(gender).await?)
}

async fn delete_standings(State(pool): State<SqlitePool>, Path(id): Path<String>) -> ApiResult<()> {
    let standings_id = parse_id(Some(&id), "Standings")?;
    StandingsAggregator::new(pool).delete(standings_id).await?;
    done("Standings deleted successfully")
}

// --- season statistics ---

// GET /season/stats/top_scorers/get?season_id=[&gender=]
async fn top_scorers(State(pool): State<SqlitePool>, Query(query): Query<SeasonQuery>) -> ApiResult<Vec<PlayerRanking>> {
    let rows = StatsRanker::new(pool).top_scorers(query.season_id()?, query.gender()?).await?;
    ok("Top scorers retrieved successfully", rows)
}

async fn top_assisters(State(pool): State<SqlitePool>, Query(query): Query<SeasonQuery>) -> ApiResult<Vec<PlayerRanking>> {
    let rows = StatsRanker::new(pool).top_assisters(query.season_id()?, query.gender()?).await?;
    ok("Top assisters retrieved successfully", rows)
}

async fn cards(pool: SqlitePool, query: SeasonQuery, card: CardType) -> ApiResult<Vec<PlayerRanking>> {
    let rows = StatsRanker::new(pool)
        .card_ranking(query.season_id()?, query.gender()?, card)
        .await?;
    ok("Card rankings retrieved successfully", rows)
}

async fn yellow_cards(State(pool): State<SqlitePool>, Query(query): Query<SeasonQuery>) -> ApiResult<Vec<PlayerRanking>> {
    cards(pool, query, CardType::Yellow).await
}

async fn red_cards(State(pool): State<SqlitePool>, Query(query): Query<SeasonQuery>) -> ApiResult<Vec<PlayerRanking>> {
    cards(pool, query, CardType::Red).await
}

async fn clean_sheets(
    State(pool): State<SqlitePool>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<CleanSheetRanking>> {
    let rows = StatsRanker::new(pool).clean_sheets(query.season_id()?, query.gender()?).await?;
    ok("Clean sheets retrieved successfully", rows)
}
