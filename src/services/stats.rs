use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::db;
use crate::models::{CardType, CleanSheetRanking, Gender, Match, PlayerRanking, RankingMetric};
use crate::services::LeagueError;

/// Counts occurrences per id.
fn count_ids(ids: impl IntoIterator<Item = i64>) -> HashMap<i64, i64> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Clean sheets per team: the away side keeps one when the home side fails to
/// score, and vice versa. A goalless draw credits both.
pub fn clean_sheet_counts(matches: &[Match]) -> HashMap<i64, i64> {
    let credited = matches.iter().filter(|m| m.has_ended).flat_map(|m| {
        let away = (m.home_team_score == 0).then_some(m.away_team_id);
        let home = (m.away_team_score == 0).then_some(m.home_team_id);
        away.into_iter().chain(home)
    });
    count_ids(credited)
}

pub fn sort_player_rankings(rows: &mut [PlayerRanking]) {
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
}

pub fn sort_clean_sheets(rows: &mut [CleanSheetRanking]) {
    rows.sort_by(|a, b| {
        b.no_of_clean_sheets
            .cmp(&a.no_of_clean_sheets)
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
}

/// Season leaderboards for goals, assists, cards and clean sheets.
pub struct StatsRanker {
    pool: SqlitePool,
}

impl StatsRanker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_season(&self, season_id: i64) -> Result<(), LeagueError> {
        db::get_season(&self.pool, season_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Season"))?;
        Ok(())
    }

    pub async fn top_scorers(&self, season_id: i64, gender: Gender) -> Result<Vec<PlayerRanking>, LeagueError> {
        self.player_ranking(season_id, gender, RankingMetric::Goals).await
    }

    pub async fn top_assisters(&self, season_id: i64, gender: Gender) -> Result<Vec<PlayerRanking>, LeagueError> {
        self.player_ranking(season_id, gender, RankingMetric::Assists).await
    }

    pub async fn card_ranking(
        &self,
        season_id: i64,
        gender: Gender,
        card: CardType,
    ) -> Result<Vec<PlayerRanking>, LeagueError> {
        self.player_ranking(season_id, gender, card.into()).await
    }

    pub async fn player_ranking(
        &self,
        season_id: i64,
        gender: Gender,
        metric: RankingMetric,
    ) -> Result<Vec<PlayerRanking>, LeagueError> {
        self.ensure_season(season_id).await?;

        let counts = match metric {
            RankingMetric::Goals => {
                let goals = db::season_goals(&self.pool, season_id, gender).await?;
                count_ids(goals.iter().map(|g| g.player_id))
            }
            RankingMetric::Assists => {
                let goals = db::season_goals(&self.pool, season_id, gender).await?;
                count_ids(goals.iter().filter_map(|g| g.assist_provider_id))
            }
            RankingMetric::YellowCards => {
                let events = db::season_events(&self.pool, season_id, gender, CardType::Yellow.into()).await?;
                count_ids(events.iter().map(|e| e.player_id))
            }
            RankingMetric::RedCards => {
                let events = db::season_events(&self.pool, season_id, gender, CardType::Red.into()).await?;
                count_ids(events.iter().map(|e| e.player_id))
            }
        };

        if counts.is_empty() {
            return Err(LeagueError::NotFound(format!(
                "No {} for {} competitions this season",
                metric.describe(),
                gender.possessive().to_lowercase()
            )));
        }

        let mut rows = Vec::with_capacity(counts.len());
        for (player_id, total) in counts {
            rows.push(self.player_row(player_id, metric, total).await?);
        }
        sort_player_rankings(&mut rows);

        tracing::debug!("Ranked {} players for {}", rows.len(), metric.describe());
        Ok(rows)
    }

    async fn player_row(&self, player_id: i64, metric: RankingMetric, total: i64) -> Result<PlayerRanking, LeagueError> {
        let player = db::get_player(&self.pool, player_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Player"))?;
        let team = match player.team_id {
            Some(id) => db::get_team(&self.pool, id).await?,
            None => None,
        };
        let position = match player.position_id {
            Some(id) => db::get_position(&self.pool, id).await?,
            None => None,
        };

        Ok(PlayerRanking {
            player_id: player.id,
            first_name: player.first_name,
            last_name: player.last_name,
            position: position.map(|p| p.name),
            player_image: player.image,
            team_name: team.as_ref().map(|t| t.name.clone()),
            team_name_abbreviation: team.as_ref().map(|t| t.name_abbreviation.clone()),
            team_logo_url: team.as_ref().map(|t| t.logo_url.clone()),
            team_color: team.map(|t| t.color),
            metric,
            total,
        })
    }

    pub async fn clean_sheets(&self, season_id: i64, gender: Gender) -> Result<Vec<CleanSheetRanking>, LeagueError> {
        self.ensure_season(season_id).await?;

        let matches = db::ended_season_matches_by_gender(&self.pool, season_id, gender).await?;
        let counts = clean_sheet_counts(&matches);
        if counts.is_empty() {
            return Err(LeagueError::NotFound(format!(
                "No clean sheets for {} competitions this season",
                gender.possessive().to_lowercase()
            )));
        }

        let mut rows = Vec::with_capacity(counts.len());
        for (team_id, no_of_clean_sheets) in counts {
            let team = db::get_team(&self.pool, team_id)
                .await?
                .ok_or_else(|| LeagueError::not_found("Team"))?;
            rows.push(CleanSheetRanking {
                team_id: team.id,
                team_name: team.name,
                team_name_abbreviation: team.name_abbreviation,
                team_logo_url: team.logo_url,
                team_color: team.color,
                no_of_clean_sheets,
            });
        }
        sort_clean_sheets(&mut rows);
        Ok(rows)
    }
}
