use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::db::{self, GoalRecord};
use crate::models::{
    Competition, CompetitionKind, Gender, Match, Season, Standings, StandingsTeamView, StandingsView, Team, TeamRecord,
    GROUP_STAGE,
};
use crate::services::LeagueError;

pub const LEAGUE_TABLE: &str = "League Table";
pub const CUP_GROUPS: [&str; 2] = ["A", "B"];

/// Tallies one team's record from finished matches and the goals scored in them.
///
/// Wins and losses come from the scoreline, goals for from the Goal records
/// credited to the team, and goals against from the opposing side's score.
pub fn tally(team_id: i64, matches: &[Match], goals: &[GoalRecord]) -> TeamRecord {
    let mut record = TeamRecord::default();

    for m in matches {
        let Some((scored, conceded)) = m.score_for(team_id) else {
            continue;
        };
        record.matches_played += 1;
        record.goals_against += conceded;
        if scored > conceded {
            record.matches_won += 1;
        } else if scored < conceded {
            record.matches_lost += 1;
        }
    }

    record.goals_for = goals
        .iter()
        .filter(|g| g.scoring_team_id == team_id && matches.iter().any(|m| m.id == g.match_id))
        .count() as i64;

    record
}

/// Shuffles the teams and deals them into two groups; the first takes the odd one out.
pub fn draw_groups<R: Rng + ?Sized>(mut teams: Vec<Team>, rng: &mut R) -> (Vec<Team>, Vec<Team>) {
    teams.shuffle(rng);
    let split = teams.len().div_ceil(2);
    let second = teams.split_off(split);
    (teams, second)
}

/// Owns the standings snapshot: group creation, recompute and presentation.
pub struct StandingsAggregator {
    pool: SqlitePool,
}

impl StandingsAggregator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn scope(&self, season_id: i64, gender: Gender, kind: CompetitionKind) -> Result<(Season, Competition), LeagueError> {
        let season = db::get_season(&self.pool, season_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Season"))?;
        let competition = db::find_competition(&self.pool, kind.competition_name(), gender)
            .await?
            .ok_or_else(|| LeagueError::not_found("Competition"))?;
        Ok((season, competition))
    }

    async fn stage_for(&self, kind: CompetitionKind) -> Result<Option<i64>, LeagueError> {
        match kind {
            CompetitionKind::League => Ok(None),
            CompetitionKind::Cup => {
                let stage = db::find_stage(&self.pool, GROUP_STAGE)
                    .await?
                    .ok_or_else(|| LeagueError::not_found("Stage"))?;
                Ok(Some(stage.id))
            }
        }
    }

    async fn ensure_absent(&self, season: &Season, competition: &Competition, names: &[&str]) -> Result<(), LeagueError> {
        let existing = db::find_standings(&self.pool, season.id, competition.id).await?;
        if let Some(clash) = existing.iter().find(|s| names.contains(&s.name.as_str())) {
            return Err(LeagueError::validation(format!(
                "{} {} standings '{}' already exist for season {}",
                competition.gender.possessive(),
                competition.name,
                clash.name,
                season.name
            )));
        }
        Ok(())
    }

    /// Creates the league table with every team fielding a player of `gender`.
    pub async fn create_league(&self, season_id: i64, gender: Gender) -> Result<StandingsView, LeagueError> {
        let (season, competition) = self.scope(season_id, gender, CompetitionKind::League).await?;
        self.ensure_absent(&season, &competition, &[LEAGUE_TABLE]).await?;

        let teams = db::teams_with_roster(&self.pool, gender).await?;
        if teams.is_empty() {
            return Err(LeagueError::validation(format!(
                "No team has registered {} players",
                gender.possessive().to_lowercase()
            )));
        }

        let mut tx = self.pool.begin().await?;
        let standings_id = db::insert_standings(&mut tx, season.id, competition.id, LEAGUE_TABLE).await?;
        for team in &teams {
            db::insert_standings_team(&mut tx, standings_id, team.id).await?;
        }
        tx.commit().await?;

        tracing::info!(
            "Created {} league table for season {} with {} teams",
            gender.possessive(),
            season.name,
            teams.len()
        );

        let standings = Standings {
            id: standings_id,
            season_id: season.id,
            competition_id: competition.id,
            name: LEAGUE_TABLE.to_string(),
        };
        self.view(standings).await
    }

    /// Draws the eligible teams into cup groups A and B.
    pub async fn create_cup_groups<R: Rng + ?Sized>(
        &self,
        season_id: i64,
        gender: Gender,
        rng: &mut R,
    ) -> Result<Vec<StandingsView>, LeagueError> {
        let (season, competition) = self.scope(season_id, gender, CompetitionKind::Cup).await?;
        self.ensure_absent(&season, &competition, &CUP_GROUPS).await?;

        let teams = db::teams_with_roster(&self.pool, gender).await?;
        if teams.len() < 2 {
            return Err(LeagueError::validation(format!(
                "At least two teams with {} players are needed for a group draw",
                gender.possessive().to_lowercase()
            )));
        }
        let (group_a, group_b) = draw_groups(teams, rng);

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(CUP_GROUPS.len());
        for (name, members) in CUP_GROUPS.iter().zip([&group_a, &group_b]) {
            let standings_id = db::insert_standings(&mut tx, season.id, competition.id, name).await?;
            for team in members.iter() {
                db::insert_standings_team(&mut tx, standings_id, team.id).await?;
            }
            created.push(Standings {
                id: standings_id,
                season_id: season.id,
                competition_id: competition.id,
                name: name.to_string(),
            });
        }
        tx.commit().await?;

        tracing::info!(
            "Drew {} cup groups for season {}: A={} teams, B={} teams",
            gender.possessive(),
            season.name,
            group_a.len(),
            group_b.len()
        );

        let mut views = Vec::with_capacity(created.len());
        for standings in created {
            views.push(self.view(standings).await?);
        }
        Ok(views)
    }

    /// Recomputes every group of the scope from the match ledger and returns the groups.
    ///
    /// All counters are read before any row is written, and the writes share one
    /// transaction: a failure leaves the previous snapshot in place.
    pub async fn recompute(
        &self,
        season_id: i64,
        gender: Gender,
        kind: CompetitionKind,
    ) -> Result<Vec<Standings>, LeagueError> {
        let (season, competition) = self.scope(season_id, gender, kind).await?;
        let stage_id = self.stage_for(kind).await?;

        let groups = db::find_standings(&self.pool, season.id, competition.id).await?;
        if groups.is_empty() {
            return Err(LeagueError::not_found("Standings"));
        }

        let updated = self
            .refresh(&groups, season.id, competition.id, stage_id)
            .await
            .map_err(|e| {
                tracing::error!("Standings recompute failed for season {}: {}", season.id, e);
                LeagueError::aggregation("Standings update failed", e)
            })?;

        tracing::info!(
            "Recomputed {} rows across {} {} group(s) for season {}",
            updated,
            groups.len(),
            competition.name,
            season.name
        );
        Ok(groups)
    }

    async fn refresh(
        &self,
        groups: &[Standings],
        season_id: i64,
        competition_id: i64,
        stage_id: Option<i64>,
    ) -> Result<usize, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let matches = db::ended_matches_in_scope(&mut *tx, season_id, competition_id, stage_id).await?;
        let goals = db::ended_goals_in_scope(&mut *tx, season_id, competition_id, stage_id).await?;

        let mut rows = Vec::new();
        for group in groups {
            for mut row in db::standings_teams(&mut *tx, group.id).await? {
                row.apply_record(tally(row.team_id, &matches, &goals));
                rows.push(row);
            }
        }

        for row in &rows {
            db::update_standings_team(&mut tx, row).await?;
        }
        tx.commit().await?;

        Ok(rows.len())
    }

    /// Nested representation with rows in table order.
    pub async fn view(&self, standings: Standings) -> Result<StandingsView, LeagueError> {
        let season = db::get_season(&self.pool, standings.season_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Season"))?;
        let competition = db::get_competition(&self.pool, standings.competition_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Competition"))?;

        let mut standings_teams = Vec::new();
        for row in db::standings_teams(&self.pool, standings.id).await? {
            let team = db::get_team(&self.pool, row.team_id)
                .await?
                .ok_or_else(|| LeagueError::not_found("Team"))?;
            standings_teams.push(StandingsTeamView::new(row, team));
        }
        standings_teams.sort_by(StandingsTeamView::table_order);

        Ok(StandingsView {
            id: standings.id,
            name: standings.name,
            season,
            competition,
            standings_teams,
        })
    }

    /// Recomputes and then presents the groups of one scope.
    pub async fn current(
        &self,
        season_id: i64,
        gender: Gender,
        kind: CompetitionKind,
    ) -> Result<Vec<StandingsView>, LeagueError> {
        let groups = self.recompute(season_id, gender, kind).await?;
        let mut views = Vec::with_capacity(groups.len());
        for standings in groups {
            views.push(self.view(standings).await?);
        }
        Ok(views)
    }

    pub async fn season_views(&self, season_id: i64) -> Result<Vec<StandingsView>, LeagueError> {
        db::get_season(&self.pool, season_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Season"))?;

        let groups = db::season_standings(&self.pool, season_id).await?;
        if groups.is_empty() {
            return Err(LeagueError::not_found("Standings"));
        }
        let mut views = Vec::with_capacity(groups.len());
        for standings in groups {
            views.push(self.view(standings).await?);
        }
        Ok(views)
    }

    /// League table of the most recent season, falling back to its cup groups.
    pub async fn latest(&self, gender: Gender) -> Result<Vec<StandingsView>, LeagueError> {
        let season = db::latest_season(&self.pool)
            .await?
            .ok_or_else(|| LeagueError::not_found("Season"))?;

        for kind in [CompetitionKind::League, CompetitionKind::Cup] {
            match self.current(season.id, gender, kind).await {
                Ok(views) => return Ok(views),
                Err(LeagueError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(LeagueError::not_found("Standings"))
    }

    pub async fn delete(&self, standings_id: i64) -> Result<(), LeagueError> {
        if !db::delete_standings(&self.pool, standings_id).await? {
            return Err(LeagueError::not_found("Standings"));
        }
        tracing::info!("Deleted standings {}", standings_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ledger_match(id: i64, home: i64, away: i64, score: (i64, i64)) -> Match {
        Match {
            id,
            home_team_id: home,
            away_team_id: away,
            match_day_id: 1,
            competition_id: 1,
            referee_id: 1,
            stage_id: None,
            match_time: chrono::NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            home_team_score: score.0,
            away_team_score: score.1,
            has_started: true,
            has_ended: true,
        }
    }

    fn goal(id: i64, match_id: i64, team: i64) -> GoalRecord {
        GoalRecord {
            goal_id: id,
            match_event_id: id,
            match_id,
            player_id: 1,
            minute: 10,
            scoring_team_id: team,
            assist_provider_id: None,
        }
    }

    #[test]
    fn tally_counts_goals_from_records_and_conceded_from_scores() {
        let matches = vec![ledger_match(1, 10, 20, (2, 0)), ledger_match(2, 20, 10, (1, 1))];
        let goals = vec![goal(1, 1, 10), goal(2, 1, 10), goal(3, 2, 20), goal(4, 2, 10), goal(5, 99, 10)];

        let a = tally(10, &matches, &goals);
        assert_eq!((a.matches_played, a.matches_won, a.matches_lost), (2, 1, 0));
        assert_eq!((a.goals_for, a.goals_against), (3, 1));
        assert_eq!((a.matches_drawn(), a.points(), a.goal_difference()), (1, 4, 2));

        let b = tally(20, &matches, &goals);
        assert_eq!((b.matches_played, b.matches_won, b.matches_lost), (2, 0, 1));
        assert_eq!((b.goals_for, b.goals_against), (1, 3));
        assert_eq!((b.points(), b.goal_difference()), (1, -2));

        assert_eq!(tally(30, &matches, &goals), TeamRecord::default());
    }

    #[test]
    fn group_draw_gives_the_first_group_the_odd_team() {
        let teams: Vec<Team> = (1..=5)
            .map(|id| Team {
                id,
                name: format!("Team {}", id),
                name_abbreviation: format!("T{}", id),
                logo_url: String::new(),
                color: String::new(),
                twitter_url: format!("https://twitter.com/t{}", id),
                is_active: true,
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let (a, b) = draw_groups(teams, &mut rng);
        assert_eq!((a.len(), b.len()), (3, 2));

        let mut ids: Vec<i64> = a.iter().chain(b.iter()).map(|t| t.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    struct League {
        pool: SqlitePool,
        season: Season,
        alpha: Team,
        bravo: Team,
    }

    /// Alpha beat Bravo 2-0, then drew 1-1 away; a third match is still running.
    async fn two_match_league() -> League {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let a1 = player(&pool, "Ama", "Owusu", Gender::Men, alpha.id).await;
        let b1 = player(&pool, "Kofi", "Boateng", Gender::Men, bravo.id).await;

        let season = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day1 = match_day(&pool, &season, 1).await;
        let day2 = match_day(&pool, &season, 2).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let referee = referee(&pool).await;

        let first = played_match(&pool, &alpha, &bravo, &day1, &league, &referee, None, (2, 0), true).await;
        goal_record(&pool, &first, &a1, &alpha, None, 12).await;
        goal_record(&pool, &first, &a1, &alpha, None, 70).await;

        let second = played_match(&pool, &bravo, &alpha, &day2, &league, &referee, None, (1, 1), true).await;
        goal_record(&pool, &second, &b1, &bravo, None, 30).await;
        goal_record(&pool, &second, &a1, &alpha, None, 88).await;

        let live = played_match(&pool, &alpha, &bravo, &day2, &league, &referee, None, (0, 3), false).await;
        goal_record(&pool, &live, &b1, &bravo, None, 5).await;

        League {
            pool,
            season,
            alpha,
            bravo,
        }
    }

    #[tokio::test]
    async fn recompute_matches_the_two_match_scenario() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());
        aggregator.create_league(l.season.id, Gender::Men).await.unwrap();

        let views = aggregator.current(l.season.id, Gender::Men, CompetitionKind::League).await.unwrap();
        assert_eq!(views.len(), 1);
        let table = &views[0].standings_teams;
        assert_eq!(table.len(), 2);

        let a = &table[0];
        assert_eq!(a.team.id, l.alpha.id);
        assert_eq!(
            (a.matches_played, a.matches_won, a.matches_drawn, a.matches_lost),
            (2, 1, 1, 0)
        );
        assert_eq!((a.goals_for, a.goals_against, a.points, a.goal_difference), (3, 1, 4, 2));

        let b = &table[1];
        assert_eq!(b.team.id, l.bravo.id);
        assert_eq!(
            (b.matches_played, b.matches_won, b.matches_drawn, b.matches_lost),
            (2, 0, 1, 1)
        );
        assert_eq!((b.goals_for, b.goals_against, b.points, b.goal_difference), (1, 3, 1, -2));
    }

    #[tokio::test]
    async fn recompute_is_idempotent_and_keeps_derived_columns_consistent() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());
        let created = aggregator.create_league(l.season.id, Gender::Men).await.unwrap();

        aggregator.recompute(l.season.id, Gender::Men, CompetitionKind::League).await.unwrap();
        let first = db::standings_teams(&l.pool, created.id).await.unwrap();
        aggregator.recompute(l.season.id, Gender::Men, CompetitionKind::League).await.unwrap();
        let second = db::standings_teams(&l.pool, created.id).await.unwrap();
        assert_eq!(first, second);

        for row in &second {
            assert_eq!(row.points, 3 * row.matches_won + row.matches_drawn);
            assert_eq!(row.matches_drawn, row.matches_played - row.matches_won - row.matches_lost);
            assert_eq!(row.goal_difference, row.goals_for - row.goals_against);
        }
    }

    #[tokio::test]
    async fn failed_recompute_keeps_the_previous_snapshot() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());
        let created = aggregator.create_league(l.season.id, Gender::Men).await.unwrap();
        let before = db::standings_teams(&l.pool, created.id).await.unwrap();

        // Alpha's row is written first, so the abort lands mid-loop.
        sqlx::query(&format!(
            "CREATE TRIGGER block_bravo BEFORE UPDATE ON standings_teams \
             WHEN OLD.team_id = {} BEGIN SELECT RAISE(ABORT, 'row locked'); END",
            l.bravo.id
        ))
        .execute(&l.pool)
        .await
        .unwrap();

        let err = aggregator
            .recompute(l.season.id, Gender::Men, CompetitionKind::League)
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            LeagueError::AggregationFailure { message, details }
                if message == "Standings update failed" && details.contains("row locked")
        ));

        let after = db::standings_teams(&l.pool, created.id).await.unwrap();
        assert_eq!(before, after);
        assert!(after.iter().all(|row| row.matches_played == 0));
    }

    #[tokio::test]
    async fn league_membership_follows_roster_gender_and_is_created_once() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());

        let err = aggregator.create_league(l.season.id, Gender::Women).await.unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));

        aggregator.create_league(l.season.id, Gender::Men).await.unwrap();
        let again = aggregator.create_league(l.season.id, Gender::Men).await.unwrap_err();
        assert!(matches!(again, LeagueError::Validation(_)));
    }

    #[tokio::test]
    async fn recompute_without_groups_is_not_found() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());

        let err = aggregator
            .recompute(l.season.id, Gender::Men, CompetitionKind::League)
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::NotFound(msg) if msg == "Standings not found"));

        let err = aggregator.recompute(999, Gender::Men, CompetitionKind::League).await.unwrap_err();
        assert!(matches!(err, LeagueError::NotFound(msg) if msg == "Season not found"));
    }

    #[tokio::test]
    async fn cup_groups_only_count_group_stage_matches() {
        let l = two_match_league().await;
        let charlie = team(&l.pool, "Charlie").await;
        player(&l.pool, "Yaw", "Asante", Gender::Men, charlie.id).await;

        let aggregator = StandingsAggregator::new(l.pool.clone());
        let mut rng = StdRng::seed_from_u64(42);
        let groups = aggregator
            .create_cup_groups(l.season.id, Gender::Men, &mut rng)
            .await
            .unwrap();
        assert_eq!(groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(groups[0].standings_teams.len(), 2);
        assert_eq!(groups[1].standings_teams.len(), 1);

        let cup = competition(&l.pool, CompetitionKind::Cup, Gender::Men).await;
        let group_stage = db::find_stage(&l.pool, GROUP_STAGE).await.unwrap().unwrap();
        let finals = db::find_stage(&l.pool, "Finals").await.unwrap().unwrap();
        let day = match_day(&l.pool, &l.season, 3).await;
        let referee = referee(&l.pool).await;
        played_match(&l.pool, &l.alpha, &charlie, &day, &cup, &referee, Some(group_stage.id), (0, 0), true).await;
        played_match(&l.pool, &l.alpha, &charlie, &day, &cup, &referee, Some(finals.id), (5, 0), true).await;

        let views = aggregator.current(l.season.id, Gender::Men, CompetitionKind::Cup).await.unwrap();
        let alpha_row = views
            .iter()
            .flat_map(|g| g.standings_teams.iter())
            .find(|row| row.team.id == l.alpha.id)
            .unwrap();
        assert_eq!((alpha_row.matches_played, alpha_row.matches_drawn, alpha_row.points), (1, 1, 1));

        let err = aggregator
            .create_cup_groups(l.season.id, Gender::Men, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
    }

    #[tokio::test]
    async fn latest_falls_back_to_cup_groups_and_delete_removes_them() {
        let l = two_match_league().await;
        let aggregator = StandingsAggregator::new(l.pool.clone());
        let mut rng = StdRng::seed_from_u64(1);
        let groups = aggregator
            .create_cup_groups(l.season.id, Gender::Men, &mut rng)
            .await
            .unwrap();

        let latest = aggregator.latest(Gender::Men).await.unwrap();
        assert_eq!(latest.len(), 2);

        for group in &groups {
            aggregator.delete(group.id).await.unwrap();
        }
        assert!(matches!(aggregator.delete(groups[0].id).await, Err(LeagueError::NotFound(_))));
        assert!(matches!(aggregator.latest(Gender::Men).await, Err(LeagueError::NotFound(_))));
    }
}
