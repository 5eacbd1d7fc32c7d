use sqlx::SqlitePool;

use crate::db;
use crate::models::{
    Match, MatchDay, MatchDayUpdate, MatchDayView, MatchUpdate, MatchView, NewMatch, NewMatchDay, NewReferee,
    NewSeason, Referee, Season, SeasonUpdate,
};
use crate::services::LeagueError;

// --- seasons ---

fn check_season(season: &Season) -> Result<(), LeagueError> {
    if season.start_date > season.end_date {
        return Err(LeagueError::validation("Season start date must be on or before its end date"));
    }
    Ok(())
}

pub async fn find_season(pool: &SqlitePool, season_id: i64) -> Result<Season, LeagueError> {
    db::get_season(pool, season_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Season"))
}

pub async fn create_season(pool: &SqlitePool, new_season: NewSeason) -> Result<Season, LeagueError> {
    check_season(&Season {
        id: 0,
        name: new_season.name.clone(),
        start_date: new_season.start_date,
        end_date: new_season.end_date,
    })?;
    let id = db::insert_season(pool, &new_season).await?;
    tracing::info!("Created season {} ({})", new_season.name, id);
    find_season(pool, id).await
}

pub async fn update_season(pool: &SqlitePool, season_id: i64, changes: SeasonUpdate) -> Result<Season, LeagueError> {
    let mut season = find_season(pool, season_id).await?;
    changes.apply(&mut season);
    check_season(&season)?;
    db::update_season(pool, &season).await?;
    Ok(season)
}

pub async fn create_referee(pool: &SqlitePool, referee: NewReferee) -> Result<Referee, LeagueError> {
    let id = db::insert_referee(pool, &referee).await?;
    db::get_referee(pool, id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Referee"))
}

// --- match days ---

async fn check_match_day(pool: &SqlitePool, match_day: &MatchDay) -> Result<(), LeagueError> {
    if let Some(season_id) = match_day.season_id {
        let season = find_season(pool, season_id).await?;
        if !season.contains(match_day.date) {
            return Err(LeagueError::validation(format!(
                "Match day date {} is outside season {} ({} to {})",
                match_day.date, season.name, season.start_date, season.end_date
            )));
        }
    }
    Ok(())
}

pub async fn find_match_day(pool: &SqlitePool, match_day_id: i64) -> Result<MatchDay, LeagueError> {
    db::get_match_day(pool, match_day_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match day"))
}

pub async fn match_day_view(pool: &SqlitePool, match_day: MatchDay) -> Result<MatchDayView, LeagueError> {
    let season = match match_day.season_id {
        Some(id) => db::get_season(pool, id).await?,
        None => None,
    };
    Ok(MatchDayView {
        id: match_day.id,
        number: match_day.number,
        date: match_day.date,
        season,
    })
}

pub async fn create_match_day(pool: &SqlitePool, new_match_day: NewMatchDay) -> Result<MatchDayView, LeagueError> {
    check_match_day(
        pool,
        &MatchDay {
            id: 0,
            number: new_match_day.number,
            date: new_match_day.date,
            season_id: new_match_day.season_id,
        },
    )
    .await?;
    let id = db::insert_match_day(pool, &new_match_day).await?;
    match_day_view(pool, find_match_day(pool, id).await?).await
}

pub async fn update_match_day(
    pool: &SqlitePool,
    match_day_id: i64,
    changes: MatchDayUpdate,
) -> Result<MatchDayView, LeagueError> {
    let mut match_day = find_match_day(pool, match_day_id).await?;
    changes.apply(&mut match_day);
    check_match_day(pool, &match_day).await?;
    db::update_match_day(pool, &match_day).await?;
    match_day_view(pool, match_day).await
}

pub async fn match_day_views(pool: &SqlitePool, match_days: Vec<MatchDay>) -> Result<Vec<MatchDayView>, LeagueError> {
    let mut views = Vec::with_capacity(match_days.len());
    for match_day in match_days {
        views.push(match_day_view(pool, match_day).await?);
    }
    Ok(views)
}

// --- matches ---

/// Cross-field rules for a match row, checked on create and after every update.
async fn check_match(pool: &SqlitePool, m: &Match) -> Result<(), LeagueError> {
    if m.home_team_id == m.away_team_id {
        return Err(LeagueError::validation("Home team and away team must be different"));
    }
    if m.has_ended && !m.has_started {
        return Err(LeagueError::validation("A match cannot end before it has started"));
    }
    if m.home_team_score < 0 || m.away_team_score < 0 {
        return Err(LeagueError::validation("Scores cannot be negative"));
    }

    for (team_id, side) in [(m.home_team_id, "Home team"), (m.away_team_id, "Away team")] {
        if db::get_team(pool, team_id).await?.is_none() {
            return Err(LeagueError::validation(format!("{} does not exist", side)));
        }
    }
    if db::get_match_day(pool, m.match_day_id).await?.is_none() {
        return Err(LeagueError::validation("Match day does not exist"));
    }
    if db::get_competition(pool, m.competition_id).await?.is_none() {
        return Err(LeagueError::validation("Competition does not exist"));
    }
    if db::get_referee(pool, m.referee_id).await?.is_none() {
        return Err(LeagueError::validation("Referee does not exist"));
    }
    if let Some(stage_id) = m.stage_id {
        if db::get_stage(pool, stage_id).await?.is_none() {
            return Err(LeagueError::validation("Stage does not exist"));
        }
    }
    Ok(())
}

pub async fn find_match(pool: &SqlitePool, match_id: i64) -> Result<Match, LeagueError> {
    db::get_match(pool, match_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match"))
}

pub async fn match_view(pool: &SqlitePool, m: Match) -> Result<MatchView, LeagueError> {
    let missing = |entity: &str| LeagueError::not_found(entity);

    let home_team = db::get_team(pool, m.home_team_id).await?.ok_or_else(|| missing("Team"))?;
    let away_team = db::get_team(pool, m.away_team_id).await?.ok_or_else(|| missing("Team"))?;
    let match_day = find_match_day(pool, m.match_day_id).await?;
    let competition = db::get_competition(pool, m.competition_id)
        .await?
        .ok_or_else(|| missing("Competition"))?;
    let referee = db::get_referee(pool, m.referee_id).await?.ok_or_else(|| missing("Referee"))?;
    let stage = match m.stage_id {
        Some(id) => db::get_stage(pool, id).await?,
        None => None,
    };

    Ok(MatchView {
        id: m.id,
        home_team,
        away_team,
        match_day: match_day_view(pool, match_day).await?,
        competition,
        referee,
        stage,
        match_time: m.match_time,
        home_team_score: m.home_team_score,
        away_team_score: m.away_team_score,
        has_started: m.has_started,
        has_ended: m.has_ended,
    })
}

pub async fn match_views(pool: &SqlitePool, matches: Vec<Match>) -> Result<Vec<MatchView>, LeagueError> {
    let mut views = Vec::with_capacity(matches.len());
    for m in matches {
        views.push(match_view(pool, m).await?);
    }
    Ok(views)
}

pub async fn create_match(pool: &SqlitePool, new_match: NewMatch) -> Result<MatchView, LeagueError> {
    let candidate = Match {
        id: 0,
        home_team_id: new_match.home_team_id,
        away_team_id: new_match.away_team_id,
        match_day_id: new_match.match_day_id,
        competition_id: new_match.competition_id,
        referee_id: new_match.referee_id,
        stage_id: new_match.stage_id,
        match_time: new_match.match_time,
        home_team_score: 0,
        away_team_score: 0,
        has_started: false,
        has_ended: false,
    };
    if let Err(e) = check_match(pool, &candidate).await {
        tracing::warn!("Rejected match: {}", e);
        return Err(e);
    }

    let id = db::insert_match(pool, &new_match).await?;
    tracing::info!("Scheduled match {} ({} vs {})", id, new_match.home_team_id, new_match.away_team_id);
    match_view(pool, find_match(pool, id).await?).await
}

pub async fn update_match(pool: &SqlitePool, match_id: i64, changes: MatchUpdate) -> Result<MatchView, LeagueError> {
    let mut m = find_match(pool, match_id).await?;
    changes.apply(&mut m);
    check_match(pool, &m).await?;
    db::update_match(pool, &m).await?;
    tracing::info!(
        "Updated match {}: {}-{} (started={}, ended={})",
        m.id,
        m.home_team_score,
        m.away_team_score,
        m.has_started,
        m.has_ended
    );
    match_view(pool, m).await
}

/// Unplayed matches of a season, earliest first.
pub async fn season_fixtures(pool: &SqlitePool, season_id: i64) -> Result<Vec<MatchView>, LeagueError> {
    find_season(pool, season_id).await?;
    let matches = db::season_matches(pool, season_id, false).await?;
    match_views(pool, matches).await
}

/// Finished matches of a season, most recent first.
pub async fn season_results(pool: &SqlitePool, season_id: i64) -> Result<Vec<MatchView>, LeagueError> {
    find_season(pool, season_id).await?;
    let matches = db::season_matches(pool, season_id, true).await?;
    match_views(pool, matches).await
}

pub async fn latest_results(pool: &SqlitePool) -> Result<Vec<MatchView>, LeagueError> {
    let season = db::latest_season(pool)
        .await?
        .ok_or_else(|| LeagueError::not_found("Season"))?;
    season_results(pool, season.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;
    use crate::models::{CompetitionKind, Gender};
    use chrono::NaiveTime;

    #[tokio::test]
    async fn season_dates_must_be_ordered() {
        let pool = test_pool().await;
        let err = create_season(
            &pool,
            NewSeason {
                name: "Backwards".to_string(),
                start_date: date(2025, 5, 1),
                end_date: date(2024, 9, 1),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
    }

    #[tokio::test]
    async fn match_day_must_fall_inside_its_season() {
        let pool = test_pool().await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;

        let err = create_match_day(
            &pool,
            NewMatchDay {
                number: 1,
                date: date(2025, 6, 1),
                season_id: Some(s.id),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));

        let view = create_match_day(
            &pool,
            NewMatchDay {
                number: 1,
                date: date(2025, 5, 31),
                season_id: Some(s.id),
            },
        )
        .await
        .unwrap();
        assert_eq!(view.season.map(|s| s.name), Some("2024/25".to_string()));
    }

    #[tokio::test]
    async fn match_rules_are_enforced_on_create_and_update() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day = match_day(&pool, &s, 1).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let referee = referee(&pool).await;

        let new_match = |home: i64, away: i64| NewMatch {
            home_team_id: home,
            away_team_id: away,
            match_day_id: day.id,
            competition_id: league.id,
            referee_id: referee.id,
            stage_id: None,
            match_time: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
        };

        assert!(matches!(
            create_match(&pool, new_match(alpha.id, alpha.id)).await,
            Err(LeagueError::Validation(_))
        ));
        assert!(matches!(
            create_match(&pool, new_match(alpha.id, 999)).await,
            Err(LeagueError::Validation(_))
        ));

        let view = create_match(&pool, new_match(alpha.id, bravo.id)).await.unwrap();
        assert_eq!(view.home_team.name, "Alpha");
        assert_eq!((view.home_team_score, view.has_started), (0, false));
        assert!(view.stage.is_none());

        let err = update_match(
            &pool,
            view.id,
            MatchUpdate {
                has_ended: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
    }

    #[tokio::test]
    async fn fixtures_and_results_split_on_has_ended() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day1 = match_day(&pool, &s, 1).await;
        let day2 = match_day(&pool, &s, 2).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let referee = referee(&pool).await;

        let done = played_match(&pool, &alpha, &bravo, &day1, &league, &referee, None, (1, 0), true).await;
        let live = played_match(&pool, &bravo, &alpha, &day2, &league, &referee, None, (3, 3), false).await;

        let results = season_results(&pool, s.id).await.unwrap();
        assert_eq!(results.iter().map(|m| m.id).collect::<Vec<_>>(), vec![done.id]);
        let fixtures = season_fixtures(&pool, s.id).await.unwrap();
        assert_eq!(fixtures.iter().map(|m| m.id).collect::<Vec<_>>(), vec![live.id]);

        assert_eq!(latest_results(&pool).await.unwrap().len(), 1);
        assert!(matches!(season_results(&pool, 404).await, Err(LeagueError::NotFound(_))));
    }
}
