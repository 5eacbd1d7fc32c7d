use chrono::Utc;
use sqlx::SqlitePool;

use crate::db;
use crate::models::{
    Coach, Gender, NewCoach, NewPlayer, NewPlayerPosition, NewTeam, NewTransfer, Player, PlayerPosition, PlayerUpdate,
    PlayerView, Team, TeamStats, TeamUpdate, TransferView, Transfer,
};
use crate::services::{tally, LeagueError};
use crate::utils::{
    age_on, is_valid_major, is_valid_year_group, points_percentage, results_to_form, validate_abbreviation,
    validate_team_name,
};

pub async fn find_team(pool: &SqlitePool, team_id: i64) -> Result<Team, LeagueError> {
    db::get_team(pool, team_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Team"))
}

fn check_team(team: &Team) -> Result<(), LeagueError> {
    if !validate_team_name(&team.name) {
        return Err(LeagueError::validation("Team name must be between 1 and 50 characters"));
    }
    if !validate_abbreviation(&team.name_abbreviation) {
        return Err(LeagueError::validation("Team abbreviation must be between 1 and 5 characters"));
    }
    Ok(())
}

pub async fn create_team(pool: &SqlitePool, new_team: NewTeam) -> Result<Team, LeagueError> {
    check_team(&Team {
        id: 0,
        name: new_team.name.clone(),
        name_abbreviation: new_team.name_abbreviation.clone(),
        logo_url: new_team.logo_url.clone(),
        color: new_team.color.clone(),
        twitter_url: new_team.twitter_url.clone(),
        is_active: new_team.is_active,
    })?;
    let id = db::insert_team(pool, &new_team).await?;
    tracing::info!("Created team {} ({})", new_team.name, id);
    find_team(pool, id).await
}

pub async fn update_team(pool: &SqlitePool, team_id: i64, changes: TeamUpdate) -> Result<Team, LeagueError> {
    let mut team = find_team(pool, team_id).await?;
    changes.apply(&mut team);
    check_team(&team)?;
    db::update_team(pool, &team).await?;
    Ok(team)
}

/// Roster of one team for one gender. An empty roster is reported as not found.
pub async fn team_roster(pool: &SqlitePool, team_id: i64, gender: Gender) -> Result<Vec<PlayerView>, LeagueError> {
    find_team(pool, team_id).await?;
    let players = db::team_players(pool, team_id, gender).await?;
    if players.is_empty() {
        return Err(LeagueError::NotFound(format!(
            "No {} players found for this team",
            gender.possessive().to_lowercase()
        )));
    }
    let mut views = Vec::with_capacity(players.len());
    for player in players {
        views.push(player_view(pool, player).await?);
    }
    Ok(views)
}

/// All-time record, using the same tally as the standings tables.
pub async fn team_stats(pool: &SqlitePool, team_id: i64) -> Result<TeamStats, LeagueError> {
    let team = find_team(pool, team_id).await?;
    let matches = db::ended_matches_for_team(pool, team.id).await?;
    let goals = db::ended_goals_for_team(pool, team.id).await?;
    let record = tally(team.id, &matches, &goals);

    let mut results = Vec::with_capacity(matches.len());
    for m in &matches {
        let Some((scored, conceded)) = m.score_for(team.id) else {
            continue;
        };
        let date = db::get_match_day(pool, m.match_day_id)
            .await?
            .ok_or_else(|| LeagueError::not_found("Match day"))?
            .date;
        let outcome = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => 'W',
            std::cmp::Ordering::Less => 'L',
            std::cmp::Ordering::Equal => 'D',
        };
        results.push((outcome, date, m.id));
    }

    Ok(TeamStats {
        team,
        matches_played: record.matches_played,
        matches_won: record.matches_won,
        matches_drawn: record.matches_drawn(),
        matches_lost: record.matches_lost,
        goals_for: record.goals_for,
        goals_against: record.goals_against,
        goal_difference: record.goal_difference(),
        points: record.points(),
        points_percentage: points_percentage(record.matches_won, record.matches_drawn(), record.matches_played),
        form: results_to_form(&results),
    })
}

// --- players ---

fn check_player(year_group: &str, major: &str) -> Result<(), LeagueError> {
    if !is_valid_year_group(year_group) {
        return Err(LeagueError::validation("Year group must be a four digit year"));
    }
    if !is_valid_major(major) {
        return Err(LeagueError::validation(format!("Unknown major '{}'", major)));
    }
    Ok(())
}

pub async fn find_player(pool: &SqlitePool, player_id: i64) -> Result<Player, LeagueError> {
    db::get_player(pool, player_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Player"))
}

pub async fn player_view(pool: &SqlitePool, player: Player) -> Result<PlayerView, LeagueError> {
    let team = match player.team_id {
        Some(id) => db::get_team(pool, id).await?,
        None => None,
    };
    let position = match player.position_id {
        Some(id) => db::get_position(pool, id).await?,
        None => None,
    };
    let no_of_goals_in_history = db::goals_in_history(pool, player.id).await?;

    Ok(PlayerView {
        id: player.id,
        age: age_on(player.birth_date, Utc::now().date_naive()),
        first_name: player.first_name,
        last_name: player.last_name,
        gender: player.gender,
        birth_date: player.birth_date,
        year_group: player.year_group,
        major: player.major,
        is_active: player.is_active,
        image: player.image,
        team,
        position,
        no_of_goals_in_history,
    })
}

pub async fn create_player(pool: &SqlitePool, new_player: NewPlayer) -> Result<PlayerView, LeagueError> {
    check_player(&new_player.year_group, &new_player.major)?;
    let id = db::insert_player(pool, &new_player).await?;
    tracing::info!("Registered player {} {} ({})", new_player.first_name, new_player.last_name, id);
    player_view(pool, find_player(pool, id).await?).await
}

pub async fn update_player(pool: &SqlitePool, player_id: i64, changes: PlayerUpdate) -> Result<PlayerView, LeagueError> {
    let mut player = find_player(pool, player_id).await?;
    changes.apply(&mut player);
    check_player(&player.year_group, &player.major)?;
    db::update_player(pool, &player).await?;
    player_view(pool, player).await
}

pub async fn list_players(pool: &SqlitePool) -> Result<Vec<PlayerView>, LeagueError> {
    let players = db::list_players(pool).await?;
    let mut views = Vec::with_capacity(players.len());
    for player in players {
        views.push(player_view(pool, player).await?);
    }
    Ok(views)
}

pub async fn create_position(pool: &SqlitePool, position: NewPlayerPosition) -> Result<PlayerPosition, LeagueError> {
    let id = db::insert_position(pool, &position).await?;
    db::get_position(pool, id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Position"))
}

pub async fn create_coach(pool: &SqlitePool, coach: NewCoach) -> Result<Coach, LeagueError> {
    if let Some(team_id) = coach.team_id {
        find_team(pool, team_id).await?;
    }
    let id = db::insert_coach(pool, &coach).await?;
    db::get_coach(pool, id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Coach"))
}

// --- transfers ---

pub async fn transfer_view(pool: &SqlitePool, transfer: Transfer) -> Result<TransferView, LeagueError> {
    let player = player_view(pool, find_player(pool, transfer.player_id).await?).await?;
    let from_team = match transfer.from_team_id {
        Some(id) => db::get_team(pool, id).await?,
        None => None,
    };
    let to_team = find_team(pool, transfer.to_team_id).await?;
    Ok(TransferView {
        id: transfer.id,
        date: transfer.date,
        player,
        from_team,
        to_team,
    })
}

/// Moves a player to a new team and records where they came from.
pub async fn create_transfer(pool: &SqlitePool, request: NewTransfer) -> Result<TransferView, LeagueError> {
    let player = find_player(pool, request.player_id).await?;
    let to_team = find_team(pool, request.to_team_id).await?;
    if player.team_id == Some(to_team.id) {
        return Err(LeagueError::validation(format!(
            "{} already plays for {}",
            player.full_name(),
            to_team.name
        )));
    }

    let mut tx = pool.begin().await?;
    let transfer_id = db::insert_transfer(
        &mut tx,
        player.id,
        player.team_id,
        to_team.id,
        Utc::now().date_naive(),
    )
    .await?;
    db::set_player_team(&mut tx, player.id, to_team.id).await?;
    tx.commit().await?;

    tracing::info!("Transferred {} to {}", player.full_name(), to_team.name);

    let transfer = db::get_transfer(pool, transfer_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Transfer"))?;
    transfer_view(pool, transfer).await
}

pub async fn list_transfers(pool: &SqlitePool) -> Result<Vec<TransferView>, LeagueError> {
    let transfers = db::list_transfers(pool).await?;
    let mut views = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        views.push(transfer_view(pool, transfer).await?);
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;
    use crate::models::CompetitionKind;

    #[tokio::test]
    async fn transfer_moves_player_and_rejects_same_team() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let p = player(&pool, "Ama", "Owusu", Gender::Men, alpha.id).await;

        let view = create_transfer(
            &pool,
            NewTransfer {
                player_id: p.id,
                to_team_id: bravo.id,
            },
        )
        .await
        .unwrap();
        assert_eq!(view.from_team.map(|t| t.id), Some(alpha.id));
        assert_eq!(view.to_team.id, bravo.id);
        assert_eq!(find_player(&pool, p.id).await.unwrap().team_id, Some(bravo.id));

        let err = create_transfer(
            &pool,
            NewTransfer {
                player_id: p.id,
                to_team_id: bravo.id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
        assert_eq!(list_transfers(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn player_fields_are_validated() {
        let pool = test_pool().await;
        let mut new_player = NewPlayer {
            first_name: "Efua".to_string(),
            last_name: "Sarpong".to_string(),
            gender: Gender::Women,
            birth_date: date(2003, 2, 1),
            year_group: "25".to_string(),
            major: "CS".to_string(),
            is_active: true,
            team_id: None,
            position_id: None,
            image: None,
        };
        assert!(matches!(
            create_player(&pool, new_player.clone()).await,
            Err(LeagueError::Validation(_))
        ));

        new_player.year_group = "2025".to_string();
        new_player.major = "Law".to_string();
        assert!(matches!(
            create_player(&pool, new_player.clone()).await,
            Err(LeagueError::Validation(_))
        ));

        new_player.major = "MIS".to_string();
        let view = create_player(&pool, new_player).await.unwrap();
        assert_eq!(view.no_of_goals_in_history, 0);
        assert!(view.team.is_none());
    }

    #[tokio::test]
    async fn team_stats_cover_every_finished_match() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let scorer = player(&pool, "Ama", "Owusu", Gender::Men, alpha.id).await;
        let season = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day1 = match_day(&pool, &season, 1).await;
        let day2 = match_day(&pool, &season, 2).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let cup = competition(&pool, CompetitionKind::Cup, Gender::Men).await;
        let referee = referee(&pool).await;

        let won = played_match(&pool, &alpha, &bravo, &day1, &league, &referee, None, (1, 0), true).await;
        goal_record(&pool, &won, &scorer, &alpha, None, 9).await;
        played_match(&pool, &bravo, &alpha, &day2, &cup, &referee, None, (2, 0), true).await;
        played_match(&pool, &bravo, &alpha, &day2, &league, &referee, None, (4, 0), false).await;

        let stats = team_stats(&pool, alpha.id).await.unwrap();
        assert_eq!((stats.matches_played, stats.matches_won, stats.matches_lost), (2, 1, 1));
        assert_eq!((stats.goals_for, stats.goals_against, stats.points), (1, 2, 3));
        assert_eq!(stats.form, "LW");
        assert!(matches!(team_stats(&pool, 999).await, Err(LeagueError::NotFound(_))));
    }

    #[tokio::test]
    async fn form_breaks_same_day_ties_by_latest_match() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let season = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day = match_day(&pool, &season, 1).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let cup = competition(&pool, CompetitionKind::Cup, Gender::Men).await;
        let referee = referee(&pool).await;

        played_match(&pool, &alpha, &bravo, &day, &league, &referee, None, (0, 1), true).await;
        played_match(&pool, &alpha, &bravo, &day, &cup, &referee, None, (1, 1), true).await;
        played_match(&pool, &bravo, &alpha, &day, &league, &referee, None, (0, 2), true).await;

        for _ in 0..3 {
            assert_eq!(team_stats(&pool, alpha.id).await.unwrap().form, "WDL");
        }
    }
}
