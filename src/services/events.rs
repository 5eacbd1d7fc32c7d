use sqlx::SqlitePool;

use crate::db::{self, GoalRecord};
use crate::models::{
    CardType, EventType, GoalDetail, GoalView, Match, MatchEvent, MatchEventView, NewCard, NewGoal, NewSubstitution,
    Player, SubstitutionDetail,
};
use crate::services::fixtures::find_match;
use crate::services::roster::{find_player, find_team};
use crate::services::LeagueError;

fn required(value: Option<i64>, entity: &str) -> Result<i64, LeagueError> {
    value.ok_or_else(|| LeagueError::missing_id(entity))
}

fn check_minute(minute: Option<i64>) -> Result<i64, LeagueError> {
    let minute = minute.ok_or_else(|| LeagueError::MissingParameter("Minute is required".to_string()))?;
    if !(0..=150).contains(&minute) {
        return Err(LeagueError::validation("Minute must be between 0 and 150"));
    }
    Ok(minute)
}

/// Match must be in progress: started and not yet ended.
async fn live_match(pool: &SqlitePool, match_id: i64) -> Result<Match, LeagueError> {
    let m = find_match(pool, match_id).await?;
    if !m.has_started {
        return Err(LeagueError::validation("Match has not started"));
    }
    if m.has_ended {
        return Err(LeagueError::validation("Match has already ended"));
    }
    Ok(m)
}

/// Player must be on the home or away roster and share the competition's gender.
async fn match_player(pool: &SqlitePool, m: &Match, player_id: i64) -> Result<Player, LeagueError> {
    let player = find_player(pool, player_id).await?;
    let on_roster = player.team_id.is_some_and(|team_id| m.involves(team_id));
    if !on_roster {
        return Err(LeagueError::validation(format!(
            "{} does not play for either team in this match",
            player.full_name()
        )));
    }

    let competition = db::get_competition(pool, m.competition_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Competition"))?;
    if player.gender != competition.gender {
        return Err(LeagueError::validation(format!(
            "{} cannot feature in a {} competition",
            player.full_name(),
            competition.gender.possessive().to_lowercase()
        )));
    }
    Ok(player)
}

/// Records a goal: the event, its Goal row and the score change are written together.
pub async fn record_goal(pool: &SqlitePool, request: NewGoal) -> Result<MatchEventView, LeagueError> {
    if request.player_id.is_some() && request.assist_provider_id == request.player_id {
        tracing::warn!("Rejected goal: assist provider is the scorer");
        return Err(LeagueError::validation("A player cannot assist their own goal"));
    }

    let match_id = required(request.match_id, "Match")?;
    let player_id = required(request.player_id, "Player")?;
    let scoring_team_id = required(request.scoring_team_id, "Scoring team")?;
    let minute = check_minute(request.minute)?;

    let m = live_match(pool, match_id).await?;
    let scorer = match_player(pool, &m, player_id).await?;
    if let Some(assist_id) = request.assist_provider_id {
        match_player(pool, &m, assist_id).await?;
    }
    if !m.involves(scoring_team_id) {
        return Err(LeagueError::validation("Scoring team is not playing in this match"));
    }

    let mut tx = pool.begin().await?;
    let event_id = db::insert_match_event(&mut *tx, m.id, EventType::Goal, scorer.id, minute).await?;
    db::insert_goal(&mut *tx, event_id, scoring_team_id, request.assist_provider_id).await?;
    db::increment_score(&mut tx, m.id, scoring_team_id == m.home_team_id).await?;
    tx.commit().await?;

    tracing::info!("Goal by {} in match {} ({}')", scorer.full_name(), m.id, minute);
    event_view_by_id(pool, event_id).await
}

pub async fn record_card(pool: &SqlitePool, card: CardType, request: NewCard) -> Result<MatchEventView, LeagueError> {
    let match_id = required(request.match_id, "Match")?;
    let player_id = required(request.player_id, "Player")?;
    let minute = check_minute(request.minute)?;

    let m = live_match(pool, match_id).await?;
    let player = match_player(pool, &m, player_id).await?;

    let event_type = EventType::from(card);
    let event_id = db::insert_match_event(pool, m.id, event_type, player.id, minute).await?;
    tracing::info!("{} for {} in match {} ({}')", event_type.label(), player.full_name(), m.id, minute);
    event_view_by_id(pool, event_id).await
}

pub async fn record_substitution(pool: &SqlitePool, request: NewSubstitution) -> Result<MatchEventView, LeagueError> {
    let match_id = required(request.match_id, "Match")?;
    let out_id = required(request.player_out_id, "Player out")?;
    let in_id = required(request.player_in_id, "Player in")?;
    let minute = check_minute(request.minute)?;
    if out_id == in_id {
        return Err(LeagueError::validation("A player cannot be substituted for themselves"));
    }

    let m = live_match(pool, match_id).await?;
    let player_out = match_player(pool, &m, out_id).await?;
    let player_in = match_player(pool, &m, in_id).await?;
    if player_out.team_id != player_in.team_id {
        return Err(LeagueError::validation("Substituted players must belong to the same team"));
    }

    let mut tx = pool.begin().await?;
    let event_id = db::insert_match_event(&mut *tx, m.id, EventType::Substitution, player_out.id, minute).await?;
    db::insert_substitution(&mut *tx, event_id, player_out.id, player_in.id).await?;
    tx.commit().await?;

    tracing::info!(
        "Substitution in match {}: {} off, {} on ({}')",
        m.id,
        player_out.full_name(),
        player_in.full_name(),
        minute
    );
    event_view_by_id(pool, event_id).await
}

async fn event_view_by_id(pool: &SqlitePool, event_id: i64) -> Result<MatchEventView, LeagueError> {
    let event = db::get_match_event(pool, event_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Match event"))?;
    event_view(pool, event).await
}

pub async fn event_view(pool: &SqlitePool, event: MatchEvent) -> Result<MatchEventView, LeagueError> {
    let player = find_player(pool, event.player_id).await?;

    let goal = match event.event_type {
        EventType::Goal => match db::goal_for_event(pool, event.id).await? {
            Some(goal) => Some(GoalDetail {
                scoring_team: find_team(pool, goal.scoring_team_id).await?,
                assist_provider: match goal.assist_provider_id {
                    Some(id) => db::get_player(pool, id).await?,
                    None => None,
                },
            }),
            None => None,
        },
        _ => None,
    };

    let substitution = match event.event_type {
        EventType::Substitution => match db::substitution_for_event(pool, event.id).await? {
            Some(sub) => Some(SubstitutionDetail {
                player_out: find_player(pool, sub.player_out_id).await?,
                player_in: find_player(pool, sub.player_in_id).await?,
            }),
            None => None,
        },
        _ => None,
    };

    Ok(MatchEventView {
        id: event.id,
        match_id: event.match_id,
        event_type: event.event_type,
        minute: event.minute,
        player,
        goal,
        substitution,
    })
}

/// Events of a match, optionally only those involving one team's players.
pub async fn match_event_views(
    pool: &SqlitePool,
    match_id: i64,
    team_id: Option<i64>,
) -> Result<Vec<MatchEventView>, LeagueError> {
    find_match(pool, match_id).await?;
    if let Some(team_id) = team_id {
        find_team(pool, team_id).await?;
    }

    let mut views = Vec::new();
    for event in db::match_events(pool, match_id).await? {
        let view = event_view(pool, event).await?;
        let belongs = match team_id {
            None => true,
            Some(team_id) => match &view.goal {
                Some(goal) => goal.scoring_team.id == team_id,
                None => view.player.team_id == Some(team_id),
            },
        };
        if belongs {
            views.push(view);
        }
    }
    Ok(views)
}

async fn goal_view(pool: &SqlitePool, goal: GoalRecord) -> Result<GoalView, LeagueError> {
    Ok(GoalView {
        id: goal.goal_id,
        match_id: goal.match_id,
        minute: goal.minute,
        scorer: find_player(pool, goal.player_id).await?,
        scoring_team: find_team(pool, goal.scoring_team_id).await?,
        assist_provider: match goal.assist_provider_id {
            Some(id) => db::get_player(pool, id).await?,
            None => None,
        },
    })
}

pub async fn match_goal_views(
    pool: &SqlitePool,
    match_id: i64,
    team_id: Option<i64>,
) -> Result<Vec<GoalView>, LeagueError> {
    find_match(pool, match_id).await?;
    let mut views = Vec::new();
    for goal in db::match_goals(pool, match_id, team_id).await? {
        views.push(goal_view(pool, goal).await?);
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;
    use crate::models::{CompetitionKind, Gender, Team};

    struct LiveMatch {
        pool: SqlitePool,
        m: Match,
        alpha: Team,
        bravo: Team,
        striker: Player,
        winger: Player,
        keeper: Player,
    }

    async fn live() -> LiveMatch {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        let bravo = team(&pool, "Bravo").await;
        let striker = player(&pool, "Ama", "Owusu", Gender::Men, alpha.id).await;
        let winger = player(&pool, "Kwesi", "Appiah", Gender::Men, alpha.id).await;
        let keeper = player(&pool, "Kofi", "Boateng", Gender::Men, bravo.id).await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let day = match_day(&pool, &s, 1).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let referee = referee(&pool).await;
        let m = played_match(&pool, &alpha, &bravo, &day, &league, &referee, None, (0, 0), false).await;
        LiveMatch {
            pool,
            m,
            alpha,
            bravo,
            striker,
            winger,
            keeper,
        }
    }

    fn goal(l: &LiveMatch, player: &Player, team: &Team, assist: Option<&Player>) -> NewGoal {
        NewGoal {
            match_id: Some(l.m.id),
            player_id: Some(player.id),
            scoring_team_id: Some(team.id),
            assist_provider_id: assist.map(|p| p.id),
            minute: Some(23),
        }
    }

    async fn event_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM match_events")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn goal_updates_score_and_keeps_assist() {
        let l = live().await;
        let view = record_goal(&l.pool, goal(&l, &l.striker, &l.alpha, Some(&l.winger)))
            .await
            .unwrap();
        assert_eq!(view.event_type, EventType::Goal);
        let detail = view.goal.unwrap();
        assert_eq!(detail.scoring_team.id, l.alpha.id);
        assert_eq!(detail.assist_provider.map(|p| p.id), Some(l.winger.id));

        let m = find_match(&l.pool, l.m.id).await.unwrap();
        assert_eq!((m.home_team_score, m.away_team_score), (1, 0));

        record_goal(&l.pool, goal(&l, &l.keeper, &l.bravo, None)).await.unwrap();
        let m = find_match(&l.pool, l.m.id).await.unwrap();
        assert_eq!((m.home_team_score, m.away_team_score), (1, 1));

        let goals = match_goal_views(&l.pool, l.m.id, Some(l.bravo.id)).await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].scorer.id, l.keeper.id);
    }

    #[tokio::test]
    async fn self_assist_is_rejected_before_anything_is_written() {
        let l = live().await;
        let err = record_goal(&l.pool, goal(&l, &l.striker, &l.alpha, Some(&l.striker)))
            .await
            .unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
        assert_eq!(event_count(&l.pool).await, 0);
        assert_eq!(find_match(&l.pool, l.m.id).await.unwrap().home_team_score, 0);
    }

    #[tokio::test]
    async fn events_need_a_live_match_and_a_matching_player() {
        let l = live().await;

        let outsider_team = team(&l.pool, "Charlie").await;
        let outsider = player(&l.pool, "Yaw", "Asante", Gender::Men, outsider_team.id).await;
        assert!(matches!(
            record_goal(&l.pool, goal(&l, &outsider, &l.alpha, None)).await,
            Err(LeagueError::Validation(_))
        ));

        let woman = player(&l.pool, "Efua", "Sarpong", Gender::Women, l.alpha.id).await;
        assert!(matches!(
            record_card(
                &l.pool,
                CardType::Yellow,
                NewCard {
                    match_id: Some(l.m.id),
                    player_id: Some(woman.id),
                    minute: Some(5),
                }
            )
            .await,
            Err(LeagueError::Validation(_))
        ));

        assert!(matches!(
            record_goal(&l.pool, goal(&l, &l.striker, &outsider_team, None)).await,
            Err(LeagueError::Validation(_))
        ));

        sqlx::query("UPDATE matches SET has_ended = 1 WHERE id = ?")
            .bind(l.m.id)
            .execute(&l.pool)
            .await
            .unwrap();
        assert!(matches!(
            record_goal(&l.pool, goal(&l, &l.striker, &l.alpha, None)).await,
            Err(LeagueError::Validation(msg)) if msg == "Match has already ended"
        ));
        assert_eq!(event_count(&l.pool).await, 0);
    }

    #[tokio::test]
    async fn cards_and_substitutions_are_listed_in_minute_order() {
        let l = live().await;
        record_card(
            &l.pool,
            CardType::Red,
            NewCard {
                match_id: Some(l.m.id),
                player_id: Some(l.keeper.id),
                minute: Some(75),
            },
        )
        .await
        .unwrap();
        let sub = record_substitution(
            &l.pool,
            NewSubstitution {
                match_id: Some(l.m.id),
                player_out_id: Some(l.striker.id),
                player_in_id: Some(l.winger.id),
                minute: Some(60),
            },
        )
        .await
        .unwrap();
        assert_eq!(sub.substitution.unwrap().player_in.id, l.winger.id);

        let mixed = record_substitution(
            &l.pool,
            NewSubstitution {
                match_id: Some(l.m.id),
                player_out_id: Some(l.striker.id),
                player_in_id: Some(l.keeper.id),
                minute: Some(61),
            },
        )
        .await;
        assert!(matches!(mixed, Err(LeagueError::Validation(_))));

        let events = match_event_views(&l.pool, l.m.id, None).await.unwrap();
        let kinds: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(kinds, vec![EventType::Substitution, EventType::RedCard]);

        let bravo_events = match_event_views(&l.pool, l.m.id, Some(l.bravo.id)).await.unwrap();
        assert_eq!(bravo_events.len(), 1);
        assert_eq!(bravo_events[0].event_type, EventType::RedCard);
    }
}
