use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::player::Player;
use super::team::Team;
use super::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Referee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReferee {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Season {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Season {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSeason {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SeasonUpdate {
    pub fn apply(self, season: &mut Season) {
        if let Some(name) = self.name {
            season.name = name;
        }
        if let Some(start_date) = self.start_date {
            season.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            season.end_date = end_date;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
}

/// The two competitions that keep standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionKind {
    League,
    Cup,
}

impl CompetitionKind {
    pub fn competition_name(&self) -> &'static str {
        match self {
            CompetitionKind::League => "Premier League",
            CompetitionKind::Cup => "FA Cup",
        }
    }
}

pub const GROUP_STAGE: &str = "Group Stage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stage {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchDay {
    pub id: i64,
    pub number: i64,
    pub date: NaiveDate,
    pub season_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatchDay {
    pub number: i64,
    pub date: NaiveDate,
    #[serde(alias = "season")]
    pub season_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchDayUpdate {
    pub number: Option<i64>,
    pub date: Option<NaiveDate>,
    #[serde(alias = "season")]
    pub season_id: Option<i64>,
}

impl MatchDayUpdate {
    pub fn apply(self, match_day: &mut MatchDay) {
        if let Some(number) = self.number {
            match_day.number = number;
        }
        if let Some(date) = self.date {
            match_day.date = date;
        }
        if self.season_id.is_some() {
            match_day.season_id = self.season_id;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDayView {
    pub id: i64,
    pub number: i64,
    pub date: NaiveDate,
    pub season: Option<Season>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_day_id: i64,
    pub competition_id: i64,
    pub referee_id: i64,
    pub stage_id: Option<i64>,
    pub match_time: NaiveTime,
    pub home_team_score: i64,
    pub away_team_score: i64,
    pub has_started: bool,
    pub has_ended: bool,
}

impl Match {
    pub fn involves(&self, team_id: i64) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals scored and conceded by `team_id`, or None when it did not play.
    pub fn score_for(&self, team_id: i64) -> Option<(i64, i64)> {
        if self.home_team_id == team_id {
            Some((self.home_team_score, self.away_team_score))
        } else if self.away_team_id == team_id {
            Some((self.away_team_score, self.home_team_score))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    #[serde(alias = "home_team")]
    pub home_team_id: i64,
    #[serde(alias = "away_team")]
    pub away_team_id: i64,
    #[serde(alias = "match_day")]
    pub match_day_id: i64,
    #[serde(alias = "competition")]
    pub competition_id: i64,
    #[serde(alias = "referee")]
    pub referee_id: i64,
    #[serde(alias = "stage")]
    pub stage_id: Option<i64>,
    pub match_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchUpdate {
    #[serde(alias = "home_team")]
    pub home_team_id: Option<i64>,
    #[serde(alias = "away_team")]
    pub away_team_id: Option<i64>,
    #[serde(alias = "match_day")]
    pub match_day_id: Option<i64>,
    #[serde(alias = "competition")]
    pub competition_id: Option<i64>,
    #[serde(alias = "referee")]
    pub referee_id: Option<i64>,
    #[serde(alias = "stage")]
    pub stage_id: Option<i64>,
    pub match_time: Option<NaiveTime>,
    pub home_team_score: Option<i64>,
    pub away_team_score: Option<i64>,
    pub has_started: Option<bool>,
    pub has_ended: Option<bool>,
}

impl MatchUpdate {
    pub fn apply(self, m: &mut Match) {
        if let Some(id) = self.home_team_id {
            m.home_team_id = id;
        }
        if let Some(id) = self.away_team_id {
            m.away_team_id = id;
        }
        if let Some(id) = self.match_day_id {
            m.match_day_id = id;
        }
        if let Some(id) = self.competition_id {
            m.competition_id = id;
        }
        if let Some(id) = self.referee_id {
            m.referee_id = id;
        }
        if self.stage_id.is_some() {
            m.stage_id = self.stage_id;
        }
        if let Some(match_time) = self.match_time {
            m.match_time = match_time;
        }
        if let Some(score) = self.home_team_score {
            m.home_team_score = score;
        }
        if let Some(score) = self.away_team_score {
            m.away_team_score = score;
        }
        if let Some(has_started) = self.has_started {
            m.has_started = has_started;
        }
        if let Some(has_ended) = self.has_ended {
            m.has_ended = has_ended;
        }
    }
}

/// Match with every foreign key expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub id: i64,
    pub home_team: Team,
    pub away_team: Team,
    pub match_day: MatchDayView,
    pub competition: Competition,
    pub referee: Referee,
    pub stage: Option<Stage>,
    pub match_time: NaiveTime,
    pub home_team_score: i64,
    pub away_team_score: i64,
    pub has_started: bool,
    pub has_ended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum EventType {
    #[serde(rename = "Goal")]
    #[sqlx(rename = "Goal")]
    Goal,
    #[serde(rename = "Yellow Card")]
    #[sqlx(rename = "Yellow Card")]
    YellowCard,
    #[serde(rename = "Red Card")]
    #[sqlx(rename = "Red Card")]
    RedCard,
    #[serde(rename = "Substitution")]
    #[sqlx(rename = "Substitution")]
    Substitution,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Goal => "Goal",
            EventType::YellowCard => "Yellow Card",
            EventType::RedCard => "Red Card",
            EventType::Substitution => "Substitution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Yellow,
    Red,
}

impl From<CardType> for EventType {
    fn from(card: CardType) -> Self {
        match card {
            CardType::Yellow => EventType::YellowCard,
            CardType::Red => EventType::RedCard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchEvent {
    pub id: i64,
    pub match_id: i64,
    pub event_type: EventType,
    pub player_id: i64,
    pub minute: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: i64,
    pub match_event_id: i64,
    pub scoring_team_id: i64,
    pub assist_provider_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Substitution {
    pub id: i64,
    pub match_event_id: i64,
    pub player_out_id: i64,
    pub player_in_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    #[serde(alias = "match")]
    pub match_id: Option<i64>,
    #[serde(alias = "player")]
    pub player_id: Option<i64>,
    #[serde(alias = "scoring_team")]
    pub scoring_team_id: Option<i64>,
    #[serde(alias = "assist_provider")]
    pub assist_provider_id: Option<i64>,
    pub minute: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCard {
    #[serde(alias = "match")]
    pub match_id: Option<i64>,
    #[serde(alias = "player")]
    pub player_id: Option<i64>,
    pub minute: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubstitution {
    #[serde(alias = "match")]
    pub match_id: Option<i64>,
    #[serde(alias = "player_out")]
    pub player_out_id: Option<i64>,
    #[serde(alias = "player_in")]
    pub player_in_id: Option<i64>,
    pub minute: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDetail {
    pub scoring_team: Team,
    pub assist_provider: Option<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionDetail {
    pub player_out: Player,
    pub player_in: Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEventView {
    pub id: i64,
    pub match_id: i64,
    pub event_type: EventType,
    pub minute: i64,
    pub player: Player,
    pub goal: Option<GoalDetail>,
    pub substitution: Option<SubstitutionDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalView {
    pub id: i64,
    pub match_id: i64,
    pub minute: i64,
    pub scorer: Player,
    pub scoring_team: Team,
    pub assist_provider: Option<Player>,
}
