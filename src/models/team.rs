use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub name_abbreviation: String,
    pub logo_url: String,
    pub color: String,
    pub twitter_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub name_abbreviation: String,
    pub logo_url: String,
    pub color: String,
    pub twitter_url: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub name_abbreviation: Option<String>,
    pub logo_url: Option<String>,
    pub color: Option<String>,
    pub twitter_url: Option<String>,
    pub is_active: Option<bool>,
}

impl TeamUpdate {
    pub fn apply(self, team: &mut Team) {
        if let Some(name) = self.name {
            team.name = name;
        }
        if let Some(abbreviation) = self.name_abbreviation {
            team.name_abbreviation = abbreviation;
        }
        if let Some(logo_url) = self.logo_url {
            team.logo_url = logo_url;
        }
        if let Some(color) = self.color {
            team.color = color;
        }
        if let Some(twitter_url) = self.twitter_url {
            team.twitter_url = twitter_url;
        }
        if let Some(is_active) = self.is_active {
            team.is_active = is_active;
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// All-time record of a team across every finished match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: Team,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_drawn: i64,
    pub matches_lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
    pub points_percentage: f64,
    pub form: String,
}
