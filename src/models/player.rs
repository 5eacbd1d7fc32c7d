use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::team::{default_true, Team};
use super::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PlayerPosition {
    pub id: i64,
    pub name: String,
    pub name_abbreviation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayerPosition {
    pub name: String,
    pub name_abbreviation: String,
}

/// Majors a player can be enrolled in.
pub const MAJORS: [&str; 6] = ["CS", "EE", "ME", "CE", "BA", "MIS"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub year_group: String,
    pub major: String,
    pub is_active: bool,
    pub team_id: Option<i64>,
    pub position_id: Option<i64>,
    pub image: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub year_group: String,
    pub major: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(alias = "team")]
    pub team_id: Option<i64>,
    #[serde(alias = "position")]
    pub position_id: Option<i64>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub year_group: Option<String>,
    pub major: Option<String>,
    pub is_active: Option<bool>,
    #[serde(alias = "team")]
    pub team_id: Option<i64>,
    #[serde(alias = "position")]
    pub position_id: Option<i64>,
    pub image: Option<String>,
}

impl PlayerUpdate {
    pub fn apply(self, player: &mut Player) {
        if let Some(first_name) = self.first_name {
            player.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            player.last_name = last_name;
        }
        if let Some(gender) = self.gender {
            player.gender = gender;
        }
        if let Some(birth_date) = self.birth_date {
            player.birth_date = birth_date;
        }
        if let Some(year_group) = self.year_group {
            player.year_group = year_group;
        }
        if let Some(major) = self.major {
            player.major = major;
        }
        if let Some(is_active) = self.is_active {
            player.is_active = is_active;
        }
        if self.team_id.is_some() {
            player.team_id = self.team_id;
        }
        if self.position_id.is_some() {
            player.position_id = self.position_id;
        }
        if self.image.is_some() {
            player.image = self.image;
        }
    }
}

/// Player as returned by the API, with team and position expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub year_group: String,
    pub major: String,
    pub is_active: bool,
    pub image: Option<String>,
    pub team: Option<Team>,
    pub position: Option<PlayerPosition>,
    pub age: i32,
    pub no_of_goals_in_history: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Coach {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub is_active: bool,
    pub gender: Gender,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCoach {
    pub first_name: String,
    pub last_name: String,
    #[serde(alias = "team")]
    pub team_id: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub player_id: i64,
    pub from_team_id: Option<i64>,
    pub to_team_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransfer {
    #[serde(alias = "player")]
    pub player_id: i64,
    #[serde(alias = "to_team")]
    pub to_team_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferView {
    pub id: i64,
    pub date: NaiveDate,
    pub player: PlayerView,
    pub from_team: Option<Team>,
    pub to_team: Team,
}
