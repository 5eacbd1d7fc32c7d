use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Team;

/// Supporter profile. Accounts start inactive until activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Fan {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: String,
    pub birth_date: NaiveDate,
    pub is_active: bool,
    pub fav_team_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFan {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(alias = "fav_team")]
    pub fav_team_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanView {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: String,
    pub birth_date: NaiveDate,
    pub is_active: bool,
    pub fav_team: Team,
}

impl FanView {
    pub fn new(fan: Fan, fav_team: Team) -> Self {
        Self {
            id: fan.id,
            username: fan.username,
            first_name: fan.first_name,
            last_name: fan.last_name,
            email: fan.email,
            phone_no: fan.phone_no,
            birth_date: fan.birth_date,
            is_active: fan.is_active,
            fav_team,
        }
    }
}
