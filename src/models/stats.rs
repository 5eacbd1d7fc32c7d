use serde::{Deserialize, Serialize};

use super::fixture::CardType;

/// What a player ranking counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    Goals,
    Assists,
    YellowCards,
    RedCards,
}

impl RankingMetric {
    pub fn describe(&self) -> &'static str {
        match self {
            RankingMetric::Goals => "top scorers",
            RankingMetric::Assists => "top assisters",
            RankingMetric::YellowCards => "yellow card rankings",
            RankingMetric::RedCards => "red card rankings",
        }
    }
}

impl From<CardType> for RankingMetric {
    fn from(card: CardType) -> Self {
        match card {
            CardType::Yellow => RankingMetric::YellowCards,
            CardType::Red => RankingMetric::RedCards,
        }
    }
}

/// One entry per player credited with the metric, denormalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub player_image: Option<String>,
    pub team_name: Option<String>,
    pub team_name_abbreviation: Option<String>,
    pub team_logo_url: Option<String>,
    pub team_color: Option<String>,
    pub metric: RankingMetric,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanSheetRanking {
    pub team_id: i64,
    pub team_name: String,
    pub team_name_abbreviation: String,
    pub team_logo_url: String,
    pub team_color: String,
    pub no_of_clean_sheets: i64,
}
