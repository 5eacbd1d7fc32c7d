use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;

use super::fixture::{Competition, Season};
use super::team::Team;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Standings {
    pub id: i64,
    pub season_id: i64,
    pub competition_id: i64,
    pub name: String,
}

/// Raw counters tallied from the match ledger for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

impl TeamRecord {
    pub fn matches_drawn(&self) -> i64 {
        self.matches_played - self.matches_won - self.matches_lost
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for - self.goals_against
    }

    pub fn points(&self) -> i64 {
        3 * self.matches_won + self.matches_drawn()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StandingsTeam {
    pub id: i64,
    pub standings_id: i64,
    pub team_id: i64,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_drawn: i64,
    pub matches_lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl StandingsTeam {
    pub fn record(&self) -> TeamRecord {
        TeamRecord {
            matches_played: self.matches_played,
            matches_won: self.matches_won,
            matches_lost: self.matches_lost,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
        }
    }

    /// Overwrites the counters and recomputes the derived columns.
    pub fn apply_record(&mut self, record: TeamRecord) {
        self.matches_played = record.matches_played;
        self.matches_won = record.matches_won;
        self.matches_lost = record.matches_lost;
        self.goals_for = record.goals_for;
        self.goals_against = record.goals_against;
        self.recalculate();
    }

    /// goal_difference, matches_drawn and points always follow the counters.
    pub fn recalculate(&mut self) {
        let record = self.record();
        self.goal_difference = record.goal_difference();
        self.matches_drawn = record.matches_drawn();
        self.points = record.points();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsTeamView {
    pub id: i64,
    pub team: Team,
    pub matches_played: i64,
    pub matches_won: i64,
    pub matches_drawn: i64,
    pub matches_lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl StandingsTeamView {
    pub fn new(row: StandingsTeam, team: Team) -> Self {
        Self {
            id: row.id,
            team,
            matches_played: row.matches_played,
            matches_won: row.matches_won,
            matches_drawn: row.matches_drawn,
            matches_lost: row.matches_lost,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference,
            points: row.points,
        }
    }

    /// Table order: points, goal difference, goals for (all descending), then team name.
    pub fn table_order(a: &Self, b: &Self) -> Ordering {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team.name.cmp(&b.team.name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsView {
    pub id: i64,
    pub name: String,
    pub season: Season,
    pub competition: Competition,
    pub standings_teams: Vec<StandingsTeamView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStandingsRequest {
    #[serde(alias = "season")]
    pub season_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(played: i64, won: i64, lost: i64, gf: i64, ga: i64) -> StandingsTeam {
        let mut row = StandingsTeam {
            id: 1,
            standings_id: 1,
            team_id: 1,
            matches_played: 0,
            matches_won: 0,
            matches_drawn: 0,
            matches_lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        };
        row.apply_record(TeamRecord {
            matches_played: played,
            matches_won: won,
            matches_lost: lost,
            goals_for: gf,
            goals_against: ga,
        });
        row
    }

    #[test]
    fn derived_columns_follow_counters() {
        let r = row(10, 6, 1, 19, 8);
        assert_eq!(r.matches_drawn, 3);
        assert_eq!(r.points, 21);
        assert_eq!(r.goal_difference, 11);
    }

    #[test]
    fn table_order_breaks_ties_by_goal_difference_then_goals_then_name() {
        let team = |id: i64, name: &str| Team {
            id,
            name: name.to_string(),
            name_abbreviation: name[..3].to_uppercase(),
            logo_url: String::new(),
            color: String::new(),
            twitter_url: format!("https://twitter.com/{}", id),
            is_active: true,
        };

        let mut table = vec![
            StandingsTeamView::new(row(3, 1, 1, 4, 4), team(1, "Zulu")),
            StandingsTeamView::new(row(3, 1, 1, 4, 4), team(2, "Alpha")),
            StandingsTeamView::new(row(3, 1, 1, 6, 4), team(3, "Mike")),
            StandingsTeamView::new(row(3, 2, 1, 2, 3), team(4, "Echo")),
        ];
        table.sort_by(StandingsTeamView::table_order);

        let names: Vec<&str> = table.iter().map(|t| t.team.name.as_str()).collect();
        assert_eq!(names, vec!["Echo", "Mike", "Alpha", "Zulu"]);
    }
}
