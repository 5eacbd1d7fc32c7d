use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::Settings;
use crate::db;
use crate::models::{CompetitionKind, Gender, StandingsView};
use crate::services::{roster, StandingsAggregator, StatsRanker};
use crate::utils::best_match;

/// Minimum Jaro-Winkler similarity for `team --name` lookups.
const TEAM_NAME_THRESHOLD: f64 = 0.8;

/// clap value parser for `--gender M|W`.
pub fn parse_gender(raw: &str) -> std::result::Result<Gender, String> {
    Gender::from_path_segment(raw).ok_or_else(|| format!("unknown gender '{}', use M or W", raw))
}

fn kind_for(cup: bool) -> CompetitionKind {
    if cup {
        CompetitionKind::Cup
    } else {
        CompetitionKind::League
    }
}

pub async fn init_db(settings: &Settings) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;
    let teams = db::list_teams(&pool).await?;
    println!("✅ Database ready at {} ({} teams)", settings.database_url, teams.len());
    Ok(())
}

pub async fn update_standings(settings: &Settings, season_id: i64, gender: Gender, cup: bool) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;
    let kind = kind_for(cup);

    let groups = StandingsAggregator::new(pool).recompute(season_id, gender, kind).await?;
    println!(
        "✅ Recomputed {} {} group(s) for season {}",
        groups.len(),
        gender.possessive(),
        season_id
    );
    Ok(())
}

pub async fn show_standings(settings: &Settings, season_id: i64, gender: Gender, cup: bool) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;
    let views = StandingsAggregator::new(pool)
        .current(season_id, gender, kind_for(cup))
        .await?;

    for view in &views {
        println!(
            "\n🏆 {} {} - {} ({})",
            view.competition.gender.possessive(),
            view.competition.name,
            view.name,
            view.season.name
        );
        println!("   {:<3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}", "#", "Team", "P", "W", "D", "L", "GD", "Pts");
        for (i, row) in view.standings_teams.iter().enumerate() {
            println!(
                "   {:<3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
                i + 1,
                row.team.name,
                row.matches_played,
                row.matches_won,
                row.matches_drawn,
                row.matches_lost,
                row.goal_difference,
                row.points
            );
        }
    }
    Ok(())
}

pub async fn top_scorers(settings: &Settings, season_id: i64, gender: Gender) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;
    let rankings = StatsRanker::new(pool).top_scorers(season_id, gender).await?;

    println!("⚽ {} top scorers, season {}:\n", gender.possessive(), season_id);
    for (i, row) in rankings.iter().take(10).enumerate() {
        println!(
            "{:>2}. {} {} ({}) - {}",
            i + 1,
            row.first_name,
            row.last_name,
            row.team_name.as_deref().unwrap_or("no team"),
            row.total
        );
    }
    Ok(())
}

pub async fn query_team(settings: &Settings, team_name: &str) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;

    println!("🔍 Searching for team: {}", team_name);

    let teams = db::list_teams(&pool).await?;
    let Some(team) = best_match(team_name, &teams, |t| t.name.as_str(), TEAM_NAME_THRESHOLD) else {
        println!("❌ No team found matching '{}'", team_name);
        println!("\n💡 Available teams:");
        for team in &teams {
            println!("   • {} ({})", team.name, team.name_abbreviation);
        }
        return Ok(());
    };

    let stats = roster::team_stats(&pool, team.id).await?;

    println!("📊 Team Details:");
    println!("   Name: {} ({})", stats.team.name, stats.team.name_abbreviation);
    println!(
        "   Record: P{} W{} D{} L{}",
        stats.matches_played, stats.matches_won, stats.matches_drawn, stats.matches_lost
    );
    println!(
        "   Goals: {} for, {} against ({:+})",
        stats.goals_for, stats.goals_against, stats.goal_difference
    );
    println!("   Points: {} ({:.1}% of available)", stats.points, stats.points_percentage);
    if stats.form.is_empty() {
        println!("   Form: no finished matches");
    } else {
        println!("   Form: {}", stats.form);
    }
    Ok(())
}

/// One CSV line per standings row.
#[derive(Debug, Serialize)]
struct StandingsCsvRow<'a> {
    group: &'a str,
    position: usize,
    team: &'a str,
    played: i64,
    won: i64,
    drawn: i64,
    lost: i64,
    goals_for: i64,
    goals_against: i64,
    goal_difference: i64,
    points: i64,
}

fn write_standings<W: std::io::Write>(writer: &mut csv::Writer<W>, views: &[StandingsView]) -> Result<usize> {
    let mut written = 0;
    for view in views {
        for (i, row) in view.standings_teams.iter().enumerate() {
            writer.serialize(StandingsCsvRow {
                group: &view.name,
                position: i + 1,
                team: &row.team.name,
                played: row.matches_played,
                won: row.matches_won,
                drawn: row.matches_drawn,
                lost: row.matches_lost,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
                points: row.points,
            })?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}

pub async fn export_standings(
    settings: &Settings,
    season_id: i64,
    gender: Gender,
    cup: bool,
    output: &Path,
) -> Result<()> {
    let pool = db::init_database(&settings.database_url).await?;
    let views = StandingsAggregator::new(pool)
        .current(season_id, gender, kind_for(cup))
        .await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut writer = csv::Writer::from_path(output)
        .map_err(|e| anyhow!("cannot open {}: {}", output.display(), e))?;
    let rows = write_standings(&mut writer, &views)?;

    println!("✅ Exported {} rows to {}", rows, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;
    use crate::models::{StandingsTeamView, Team};

    fn row(team: Team, played: i64, won: i64, points: i64) -> StandingsTeamView {
        StandingsTeamView {
            id: team.id,
            team,
            matches_played: played,
            matches_won: won,
            matches_drawn: 0,
            matches_lost: played - won,
            goals_for: won * 2,
            goals_against: 1,
            goal_difference: won * 2 - 1,
            points,
        }
    }

    #[test]
    fn gender_flag_accepts_codes_and_segments() {
        assert_eq!(parse_gender("W"), Ok(Gender::Women));
        assert_eq!(parse_gender("mens"), Ok(Gender::Men));
        assert!(parse_gender("x").is_err());
    }

    #[tokio::test]
    async fn standings_csv_has_header_and_positions() {
        let pool = test_pool().await;
        let s = season(&pool, "2024/25", date(2024, 9, 1), date(2025, 5, 31)).await;
        let league = competition(&pool, CompetitionKind::League, Gender::Men).await;
        let view = StandingsView {
            id: 1,
            name: "League Table".to_string(),
            season: s,
            competition: league,
            standings_teams: vec![
                row(team(&pool, "Delta").await, 2, 2, 6),
                row(team(&pool, "Echo").await, 2, 0, 0),
            ],
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        assert_eq!(write_standings(&mut writer, &[view]).unwrap(), 2);
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "group,position,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points"
        );
        assert_eq!(lines[1], "League Table,1,Delta,2,2,0,0,4,1,3,6");
        assert_eq!(lines[2], "League Table,2,Echo,2,0,0,2,0,1,-1,0");
    }
}
