use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{Gender, GROUP_STAGE};

const COMPETITIONS: [&str; 3] = ["Champions League", "FA Cup", "Premier League"];

const STAGES: [&str; 5] = [GROUP_STAGE, "Round of 16", "Quarter Finals", "Semi Finals", "Finals"];

const POSITIONS: [(&str, &str); 4] = [
    ("Forward", "FWD"),
    ("Midfielder", "MID"),
    ("Defender", "DEF"),
    ("Goalkeeper", "GK"),
];

const NEWS_TAGS: [&str; 13] = [
    "ACL",
    "APL",
    "AFA Cup",
    "Transfer",
    "Injury",
    "Match Preview",
    "Match Report",
    "Interview",
    "Opinion",
    "Feature",
    "Tactical Analysis",
    "Presser",
    "Other",
];

struct DefaultTeam {
    name: &'static str,
    abbreviation: &'static str,
    logo_url: &'static str,
    color: &'static str,
    twitter_url: &'static str,
}

const TEAMS: [DefaultTeam; 6] = [
    DefaultTeam {
        name: "Elite",
        abbreviation: "ELI",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097680/Team%20Logos/elite_logo_pmbtg5.png",
        color: "121354",
        twitter_url: "https://twitter.com/elite1_fc",
    },
    DefaultTeam {
        name: "Legends United",
        abbreviation: "LU",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097681/Team%20Logos/lu_logo_oailhh.png",
        color: "000000",
        twitter_url: "https://twitter.com/LUFCau",
    },
    DefaultTeam {
        name: "Highlanders",
        abbreviation: "HIG",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097681/Team%20Logos/highlanders_logo_yu8c40.png",
        color: "a79958",
        twitter_url: "https://twitter.com/Highlandersoff1",
    },
    DefaultTeam {
        name: "Kasanoma",
        abbreviation: "KAS",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097680/Team%20Logos/kasanoma_logo_tatjsp.png",
        color: "0b6667",
        twitter_url: "https://twitter.com/FcKasanoma",
    },
    DefaultTeam {
        name: "Northside",
        abbreviation: "NOR",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097681/Team%20Logos/northside_logo_wyy3lm.png",
        color: "a7a6ab",
        twitter_url: "https://twitter.com/NorthsideFooty",
    },
    DefaultTeam {
        name: "Red Army",
        abbreviation: "RAR",
        logo_url: "https://res.cloudinary.com/dvghxq3ba/image/upload/v1703097681/Team%20Logos/red_army_logo_yg9lym.png",
        color: "e8272c",
        twitter_url: "https://twitter.com/officalRedArmy",
    },
];

/// Inserts the default reference rows, keyed by their natural unique names.
/// Rows that already exist are left untouched, so repeated runs are no-ops.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for gender in [Gender::Men, Gender::Women] {
        for name in COMPETITIONS {
            inserted += sqlx::query("INSERT OR IGNORE INTO competitions (name, gender) VALUES (?, ?)")
                .bind(name)
                .bind(gender)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
    }

    for name in STAGES {
        inserted += sqlx::query("INSERT OR IGNORE INTO stages (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    for (name, abbreviation) in POSITIONS {
        inserted += sqlx::query("INSERT OR IGNORE INTO player_positions (name, name_abbreviation) VALUES (?, ?)")
            .bind(name)
            .bind(abbreviation)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    for name in NEWS_TAGS {
        inserted += sqlx::query("INSERT OR IGNORE INTO news_item_tags (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    for team in &TEAMS {
        inserted += sqlx::query(
            r#"INSERT OR IGNORE INTO teams (name, name_abbreviation, logo_url, color, twitter_url, is_active)
               VALUES (?, ?, ?, ?, ?, 1)"#,
        )
        .bind(team.name)
        .bind(team.abbreviation)
        .bind(team.logo_url)
        .bind(team.color)
        .bind(team.twitter_url)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    if inserted > 0 {
        tracing::info!("Seeded {} default rows", inserted);
    } else {
        tracing::debug!("Default rows already present, nothing to seed");
    }
    Ok(())
}
