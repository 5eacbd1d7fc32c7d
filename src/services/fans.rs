use sqlx::SqlitePool;

use crate::db;
use crate::models::{Fan, FanView, NewFan};
use crate::services::LeagueError;

fn check_fan(fan: &NewFan) -> Result<(), LeagueError> {
    let required = [
        ("Username", &fan.username),
        ("First name", &fan.first_name),
        ("Last name", &fan.last_name),
        ("Phone number", &fan.phone_no),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(LeagueError::validation(format!("{} cannot be empty", field)));
    }
    if !fan.email.contains('@') {
        return Err(LeagueError::validation("A valid email address is required"));
    }
    Ok(())
}

pub async fn find_fan(pool: &SqlitePool, fan_id: i64) -> Result<Fan, LeagueError> {
    db::get_fan(pool, fan_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Fan"))
}

pub async fn fan_view(pool: &SqlitePool, fan: Fan) -> Result<FanView, LeagueError> {
    let fav_team = db::get_team(pool, fan.fav_team_id)
        .await?
        .ok_or_else(|| LeagueError::not_found("Team"))?;
    Ok(FanView::new(fan, fav_team))
}

pub async fn create_fan(pool: &SqlitePool, request: NewFan) -> Result<FanView, LeagueError> {
    check_fan(&request)?;
    let fav_team_id = request
        .fav_team_id
        .ok_or_else(|| LeagueError::validation("A favourite team is required"))?;
    if db::get_team(pool, fav_team_id).await?.is_none() {
        return Err(LeagueError::validation("Favourite team does not exist"));
    }

    let id = db::insert_fan(pool, &request, fav_team_id).await?;
    tracing::info!("Registered fan {} ({})", request.username, id);
    fan_view(pool, find_fan(pool, id).await?).await
}

pub async fn list_fans(pool: &SqlitePool) -> Result<Vec<FanView>, LeagueError> {
    let fans = db::list_fans(pool).await?;
    let mut views = Vec::with_capacity(fans.len());
    for fan in fans {
        views.push(fan_view(pool, fan).await?);
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::*;

    fn supporter(username: &str, phone_no: &str, fav_team_id: Option<i64>) -> NewFan {
        NewFan {
            username: username.to_string(),
            first_name: "Yaw".to_string(),
            last_name: "Boateng".to_string(),
            email: format!("{}@example.com", username),
            phone_no: phone_no.to_string(),
            birth_date: date(2001, 3, 14),
            is_active: false,
            fav_team_id,
        }
    }

    #[tokio::test]
    async fn fan_nests_favourite_team_and_starts_inactive() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;

        let view = create_fan(&pool, supporter("yaw", "0241234567", Some(alpha.id))).await.unwrap();
        assert_eq!(view.fav_team.id, alpha.id);
        assert!(!view.is_active);
        assert_eq!(list_fans(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn phone_number_is_unique_and_team_required() {
        let pool = test_pool().await;
        let alpha = team(&pool, "Alpha").await;
        create_fan(&pool, supporter("yaw", "0241234567", Some(alpha.id))).await.unwrap();

        let duplicate = create_fan(&pool, supporter("kwame", "0241234567", Some(alpha.id))).await;
        assert!(matches!(duplicate, Err(LeagueError::Validation(_))));

        let no_team = create_fan(&pool, supporter("esi", "0209999999", None)).await;
        assert!(matches!(no_team, Err(LeagueError::Validation(_))));

        let unknown_team = create_fan(&pool, supporter("esi", "0209999999", Some(999))).await;
        assert!(matches!(unknown_team, Err(LeagueError::Validation(_))));

        assert!(matches!(find_fan(&pool, 999).await, Err(LeagueError::NotFound(_))));
    }
}
