use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::{ApiResponse, Gender};
use crate::services::{parse_id, LeagueError};

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), LeagueError>;

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(message, data))))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(message, data))))
}

pub fn done(message: impl Into<String>) -> ApiResult<()> {
    Ok((StatusCode::OK, Json(ApiResponse::message(message))))
}

impl LeagueError {
    pub fn status(&self) -> StatusCode {
        match self {
            LeagueError::NotFound(_) => StatusCode::NOT_FOUND,
            LeagueError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for LeagueError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = match self {
            LeagueError::MissingParameter(message)
            | LeagueError::InvalidParameterFormat(message)
            | LeagueError::NotFound(message) => ApiResponse::error(message, None),
            LeagueError::Validation(details) => {
                tracing::warn!("Validation failed: {}", details);
                ApiResponse::error("Validation failed", Some(details))
            }
            LeagueError::InvalidPayload(details) => ApiResponse::error("Invalid request body", Some(details)),
            LeagueError::AggregationFailure { message, details } => ApiResponse::error(message, Some(details)),
            LeagueError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::error("Internal server error", None)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the league error envelope.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = LeagueError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(payload_error(rejection)),
        }
    }
}

fn payload_error(rejection: JsonRejection) -> LeagueError {
    LeagueError::InvalidPayload(rejection.body_text())
}

/// Body of the `get` routes that return one row when `?id=` is given and all rows otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    pub team_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season_id: Option<String>,
    pub gender: Option<String>,
}

impl SeasonQuery {
    pub fn season_id(&self) -> Result<i64, LeagueError> {
        parse_id(self.season_id.as_deref(), "Season")
    }

    /// Defaults to the men's competitions when no gender is given.
    pub fn gender(&self) -> Result<Gender, LeagueError> {
        match self.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            None => Ok(Gender::Men),
            Some(code) => Gender::from_code(code)
                .ok_or_else(|| LeagueError::InvalidParameterFormat(format!("Invalid gender '{}'", code))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub match_id: Option<String>,
    pub team_id: Option<String>,
}

impl MatchQuery {
    pub fn match_id(&self) -> Result<i64, LeagueError> {
        parse_id(self.match_id.as_deref(), "Match")
    }

    pub fn optional_team_id(&self) -> Result<Option<i64>, LeagueError> {
        match self.team_id.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(None),
            Some(raw) => parse_id(Some(raw), "Team").map(Some),
        }
    }
}

/// Parses the `mens`/`womens` path segment.
pub fn gender_segment(segment: &str) -> Result<Gender, LeagueError> {
    Gender::from_path_segment(segment)
        .ok_or_else(|| LeagueError::InvalidParameterFormat(format!("Invalid gender '{}'", segment)))
}
