use thiserror::Error;

/// Every failure a request can end in. Handlers turn these into the JSON envelope.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("{0}")]
    MissingParameter(String),

    #[error("{0}")]
    InvalidParameterFormat(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{message}: {details}")]
    AggregationFailure { message: String, details: String },

    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl LeagueError {
    pub fn not_found(entity: &str) -> Self {
        LeagueError::NotFound(format!("{} not found", entity))
    }

    pub fn missing_id(entity: &str) -> Self {
        LeagueError::MissingParameter(format!("{} ID is required", entity))
    }

    pub fn invalid_id(entity: &str) -> Self {
        LeagueError::InvalidParameterFormat(format!("Invalid {} ID", entity))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation(message.into())
    }

    pub fn aggregation(message: impl Into<String>, details: impl ToString) -> Self {
        LeagueError::AggregationFailure {
            message: message.into(),
            details: details.to_string(),
        }
    }
}

impl From<sqlx::Error> for LeagueError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return LeagueError::Validation(format!("Record already exists ({})", db_err.message()));
            }
            if db_err.is_foreign_key_violation() {
                return LeagueError::Validation("Referenced record does not exist".to_string());
            }
            if db_err.is_check_violation() {
                return LeagueError::Validation(format!("Constraint failed ({})", db_err.message()));
            }
        }
        LeagueError::Database(err)
    }
}

/// Parses a required integer id taken from a query string or path.
pub fn parse_id(raw: Option<&str>, entity: &str) -> Result<i64, LeagueError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LeagueError::missing_id(entity))?;
    raw.parse::<i64>().map_err(|_| LeagueError::invalid_id(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_distinguishes_missing_from_malformed() {
        assert_eq!(parse_id(Some("42"), "Season").unwrap(), 42);
        assert!(matches!(
            parse_id(None, "Season"),
            Err(LeagueError::MissingParameter(msg)) if msg == "Season ID is required"
        ));
        assert!(matches!(parse_id(Some("  "), "Season"), Err(LeagueError::MissingParameter(_))));
        assert!(matches!(
            parse_id(Some("abc"), "Match"),
            Err(LeagueError::InvalidParameterFormat(msg)) if msg == "Invalid Match ID"
        ));
    }

    #[test]
    fn aggregation_failure_keeps_the_cause() {
        let err = LeagueError::aggregation("Standings update failed", "disk I/O error");
        assert_eq!(err.to_string(), "Standings update failed: disk I/O error");
    }
}
