use serde::{Deserialize, Serialize};

pub mod fan;
pub mod fixture;
pub mod news;
pub mod player;
pub mod standings;
pub mod stats;
pub mod team;

pub use fan::*;
pub use fixture::*;
pub use news::*;
pub use player::*;
pub use standings::*;
pub use stats::*;
pub use team::*;

/// Men's or women's side of the league. Stored as "M"/"W".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Gender {
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Men,
    #[serde(rename = "W")]
    #[sqlx(rename = "W")]
    Women,
}

impl Gender {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "M" => Some(Gender::Men),
            "W" => Some(Gender::Women),
            _ => None,
        }
    }

    /// Parses the `mens`/`womens` segment used in route paths.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "mens" => Some(Gender::Men),
            "womens" => Some(Gender::Women),
            _ => Self::from_code(segment),
        }
    }

    pub fn possessive(&self) -> &'static str {
        match self {
            Gender::Men => "Men's",
            Gender::Women => "Women's",
        }
    }
}

// API Response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>, errors: Option<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            errors,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_codes_and_path_segments() {
        assert_eq!(Gender::from_code("m"), Some(Gender::Men));
        assert_eq!(Gender::from_code("W"), Some(Gender::Women));
        assert_eq!(Gender::from_code("X"), None);
        assert_eq!(Gender::from_path_segment("mens"), Some(Gender::Men));
        assert_eq!(Gender::from_path_segment("womens"), Some(Gender::Women));
        assert_eq!(Gender::from_path_segment("others"), None);
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::message("Standings updated successfully")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Standings updated successfully" }));

        let body = serde_json::to_value(ApiResponse::success("ok", vec![1, 2])).unwrap();
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert!(body.get("errors").is_none());
    }
}
