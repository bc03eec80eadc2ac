use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const DEFAULT_YEAR: &str = "2012";
pub const DEFAULT_TITLE: &str = "The Amazing Spider-Man 2";

/// A movie record as written to the table.
///
/// `year` is kept in its string form but always holds a number,
/// as it is stored with the DynamoDB `N` type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieItem {
    pub id: String,
    pub year: String,
    pub title: String,
}

/// A JSON value accepted where the record expects a string.
///
/// Numbers keep their source text (`arbitrary_precision`), so large ids
/// and decimal years are stored exactly as the caller sent them.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Scalar::Text(text)),
            Value::Number(number) => Ok(Scalar::Number(number)),
            other => Err(D::Error::custom(format!(
                "expected a string or a number, got {other}"
            ))),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Request body as supplied by the caller.
/// All three keys are required, unknown keys are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MoviePayload {
    pub id: Scalar,
    pub year: Scalar,
    pub title: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ItemError {
    #[error("year must be numeric, got {0:?}")]
    NonNumericYear(String),
}

impl MovieItem {
    /// The record written when a request arrives without a body.
    /// Every call generates a fresh v4 id.
    pub fn placeholder() -> Self {
        MovieItem {
            id: Uuid::new_v4().to_string(),
            year: DEFAULT_YEAR.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl TryFrom<MoviePayload> for MovieItem {
    type Error = ItemError;

    fn try_from(payload: MoviePayload) -> Result<Self, Self::Error> {
        let year: String = payload.year.to_string();

        // DynamoDB rejects non-numeric N values, catch it before the write
        let numeric: bool = year
            .parse::<f64>()
            .map(|value| value.is_finite())
            .unwrap_or(false);

        if !numeric {
            return Err(ItemError::NonNumericYear(year));
        }

        Ok(MovieItem {
            id: payload.id.to_string(),
            year,
            title: payload.title,
        })
    }
}
