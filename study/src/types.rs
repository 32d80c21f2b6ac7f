//! Small enums shared by the domain entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Unknown review status: {0}")]
    UnknownStatus(String),
}

/// Self-reported difficulty of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase name, as the remote backend expects it.
    pub fn as_lowercase(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ModelError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Lifecycle state of a review. The only transition is `Pending -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Done,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_lowercase_names() {
        let names: Vec<_> = Difficulty::ALL.iter().map(|d| d.as_lowercase()).collect();
        assert_eq!(names, vec!["easy", "medium", "hard"]);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReviewStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: ReviewStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(back, ReviewStatus::Done);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Done".parse::<ReviewStatus>(), Ok(ReviewStatus::Done));
        assert_eq!(" pending".parse::<ReviewStatus>(), Ok(ReviewStatus::Pending));
        assert_eq!(
            "skipped".parse::<ReviewStatus>(),
            Err(ModelError::UnknownStatus("skipped".to_string()))
        );
    }
}
