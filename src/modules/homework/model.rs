use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// STATUS
// =============================================================================

/// Review verdicts the status API is documented to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown to the user
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// HOMEWORK
// =============================================================================

/// Key under which an item's last status is remembered.
/// Items carrying an `id` are keyed by it, the rest by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HomeworkKey {
    Id(u64),
    Name(String),
}

impl fmt::Display for HomeworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    pub id: Option<u64>,
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    pub fn key(&self) -> HomeworkKey {
        match self.id {
            Some(id) => HomeworkKey::Id(id),
            None => HomeworkKey::Name(self.name.clone()),
        }
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// A validated response of the status API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPayload {
    pub homeworks: Vec<Homework>,
    pub current_date: i64,
}

impl StatusPayload {
    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }
}
