use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }
}

/// The validated part of one API response.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkUpdate {
    pub homeworks: Vec<serde_json::Value>,
    pub cursor: Option<i64>,
}

impl HomeworkUpdate {
    /// The API lists submissions most recent first.
    pub fn latest(&self) -> Option<&serde_json::Value> {
        self.homeworks.first()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub homework_name: String,
    pub status: HomeworkStatus,
    pub message: String,
}
