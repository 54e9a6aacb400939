use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::nullable;

pub const DEFAULT_RESUME_TITLE: &str = "My Resume";

/// Visual template a resume is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Modern,
    Classic,
    Minimal,
    Creative,
}

impl ResumeTemplate {
    pub const ALL: [ResumeTemplate; 4] = [
        ResumeTemplate::Modern,
        ResumeTemplate::Classic,
        ResumeTemplate::Minimal,
        ResumeTemplate::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeTemplate::Modern => "modern",
            ResumeTemplate::Classic => "classic",
            ResumeTemplate::Minimal => "minimal",
            ResumeTemplate::Creative => "creative",
        }
    }
}

impl fmt::Display for ResumeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResumeTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResumeTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "must be one of: {}",
                    ResumeTemplate::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

impl TryFrom<String> for ResumeTemplate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A named, templated view over a user's achievements.
///
/// `public_url_slug` is `Some` exactly when `is_public` is true. The store
/// does not enforce this; every write path in `resumes::service` does.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub template: ResumeTemplate,
    pub summary: Option<String>,
    pub is_ai_generated_summary: bool,
    /// Free-form display options, e.g. `{"color_scheme": "blue"}`.
    pub configuration: Option<Value>,
    pub is_public: bool,
    pub public_url_slug: Option<String>,
    pub view_count: i32,
    pub last_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_title() -> String {
    DEFAULT_RESUME_TITLE.to_string()
}

fn default_template() -> String {
    ResumeTemplate::default().as_str().to_string()
}

fn default_true() -> bool {
    true
}

/// Create payload. `template` stays a string so an unknown value is reported
/// as a field error rather than a body parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResume {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    pub summary: Option<String>,
    #[serde(default = "default_true")]
    pub is_ai_generated_summary: bool,
    pub configuration: Option<Value>,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial update payload. Absent fields are left unchanged; `summary` and
/// `configuration` may be explicitly nulled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeUpdate {
    pub title: Option<String>,
    pub template: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: Option<Option<String>>,
    pub is_ai_generated_summary: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub configuration: Option<Option<Value>>,
    pub is_public: Option<bool>,
}
