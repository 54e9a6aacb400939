//! Achievement records (internships, courses, hackathons, projects) and the
//! global skill catalogue with its per-user assignments.
//!
//! The `skills_used` / `skills_learned` / `technologies_used` / `technologies`
//! fields are free-form comma-separated strings. They are stored and returned
//! verbatim and never normalised into a relation.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::dates;

/// Verification state of an achievement. Set externally; nothing in this
/// service transitions it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for VerificationStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("unknown verification status '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stored records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Internship {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Option<String>,
    pub skills_used: Option<String>,
    pub certificate_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_name: String,
    pub platform: String,
    pub instructor: Option<String>,
    pub completion_date: Option<NaiveDateTime>,
    pub duration_hours: Option<i32>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub skills_learned: Option<String>,
    pub certificate_url: Option<String>,
    pub certificate_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Hackathon {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hackathon_name: String,
    pub organizer: String,
    pub participation_date: NaiveDateTime,
    pub team_size: Option<i32>,
    /// Placement, e.g. "Winner" or "Participant".
    pub position: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub technologies_used: Option<String>,
    pub project_url: Option<String>,
    pub certificate_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_name: String,
    pub project_type: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub is_ongoing: bool,
    pub description: String,
    pub technologies: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

/// Global, name-unique skill tag shared by all users.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's claim on a global skill. At most one per (user, skill).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSkill {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub skill: Skill,
    pub proficiency_level: Option<String>,
    pub years_of_experience: Option<i32>,
    pub verified_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Flat join row of `user_skills` + `skills`.
#[derive(Debug, Clone, FromRow)]
pub struct UserSkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub proficiency_level: Option<String>,
    pub years_of_experience: Option<i32>,
    pub verified_count: i32,
    pub created_at: DateTime<Utc>,
    pub skill_id: Uuid,
    pub skill_name: String,
    pub skill_category: Option<String>,
    pub skill_created_at: DateTime<Utc>,
}

impl From<UserSkillRow> for UserSkill {
    fn from(row: UserSkillRow) -> Self {
        UserSkill {
            id: row.id,
            user_id: row.user_id,
            skill: Skill {
                id: row.skill_id,
                name: row.skill_name,
                category: row.skill_category,
                created_at: row.skill_created_at,
            },
            proficiency_level: row.proficiency_level,
            years_of_experience: row.years_of_experience,
            verified_count: row.verified_count,
            created_at: row.created_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Create payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewInternship {
    pub company_name: String,
    pub position: String,
    pub location: Option<String>,
    #[serde(deserialize_with = "dates::flexible")]
    pub start_date: NaiveDateTime,
    #[serde(default, deserialize_with = "dates::flexible_option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Option<String>,
    pub skills_used: Option<String>,
    pub certificate_url: Option<String>,
    pub verification_status: Option<VerificationStatus>,
}

impl NewInternship {
    pub fn into_record(self, user_id: Uuid) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            user_id,
            company_name: self.company_name,
            position: self.position,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            is_current: self.is_current,
            description: self.description,
            achievements: self.achievements,
            skills_used: self.skills_used,
            certificate_url: self.certificate_url,
            verification_status: self.verification_status.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub course_name: String,
    pub platform: String,
    pub instructor: Option<String>,
    #[serde(default, deserialize_with = "dates::flexible_option")]
    pub completion_date: Option<NaiveDateTime>,
    pub duration_hours: Option<i32>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub skills_learned: Option<String>,
    pub certificate_url: Option<String>,
    pub certificate_id: Option<String>,
    pub verification_status: Option<VerificationStatus>,
}

impl NewCourse {
    pub fn into_record(self, user_id: Uuid) -> Course {
        Course {
            id: Uuid::new_v4(),
            user_id,
            course_name: self.course_name,
            platform: self.platform,
            instructor: self.instructor,
            completion_date: self.completion_date,
            duration_hours: self.duration_hours,
            grade: self.grade,
            description: self.description,
            skills_learned: self.skills_learned,
            certificate_url: self.certificate_url,
            certificate_id: self.certificate_id,
            verification_status: self.verification_status.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHackathon {
    pub hackathon_name: String,
    pub organizer: String,
    #[serde(deserialize_with = "dates::flexible")]
    pub participation_date: NaiveDateTime,
    pub team_size: Option<i32>,
    pub position: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub technologies_used: Option<String>,
    pub project_url: Option<String>,
    pub certificate_url: Option<String>,
    pub verification_status: Option<VerificationStatus>,
}

impl NewHackathon {
    pub fn into_record(self, user_id: Uuid) -> Hackathon {
        Hackathon {
            id: Uuid::new_v4(),
            user_id,
            hackathon_name: self.hackathon_name,
            organizer: self.organizer,
            participation_date: self.participation_date,
            team_size: self.team_size,
            position: self.position,
            project_name: self.project_name,
            project_description: self.project_description,
            technologies_used: self.technologies_used,
            project_url: self.project_url,
            certificate_url: self.certificate_url,
            verification_status: self.verification_status.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub project_type: Option<String>,
    #[serde(deserialize_with = "dates::flexible")]
    pub start_date: NaiveDateTime,
    #[serde(default, deserialize_with = "dates::flexible_option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_ongoing: bool,
    pub description: String,
    pub technologies: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub verification_status: Option<VerificationStatus>,
}

impl NewProject {
    pub fn into_record(self, user_id: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id,
            project_name: self.project_name,
            project_type: self.project_type,
            start_date: self.start_date,
            end_date: self.end_date,
            is_ongoing: self.is_ongoing,
            description: self.description,
            technologies: self.technologies,
            role: self.role,
            team_size: self.team_size,
            github_url: self.github_url,
            live_url: self.live_url,
            verification_status: self.verification_status.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

/// Assigns a skill to the caller, creating the global skill by name if needed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserSkill {
    pub skill_name: String,
    pub category: Option<String>,
    pub proficiency_level: Option<String>,
    pub years_of_experience: Option<i32>,
}
