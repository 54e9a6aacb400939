//! Aggregator: collects a user's full achievement graph into one denormalized
//! snapshot for summary generation, the full resume view and PDF export.
//!
//! Dates are ISO-8601 strings (absent when unset) and verification status is
//! its lowercase tag. Sequence order is whatever the store returns; nothing
//! here sorts.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::achievement::{Course, Hackathon, Internship, Project, UserSkill};
use crate::models::dates::to_iso;
use crate::models::user::User;
use crate::store::RecordStore;

// ────────────────────────────────────────────────────────────────────────────
// Snapshot types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSnapshot {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub internships: Vec<InternshipEntry>,
    pub courses: Vec<CourseEntry>,
    pub hackathons: Vec<HackathonEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternshipEntry {
    pub id: Uuid,
    pub company_name: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Option<String>,
    pub skills_used: Option<String>,
    pub verification_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseEntry {
    pub id: Uuid,
    pub course_name: String,
    pub platform: String,
    pub instructor: Option<String>,
    pub completion_date: Option<String>,
    pub duration_hours: Option<i32>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub skills_learned: Option<String>,
    pub verification_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HackathonEntry {
    pub id: Uuid,
    pub hackathon_name: String,
    pub organizer: String,
    pub participation_date: Option<String>,
    pub team_size: Option<i32>,
    pub position: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub technologies_used: Option<String>,
    pub verification_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectEntry {
    pub id: Uuid,
    pub project_name: String,
    pub project_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_ongoing: bool,
    pub description: String,
    pub technologies: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i32>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub verification_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillEntry {
    pub id: Uuid,
    pub skill: SkillRef,
    pub proficiency_level: Option<String>,
    pub years_of_experience: Option<i32>,
    pub verified_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRef {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
}

impl UserSnapshot {
    /// Skill names in snapshot order.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.skill.name.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Conversions
// ────────────────────────────────────────────────────────────────────────────

impl From<&Internship> for InternshipEntry {
    fn from(i: &Internship) -> Self {
        InternshipEntry {
            id: i.id,
            company_name: i.company_name.clone(),
            position: i.position.clone(),
            location: i.location.clone(),
            start_date: Some(to_iso(&i.start_date)),
            end_date: i.end_date.as_ref().map(to_iso),
            is_current: i.is_current,
            description: i.description.clone(),
            achievements: i.achievements.clone(),
            skills_used: i.skills_used.clone(),
            verification_status: i.verification_status.to_string(),
        }
    }
}

impl From<&Course> for CourseEntry {
    fn from(c: &Course) -> Self {
        CourseEntry {
            id: c.id,
            course_name: c.course_name.clone(),
            platform: c.platform.clone(),
            instructor: c.instructor.clone(),
            completion_date: c.completion_date.as_ref().map(to_iso),
            duration_hours: c.duration_hours,
            grade: c.grade.clone(),
            description: c.description.clone(),
            skills_learned: c.skills_learned.clone(),
            verification_status: c.verification_status.to_string(),
        }
    }
}

impl From<&Hackathon> for HackathonEntry {
    fn from(h: &Hackathon) -> Self {
        HackathonEntry {
            id: h.id,
            hackathon_name: h.hackathon_name.clone(),
            organizer: h.organizer.clone(),
            participation_date: Some(to_iso(&h.participation_date)),
            team_size: h.team_size,
            position: h.position.clone(),
            project_name: h.project_name.clone(),
            project_description: h.project_description.clone(),
            technologies_used: h.technologies_used.clone(),
            verification_status: h.verification_status.to_string(),
        }
    }
}

impl From<&Project> for ProjectEntry {
    fn from(p: &Project) -> Self {
        ProjectEntry {
            id: p.id,
            project_name: p.project_name.clone(),
            project_type: p.project_type.clone(),
            start_date: Some(to_iso(&p.start_date)),
            end_date: p.end_date.as_ref().map(to_iso),
            is_ongoing: p.is_ongoing,
            description: p.description.clone(),
            technologies: p.technologies.clone(),
            role: p.role.clone(),
            team_size: p.team_size,
            github_url: p.github_url.clone(),
            live_url: p.live_url.clone(),
            verification_status: p.verification_status.to_string(),
        }
    }
}

impl From<&UserSkill> for SkillEntry {
    fn from(us: &UserSkill) -> Self {
        SkillEntry {
            id: us.id,
            skill: SkillRef {
                id: us.skill.id,
                name: us.skill.name.clone(),
                category: us.skill.category.clone(),
            },
            proficiency_level: us.proficiency_level.clone(),
            years_of_experience: us.years_of_experience,
            verified_count: us.verified_count,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Pure assembly step. Preserves the order of every input slice.
pub fn assemble(
    user: &User,
    internships: &[Internship],
    courses: &[Course],
    hackathons: &[Hackathon],
    projects: &[Project],
    skills: &[UserSkill],
) -> UserSnapshot {
    UserSnapshot {
        id: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        phone: user.phone.clone(),
        location: user.location.clone(),
        linkedin_url: user.linkedin_url.clone(),
        github_url: user.github_url.clone(),
        portfolio_url: user.portfolio_url.clone(),
        bio: user.bio.clone(),
        internships: internships.iter().map(InternshipEntry::from).collect(),
        courses: courses.iter().map(CourseEntry::from).collect(),
        hackathons: hackathons.iter().map(HackathonEntry::from).collect(),
        projects: projects.iter().map(ProjectEntry::from).collect(),
        skills: skills.iter().map(SkillEntry::from).collect(),
    }
}

/// Loads every record the user owns and assembles the snapshot. Read-only.
pub async fn build_snapshot(store: &dyn RecordStore, user: &User) -> Result<UserSnapshot, AppError> {
    let (internships, courses, hackathons, projects, skills) = tokio::try_join!(
        store.list_internships(user.id),
        store.list_courses(user.id),
        store.list_hackathons(user.id),
        store.list_projects(user.id),
        store.list_user_skills(user.id),
    )?;

    Ok(assemble(
        user,
        &internships,
        &courses,
        &hackathons,
        &projects,
        &skills,
    ))
}
