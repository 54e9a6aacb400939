//! Skill suggestions mined from the free-form comma-separated skill and
//! technology fields on a user's achievements.

use std::collections::HashSet;

use crate::models::achievement::{Course, Hackathon, Internship, Project};

/// Distinct, trimmed, non-empty names in first-seen order: internships,
/// then courses, hackathons and projects.
pub fn suggest_skills(
    internships: &[Internship],
    courses: &[Course],
    hackathons: &[Hackathon],
    projects: &[Project],
) -> Vec<String> {
    let fields = internships
        .iter()
        .map(|i| i.skills_used.as_deref())
        .chain(courses.iter().map(|c| c.skills_learned.as_deref()))
        .chain(hackathons.iter().map(|h| h.technologies_used.as_deref()))
        .chain(projects.iter().map(|p| p.technologies.as_deref()))
        .flatten();

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    for name in fields.flat_map(|f| f.split(',')).map(str::trim) {
        if !name.is_empty() && seen.insert(name) {
            suggestions.push(name.to_string());
        }
    }
    suggestions
}
