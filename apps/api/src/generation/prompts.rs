//! Prompt text for summary generation.

use crate::resumes::snapshot::UserSnapshot;

pub const SUMMARY_SYSTEM: &str =
    "You are a professional resume writer. Create concise, impactful professional summaries.";

const SUMMARY_INSTRUCTION: &str = "Write a compelling 3-4 sentence professional summary that highlights their key strengths and value proposition.";

const MAX_COMPANIES: usize = 3;
const MAX_PROJECTS: usize = 3;
const MAX_TECHNOLOGIES: usize = 5;
const MAX_SKILLS: usize = 8;

/// Builds the user prompt sent to every external tier.
///
/// Lines for empty sequences are omitted.
pub fn build_summary_prompt(snapshot: &UserSnapshot) -> String {
    let name = if snapshot.full_name.trim().is_empty() {
        "the candidate"
    } else {
        snapshot.full_name.trim()
    };
    let mut prompt =
        format!("Create a professional resume summary for {name} based on the following information:\n\n");

    if !snapshot.internships.is_empty() {
        let companies: Vec<&str> = snapshot
            .internships
            .iter()
            .take(MAX_COMPANIES)
            .map(|i| i.company_name.as_str())
            .collect();
        prompt.push_str(&format!(
            "Internships: {} positions at companies including {}\n",
            snapshot.internships.len(),
            companies.join(", ")
        ));
    }

    if !snapshot.projects.is_empty() {
        let technologies: Vec<&str> = snapshot
            .projects
            .iter()
            .take(MAX_PROJECTS)
            .filter_map(|p| p.technologies.as_deref())
            .flat_map(|t| t.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .take(MAX_TECHNOLOGIES)
            .collect();
        prompt.push_str(&format!("Projects: {} projects", snapshot.projects.len()));
        if !technologies.is_empty() {
            prompt.push_str(&format!(" using technologies like {}", technologies.join(", ")));
        }
        prompt.push('\n');
    }

    if !snapshot.hackathons.is_empty() {
        prompt.push_str(&format!(
            "Hackathons: Participated in {} hackathons\n",
            snapshot.hackathons.len()
        ));
    }

    if !snapshot.courses.is_empty() {
        prompt.push_str(&format!("Courses: Completed {} courses\n", snapshot.courses.len()));
    }

    let skills: Vec<&str> = snapshot.skill_names().take(MAX_SKILLS).collect();
    if !skills.is_empty() {
        prompt.push_str(&format!("Skills: {}\n", skills.join(", ")));
    }

    prompt.push('\n');
    prompt.push_str(SUMMARY_INSTRUCTION);
    prompt
}
