//! Rule-based summary composer. Deterministic and infallible: it reads only
//! the snapshot, so the same snapshot always yields the same text.

use crate::resumes::snapshot::UserSnapshot;

const GENERIC_OPENING: &str =
    "Motivated and skilled professional passionate about technology and innovation.";
const CLOSING: &str = "Eager to contribute to innovative projects and drive meaningful impact.";
const MAX_SKILLS: usize = 5;

/// `"1 internship"`, `"2 internships"`.
fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn fallback_summary(snapshot: &UserSnapshot) -> String {
    let internships = snapshot.internships.len();
    let projects = snapshot.projects.len();
    let hackathons = snapshot.hackathons.len();
    let courses = snapshot.courses.len();

    let mut sentences: Vec<String> = Vec::new();

    match snapshot.bio.as_deref() {
        Some(bio) if !bio.trim().is_empty() => sentences.push(bio.to_string()),
        _ if internships > 0 => sentences.push(format!(
            "Results-driven professional with experience from {}.",
            count_noun(internships, "internship")
        )),
        _ => sentences.push(GENERIC_OPENING.to_string()),
    }

    let achievements: Vec<String> = [
        (internships, "internship"),
        (projects, "project"),
        (hackathons, "hackathon"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, noun)| count_noun(count, noun))
    .collect();
    if !achievements.is_empty() {
        sentences.push(format!(
            "Demonstrated expertise through {}.",
            achievements.join(", ")
        ));
    }

    let skills: Vec<&str> = snapshot.skill_names().take(MAX_SKILLS).collect();
    if !skills.is_empty() {
        sentences.push(format!("Proficient in {}.", skills.join(", ")));
    }

    if courses > 0 {
        sentences.push(format!(
            "Committed to continuous learning with {}.",
            count_noun(courses, "completed course")
        ));
    }

    sentences.push(CLOSING.to_string());
    sentences.join(" ")
}
