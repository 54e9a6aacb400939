//! Resume composition: turns a snapshot and summary into an ordered list of
//! styled text blocks. No geometry happens here; the PDF writer wraps and
//! paginates.
//!
//! Section order is fixed: header, Professional Summary, Experience, Projects,
//! Education & Certifications, Skills, Hackathons & Competitions. A section
//! whose backing sequence is empty is omitted entirely.

use crate::layout::font_metrics::FontWeight;
use crate::resumes::snapshot::{
    CourseEntry, HackathonEntry, InternshipEntry, ProjectEntry, UserSnapshot,
};

/// Joins contact values and links.
pub const SEPARATOR: &str = " • ";

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub weight: FontWeight,
    /// sRGB, 0-255.
    pub color: [u8; 3],
    pub align: Align,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
}

impl TextStyle {
    /// Baseline-to-baseline distance.
    pub fn leading_pt(&self) -> f32 {
        self.size_pt * 1.2
    }
}

const ACCENT: [u8; 3] = [0x1e, 0x40, 0xaf];

pub const TITLE: TextStyle = TextStyle {
    size_pt: 24.0,
    weight: FontWeight::Bold,
    color: ACCENT,
    align: Align::Center,
    space_before_pt: 0.0,
    space_after_pt: 30.0,
};

pub const CONTACT: TextStyle = TextStyle {
    size_pt: 10.0,
    weight: FontWeight::Regular,
    color: [0x4b, 0x55, 0x63],
    align: Align::Center,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
};

pub const HEADING: TextStyle = TextStyle {
    size_pt: 14.0,
    weight: FontWeight::Bold,
    color: ACCENT,
    align: Align::Left,
    space_before_pt: 12.0,
    space_after_pt: 12.0,
};

pub const SUBHEADING: TextStyle = TextStyle {
    size_pt: 12.0,
    weight: FontWeight::Bold,
    color: [0x11, 0x18, 0x27],
    align: Align::Left,
    space_before_pt: 0.0,
    space_after_pt: 4.0,
};

pub const BODY: TextStyle = TextStyle {
    size_pt: 11.0,
    weight: FontWeight::Regular,
    color: [0x37, 0x41, 0x51],
    align: Align::Left,
    space_before_pt: 0.0,
    space_after_pt: 6.0,
};

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Contact(String),
    /// Centered line of labelled hyperlinks joined by `SEPARATOR`.
    Links(Vec<Link>),
    Heading(String),
    Subheading(String),
    Body(String),
    /// Bold label followed by body text.
    Labeled { label: String, text: String },
    /// Vertical gap in points.
    Spacer(f32),
}

impl Block {
    pub fn style(&self) -> Option<&'static TextStyle> {
        match self {
            Block::Title(_) => Some(&TITLE),
            Block::Contact(_) | Block::Links(_) => Some(&CONTACT),
            Block::Heading(_) => Some(&HEADING),
            Block::Subheading(_) => Some(&SUBHEADING),
            Block::Body(_) | Block::Labeled { .. } => Some(&BODY),
            Block::Spacer(_) => None,
        }
    }

    /// The visible text of the block, as a reader would see it.
    pub fn text(&self) -> String {
        match self {
            Block::Title(t)
            | Block::Contact(t)
            | Block::Heading(t)
            | Block::Subheading(t)
            | Block::Body(t) => t.clone(),
            Block::Links(links) => links
                .iter()
                .map(|l| l.label.as_str())
                .collect::<Vec<_>>()
                .join(SEPARATOR),
            Block::Labeled { label, text } => format!("{label} {text}"),
            Block::Spacer(_) => String::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// The `YYYY-MM-DD` prefix of an ISO-8601 string. A slice, not a reparse.
fn date10(iso: &str) -> String {
    iso.chars().take(10).collect()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builds the block list for `snapshot`. `summary` is the resume's stored
/// summary; the section is omitted when it is absent or blank.
pub fn compose(snapshot: &UserSnapshot, summary: Option<&str>) -> Vec<Block> {
    let mut blocks = vec![Block::Title(snapshot.full_name.clone())];

    let contact: Vec<&str> = [
        Some(snapshot.email.as_str()),
        snapshot.phone.as_deref(),
        snapshot.location.as_deref(),
    ]
    .into_iter()
    .filter_map(present)
    .collect();
    if !contact.is_empty() {
        blocks.push(Block::Contact(contact.join(SEPARATOR)));
        blocks.push(Block::Spacer(7.2));
    }

    let links: Vec<Link> = [
        ("LinkedIn", snapshot.linkedin_url.as_deref()),
        ("GitHub", snapshot.github_url.as_deref()),
        ("Portfolio", snapshot.portfolio_url.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        present(url).map(|url| Link {
            label: label.to_string(),
            url: url.to_string(),
        })
    })
    .collect();
    if !links.is_empty() {
        blocks.push(Block::Links(links));
    }
    blocks.push(Block::Spacer(21.6));

    if let Some(summary) = present(summary) {
        blocks.push(Block::Heading("Professional Summary".to_string()));
        blocks.push(Block::Body(summary.to_string()));
        blocks.push(Block::Spacer(14.4));
    }

    if !snapshot.internships.is_empty() {
        blocks.push(Block::Heading("Experience".to_string()));
        for internship in &snapshot.internships {
            push_internship(&mut blocks, internship);
        }
        blocks.push(Block::Spacer(7.2));
    }

    if !snapshot.projects.is_empty() {
        blocks.push(Block::Heading("Projects".to_string()));
        for project in &snapshot.projects {
            push_project(&mut blocks, project);
        }
        blocks.push(Block::Spacer(7.2));
    }

    if !snapshot.courses.is_empty() {
        blocks.push(Block::Heading("Education & Certifications".to_string()));
        for course in &snapshot.courses {
            push_course(&mut blocks, course);
        }
        blocks.push(Block::Spacer(7.2));
    }

    if !snapshot.skills.is_empty() {
        blocks.push(Block::Heading("Skills".to_string()));
        blocks.push(Block::Body(
            snapshot.skill_names().collect::<Vec<_>>().join(", "),
        ));
        blocks.push(Block::Spacer(14.4));
    }

    if !snapshot.hackathons.is_empty() {
        blocks.push(Block::Heading("Hackathons & Competitions".to_string()));
        for hackathon in &snapshot.hackathons {
            push_hackathon(&mut blocks, hackathon);
        }
    }

    blocks
}

fn push_internship(blocks: &mut Vec<Block>, internship: &InternshipEntry) {
    blocks.push(Block::Subheading(internship.position.clone()));

    let mut line = internship.company_name.clone();
    if let Some(start) = internship.start_date.as_deref() {
        let end = if internship.is_current {
            "Present".to_string()
        } else {
            internship.end_date.as_deref().map(date10).unwrap_or_default()
        };
        line.push_str(&format!(" | {} - {end}", date10(start)));
    }
    blocks.push(Block::Body(line.trim_end().to_string()));

    if let Some(description) = present(internship.description.as_deref()) {
        blocks.push(Block::Body(description.to_string()));
    }
    if let Some(achievements) = present(internship.achievements.as_deref()) {
        blocks.push(Block::Body(format!("• {achievements}")));
    }
    blocks.push(Block::Spacer(10.8));
}

fn push_project(blocks: &mut Vec<Block>, project: &ProjectEntry) {
    blocks.push(Block::Subheading(project.project_name.clone()));

    if let Some(start) = project.start_date.as_deref() {
        let end = if project.is_ongoing {
            "Ongoing".to_string()
        } else {
            project.end_date.as_deref().map(date10).unwrap_or_default()
        };
        let line = format!("{} - {end}", date10(start));
        blocks.push(Block::Body(line.trim_end().to_string()));
    }
    if let Some(description) = present(Some(project.description.as_str())) {
        blocks.push(Block::Body(description.to_string()));
    }
    if let Some(technologies) = present(project.technologies.as_deref()) {
        blocks.push(Block::Labeled {
            label: "Technologies:".to_string(),
            text: technologies.to_string(),
        });
    }
    blocks.push(Block::Spacer(10.8));
}

fn push_course(blocks: &mut Vec<Block>, course: &CourseEntry) {
    blocks.push(Block::Subheading(course.course_name.clone()));
    blocks.push(Block::Body(course.platform.clone()));
    if let Some(completed) = present(course.completion_date.as_deref()) {
        blocks.push(Block::Body(date10(completed)));
    }
    blocks.push(Block::Spacer(7.2));
}

fn push_hackathon(blocks: &mut Vec<Block>, hackathon: &HackathonEntry) {
    blocks.push(Block::Subheading(hackathon.hackathon_name.clone()));

    let mut line = hackathon.organizer.clone();
    if let Some(date) = present(hackathon.participation_date.as_deref()) {
        line.push_str(&format!(" | {}", date10(date)));
    }
    blocks.push(Block::Body(line));

    if let Some(position) = present(hackathon.position.as_deref()) {
        blocks.push(Block::Body(position.to_string()));
    }
    blocks.push(Block::Spacer(7.2));
}
