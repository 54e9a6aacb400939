//! Resume write paths: create, partial update and summary regeneration.
//!
//! Every write path keeps `public_url_slug` present exactly when the resume
//! is public. Summary text is computed before the single store write, so a
//! failed write leaves nothing behind.

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::SummaryGenerator;
use crate::models::resume::{NewResume, Resume, ResumeTemplate, ResumeUpdate};
use crate::models::user::User;
use crate::resumes::snapshot::{build_snapshot, UserSnapshot};
use crate::store::RecordStore;
use crate::validation::{validate_new_resume, validate_resume_update};

const SLUG_SUFFIX_LEN: usize = 8;

/// Resume fields plus the owner's snapshot, as returned by the detail routes.
#[derive(Debug, Serialize)]
pub struct ResumeFullView {
    #[serde(flatten)]
    pub resume: Resume,
    pub user_data: UserSnapshot,
}

/// `{full name lowercased, spaces as hyphens}-{8 hex chars}`.
///
/// Characters outside `[a-z0-9-]` are dropped; an empty base becomes `resume`.
pub fn mint_slug(full_name: &str) -> String {
    let base: String = full_name
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let base = if base.is_empty() { "resume".to_string() } else { base };
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SLUG_SUFFIX_LEN)
        .collect();
    format!("{base}-{suffix}")
}

/// Applies a visibility change. Going public keeps an existing slug or mints
/// one; going private clears it.
pub fn apply_visibility(resume: &mut Resume, is_public: bool, full_name: &str) {
    resume.is_public = is_public;
    if !is_public {
        resume.public_url_slug = None;
    } else if resume.public_url_slug.is_none() {
        resume.public_url_slug = Some(mint_slug(full_name));
    }
}

fn parse_template(raw: &str) -> Result<ResumeTemplate, AppError> {
    raw.parse().map_err(|message: String| AppError::invalid("template", message))
}

async fn compose_summary(
    store: &dyn RecordStore,
    summaries: &SummaryGenerator,
    user: &User,
) -> Result<String, AppError> {
    let snapshot = build_snapshot(store, user).await?;
    Ok(summaries.generate(&snapshot).await)
}

/// A summary is generated when the flag is set or no summary text was given.
/// The stored flag is the caller's flag either way.
pub async fn create_resume(
    store: &dyn RecordStore,
    summaries: &SummaryGenerator,
    user: &User,
    new: NewResume,
) -> Result<Resume, AppError> {
    validate_new_resume(&new)?;
    let template = parse_template(&new.template)?;

    let wants_generation = new.is_ai_generated_summary
        || new.summary.as_deref().map_or(true, |s| s.trim().is_empty());
    let (summary, last_generated_at) = if wants_generation {
        let text = compose_summary(store, summaries, user).await?;
        (Some(text), Some(Utc::now()))
    } else {
        (new.summary, None)
    };

    let now = Utc::now();
    let mut resume = Resume {
        id: Uuid::new_v4(),
        user_id: user.id,
        title: new.title,
        template,
        summary,
        is_ai_generated_summary: new.is_ai_generated_summary,
        configuration: new.configuration,
        is_public: false,
        public_url_slug: None,
        view_count: 0,
        last_generated_at,
        created_at: now,
        updated_at: now,
    };
    apply_visibility(&mut resume, new.is_public, &user.full_name);

    let created = store.insert_resume(&resume).await?;
    info!("Created resume {} for user {}", created.id, user.id);
    Ok(created)
}

/// Partial update. The summary is regenerated only when the request carries
/// `is_ai_generated_summary: true`, and that replaces any summary text in the
/// same request.
pub async fn update_resume(
    store: &dyn RecordStore,
    summaries: &SummaryGenerator,
    user: &User,
    id: Uuid,
    update: ResumeUpdate,
) -> Result<Resume, AppError> {
    validate_resume_update(&update)?;

    let mut resume = store
        .find_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    if let Some(title) = update.title {
        resume.title = title;
    }
    if let Some(template) = update.template {
        resume.template = parse_template(&template)?;
    }
    if let Some(summary) = update.summary {
        resume.summary = summary;
    }
    if let Some(configuration) = update.configuration {
        resume.configuration = configuration;
    }
    if let Some(is_public) = update.is_public {
        apply_visibility(&mut resume, is_public, &user.full_name);
    }
    if let Some(flag) = update.is_ai_generated_summary {
        resume.is_ai_generated_summary = flag;
        if flag {
            resume.summary = Some(compose_summary(store, summaries, user).await?);
            resume.last_generated_at = Some(Utc::now());
        }
    }
    resume.updated_at = Utc::now();

    Ok(store.update_resume(&resume).await?)
}

/// Always recomputes the summary and marks it AI-generated.
pub async fn regenerate_summary(
    store: &dyn RecordStore,
    summaries: &SummaryGenerator,
    user: &User,
    id: Uuid,
) -> Result<Resume, AppError> {
    let mut resume = store
        .find_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let now = Utc::now();
    resume.summary = Some(compose_summary(store, summaries, user).await?);
    resume.is_ai_generated_summary = true;
    resume.last_generated_at = Some(now);
    resume.updated_at = now;

    Ok(store.update_resume(&resume).await?)
}

pub async fn full_view(
    store: &dyn RecordStore,
    user: &User,
    resume: Resume,
) -> Result<ResumeFullView, AppError> {
    Ok(ResumeFullView {
        resume,
        user_data: build_snapshot(store, user).await?,
    })
}
