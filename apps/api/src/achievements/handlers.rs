use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::achievements::suggestions::suggest_skills;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, RecordId};
use crate::models::achievement::{
    Course, Hackathon, Internship, NewCourse, NewHackathon, NewInternship, NewProject,
    NewUserSkill, Project, UserSkill,
};
use crate::state::AppState;
use crate::validation::{
    validate_course, validate_hackathon, validate_internship, validate_project,
    validate_user_skill,
};

/// 204 when a row was removed, 404 with `what` otherwise.
fn deleted(found: bool, what: &str) -> Result<StatusCode, AppError> {
    if found {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("{what} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internships
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/achievements/internships
pub async fn handle_list_internships(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Internship>>, AppError> {
    Ok(Json(state.store.list_internships(user.id).await?))
}

/// POST /api/achievements/internships
pub async fn handle_create_internship(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewInternship>,
) -> Result<(StatusCode, Json<Internship>), AppError> {
    validate_internship(&req)?;
    let created = state
        .store
        .insert_internship(&req.into_record(user.id))
        .await?;
    info!("Created internship {} for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/achievements/internships/:id
pub async fn handle_delete_internship(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_internship(user.id, id).await?, "Internship")
}

// ────────────────────────────────────────────────────────────────────────────
// Courses
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/achievements/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.store.list_courses(user.id).await?))
}

/// POST /api/achievements/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewCourse>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    validate_course(&req)?;
    let created = state.store.insert_course(&req.into_record(user.id)).await?;
    info!("Created course {} for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/achievements/courses/:id
pub async fn handle_delete_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_course(user.id, id).await?, "Course")
}

// ────────────────────────────────────────────────────────────────────────────
// Hackathons
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/achievements/hackathons
pub async fn handle_list_hackathons(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Hackathon>>, AppError> {
    Ok(Json(state.store.list_hackathons(user.id).await?))
}

/// POST /api/achievements/hackathons
pub async fn handle_create_hackathon(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewHackathon>,
) -> Result<(StatusCode, Json<Hackathon>), AppError> {
    validate_hackathon(&req)?;
    let created = state
        .store
        .insert_hackathon(&req.into_record(user.id))
        .await?;
    info!("Created hackathon {} for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/achievements/hackathons/:id
pub async fn handle_delete_hackathon(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_hackathon(user.id, id).await?, "Hackathon")
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/achievements/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.list_projects(user.id).await?))
}

/// POST /api/achievements/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    validate_project(&req)?;
    let created = state.store.insert_project(&req.into_record(user.id)).await?;
    info!("Created project {} for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/achievements/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_project(user.id, id).await?, "Project")
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/achievements/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UserSkill>>, AppError> {
    Ok(Json(state.store.list_user_skills(user.id).await?))
}

/// POST /api/achievements/skills
///
/// 409 when the user already holds the skill.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(mut req): JsonBody<NewUserSkill>,
) -> Result<(StatusCode, Json<UserSkill>), AppError> {
    validate_user_skill(&req)?;
    req.skill_name = req.skill_name.trim().to_string();
    let created = state.store.add_user_skill(user.id, &req).await?;
    info!("Assigned skill '{}' to user {}", created.skill.name, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/achievements/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    deleted(state.store.delete_user_skill(user.id, id).await?, "Skill")
}

/// GET /api/achievements/skills/suggestions
pub async fn handle_skill_suggestions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<String>>, AppError> {
    let (internships, courses, hackathons, projects) = tokio::try_join!(
        state.store.list_internships(user.id),
        state.store.list_courses(user.id),
        state.store.list_hackathons(user.id),
        state.store.list_projects(user.id),
    )?;
    Ok(Json(suggest_skills(
        &internships,
        &courses,
        &hackathons,
        &projects,
    )))
}
