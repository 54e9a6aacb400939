//! Record Store: persistence port for users, achievements, skills and resumes.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`. Production uses `PgRecordStore`;
//! tests use the in-memory double in `memory`.
//!
//! Every owned-record read and delete is scoped by `user_id`: a record owned by
//! someone else behaves exactly like a missing one.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::achievement::{
    Course, Hackathon, Internship, NewUserSkill, Project, UserSkill,
};
use crate::models::resume::Resume;
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    // ── identity ────────────────────────────────────────────────────────────

    /// Maps a bearer credential to the owning user, ignoring expired tokens.
    async fn resolve_token(&self, token: &str) -> Result<Option<Uuid>, StoreError>;

    // ── users ───────────────────────────────────────────────────────────────

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    /// Persists every profile field of `user`. Fails with `NotFound` if absent.
    async fn update_user(&self, user: &User) -> Result<User, StoreError>;

    /// Hard-deletes the user and everything they own. Global skills survive.
    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError>;

    // ── achievements ────────────────────────────────────────────────────────

    async fn list_internships(&self, user_id: Uuid) -> Result<Vec<Internship>, StoreError>;
    async fn insert_internship(&self, record: &Internship) -> Result<Internship, StoreError>;
    async fn delete_internship(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    async fn list_courses(&self, user_id: Uuid) -> Result<Vec<Course>, StoreError>;
    async fn insert_course(&self, record: &Course) -> Result<Course, StoreError>;
    async fn delete_course(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    async fn list_hackathons(&self, user_id: Uuid) -> Result<Vec<Hackathon>, StoreError>;
    async fn insert_hackathon(&self, record: &Hackathon) -> Result<Hackathon, StoreError>;
    async fn delete_hackathon(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>, StoreError>;
    async fn insert_project(&self, record: &Project) -> Result<Project, StoreError>;
    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // ── skills ──────────────────────────────────────────────────────────────

    async fn list_user_skills(&self, user_id: Uuid) -> Result<Vec<UserSkill>, StoreError>;

    /// Gets or creates the global skill by name, then assigns it to the user.
    /// A second assignment of the same skill fails with `Conflict`; nothing is
    /// written in that case.
    async fn add_user_skill(
        &self,
        user_id: Uuid,
        new: &NewUserSkill,
    ) -> Result<UserSkill, StoreError>;

    /// Removes the assignment with `id` (not the global skill).
    async fn delete_user_skill(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // ── resumes ─────────────────────────────────────────────────────────────

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<Resume>, StoreError>;
    async fn find_resume(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, StoreError>;
    async fn insert_resume(&self, resume: &Resume) -> Result<Resume, StoreError>;

    /// Overwrites every mutable field of the resume identified by
    /// `(resume.user_id, resume.id)`. Fails with `NotFound` if absent.
    async fn update_resume(&self, resume: &Resume) -> Result<Resume, StoreError>;
    async fn delete_resume(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    /// Looks up a public resume by slug and increments its view counter.
    async fn view_public_resume(&self, slug: &str) -> Result<Option<Resume>, StoreError>;
}
