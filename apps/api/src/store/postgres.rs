use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::achievement::{
    Course, Hackathon, Internship, NewUserSkill, Project, Skill, UserSkill, UserSkillRow,
};
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::store::{RecordStore, StoreError};

const USER_SKILL_SELECT: &str = r#"
    SELECT us.id, us.user_id, us.proficiency_level, us.years_of_experience,
           us.verified_count, us.created_at,
           s.id AS skill_id, s.name AS skill_name, s.category AS skill_category,
           s.created_at AS skill_created_at
    FROM user_skills us
    JOIN skills s ON s.id = us.skill_id
"#;

/// PostgreSQL-backed `RecordStore`. Cascades and uniqueness live in the schema
/// (see `migrations/`).
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a user's rows from an owned table in insertion order.
    async fn list_owned<T>(&self, table: &'static str, user_id: Uuid) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {table} WHERE user_id = $1 ORDER BY created_at, id");
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_owned(
        &self,
        table: &'static str,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1 AND user_id = $2");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Maps a unique-constraint violation to `Conflict`; everything else stays a database error.
fn conflict_on_unique(err: sqlx::Error, what: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(what.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn resolve_token(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        Ok(sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM api_tokens WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_user(&self, user: &User) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2, phone = $3, location = $4, linkedin_url = $5,
                github_url = $6, portfolio_url = $7, bio = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(&user.location)
        .bind(&user.linkedin_url)
        .bind(&user.github_url)
        .bind(&user.portfolio_url)
        .bind(&user.bio)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user.id)))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            info!("Deleted user {user_id} and all owned records");
        }
        Ok(result.rows_affected() > 0)
    }

    // ── internships ─────────────────────────────────────────────────────────

    async fn list_internships(&self, user_id: Uuid) -> Result<Vec<Internship>, StoreError> {
        self.list_owned("internships", user_id).await
    }

    async fn insert_internship(&self, r: &Internship) -> Result<Internship, StoreError> {
        Ok(sqlx::query_as::<_, Internship>(
            r#"
            INSERT INTO internships
                (id, user_id, company_name, position, location, start_date, end_date,
                 is_current, description, achievements, skills_used, certificate_url,
                 verification_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.company_name)
        .bind(&r.position)
        .bind(&r.location)
        .bind(r.start_date)
        .bind(r.end_date)
        .bind(r.is_current)
        .bind(&r.description)
        .bind(&r.achievements)
        .bind(&r.skills_used)
        .bind(&r.certificate_url)
        .bind(r.verification_status.as_str())
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_internship(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("internships", user_id, id).await
    }

    // ── courses ─────────────────────────────────────────────────────────────

    async fn list_courses(&self, user_id: Uuid) -> Result<Vec<Course>, StoreError> {
        self.list_owned("courses", user_id).await
    }

    async fn insert_course(&self, r: &Course) -> Result<Course, StoreError> {
        Ok(sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses
                (id, user_id, course_name, platform, instructor, completion_date,
                 duration_hours, grade, description, skills_learned, certificate_url,
                 certificate_id, verification_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.course_name)
        .bind(&r.platform)
        .bind(&r.instructor)
        .bind(r.completion_date)
        .bind(r.duration_hours)
        .bind(&r.grade)
        .bind(&r.description)
        .bind(&r.skills_learned)
        .bind(&r.certificate_url)
        .bind(&r.certificate_id)
        .bind(r.verification_status.as_str())
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_course(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("courses", user_id, id).await
    }

    // ── hackathons ──────────────────────────────────────────────────────────

    async fn list_hackathons(&self, user_id: Uuid) -> Result<Vec<Hackathon>, StoreError> {
        self.list_owned("hackathons", user_id).await
    }

    async fn insert_hackathon(&self, r: &Hackathon) -> Result<Hackathon, StoreError> {
        Ok(sqlx::query_as::<_, Hackathon>(
            r#"
            INSERT INTO hackathons
                (id, user_id, hackathon_name, organizer, participation_date, team_size,
                 position, project_name, project_description, technologies_used,
                 project_url, certificate_url, verification_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.hackathon_name)
        .bind(&r.organizer)
        .bind(r.participation_date)
        .bind(r.team_size)
        .bind(&r.position)
        .bind(&r.project_name)
        .bind(&r.project_description)
        .bind(&r.technologies_used)
        .bind(&r.project_url)
        .bind(&r.certificate_url)
        .bind(r.verification_status.as_str())
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_hackathon(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("hackathons", user_id, id).await
    }

    // ── projects ────────────────────────────────────────────────────────────

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>, StoreError> {
        self.list_owned("projects", user_id).await
    }

    async fn insert_project(&self, r: &Project) -> Result<Project, StoreError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (id, user_id, project_name, project_type, start_date, end_date, is_ongoing,
                 description, technologies, role, team_size, github_url, live_url,
                 verification_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.project_name)
        .bind(&r.project_type)
        .bind(r.start_date)
        .bind(r.end_date)
        .bind(r.is_ongoing)
        .bind(&r.description)
        .bind(&r.technologies)
        .bind(&r.role)
        .bind(r.team_size)
        .bind(&r.github_url)
        .bind(&r.live_url)
        .bind(r.verification_status.as_str())
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("projects", user_id, id).await
    }

    // ── skills ──────────────────────────────────────────────────────────────

    async fn list_user_skills(&self, user_id: Uuid) -> Result<Vec<UserSkill>, StoreError> {
        let sql = format!("{USER_SKILL_SELECT} WHERE us.user_id = $1 ORDER BY us.created_at, us.id");
        let rows = sqlx::query_as::<_, UserSkillRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserSkill::from).collect())
    }

    async fn add_user_skill(
        &self,
        user_id: Uuid,
        new: &NewUserSkill,
    ) -> Result<UserSkill, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO skills (id, name, category) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(&new.skill_name)
        .bind(&new.category)
        .execute(&mut *tx)
        .await?;

        let skill = sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE name = $1")
            .bind(&new.skill_name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                StoreError::Corrupt(format!("skill '{}' missing after upsert", new.skill_name))
            })?;

        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO user_skills
                (id, user_id, skill_id, proficiency_level, years_of_experience, verified_count, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(skill.id)
        .bind(&new.proficiency_level)
        .bind(new.years_of_experience)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Skill already added"))?;

        tx.commit().await?;

        Ok(UserSkill {
            id,
            user_id,
            skill,
            proficiency_level: new.proficiency_level.clone(),
            years_of_experience: new.years_of_experience,
            verified_count: 0,
            created_at,
        })
    }

    async fn delete_user_skill(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("user_skills", user_id, id).await
    }

    // ── resumes ─────────────────────────────────────────────────────────────

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<Resume>, StoreError> {
        self.list_owned("resumes", user_id).await
    }

    async fn find_resume(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, StoreError> {
        Ok(
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_resume(&self, r: &Resume) -> Result<Resume, StoreError> {
        sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (id, user_id, title, template, summary, is_ai_generated_summary,
                 configuration, is_public, public_url_slug, view_count,
                 last_generated_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.title)
        .bind(r.template.as_str())
        .bind(&r.summary)
        .bind(r.is_ai_generated_summary)
        .bind(&r.configuration)
        .bind(r.is_public)
        .bind(&r.public_url_slug)
        .bind(r.view_count)
        .bind(r.last_generated_at)
        .bind(r.created_at)
        .bind(r.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Public URL slug already in use"))
    }

    async fn update_resume(&self, r: &Resume) -> Result<Resume, StoreError> {
        sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET title = $3, template = $4, summary = $5, is_ai_generated_summary = $6,
                configuration = $7, is_public = $8, public_url_slug = $9,
                last_generated_at = $10, updated_at = $11
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(r.id)
        .bind(r.user_id)
        .bind(&r.title)
        .bind(r.template.as_str())
        .bind(&r.summary)
        .bind(r.is_ai_generated_summary)
        .bind(&r.configuration)
        .bind(r.is_public)
        .bind(&r.public_url_slug)
        .bind(r.last_generated_at)
        .bind(r.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Public URL slug already in use"))?
        .ok_or_else(|| StoreError::NotFound(format!("Resume {} not found", r.id)))
    }

    async fn delete_resume(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.delete_owned("resumes", user_id, id).await
    }

    async fn view_public_resume(&self, slug: &str) -> Result<Option<Resume>, StoreError> {
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET view_count = view_count + 1
            WHERE public_url_slug = $1 AND is_public
            RETURNING *
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?)
    }
}
