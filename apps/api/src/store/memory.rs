//! In-memory `RecordStore` used by unit and HTTP tests.
//!
//! Mirrors the PostgreSQL schema's ownership scoping, unique constraints and
//! cascade rules. Vectors preserve insertion order.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::achievement::{
    Course, Hackathon, Internship, NewUserSkill, Project, Skill, UserSkill,
};
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::store::{RecordStore, StoreError};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tokens: HashMap<String, (Uuid, DateTime<Utc>)>,
    internships: Vec<Internship>,
    courses: Vec<Course>,
    hackathons: Vec<Hackathon>,
    projects: Vec<Project>,
    skills: Vec<Skill>,
    user_skills: Vec<UserSkill>,
    resumes: Vec<Resume>,
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions a user the way the identity provider would.
    pub fn seed_user(&self, email: &str, full_name: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone: None,
            location: None,
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        };
        self.lock().users.push(user.clone());
        user
    }

    /// Issues a bearer token for `user_id` valid for `ttl`.
    pub fn seed_token(&self, user_id: Uuid, token: &str, ttl: Duration) {
        self.lock()
            .tokens
            .insert(token.to_string(), (user_id, Utc::now() + ttl));
    }

    pub fn skill_count(&self) -> usize {
        self.lock().skills.len()
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.lock().skills.iter().any(|s| s.name == name)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory store poisoned")
    }
}

fn remove_owned<T>(rows: &mut Vec<T>, owned: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !owned(r));
    rows.len() < before
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn resolve_token(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        Ok(self
            .lock()
            .tokens
            .get(token)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(user_id, _)| *user_id))
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn update_user(&self, user: &User) -> Result<User, StoreError> {
        let mut tables = self.lock();
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user.id)))?;
        *slot = user.clone();
        Ok(slot.clone())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.lock();
        let removed = remove_owned(&mut t.users, |u| u.id == user_id);
        if removed {
            t.tokens.retain(|_, (owner, _)| *owner != user_id);
            t.internships.retain(|r| r.user_id != user_id);
            t.courses.retain(|r| r.user_id != user_id);
            t.hackathons.retain(|r| r.user_id != user_id);
            t.projects.retain(|r| r.user_id != user_id);
            t.user_skills.retain(|r| r.user_id != user_id);
            t.resumes.retain(|r| r.user_id != user_id);
        }
        Ok(removed)
    }

    async fn list_internships(&self, user_id: Uuid) -> Result<Vec<Internship>, StoreError> {
        Ok(self
            .lock()
            .internships
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_internship(&self, record: &Internship) -> Result<Internship, StoreError> {
        self.lock().internships.push(record.clone());
        Ok(record.clone())
    }

    async fn delete_internship(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().internships, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn list_courses(&self, user_id: Uuid) -> Result<Vec<Course>, StoreError> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_course(&self, record: &Course) -> Result<Course, StoreError> {
        self.lock().courses.push(record.clone());
        Ok(record.clone())
    }

    async fn delete_course(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().courses, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn list_hackathons(&self, user_id: Uuid) -> Result<Vec<Hackathon>, StoreError> {
        Ok(self
            .lock()
            .hackathons
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_hackathon(&self, record: &Hackathon) -> Result<Hackathon, StoreError> {
        self.lock().hackathons.push(record.clone());
        Ok(record.clone())
    }

    async fn delete_hackathon(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().hackathons, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<Project>, StoreError> {
        Ok(self
            .lock()
            .projects
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_project(&self, record: &Project) -> Result<Project, StoreError> {
        self.lock().projects.push(record.clone());
        Ok(record.clone())
    }

    async fn delete_project(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().projects, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn list_user_skills(&self, user_id: Uuid) -> Result<Vec<UserSkill>, StoreError> {
        Ok(self
            .lock()
            .user_skills
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_user_skill(
        &self,
        user_id: Uuid,
        new: &NewUserSkill,
    ) -> Result<UserSkill, StoreError> {
        let mut t = self.lock();

        let existing = t.skills.iter().find(|s| s.name == new.skill_name).cloned();
        if let Some(skill) = &existing {
            if t
                .user_skills
                .iter()
                .any(|us| us.user_id == user_id && us.skill.id == skill.id)
            {
                return Err(StoreError::Conflict("Skill already added".to_string()));
            }
        }

        let skill = match existing {
            Some(skill) => skill,
            None => {
                let skill = Skill {
                    id: Uuid::new_v4(),
                    name: new.skill_name.clone(),
                    category: new.category.clone(),
                    created_at: Utc::now(),
                };
                t.skills.push(skill.clone());
                skill
            }
        };

        let user_skill = UserSkill {
            id: Uuid::new_v4(),
            user_id,
            skill,
            proficiency_level: new.proficiency_level.clone(),
            years_of_experience: new.years_of_experience,
            verified_count: 0,
            created_at: Utc::now(),
        };
        t.user_skills.push(user_skill.clone());
        Ok(user_skill)
    }

    async fn delete_user_skill(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().user_skills, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<Resume>, StoreError> {
        Ok(self
            .lock()
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_resume(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, StoreError> {
        Ok(self
            .lock()
            .resumes
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn insert_resume(&self, resume: &Resume) -> Result<Resume, StoreError> {
        let mut t = self.lock();
        if slug_taken(&t.resumes, resume) {
            return Err(StoreError::Conflict(
                "Public URL slug already in use".to_string(),
            ));
        }
        t.resumes.push(resume.clone());
        Ok(resume.clone())
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, StoreError> {
        let mut t = self.lock();
        if slug_taken(&t.resumes, resume) {
            return Err(StoreError::Conflict(
                "Public URL slug already in use".to_string(),
            ));
        }
        let slot = t
            .resumes
            .iter_mut()
            .find(|r| r.id == resume.id && r.user_id == resume.user_id)
            .ok_or_else(|| StoreError::NotFound(format!("Resume {} not found", resume.id)))?;
        let view_count = slot.view_count;
        let created_at = slot.created_at;
        *slot = Resume {
            view_count,
            created_at,
            ..resume.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_resume(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(remove_owned(&mut self.lock().resumes, |r| {
            r.id == id && r.user_id == user_id
        }))
    }

    async fn view_public_resume(&self, slug: &str) -> Result<Option<Resume>, StoreError> {
        let mut t = self.lock();
        Ok(t
            .resumes
            .iter_mut()
            .find(|r| r.is_public && r.public_url_slug.as_deref() == Some(slug))
            .map(|r| {
                r.view_count += 1;
                r.clone()
            }))
    }
}

fn slug_taken(resumes: &[Resume], candidate: &Resume) -> bool {
    match &candidate.public_url_slug {
        Some(slug) => resumes
            .iter()
            .any(|r| r.id != candidate.id && r.public_url_slug.as_ref() == Some(slug)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_skill(name: &str) -> NewUserSkill {
        NewUserSkill {
            skill_name: name.to_string(),
            category: Some("Programming".to_string()),
            proficiency_level: None,
            years_of_experience: None,
        }
    }

    #[tokio::test]
    async fn test_expired_token_does_not_resolve() {
        let store = InMemoryRecordStore::new();
        let user = store.seed_user("a@example.com", "Ada Lovelace");
        store.seed_token(user.id, "live", Duration::hours(1));
        store.seed_token(user.id, "stale", Duration::hours(-1));

        assert_eq!(store.resolve_token("live").await.unwrap(), Some(user.id));
        assert_eq!(store.resolve_token("stale").await.unwrap(), None);
        assert_eq!(store.resolve_token("unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_user_skill_reuses_global_skill_across_users() {
        let store = InMemoryRecordStore::new();
        let ada = store.seed_user("a@example.com", "Ada Lovelace");
        let alan = store.seed_user("t@example.com", "Alan Turing");

        let first = store.add_user_skill(ada.id, &new_skill("Rust")).await.unwrap();
        let second = store.add_user_skill(alan.id, &new_skill("Rust")).await.unwrap();

        assert_eq!(first.skill.id, second.skill.id);
        assert_eq!(store.skill_count(), 1);
    }

    #[tokio::test]
    async fn test_add_user_skill_twice_conflicts() {
        let store = InMemoryRecordStore::new();
        let ada = store.seed_user("a@example.com", "Ada Lovelace");

        store.add_user_skill(ada.id, &new_skill("Rust")).await.unwrap();
        let err = store
            .add_user_skill(ada.id, &new_skill("Rust"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_user_skills(ada.id).await.unwrap().len(), 1);
    }
}
