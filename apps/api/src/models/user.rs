use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile owner of every achievement record and resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. Absent fields are left unchanged; an explicit
/// `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub linkedin_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub portfolio_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub bio: Option<Option<String>>,
}

impl UserUpdate {
    /// Applies the present fields onto `user` and bumps `updated_at`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(v) = self.full_name {
            user.full_name = v;
        }
        let optional = [
            (self.phone, &mut user.phone),
            (self.location, &mut user.location),
            (self.linkedin_url, &mut user.linkedin_url),
            (self.github_url, &mut user.github_url),
            (self.portfolio_url, &mut user.portfolio_url),
            (self.bio, &mut user.bio),
        ];
        for (patch, slot) in optional {
            if let Some(v) = patch {
                *slot = v;
            }
        }
        user.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            full_name: "Ada Lovelace".to_string(),
            phone: Some("555-0100".to_string()),
            location: Some("London".to_string()),
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            bio: Some("Analyst.".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_null_clears_and_absent_keeps() {
        let mut ada = user();
        let update: UserUpdate =
            serde_json::from_str(r#"{"phone": null, "github_url": "https://github.com/ada"}"#)
                .unwrap();
        update.apply_to(&mut ada);
        assert_eq!(ada.phone, None);
        assert_eq!(ada.location.as_deref(), Some("London"));
        assert_eq!(ada.bio.as_deref(), Some("Analyst."));
        assert_eq!(ada.github_url.as_deref(), Some("https://github.com/ada"));
        assert_eq!(ada.full_name, "Ada Lovelace");
    }
}
