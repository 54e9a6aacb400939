pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::achievements::handlers as achievements;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Users
        .route(
            "/api/users/me",
            get(users::handle_get_me)
                .put(users::handle_update_me)
                .delete(users::handle_delete_me),
        )
        // Achievements
        .route(
            "/api/achievements/internships",
            get(achievements::handle_list_internships).post(achievements::handle_create_internship),
        )
        .route(
            "/api/achievements/internships/:id",
            delete(achievements::handle_delete_internship),
        )
        .route(
            "/api/achievements/courses",
            get(achievements::handle_list_courses).post(achievements::handle_create_course),
        )
        .route(
            "/api/achievements/courses/:id",
            delete(achievements::handle_delete_course),
        )
        .route(
            "/api/achievements/hackathons",
            get(achievements::handle_list_hackathons).post(achievements::handle_create_hackathon),
        )
        .route(
            "/api/achievements/hackathons/:id",
            delete(achievements::handle_delete_hackathon),
        )
        .route(
            "/api/achievements/projects",
            get(achievements::handle_list_projects).post(achievements::handle_create_project),
        )
        .route(
            "/api/achievements/projects/:id",
            delete(achievements::handle_delete_project),
        )
        .route(
            "/api/achievements/skills",
            get(achievements::handle_list_skills).post(achievements::handle_add_skill),
        )
        .route(
            "/api/achievements/skills/suggestions",
            get(achievements::handle_skill_suggestions),
        )
        .route(
            "/api/achievements/skills/:id",
            delete(achievements::handle_delete_skill),
        )
        // Resumes
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/resumes/:id/regenerate-summary",
            post(resumes::handle_regenerate_summary),
        )
        .route(
            "/api/resumes/:id/export-pdf",
            get(resumes::handle_export_pdf),
        )
        .route(
            "/api/public/resumes/:slug",
            get(resumes::handle_public_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::SummaryGenerator;
    use crate::layout::default_page_config;
    use crate::store::memory::InMemoryRecordStore;
    use crate::store::RecordStore;

    struct Harness {
        store: Arc<InMemoryRecordStore>,
        router: Router,
    }

    impl Harness {
        fn new() -> Self {
            let store = Arc::new(InMemoryRecordStore::new());
            let state = AppState {
                store: store.clone(),
                summaries: Arc::new(SummaryGenerator::fallback_only()),
                page_config: default_page_config(),
            };
            Self {
                store,
                router: build_router(state),
            }
        }

        /// Seeds a user and returns their bearer token.
        fn user(&self, email: &str, full_name: &str) -> String {
            let user = self.store.seed_user(email, full_name);
            let token = format!("token-{}", user.id);
            self.store
                .seed_token(user.id, &token, chrono::Duration::hours(1));
            token
        }

        async fn call(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();
            self.router.clone().oneshot(request).await.unwrap()
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn internship_body(company: &str) -> Value {
        json!({
            "company_name": company,
            "position": "Software Intern",
            "start_date": "2023-05-14T00:00:00.000Z",
            "end_date": "2023-08-31",
            "skills_used": "Rust, SQL"
        })
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let h = Harness::new();
        let response = h.call(Method::GET, "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "resume-api");

        let response = h.call(Method::GET, "/", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_unknown_token_is_401() {
        let h = Harness::new();
        let response = h
            .call(Method::GET, "/api/achievements/internships", None, None)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = h
            .call(Method::GET, "/api/users/me", Some("nope"), None)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_internship_defaults_and_ownership() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        let me = json_body(h.call(Method::GET, "/api/users/me", Some(&token), None).await).await;

        let response = h
            .call(
                Method::POST,
                "/api/achievements/internships",
                Some(&token),
                Some(internship_body("Acme")),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["user_id"], me["id"]);
        assert_eq!(created["verification_status"], "pending");
        assert_eq!(created["start_date"], "2023-05-14T00:00:00");
        assert_eq!(created["is_current"], false);
    }

    #[tokio::test]
    async fn test_validation_errors_are_field_level() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");

        let response = h
            .call(
                Method::POST,
                "/api/achievements/projects",
                Some(&token),
                Some(json!({
                    "project_name": " ",
                    "description": "Engine",
                    "start_date": "2023-06-01",
                    "end_date": "2023-01-01"
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["project_name", "end_date"]);

        let response = h
            .call(
                Method::POST,
                "/api/achievements/courses",
                Some(&token),
                Some(json!({"course_name": "Databases"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["fields"][0]["field"], "platform");

        let response = h
            .call(
                Method::POST,
                "/api/achievements/internships",
                Some(&token),
                Some(json!({"position": "Intern", "start_date": "2023-05-14"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["field"], "company_name");

        let mut bad_date = internship_body("Acme");
        bad_date["start_date"] = json!("next spring");
        let response = h
            .call(
                Method::POST,
                "/api/achievements/internships",
                Some(&token),
                Some(bad_date),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["fields"][0]["field"], "start_date");
    }

    #[tokio::test]
    async fn test_duplicate_skill_is_conflict_and_skill_is_shared() {
        let h = Harness::new();
        let ada = h.user("ada@example.com", "Ada Lovelace");
        let grace = h.user("grace@example.com", "Grace Hopper");
        let skill = json!({"skill_name": "Rust", "category": "Language", "years_of_experience": 2});

        let response = h
            .call(Method::POST, "/api/achievements/skills", Some(&ada), Some(skill.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["skill"]["name"], "Rust");
        assert_eq!(created["verified_count"], 0);
        assert_eq!(h.store.skill_count(), 1);

        let response = h
            .call(Method::POST, "/api/achievements/skills", Some(&ada), Some(skill.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = h
            .call(Method::POST, "/api/achievements/skills", Some(&grace), Some(skill))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(h.store.skill_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_other_users_record_is_404() {
        let h = Harness::new();
        let ada = h.user("ada@example.com", "Ada Lovelace");
        let grace = h.user("grace@example.com", "Grace Hopper");

        let created = json_body(
            h.call(
                Method::POST,
                "/api/achievements/internships",
                Some(&ada),
                Some(internship_body("Acme")),
            )
            .await,
        )
        .await;
        let uri = format!("/api/achievements/internships/{}", created["id"].as_str().unwrap());

        let response = h.call(Method::DELETE, &uri, Some(&grace), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "Internship not found"
        );

        let response = h.call(Method::DELETE, &uri, Some(&ada), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = h.call(Method::DELETE, &uri, Some(&ada), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        for uri in ["/api/achievements/internships/123", "/api/resumes/not-a-uuid"] {
            let response = h.call(Method::DELETE, uri, Some(&ada), None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_skill_suggestions() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        h.call(
            Method::POST,
            "/api/achievements/internships",
            Some(&token),
            Some(internship_body("Acme")),
        )
        .await;

        let response = h
            .call(Method::GET, "/api/achievements/skills/suggestions", Some(&token), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!(["Rust", "SQL"]));
    }

    #[tokio::test]
    async fn test_update_me() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        let response = h
            .call(
                Method::PUT,
                "/api/users/me",
                Some(&token),
                Some(json!({"bio": "Analyst.", "location": "London"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["bio"], "Analyst.");
        assert_eq!(body["full_name"], "Ada Lovelace");

        let response = h
            .call(
                Method::PUT,
                "/api/users/me",
                Some(&token),
                Some(json!({"bio": null})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["bio"], Value::Null);
        assert_eq!(body["location"], "London");
    }

    #[tokio::test]
    async fn test_delete_me_cascades_but_keeps_skills() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        h.call(
            Method::POST,
            "/api/achievements/internships",
            Some(&token),
            Some(internship_body("Acme")),
        )
        .await;
        h.call(
            Method::POST,
            "/api/achievements/skills",
            Some(&token),
            Some(json!({"skill_name": "Rust"})),
        )
        .await;
        h.call(Method::POST, "/api/resumes", Some(&token), Some(json!({}))).await;
        let me = json_body(h.call(Method::GET, "/api/users/me", Some(&token), None).await).await;
        let user_id: uuid::Uuid = me["id"].as_str().unwrap().parse().unwrap();

        let response = h.call(Method::DELETE, "/api/users/me", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let store = h.store.as_ref();
        assert!(store.list_internships(user_id).await.unwrap().is_empty());
        assert!(store.list_courses(user_id).await.unwrap().is_empty());
        assert!(store.list_hackathons(user_id).await.unwrap().is_empty());
        assert!(store.list_projects(user_id).await.unwrap().is_empty());
        assert!(store.list_resumes(user_id).await.unwrap().is_empty());
        assert!(h.store.has_skill("Rust"));

        let response = h.call(Method::GET, "/api/users/me", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_resume_lifecycle_and_public_view() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        h.call(
            Method::POST,
            "/api/achievements/internships",
            Some(&token),
            Some(internship_body("Acme")),
        )
        .await;

        let response = h
            .call(
                Method::POST,
                "/api/resumes",
                Some(&token),
                Some(json!({"title": "Main", "is_public": true})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let slug = created["public_url_slug"].as_str().unwrap().to_string();
        assert!(slug.starts_with("ada-lovelace-"));
        assert_eq!(
            created["summary"],
            "Results-driven professional with experience from 1 internship. \
             Demonstrated expertise through 1 internship. \
             Eager to contribute to innovative projects and drive meaningful impact."
        );
        let id = created["id"].as_str().unwrap().to_string();

        let full = json_body(
            h.call(Method::GET, &format!("/api/resumes/{id}"), Some(&token), None)
                .await,
        )
        .await;
        assert_eq!(full["title"], "Main");
        assert_eq!(full["user_data"]["internships"][0]["company_name"], "Acme");

        let public = h
            .call(Method::GET, &format!("/api/public/resumes/{slug}"), None, None)
            .await;
        assert_eq!(public.status(), StatusCode::OK);
        let public = json_body(public).await;
        assert_eq!(public["view_count"], 1);
        assert_eq!(public["user_data"]["full_name"], "Ada Lovelace");

        let updated = json_body(
            h.call(
                Method::PUT,
                &format!("/api/resumes/{id}"),
                Some(&token),
                Some(json!({"is_public": true, "title": "Renamed"})),
            )
            .await,
        )
        .await;
        assert_eq!(updated["public_url_slug"], slug.as_str());
        assert_eq!(updated["view_count"], 1);

        let response = h
            .call(
                Method::POST,
                &format!("/api/resumes/{id}/regenerate-summary"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["is_ai_generated_summary"], true);

        let response = h
            .call(Method::DELETE, &format!("/api/resumes/{id}"), Some(&token), None)
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = h
            .call(Method::GET, &format!("/api/public/resumes/{slug}"), None, None)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_private_resume_not_publicly_visible() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        let created = json_body(
            h.call(
                Method::POST,
                "/api/resumes",
                Some(&token),
                Some(json!({"is_public": true})),
            )
            .await,
        )
        .await;
        let slug = created["public_url_slug"].as_str().unwrap().to_string();
        let id = created["id"].as_str().unwrap();

        let private = json_body(
            h.call(
                Method::PUT,
                &format!("/api/resumes/{id}"),
                Some(&token),
                Some(json!({"is_public": false})),
            )
            .await,
        )
        .await;
        assert_eq!(private["public_url_slug"], Value::Null);

        let response = h
            .call(Method::GET, &format!("/api/public/resumes/{slug}"), None, None)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_pdf_headers() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        let created = json_body(
            h.call(Method::POST, "/api/resumes", Some(&token), Some(json!({})))
                .await,
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = h
            .call(
                Method::GET,
                &format!("/api/resumes/{id}/export-pdf"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=Ada_Lovelace_Resume.pdf"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_unknown_resume_is_404() {
        let h = Harness::new();
        let token = h.user("ada@example.com", "Ada Lovelace");
        let uri = format!("/api/resumes/{}/export-pdf", uuid::Uuid::new_v4());
        let response = h.call(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
