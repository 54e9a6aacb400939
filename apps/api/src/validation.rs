//! Request validation. Each validator collects every field failure rather than
//! stopping at the first, so clients can fix a form in one round-trip.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::errors::{AppError, FieldError};
use crate::models::achievement::{NewCourse, NewHackathon, NewInternship, NewProject, NewUserSkill};
use crate::models::resume::{NewResume, ResumeTemplate, ResumeUpdate};
use crate::models::user::UserUpdate;

#[derive(Debug, Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn required_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "must not be blank"));
        }
    }

    fn non_negative(&mut self, field: &str, value: Option<i32>) {
        if matches!(value, Some(n) if n < 0) {
            self.errors.push(FieldError::new(field, "must not be negative"));
        }
    }

    fn not_before(
        &mut self,
        field: &str,
        start: &NaiveDateTime,
        end: Option<&NaiveDateTime>,
    ) {
        if matches!(end, Some(end) if end < start) {
            self.errors
                .push(FieldError::new(field, "must not be earlier than the start date"));
        }
    }

    fn template(&mut self, value: &str) {
        if let Err(message) = value.parse::<ResumeTemplate>() {
            self.errors.push(FieldError::new("template", message));
        }
    }

    fn json_object(&mut self, field: &str, value: Option<&Value>) {
        if matches!(value, Some(v) if !v.is_object()) {
            self.errors.push(FieldError::new(field, "must be a JSON object"));
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

pub fn validate_internship(new: &NewInternship) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("company_name", &new.company_name);
    c.required_text("position", &new.position);
    c.not_before("end_date", &new.start_date, new.end_date.as_ref());
    c.finish()
}

pub fn validate_course(new: &NewCourse) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("course_name", &new.course_name);
    c.required_text("platform", &new.platform);
    c.non_negative("duration_hours", new.duration_hours);
    c.finish()
}

pub fn validate_hackathon(new: &NewHackathon) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("hackathon_name", &new.hackathon_name);
    c.required_text("organizer", &new.organizer);
    c.non_negative("team_size", new.team_size);
    c.finish()
}

pub fn validate_project(new: &NewProject) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("project_name", &new.project_name);
    c.required_text("description", &new.description);
    c.non_negative("team_size", new.team_size);
    c.not_before("end_date", &new.start_date, new.end_date.as_ref());
    c.finish()
}

pub fn validate_user_skill(new: &NewUserSkill) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("skill_name", &new.skill_name);
    c.non_negative("years_of_experience", new.years_of_experience);
    c.finish()
}

pub fn validate_user_update(update: &UserUpdate) -> Result<(), AppError> {
    let mut c = Checks::default();
    if let Some(name) = &update.full_name {
        c.required_text("full_name", name);
    }
    c.finish()
}

pub fn validate_new_resume(new: &NewResume) -> Result<(), AppError> {
    let mut c = Checks::default();
    c.required_text("title", &new.title);
    c.template(&new.template);
    c.json_object("configuration", new.configuration.as_ref());
    c.finish()
}

pub fn validate_resume_update(update: &ResumeUpdate) -> Result<(), AppError> {
    let mut c = Checks::default();
    if let Some(title) = &update.title {
        c.required_text("title", title);
    }
    if let Some(template) = &update.template {
        c.template(template);
    }
    if let Some(Some(configuration)) = &update.configuration {
        c.json_object("configuration", Some(configuration));
    }
    c.finish()
}
