// Resumes: snapshot aggregation, write paths and HTTP handlers.

pub mod handlers;
pub mod service;
pub mod snapshot;
