// Achievement records (internships, courses, hackathons, projects) and skills.

pub mod handlers;
pub mod suggestions;
