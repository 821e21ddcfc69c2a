pub mod auth;
pub mod common;
pub mod course_requests;
pub mod courses;
pub mod enrollments;
pub mod notifications;
pub mod submissions;
pub mod tasks;
pub mod users;

pub use common::*;
