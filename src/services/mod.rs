pub mod auth;
pub mod course_requests;
pub mod courses;
pub mod notifications;
pub mod realtime;
pub mod submissions;
pub mod tasks;
pub mod users;

pub use auth::AuthService;
pub use course_requests::CourseRequestService;
pub use courses::CourseService;
pub use submissions::SubmissionService;
pub use tasks::TaskService;
pub use users::UserService;
