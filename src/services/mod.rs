pub mod access;
pub mod auth;
pub mod courses;
pub mod exercises;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use exercises::ExerciseService;
pub use users::UserService;
