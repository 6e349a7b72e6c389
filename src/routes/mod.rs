pub mod auth;

pub mod users;

pub mod courses;

pub mod exercises;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use exercises::configure_exercises_routes;
pub use users::configure_user_routes;
