pub mod auth;

pub mod users;

pub mod professors;

pub mod criteria;

pub mod courses;

pub mod evaluations;

pub mod comments;

pub use auth::configure_auth_routes;
pub use comments::configure_comment_routes;
pub use courses::configure_course_routes;
pub use criteria::configure_criterion_routes;
pub use evaluations::configure_evaluation_routes;
pub use professors::configure_professor_routes;
pub use users::configure_user_routes;
