pub mod auth;
pub mod comments;
pub mod courses;
pub mod criteria;
pub mod evaluations;
pub mod professors;
pub mod users;

pub use auth::AuthService;
pub use comments::CommentService;
pub use courses::CourseService;
pub use criteria::CriterionService;
pub use evaluations::EvaluationService;
pub use professors::ProfessorService;
pub use users::UserService;
