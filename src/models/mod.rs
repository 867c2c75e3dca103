//! 数据模型定义
//!
//! 与 entity 模块的数据库实体分离的业务模型，按领域划分：
//! requests 为入参，responses 为出参，entities 为业务实体。

pub mod auth;
pub mod comments;
pub mod common;
pub mod courses;
pub mod criteria;
pub mod evaluations;
pub mod professors;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
