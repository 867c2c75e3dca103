use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 评分允许的下限
pub const MIN_SCORE: i32 = 1;
/// 评分允许的上限
pub const MAX_SCORE: i32 = 5;

// 评价实体：一个用户对一个教授在一个标准下的一次打分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub score: i32,
    pub user_id: i64,
    pub professor_id: i64,
    pub criterion_id: i64,
    pub course_id: Option<i64>,
    /// 随评价一同创建的评论（如果有）
    pub comment_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
