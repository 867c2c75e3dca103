use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::comments::responses::CommentListItem;

/// 教授列表条目（带总体平均分）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct ProfessorListItem {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    /// 无任何评价时为 null
    pub average_score: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// 教授列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct ProfessorListResponse {
    pub items: Vec<ProfessorListItem>,
}

/// 单个评价标准的聚合结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct CriterionAggregate {
    pub criterion_id: i64,
    pub criterion_name: String,
    /// 该标准下无任何评价时为 null
    pub average_score: Option<f64>,
    /// 该标准下净得分最高的评论；并列时取最新
    pub top_comment: Option<CommentListItem>,
}

/// 教授详情响应（含聚合数据）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct ProfessorDetailResponse {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    /// 所有评价的算术平均，保留两位小数；无评价时为 null
    pub average_score: Option<f64>,
    pub criteria: Vec<CriterionAggregate>,
    pub created_at: String,
    pub updated_at: String,
}
