use crate::models::comments::entities::{RecencyFilter, SortDirection, VoteDirection};
use crate::models::common::pagination::{
    PaginationQuery, deserialize_string_to_i64, deserialize_string_to_option_i64,
};
use serde::Deserialize;
use ts_rs::TS;

/// 评论投票请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentVoteRequest {
    pub direction: VoteDirection,
}

/// 评论列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub professor_id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub criterion_id: i64,
    /// 按课程过滤（可选）
    #[serde(default, deserialize_with = "deserialize_string_to_option_i64")]
    pub course_id: Option<i64>,
    /// 按时间范围过滤（可选）
    pub period: Option<RecencyFilter>,
    /// 净得分排序方向，默认降序
    pub sort: Option<SortDirection>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct CommentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub professor_id: i64,
    pub criterion_id: i64,
    pub course_id: Option<i64>,
    /// 由 RecencyFilter 换算出的截止时间戳（秒）
    pub created_after: Option<i64>,
    pub sort: SortDirection,
}
