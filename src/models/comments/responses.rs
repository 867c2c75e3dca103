use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginationInfo;

/// 评论作者信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentAuthor {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 评论列表条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentListItem {
    pub id: i64,
    pub text: String,
    pub evaluation_id: i64,
    pub author: CommentAuthor,
    pub positive_votes: i32,
    pub negative_votes: i32,
    /// 净得分 = positive_votes - negative_votes，始终即时计算
    pub score: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// 评论列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentListResponse {
    pub items: Vec<CommentListItem>,
    pub pagination: PaginationInfo,
}

/// 投票后的最新计数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct VoteCountsResponse {
    pub comment_id: i64,
    pub positive_votes: i32,
    pub negative_votes: i32,
    pub score: i32,
}
