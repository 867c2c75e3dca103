use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CommentService;
use crate::errors::UniHubError;
use crate::models::comments::requests::CommentVoteRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 给评论投票
/// POST /comments/{comment_id}/votes
///
/// 投票人由认证层解析后作为参数传入。每人每评论至多一票，
/// 不支持改票或撤票；重复投票返回 409。
pub async fn vote_comment(
    service: &CommentService,
    request: &HttpRequest,
    comment_id: i64,
    voter_id: i64,
    req: CommentVoteRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.cast_vote(comment_id, voter_id, req.direction).await {
        Ok(counts) => {
            info!(
                "Vote recorded on comment {} by user {} ({:?})",
                comment_id, voter_id, req.direction
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(counts, "投票成功")))
        }
        Err(UniHubError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CommentNotFound, msg))),
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::AlreadyVoted, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("投票失败: {e}"),
            )),
        ),
    }
}
