use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::comments::requests::{CommentListParams, CommentVoteRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::CommentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CommentService 实例
static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

// 列出评论
pub async fn list_comments(
    req: HttpRequest,
    query: web::Query<CommentListParams>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.list_comments(&req, query.into_inner()).await
}

// 给评论投票（投票人来自认证信息，作为显式参数传入业务层）
pub async fn vote_comment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CommentVoteRequest>,
) -> ActixResult<HttpResponse> {
    let voter_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    COMMENT_SERVICE
        .vote_comment(&req, path.0, voter_id, body.into_inner())
        .await
}

// 配置路由
pub fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/comments")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_comments)))
            .service(web::resource("/{id}/votes").route(web::post().to(vote_comment))),
    );
}
