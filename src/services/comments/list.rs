use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommentService;
use crate::models::comments::requests::{CommentListParams, CommentListQuery};
use crate::models::{ApiResponse, ErrorCode};

/// 列出某教授在某标准下的评论
/// GET /comments?professor_id=&criterion_id=&course_id=&period=&sort=&page=&size=
///
/// 时间范围在这里换算成截止时间戳，存储层只认时间戳。
pub async fn list_comments(
    service: &CommentService,
    request: &HttpRequest,
    params: CommentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let created_after = params
        .period
        .map(|period| period.cutoff(chrono::Utc::now()).timestamp());

    let query = CommentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        professor_id: params.professor_id,
        criterion_id: params.criterion_id,
        course_id: params.course_id,
        created_after,
        sort: params.sort.unwrap_or_default(),
    };

    match storage.list_comments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评论列表失败: {e}"),
            )),
        ),
    }
}
