use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EvaluationService;
use crate::errors::UniHubError;
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::professors::detail_cache_key;
use crate::utils::validate::validate_score;

/// 提交评价（可附带评论）
/// POST /professors/{professor_id}/criteria/{criterion_id}/evaluations
///
/// 评价人由认证层解析后作为参数传入，业务逻辑不做任何隐式身份解析。
/// 成功写入后显式失效该教授的详情缓存，保证聚合数据及时可见。
pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    user_id: i64,
    professor_id: i64,
    criterion_id: i64,
    req: CreateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    // 1. 分数区间校验
    if let Err(msg) = validate_score(req.score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScoreOutOfRange, msg)));
    }

    // 2. 教授与标准必须存在
    match storage.get_professor_by_id(professor_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfessorNotFound,
                "教授不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教授失败: {e}"),
                )),
            );
        }
    }

    match storage.get_criterion_by_id(criterion_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CriterionNotFound,
                "评价标准不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评价标准失败: {e}"),
                )),
            );
        }
    }

    // 3. 指定了课程时，课程必须存在且由该教授讲授
    if let Some(course_id) = req.course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "课程不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                );
            }
        }

        match storage.professor_teaches_course(professor_id, course_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ProfessorNotTeachingCourse,
                    "该教授不教授此课程",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询教授课程关联失败: {e}"),
                    )),
                );
            }
        }
    }

    // 4. 写入评价（附带评论），重复评价由存储层报 Conflict
    match storage
        .create_evaluation(user_id, professor_id, criterion_id, req)
        .await
    {
        Ok(evaluation) => {
            // 5. 显式失效该教授的聚合缓存（写通失效，不等 TTL）
            cache.remove(&detail_cache_key(professor_id)).await;

            info!(
                "Evaluation {} recorded for professor {} (user {}, criterion {})",
                evaluation.id, professor_id, user_id, criterion_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(evaluation, "评价提交成功")))
        }
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::AlreadyEvaluated, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交评价失败: {e}"),
            )),
        ),
    }
}
