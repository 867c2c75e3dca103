use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::UniHubError;
use crate::models::{ApiResponse, ErrorCode};

/// 将教授关联到课程
/// POST /courses/{id}/professors/{professor_id}
pub async fn link_professor(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    professor_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 两端都必须存在
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

    match storage.link_professor_to_course(professor_id, course_id).await {
        Ok(()) => {
            info!("Professor {} linked to course {}", professor_id, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success_empty("关联成功")))
        }
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ProfessorCourseAlreadyLinked, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("关联教授与课程失败: {e}"),
            )),
        ),
    }
}
