use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ProfessorService, detail_cache_key};
use crate::errors::UniHubError;
use crate::models::professors::requests::UpdateProfessorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

pub async fn update_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
    req: UpdateProfessorRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    if let Some(ref email) = req.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    match storage.update_professor(professor_id, req).await {
        Ok(Some(professor)) => {
            // 身份信息变了，缓存的详情也要跟着失效
            cache.remove(&detail_cache_key(professor_id)).await;
            info!("Professor {} updated", professor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(professor, "教授更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfessorNotFound,
            "教授不存在",
        ))),
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ProfessorAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新教授失败: {e}"),
            )),
        ),
    }
}
