use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ProfessorService, detail_cache_key};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    match storage.delete_professor(professor_id).await {
        Ok(true) => {
            cache.remove(&detail_cache_key(professor_id)).await;
            info!("Professor {} deleted", professor_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教授已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfessorNotFound,
            "教授不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除教授失败: {e}"),
            )),
        ),
    }
}
