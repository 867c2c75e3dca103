use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CriterionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_criterion(
    service: &CriterionService,
    request: &HttpRequest,
    criterion_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_criterion(criterion_id).await {
        Ok(true) => {
            info!("Criterion {} deleted", criterion_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("评价标准已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CriterionNotFound,
            "评价标准不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除评价标准失败: {e}"),
            )),
        ),
    }
}
