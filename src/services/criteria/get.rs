use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriterionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_criterion(
    service: &CriterionService,
    request: &HttpRequest,
    criterion_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_criterion_by_id(criterion_id).await {
        Ok(Some(criterion)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(criterion, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CriterionNotFound,
            "评价标准不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评价标准失败: {e}"),
            )),
        ),
    }
}
