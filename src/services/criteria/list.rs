use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriterionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_criteria(
    service: &CriterionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_criteria().await {
        Ok(criteria) => Ok(HttpResponse::Ok().json(ApiResponse::success(criteria, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评价标准列表失败: {e}"),
            )),
        ),
    }
}
