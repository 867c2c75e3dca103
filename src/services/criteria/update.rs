use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriterionService;
use crate::errors::UniHubError;
use crate::models::criteria::requests::UpdateCriterionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_criterion(
    service: &CriterionService,
    request: &HttpRequest,
    criterion_id: i64,
    req: UpdateCriterionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_criterion(criterion_id, req).await {
        Ok(Some(criterion)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(criterion, "评价标准更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CriterionNotFound,
            "评价标准不存在",
        ))),
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CriterionAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新评价标准失败: {e}"),
            )),
        ),
    }
}
