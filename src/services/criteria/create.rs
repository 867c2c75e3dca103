use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CriterionService;
use crate::errors::UniHubError;
use crate::models::criteria::requests::CreateCriterionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_criterion(
    service: &CriterionService,
    request: &HttpRequest,
    req: CreateCriterionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "评价标准名称不能为空",
        )));
    }

    match storage.create_criterion(req).await {
        Ok(criterion) => {
            info!("Criterion {} created (ID: {})", criterion.name, criterion.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(criterion, "评价标准创建成功")))
        }
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CriterionAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建评价标准失败: {e}"),
            )),
        ),
    }
}
