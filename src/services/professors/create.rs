use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProfessorService;
use crate::errors::UniHubError;
use crate::models::professors::requests::CreateProfessorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

pub async fn create_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    req: CreateProfessorRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "教授姓名不能为空",
        )));
    }

    if let Some(ref email) = req.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
        // 先查重给出明确错误；并发下由唯一索引兜底
        match storage.get_professor_by_email(email).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ProfessorAlreadyExists,
                    "教授邮箱已被使用",
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询教授失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.create_professor(req).await {
        Ok(professor) => {
            info!("Professor {} created (ID: {})", professor.name, professor.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(professor, "教授创建成功")))
        }
        Err(UniHubError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ProfessorAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建教授失败: {e}"),
            )),
        ),
    }
}
