use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::EvaluationService;
use crate::utils::{SafeCriterionIdI64, SafeProfessorIdI64};

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 提交评价（评价人来自认证信息，作为显式参数传入业务层）
pub async fn create_evaluation(
    req: HttpRequest,
    professor_id: SafeProfessorIdI64,
    criterion_id: SafeCriterionIdI64,
    body: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    EVALUATION_SERVICE
        .create_evaluation(
            &req,
            user_id,
            professor_id.0,
            criterion_id.0,
            body.into_inner(),
        )
        .await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors/{professor_id}/criteria/{criterion_id}/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::post().to(create_evaluation))),
    );
}
