use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::criteria::requests::{CreateCriterionRequest, UpdateCriterionRequest};
use crate::models::users::entities::UserRole;
use crate::services::CriterionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CriterionService 实例
static CRITERION_SERVICE: Lazy<CriterionService> = Lazy::new(CriterionService::new_lazy);

// 列出评价标准
pub async fn list_criteria(req: HttpRequest) -> ActixResult<HttpResponse> {
    CRITERION_SERVICE.list_criteria(&req).await
}

// 获取评价标准详情
pub async fn get_criterion(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERION_SERVICE.get_criterion(&req, path.0).await
}

// 创建评价标准
pub async fn create_criterion(
    req: HttpRequest,
    body: web::Json<CreateCriterionRequest>,
) -> ActixResult<HttpResponse> {
    CRITERION_SERVICE
        .create_criterion(&req, body.into_inner())
        .await
}

// 更新评价标准
pub async fn update_criterion(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateCriterionRequest>,
) -> ActixResult<HttpResponse> {
    CRITERION_SERVICE
        .update_criterion(&req, path.0, body.into_inner())
        .await
}

// 删除评价标准
pub async fn delete_criterion(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERION_SERVICE.delete_criterion(&req, path.0).await
}

// 配置路由
pub fn configure_criterion_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/criteria")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出评价标准 - 所有登录用户可访问
                    .route(web::get().to(list_criteria))
                    // 创建评价标准 - 仅管理员
                    .route(
                        web::post()
                            .to(create_criterion)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 评价标准详情 - 所有登录用户可访问
                    .route(web::get().to(get_criterion))
                    // 更新评价标准 - 仅管理员
                    .route(
                        web::put()
                            .to(update_criterion)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    // 删除评价标准 - 仅管理员
                    .route(
                        web::delete()
                            .to(delete_criterion)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
