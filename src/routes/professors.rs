use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::professors::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateProfessorRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ProfessorService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ProfessorService 实例
static PROFESSOR_SERVICE: Lazy<ProfessorService> = Lazy::new(ProfessorService::new_lazy);

// 列出教授（支持名称搜索与平均分榜单）
pub async fn list_professors(
    req: HttpRequest,
    query: web::Query<ProfessorListParams>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .list_professors(&req, query.into_inner())
        .await
}

// 获取教授详情（含聚合数据）
pub async fn get_professor_detail(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.get_professor_detail(&req, path.0).await
}

// 创建教授
pub async fn create_professor(
    req: HttpRequest,
    body: web::Json<CreateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .create_professor(&req, body.into_inner())
        .await
}

// 更新教授
pub async fn update_professor(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .update_professor(&req, path.0, body.into_inner())
        .await
}

// 删除教授
pub async fn delete_professor(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.delete_professor(&req, path.0).await
}

// 配置路由
pub fn configure_professor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出教授 - 所有登录用户可访问
                    .route(web::get().to(list_professors))
                    // 创建教授 - 仅管理员
                    .route(
                        web::post()
                            .to(create_professor)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 教授详情 - 所有登录用户可访问
                    .route(web::get().to(get_professor_detail))
                    // 更新教授 - 仅管理员
                    .route(
                        web::put()
                            .to(update_professor)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    // 删除教授 - 仅管理员
                    .route(
                        web::delete()
                            .to(delete_professor)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
