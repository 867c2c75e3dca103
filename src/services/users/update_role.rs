use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::requests::UpdateUserRoleRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_user_role(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    req: UpdateUserRoleRequest,
    operator_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员不能修改自己的角色，避免把最后一个管理员降级
    if user_id == operator_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "不能修改自己的角色",
        )));
    }

    match storage.update_user_role(user_id, req.role).await {
        Ok(Some(user)) => {
            info!(
                "User {} role changed to {} by {}",
                user.id, user.role, operator_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "角色更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "用户不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新用户角色失败: {e}"),
            )),
        ),
    }
}
