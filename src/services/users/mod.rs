pub mod delete;
pub mod get;
pub mod list;
pub mod update_role;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{UpdateUserRoleRequest, UserListParams};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    pub async fn update_user_role(
        &self,
        request: &HttpRequest,
        user_id: i64,
        req: UpdateUserRoleRequest,
        operator_id: i64,
    ) -> ActixResult<HttpResponse> {
        update_role::update_user_role(self, request, user_id, req, operator_id).await
    }

    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        operator_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id, operator_id).await
    }
}
