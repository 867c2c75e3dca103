pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::criteria::requests::{CreateCriterionRequest, UpdateCriterionRequest};
use crate::storage::Storage;

pub struct CriterionService {
    storage: Option<Arc<dyn Storage>>,
}

impl CriterionService {
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

    pub async fn list_criteria(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_criteria(self, request).await
    }

    pub async fn get_criterion(
        &self,
        request: &HttpRequest,
        criterion_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_criterion(self, request, criterion_id).await
    }

    pub async fn create_criterion(
        &self,
        request: &HttpRequest,
        req: CreateCriterionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_criterion(self, request, req).await
    }

    pub async fn update_criterion(
        &self,
        request: &HttpRequest,
        criterion_id: i64,
        req: UpdateCriterionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_criterion(self, request, criterion_id, req).await
    }

    pub async fn delete_criterion(
        &self,
        request: &HttpRequest,
        criterion_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_criterion(self, request, criterion_id).await
    }
}
