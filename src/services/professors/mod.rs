pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::professors::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateProfessorRequest,
};
use crate::storage::Storage;

/// 教授详情缓存键
pub(crate) fn detail_cache_key(professor_id: i64) -> String {
    format!("professor:detail:{professor_id}")
}

/// 展示用两位小数（四舍五入）
pub(crate) fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct ProfessorService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfessorService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn list_professors(
        &self,
        request: &HttpRequest,
        params: ProfessorListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_professors(self, request, params).await
    }

    pub async fn get_professor_detail(
        &self,
        request: &HttpRequest,
        professor_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_professor_detail(self, request, professor_id).await
    }

    pub async fn create_professor(
        &self,
        request: &HttpRequest,
        req: CreateProfessorRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_professor(self, request, req).await
    }

    pub async fn update_professor(
        &self,
        request: &HttpRequest,
        professor_id: i64,
        req: UpdateProfessorRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_professor(self, request, professor_id, req).await
    }

    pub async fn delete_professor(
        &self,
        request: &HttpRequest,
        professor_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_professor(self, request, professor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::round_two;

    #[test]
    fn test_round_two_half_up() {
        assert_eq!(round_two(4.0), 4.0);
        assert_eq!(round_two(3.456), 3.46);
        assert_eq!(round_two(3.454), 3.45);
        assert_eq!(round_two(14.0 / 3.0), 4.67);
        assert_eq!(round_two(1.0 / 3.0), 0.33);
    }
}
