pub mod list;
pub mod vote;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::comments::requests::{CommentListParams, CommentVoteRequest};
use crate::storage::Storage;

pub struct CommentService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommentService {
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

    pub async fn list_comments(
        &self,
        request: &HttpRequest,
        params: CommentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_comments(self, request, params).await
    }

    pub async fn vote_comment(
        &self,
        request: &HttpRequest,
        comment_id: i64,
        voter_id: i64,
        req: CommentVoteRequest,
    ) -> ActixResult<HttpResponse> {
        vote::vote_comment(self, request, comment_id, voter_id, req).await
    }
}
