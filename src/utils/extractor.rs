//! 路径参数安全提取器
//!
//! 将路径中的 ID 解析为 i64，解析失败时直接返回 400 统一响应，
//! 避免在每个处理函数里重复解析逻辑。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($(
        $name:ident($param:literal)
    ),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let raw = req.match_info().get($param).unwrap_or_default();
                    match raw.parse::<i64>() {
                        Ok(id) if id > 0 => ready(Ok($name(id))),
                        _ => {
                            let response = HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::BadRequest,
                                    format!("无效的路径参数 {}: '{}'", $param, raw),
                                ),
                            );
                            ready(Err(actix_web::error::InternalError::from_response(
                                "invalid path parameter",
                                response,
                            )
                            .into()))
                        }
                    }
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64("id"),
    SafeProfessorIdI64("professor_id"),
    SafeCriterionIdI64("criterion_id"),
}
