use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{ProfessorService, detail_cache_key, round_two};
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::models::professors::responses::{CriterionAggregate, ProfessorDetailResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 获取教授详情（含总体平均分、分标准平均分与各标准最佳评论）
/// GET /professors/{id}
///
/// 结果按教授缓存；新评价写入时由评价服务显式失效。
/// 聚合是对每个标准的逐个查询，标准数量在系里量级下可接受。
pub async fn get_professor_detail(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = detail_cache_key(professor_id);

    // 1. 读缓存
    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<ProfessorDetailResponse>(&json) {
            Ok(detail) => {
                debug!("Professor detail cache hit: {}", professor_id);
                return Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")));
            }
            Err(_) => {
                cache.remove(&cache_key).await;
            }
        }
    }

    // 2. 教授必须存在
    let professor = match storage.get_professor_by_id(professor_id).await {
        Ok(Some(professor)) => professor,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfessorNotFound,
                "教授不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教授失败: {e}"),
                )),
            );
        }
    };

    // 3. 总体平均分；无评价时保持 null，不与 0 分混淆
    let average_score = match storage.calculate_overall_average(professor_id).await {
        Ok(average) => average.map(round_two),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("计算平均分失败: {e}"),
                )),
            );
        }
    };

    // 4. 遍历所有标准，取分标准平均分和最佳评论
    let criteria = match storage.list_criteria().await {
        Ok(criteria) => criteria,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评价标准失败: {e}"),
                )),
            );
        }
    };

    let mut aggregates = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        let criterion_average = match storage
            .calculate_criterion_average(professor_id, criterion.id)
            .await
        {
            Ok(average) => average.map(round_two),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("计算标准平均分失败: {e}"),
                    )),
                );
            }
        };

        let top_comment = match storage.get_top_comment(professor_id, criterion.id).await {
            Ok(top_comment) => top_comment,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询最佳评论失败: {e}"),
                    )),
                );
            }
        };

        aggregates.push(CriterionAggregate {
            criterion_id: criterion.id,
            criterion_name: criterion.name,
            average_score: criterion_average,
            top_comment,
        });
    }

    let response = ProfessorDetailResponse {
        id: professor.id,
        name: professor.name,
        email: professor.email,
        department: professor.department,
        average_score,
        criteria: aggregates,
        created_at: professor.created_at.to_rfc3339(),
        updated_at: professor.updated_at.to_rfc3339(),
    };

    // 5. 写缓存
    if let Ok(json) = serde_json::to_string(&response) {
        cache
            .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
