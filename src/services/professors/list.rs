use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProfessorService, round_two};
use crate::models::professors::requests::ProfessorListParams;
use crate::models::professors::responses::{ProfessorListItem, ProfessorListResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 列出教授
/// GET /professors?name= | ?top=
///
/// - name：按名称模糊搜索，附带各自的总体平均分
/// - top：按总体平均分返回前 N 位（只包含有评价的教授）
/// - 两者都不传：返回全部教授，附带平均分
pub async fn list_professors(
    service: &ProfessorService,
    request: &HttpRequest,
    params: ProfessorListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // top 榜单走聚合查询
    if params.name.is_none()
        && let Some(top_n) = params.top
        && top_n > 0
    {
        return match storage.list_top_professors_by_average(top_n).await {
            Ok(rows) => {
                let items = rows
                    .into_iter()
                    .map(|(professor, average)| ProfessorListItem {
                        id: professor.id,
                        name: professor.name,
                        email: professor.email,
                        department: professor.department,
                        average_score: Some(round_two(average)),
                        created_at: professor.created_at.to_rfc3339(),
                        updated_at: professor.updated_at.to_rfc3339(),
                    })
                    .collect();
                Ok(HttpResponse::Ok()
                    .json(ApiResponse::success(ProfessorListResponse { items }, "查询成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教授榜单失败: {e}"),
                )),
            ),
        };
    }

    let professors = match storage.list_professors(params.name.clone()).await {
        Ok(professors) => professors,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教授列表失败: {e}"),
                )),
            );
        }
    };

    // 补齐每位教授的总体平均分
    let mut items = Vec::with_capacity(professors.len());
    for professor in professors {
        let average_score = match storage.calculate_overall_average(professor.id).await {
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
        items.push(ProfessorListItem {
            id: professor.id,
            name: professor.name,
            email: professor.email,
            department: professor.department,
            average_score,
            created_at: professor.created_at.to_rfc3339(),
            updated_at: professor.updated_at.to_rfc3339(),
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProfessorListResponse { items }, "查询成功")))
}
