use serde::Deserialize;
use ts_rs::TS;

/// 创建评价标准请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criterion.ts")]
pub struct CreateCriterionRequest {
    pub name: String,
    pub description: Option<String>,
}

/// 更新评价标准请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criterion.ts")]
pub struct UpdateCriterionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
