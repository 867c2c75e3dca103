use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评价标准实体（如“授课清晰度”“给分公平性”）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criterion.ts")]
pub struct Criterion {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
