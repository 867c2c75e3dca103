use serde::Deserialize;
use ts_rs::TS;

/// 创建教授请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct CreateProfessorRequest {
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// 更新教授请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct UpdateProfessorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// 教授列表查询参数（HTTP 请求）
///
/// `name` 与 `top` 互斥，同时提供时优先按名称搜索。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/professor.ts")]
pub struct ProfessorListParams {
    /// 名称模糊搜索
    pub name: Option<String>,
    /// 返回平均分最高的前 N 位教授
    pub top: Option<u64>,
}
