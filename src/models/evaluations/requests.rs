use serde::Deserialize;
use ts_rs::TS;

/// 创建评价请求
///
/// professor_id 与 criterion_id 来自路径参数，评价人来自认证信息。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    /// 1-5 分
    pub score: i32,
    /// 关联课程（可选）；教授必须教授该课程
    pub course_id: Option<i64>,
    /// 随评价附带的评论文本（可选，空白视为未填写）
    pub comment_text: Option<String>,
}
