//! 评价存储操作
//!
//! 重复评价的兜底是 (user_id, professor_id, criterion_id) 唯一索引：
//! 应用层先查重给出友好错误，并发竞争时由插入失败兜底，两条路径
//! 都映射为 Conflict。

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::comments::ActiveModel as CommentActiveModel;
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::errors::{Result, UniHubError};
use crate::models::evaluations::{entities::Evaluation, requests::CreateEvaluationRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建评价（可附带评论）
    pub(crate) async fn create_evaluation_impl(
        &self,
        user_id: i64,
        professor_id: i64,
        criterion_id: i64,
        evaluation: CreateEvaluationRequest,
    ) -> Result<Evaluation> {
        let now = chrono::Utc::now().timestamp();

        // 先查重，给出明确错误；并发下交由唯一索引兜底
        let existing = Evaluations::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ProfessorId.eq(professor_id))
            .filter(Column::CriterionId.eq(criterion_id))
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评价失败: {e}")))?;
        if existing.is_some() {
            return Err(UniHubError::conflict("您已在该标准下评价过这位教授"));
        }

        let model = ActiveModel {
            score: Set(evaluation.score),
            user_id: Set(user_id),
            professor_id: Set(professor_id),
            criterion_id: Set(criterion_id),
            course_id: Set(evaluation.course_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = match model.insert(&self.db).await {
            Ok(result) => result,
            Err(e) if is_unique_violation(&e) => {
                return Err(UniHubError::conflict("您已在该标准下评价过这位教授"));
            }
            Err(e) => {
                return Err(UniHubError::database_operation(format!(
                    "创建评价失败: {e}"
                )));
            }
        };

        // 附带的评论与评价一同创建，作者即评价人
        let comment_id = match evaluation
            .comment_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            Some(text) => {
                let comment = CommentActiveModel {
                    text: Set(text.to_string()),
                    evaluation_id: Set(inserted.id),
                    user_id: Set(user_id),
                    positive_votes: Set(0),
                    negative_votes: Set(0),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let inserted_comment = comment
                    .insert(&self.db)
                    .await
                    .map_err(|e| UniHubError::database_operation(format!("创建评论失败: {e}")))?;
                Some(inserted_comment.id)
            }
            None => None,
        };

        Ok(Evaluation {
            id: inserted.id,
            score: inserted.score,
            user_id: inserted.user_id,
            professor_id: inserted.professor_id,
            criterion_id: inserted.criterion_id,
            course_id: inserted.course_id,
            comment_id,
            created_at: chrono::DateTime::from_timestamp(inserted.created_at, 0)
                .unwrap_or_default(),
            updated_at: chrono::DateTime::from_timestamp(inserted.updated_at, 0)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::entity::comments::Entity as Comments;
    use crate::errors::UniHubError;
    use crate::models::evaluations::requests::CreateEvaluationRequest;
    use sea_orm::EntityTrait;

    fn request(score: i32, comment_text: Option<&str>) -> CreateEvaluationRequest {
        CreateEvaluationRequest {
            score,
            course_id: None,
            comment_text: comment_text.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_duplicate_evaluation_conflicts() {
        let storage = test_support::storage().await;
        let user_id = test_support::seed_user(&storage, "evaluator").await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Dup").await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;

        storage
            .create_evaluation_impl(user_id, professor_id, criterion_id, request(5, None))
            .await
            .unwrap();

        let second = storage
            .create_evaluation_impl(user_id, professor_id, criterion_id, request(3, None))
            .await;
        assert!(matches!(second, Err(UniHubError::Conflict(_))));

        // 冲突的提交不得影响已有数据
        let average = storage
            .calculate_criterion_average_impl(professor_id, criterion_id)
            .await
            .unwrap();
        assert_eq!(average, Some(5.0));
    }

    #[tokio::test]
    async fn test_same_user_can_evaluate_other_criteria() {
        let storage = test_support::storage().await;
        let user_id = test_support::seed_user(&storage, "multi").await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Multi").await;
        let clarity = test_support::seed_criterion(&storage, "clarity").await;
        let fairness = test_support::seed_criterion(&storage, "fairness").await;

        storage
            .create_evaluation_impl(user_id, professor_id, clarity, request(4, None))
            .await
            .unwrap();
        storage
            .create_evaluation_impl(user_id, professor_id, fairness, request(2, None))
            .await
            .unwrap();

        let overall = storage
            .calculate_overall_average_impl(professor_id)
            .await
            .unwrap();
        assert_eq!(overall, Some(3.0));
    }

    #[tokio::test]
    async fn test_comment_created_alongside_evaluation() {
        let storage = test_support::storage().await;
        let user_id = test_support::seed_user(&storage, "commenter").await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Comment").await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;

        let evaluation = storage
            .create_evaluation_impl(
                user_id,
                professor_id,
                criterion_id,
                request(5, Some("  great lectures  ")),
            )
            .await
            .unwrap();

        let comment_id = evaluation.comment_id.expect("comment should be created");
        let comment = Comments::find_by_id(comment_id)
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(comment.text, "great lectures");
        assert_eq!(comment.evaluation_id, evaluation.id);
        assert_eq!(comment.user_id, user_id);
        assert_eq!(comment.positive_votes, 0);
        assert_eq!(comment.negative_votes, 0);
    }

    #[tokio::test]
    async fn test_blank_comment_text_is_ignored() {
        let storage = test_support::storage().await;
        let user_id = test_support::seed_user(&storage, "blanker").await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Blank").await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;

        let evaluation = storage
            .create_evaluation_impl(user_id, professor_id, criterion_id, request(4, Some("   ")))
            .await
            .unwrap();
        assert_eq!(evaluation.comment_id, None);
    }
}
