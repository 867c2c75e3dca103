//! 教授存储操作
//!
//! 平均分相关查询全部下推到数据库（AVG / GROUP BY），
//! 无评价时 AVG 为 NULL，对应返回 None。

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::professors::{ActiveModel, Column, Entity as Professors};
use crate::errors::{Result, UniHubError};
use crate::models::professors::{
    entities::Professor,
    requests::{CreateProfessorRequest, UpdateProfessorRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// AVG(score) 表达式
fn average_score_expr() -> SimpleExpr {
    Func::avg(Expr::col((Evaluations, EvaluationColumn::Score))).into()
}

impl SeaOrmStorage {
    /// 创建教授
    pub(crate) async fn create_professor_impl(
        &self,
        professor: CreateProfessorRequest,
    ) -> Result<Professor> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(professor.name),
            email: Set(professor.email),
            department: Set(professor.department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_professor()),
            Err(e) if is_unique_violation(&e) => {
                Err(UniHubError::conflict("教授邮箱已被其他教授使用"))
            }
            Err(e) => Err(UniHubError::database_operation(format!("创建教授失败: {e}"))),
        }
    }

    /// 通过 ID 获取教授
    pub(crate) async fn get_professor_by_id_impl(&self, id: i64) -> Result<Option<Professor>> {
        let result = Professors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授失败: {e}")))?;

        Ok(result.map(|m| m.into_professor()))
    }

    /// 通过邮箱获取教授
    pub(crate) async fn get_professor_by_email_impl(&self, email: &str) -> Result<Option<Professor>> {
        let result = Professors::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授失败: {e}")))?;

        Ok(result.map(|m| m.into_professor()))
    }

    /// 列出教授，支持名称模糊搜索
    pub(crate) async fn list_professors_impl(&self, name: Option<String>) -> Result<Vec<Professor>> {
        let mut select = Professors::find();

        if let Some(ref name) = name {
            let pattern = format!("%{}%", escape_like_pattern(name));
            select = select.filter(Column::Name.like(&pattern));
        }

        let results = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_professor()).collect())
    }

    /// 按总体平均分倒序返回前 N 位教授
    pub(crate) async fn list_top_professors_by_average_impl(
        &self,
        top_n: u64,
    ) -> Result<Vec<(Professor, f64)>> {
        // 先聚合出 (professor_id, 平均分)，再批量取教授信息
        let rows: Vec<(i64, f64)> = Evaluations::find()
            .select_only()
            .column(EvaluationColumn::ProfessorId)
            .column_as(average_score_expr(), "average_score")
            .group_by(EvaluationColumn::ProfessorId)
            .order_by(average_score_expr(), Order::Desc)
            .limit(top_n)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授平均分失败: {e}")))?;

        let professor_ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        let professors = Professors::find()
            .filter(Column::Id.is_in(professor_ids))
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授信息失败: {e}")))?;

        let professor_map: HashMap<i64, _> = professors.into_iter().map(|p| (p.id, p)).collect();

        // 保持聚合查询给出的顺序
        Ok(rows
            .into_iter()
            .filter_map(|(id, average)| {
                professor_map
                    .get(&id)
                    .map(|p| (p.clone().into_professor(), average))
            })
            .collect())
    }

    /// 更新教授信息
    pub(crate) async fn update_professor_impl(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>> {
        let existing = Professors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }

        match model.update(&self.db).await {
            Ok(_) => self.get_professor_by_id_impl(id).await,
            Err(e) if is_unique_violation(&e) => {
                Err(UniHubError::conflict("教授邮箱已被其他教授使用"))
            }
            Err(e) => Err(UniHubError::database_operation(format!("更新教授失败: {e}"))),
        }
    }

    /// 删除教授
    pub(crate) async fn delete_professor_impl(&self, id: i64) -> Result<bool> {
        let result = Professors::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("删除教授失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教授所有评价的算术平均分；无评价时返回 None
    pub(crate) async fn calculate_overall_average_impl(
        &self,
        professor_id: i64,
    ) -> Result<Option<f64>> {
        let average = Evaluations::find()
            .select_only()
            .column_as(average_score_expr(), "average_score")
            .filter(EvaluationColumn::ProfessorId.eq(professor_id))
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("计算总体平均分失败: {e}")))?
            .flatten();

        Ok(average)
    }

    /// 教授在单个标准下的平均分；无评价时返回 None
    pub(crate) async fn calculate_criterion_average_impl(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<f64>> {
        let average = Evaluations::find()
            .select_only()
            .column_as(average_score_expr(), "average_score")
            .filter(EvaluationColumn::ProfessorId.eq(professor_id))
            .filter(EvaluationColumn::CriterionId.eq(criterion_id))
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("计算标准平均分失败: {e}")))?
            .flatten();

        Ok(average)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;

    #[tokio::test]
    async fn test_overall_average_none_without_evaluations() {
        let storage = test_support::storage().await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Empty").await;

        let average = storage
            .calculate_overall_average_impl(professor_id)
            .await
            .unwrap();
        assert_eq!(average, None);
    }

    #[tokio::test]
    async fn test_overall_average_of_5_3_4_is_4() {
        let storage = test_support::storage().await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Mean").await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;

        for (i, score) in [5, 3, 4].into_iter().enumerate() {
            let user_id = test_support::seed_user(&storage, &format!("rater{i}")).await;
            test_support::seed_evaluation(&storage, user_id, professor_id, criterion_id, score)
                .await;
        }

        let average = storage
            .calculate_overall_average_impl(professor_id)
            .await
            .unwrap();
        assert_eq!(average, Some(4.0));
    }

    #[tokio::test]
    async fn test_criterion_average_is_scoped() {
        let storage = test_support::storage().await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Scoped").await;
        let clarity = test_support::seed_criterion(&storage, "clarity").await;
        let fairness = test_support::seed_criterion(&storage, "fairness").await;

        let u1 = test_support::seed_user(&storage, "scoped1").await;
        let u2 = test_support::seed_user(&storage, "scoped2").await;
        test_support::seed_evaluation(&storage, u1, professor_id, clarity, 5).await;
        test_support::seed_evaluation(&storage, u2, professor_id, fairness, 1).await;

        let clarity_avg = storage
            .calculate_criterion_average_impl(professor_id, clarity)
            .await
            .unwrap();
        assert_eq!(clarity_avg, Some(5.0));

        let fairness_avg = storage
            .calculate_criterion_average_impl(professor_id, fairness)
            .await
            .unwrap();
        assert_eq!(fairness_avg, Some(1.0));
    }

    #[tokio::test]
    async fn test_top_professors_ordered_by_average() {
        let storage = test_support::storage().await;
        let criterion_id = test_support::seed_criterion(&storage, "clarity").await;

        let low = test_support::seed_professor(&storage, "Prof. Low").await;
        let high = test_support::seed_professor(&storage, "Prof. High").await;
        let unrated = test_support::seed_professor(&storage, "Prof. Unrated").await;

        let u1 = test_support::seed_user(&storage, "topvoter1").await;
        let u2 = test_support::seed_user(&storage, "topvoter2").await;
        test_support::seed_evaluation(&storage, u1, low, criterion_id, 2).await;
        test_support::seed_evaluation(&storage, u2, high, criterion_id, 5).await;

        let top = storage.list_top_professors_by_average_impl(10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0.id, high);
        assert_eq!(top[0].1, 5.0);
        assert_eq!(top[1].0.id, low);
        // 没有评价的教授不会出现在榜单里
        assert!(top.iter().all(|(p, _)| p.id != unrated));
    }
}
