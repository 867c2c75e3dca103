//! 评价标准存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::criteria::{ActiveModel, Column, Entity as Criteria};
use crate::errors::{Result, UniHubError};
use crate::models::criteria::{
    entities::Criterion,
    requests::{CreateCriterionRequest, UpdateCriterionRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评价标准
    pub(crate) async fn create_criterion_impl(
        &self,
        criterion: CreateCriterionRequest,
    ) -> Result<Criterion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(criterion.name),
            description: Set(criterion.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_criterion()),
            Err(e) if is_unique_violation(&e) => {
                Err(UniHubError::conflict("已存在同名的评价标准"))
            }
            Err(e) => Err(UniHubError::database_operation(format!(
                "创建评价标准失败: {e}"
            ))),
        }
    }

    /// 通过 ID 获取评价标准
    pub(crate) async fn get_criterion_by_id_impl(&self, id: i64) -> Result<Option<Criterion>> {
        let result = Criteria::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评价标准失败: {e}")))?;

        Ok(result.map(|m| m.into_criterion()))
    }

    /// 列出所有评价标准
    pub(crate) async fn list_criteria_impl(&self) -> Result<Vec<Criterion>> {
        let results = Criteria::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评价标准列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_criterion()).collect())
    }

    /// 更新评价标准
    pub(crate) async fn update_criterion_impl(
        &self,
        id: i64,
        update: UpdateCriterionRequest,
    ) -> Result<Option<Criterion>> {
        let existing = Criteria::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询评价标准失败: {e}")))?;
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
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        match model.update(&self.db).await {
            Ok(_) => self.get_criterion_by_id_impl(id).await,
            Err(e) if is_unique_violation(&e) => {
                Err(UniHubError::conflict("已存在同名的评价标准"))
            }
            Err(e) => Err(UniHubError::database_operation(format!(
                "更新评价标准失败: {e}"
            ))),
        }
    }

    /// 删除评价标准
    pub(crate) async fn delete_criterion_impl(&self, id: i64) -> Result<bool> {
        let result = Criteria::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("删除评价标准失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
