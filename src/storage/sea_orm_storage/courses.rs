//! 课程存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::professor_courses::{
    ActiveModel as ProfessorCourseActiveModel, Column as ProfessorCourseColumn,
    Entity as ProfessorCourses,
};
use crate::errors::{Result, UniHubError};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub(crate) async fn create_course_impl(&self, course: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(course.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_course()),
            Err(e) if is_unique_violation(&e) => Err(UniHubError::conflict("已存在同名课程")),
            Err(e) => Err(UniHubError::database_operation(format!("创建课程失败: {e}"))),
        }
    }

    /// 通过 ID 获取课程
    pub(crate) async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出所有课程
    pub(crate) async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let results = Courses::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 关联教授与课程
    pub(crate) async fn link_professor_to_course_impl(
        &self,
        professor_id: i64,
        course_id: i64,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = ProfessorCourseActiveModel {
            professor_id: Set(professor_id),
            course_id: Set(course_id),
            created_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                Err(UniHubError::conflict("该教授已关联此课程"))
            }
            Err(e) => Err(UniHubError::database_operation(format!(
                "关联教授与课程失败: {e}"
            ))),
        }
    }

    /// 教授是否教授该课程
    pub(crate) async fn professor_teaches_course_impl(
        &self,
        professor_id: i64,
        course_id: i64,
    ) -> Result<bool> {
        let count = ProfessorCourses::find()
            .filter(ProfessorCourseColumn::ProfessorId.eq(professor_id))
            .filter(ProfessorCourseColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| UniHubError::database_operation(format!("查询教授课程关联失败: {e}")))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use crate::models::courses::requests::CreateCourseRequest;

    #[tokio::test]
    async fn test_professor_course_link_roundtrip() {
        let storage = test_support::storage().await;
        let professor_id = test_support::seed_professor(&storage, "Prof. Teach").await;

        let course = storage
            .create_course_impl(CreateCourseRequest {
                name: "Databases".to_string(),
            })
            .await
            .unwrap();

        assert!(
            !storage
                .professor_teaches_course_impl(professor_id, course.id)
                .await
                .unwrap()
        );

        storage
            .link_professor_to_course_impl(professor_id, course.id)
            .await
            .unwrap();

        assert!(
            storage
                .professor_teaches_course_impl(professor_id, course.id)
                .await
                .unwrap()
        );

        // 重复关联必须被唯一索引拦下
        let duplicate = storage
            .link_professor_to_course_impl(professor_id, course.id)
            .await;
        assert!(matches!(
            duplicate,
            Err(crate::errors::UniHubError::Conflict(_))
        ));
    }
}
