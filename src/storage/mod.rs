use std::sync::Arc;

use crate::models::{
    comments::{
        entities::VoteDirection,
        requests::CommentListQuery,
        responses::{CommentListItem, CommentListResponse, VoteCountsResponse},
    },
    courses::{entities::Course, requests::CreateCourseRequest},
    criteria::{
        entities::Criterion,
        requests::{CreateCriterionRequest, UpdateCriterionRequest},
    },
    evaluations::{entities::Evaluation, requests::CreateEvaluationRequest},
    professors::{
        entities::Professor,
        requests::{CreateProfessorRequest, UpdateProfessorRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户角色
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数（用于启动时判断是否需要初始化管理员）
    async fn count_users(&self) -> Result<u64>;

    /// 教授管理方法
    // 创建教授
    async fn create_professor(&self, professor: CreateProfessorRequest) -> Result<Professor>;
    // 通过ID获取教授信息
    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>>;
    // 通过邮箱获取教授信息
    async fn get_professor_by_email(&self, email: &str) -> Result<Option<Professor>>;
    // 列出教授，支持按名称模糊搜索
    async fn list_professors(&self, name: Option<String>) -> Result<Vec<Professor>>;
    // 按总体平均分排序返回前 N 位教授
    async fn list_top_professors_by_average(&self, top_n: u64) -> Result<Vec<(Professor, f64)>>;
    // 更新教授信息
    async fn update_professor(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>>;
    // 删除教授
    async fn delete_professor(&self, id: i64) -> Result<bool>;
    // 教授所有评价的算术平均分；无评价时返回 None
    async fn calculate_overall_average(&self, professor_id: i64) -> Result<Option<f64>>;
    // 教授在单个标准下的平均分；无评价时返回 None
    async fn calculate_criterion_average(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<f64>>;

    /// 评价标准管理方法
    // 创建评价标准
    async fn create_criterion(&self, criterion: CreateCriterionRequest) -> Result<Criterion>;
    // 通过ID获取评价标准
    async fn get_criterion_by_id(&self, id: i64) -> Result<Option<Criterion>>;
    // 列出所有评价标准
    async fn list_criteria(&self) -> Result<Vec<Criterion>>;
    // 更新评价标准
    async fn update_criterion(
        &self,
        id: i64,
        update: UpdateCriterionRequest,
    ) -> Result<Option<Criterion>>;
    // 删除评价标准
    async fn delete_criterion(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 列出所有课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 关联教授与课程
    async fn link_professor_to_course(&self, professor_id: i64, course_id: i64) -> Result<()>;
    // 教授是否教授该课程
    async fn professor_teaches_course(&self, professor_id: i64, course_id: i64) -> Result<bool>;

    /// 评价方法
    // 创建评价（可附带评论），重复评价返回 Conflict
    async fn create_evaluation(
        &self,
        user_id: i64,
        professor_id: i64,
        criterion_id: i64,
        evaluation: CreateEvaluationRequest,
    ) -> Result<Evaluation>;

    /// 评论与投票方法
    // 分页列出评论（按净得分排序，同分按创建时间倒序）
    async fn list_comments_with_pagination(
        &self,
        query: CommentListQuery,
    ) -> Result<CommentListResponse>;
    // 教授+标准下净得分最高的评论；并列时取最新
    async fn get_top_comment(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<CommentListItem>>;
    // 投票：每个用户对每条评论至多一票，重复投票返回 Conflict
    async fn cast_vote(
        &self,
        comment_id: i64,
        voter_id: i64,
        direction: VoteDirection,
    ) -> Result<VoteCountsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
