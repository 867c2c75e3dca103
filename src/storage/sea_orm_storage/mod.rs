//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod comments;
mod courses;
mod criteria;
mod evaluations;
mod professors;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, UniHubError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| UniHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| UniHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| UniHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| UniHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(UniHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 判断数据库错误是否为唯一约束冲突
///
/// 幂等投票与重复评价都依赖唯一索引在并发下兜底，
/// 这里把各数据库的具体错误统一成一个判断。
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<Option<User>> {
        self.update_user_role_impl(id, role).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 教授模块
    async fn create_professor(&self, professor: CreateProfessorRequest) -> Result<Professor> {
        self.create_professor_impl(professor).await
    }

    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>> {
        self.get_professor_by_id_impl(id).await
    }

    async fn get_professor_by_email(&self, email: &str) -> Result<Option<Professor>> {
        self.get_professor_by_email_impl(email).await
    }

    async fn list_professors(&self, name: Option<String>) -> Result<Vec<Professor>> {
        self.list_professors_impl(name).await
    }

    async fn list_top_professors_by_average(&self, top_n: u64) -> Result<Vec<(Professor, f64)>> {
        self.list_top_professors_by_average_impl(top_n).await
    }

    async fn update_professor(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>> {
        self.update_professor_impl(id, update).await
    }

    async fn delete_professor(&self, id: i64) -> Result<bool> {
        self.delete_professor_impl(id).await
    }

    async fn calculate_overall_average(&self, professor_id: i64) -> Result<Option<f64>> {
        self.calculate_overall_average_impl(professor_id).await
    }

    async fn calculate_criterion_average(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<f64>> {
        self.calculate_criterion_average_impl(professor_id, criterion_id)
            .await
    }

    // 评价标准模块
    async fn create_criterion(&self, criterion: CreateCriterionRequest) -> Result<Criterion> {
        self.create_criterion_impl(criterion).await
    }

    async fn get_criterion_by_id(&self, id: i64) -> Result<Option<Criterion>> {
        self.get_criterion_by_id_impl(id).await
    }

    async fn list_criteria(&self) -> Result<Vec<Criterion>> {
        self.list_criteria_impl().await
    }

    async fn update_criterion(
        &self,
        id: i64,
        update: UpdateCriterionRequest,
    ) -> Result<Option<Criterion>> {
        self.update_criterion_impl(id, update).await
    }

    async fn delete_criterion(&self, id: i64) -> Result<bool> {
        self.delete_criterion_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn link_professor_to_course(&self, professor_id: i64, course_id: i64) -> Result<()> {
        self.link_professor_to_course_impl(professor_id, course_id)
            .await
    }

    async fn professor_teaches_course(&self, professor_id: i64, course_id: i64) -> Result<bool> {
        self.professor_teaches_course_impl(professor_id, course_id)
            .await
    }

    // 评价模块
    async fn create_evaluation(
        &self,
        user_id: i64,
        professor_id: i64,
        criterion_id: i64,
        evaluation: CreateEvaluationRequest,
    ) -> Result<Evaluation> {
        self.create_evaluation_impl(user_id, professor_id, criterion_id, evaluation)
            .await
    }

    // 评论与投票模块
    async fn list_comments_with_pagination(
        &self,
        query: CommentListQuery,
    ) -> Result<CommentListResponse> {
        self.list_comments_with_pagination_impl(query).await
    }

    async fn get_top_comment(
        &self,
        professor_id: i64,
        criterion_id: i64,
    ) -> Result<Option<CommentListItem>> {
        self.get_top_comment_impl(professor_id, criterion_id).await
    }

    async fn cast_vote(
        &self,
        comment_id: i64,
        voter_id: i64,
        direction: VoteDirection,
    ) -> Result<VoteCountsResponse> {
        self.cast_vote_impl(comment_id, voter_id, direction).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 测试用的内存数据库与种子数据

    use super::SeaOrmStorage;
    use crate::entity::prelude::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};

    /// 连接内存 SQLite 并应用迁移
    ///
    /// max_connections 必须为 1，否则每个池内连接各自持有一份内存数据库。
    pub(crate) async fn storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    pub(crate) async fn seed_user(storage: &SeaOrmStorage, username: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let user = UserActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            password_hash: Set("x".to_string()),
            role: Set("user".to_string()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        user.insert(&storage.db).await.expect("seed user").id
    }

    pub(crate) async fn seed_professor(storage: &SeaOrmStorage, name: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let professor = ProfessorActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        professor.insert(&storage.db).await.expect("seed professor").id
    }

    pub(crate) async fn seed_criterion(storage: &SeaOrmStorage, name: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let criterion = CriterionActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        criterion.insert(&storage.db).await.expect("seed criterion").id
    }

    pub(crate) async fn seed_evaluation(
        storage: &SeaOrmStorage,
        user_id: i64,
        professor_id: i64,
        criterion_id: i64,
        score: i32,
    ) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let evaluation = EvaluationActiveModel {
            score: Set(score),
            user_id: Set(user_id),
            professor_id: Set(professor_id),
            criterion_id: Set(criterion_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        evaluation.insert(&storage.db).await.expect("seed evaluation").id
    }

    /// 指定创建时间的评论种子，便于测试同分时按时间决出先后
    pub(crate) async fn seed_comment_at(
        storage: &SeaOrmStorage,
        evaluation_id: i64,
        user_id: i64,
        text: &str,
        created_at: i64,
    ) -> i64 {
        let comment = CommentActiveModel {
            text: Set(text.to_string()),
            evaluation_id: Set(evaluation_id),
            user_id: Set(user_id),
            positive_votes: Set(0),
            negative_votes: Set(0),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            ..Default::default()
        };
        comment.insert(&storage.db).await.expect("seed comment").id
    }
}
