//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod course_requests;
mod courses;
mod enrollments;
mod outbox;
mod submissions;
mod tasks;
mod users;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{PlatformError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, SqlErr,
};
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PlatformError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PlatformError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));

        // 内存数据库每个连接都是独立的库，只能保留唯一且常驻的连接
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options
                .max_connections(config.pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| PlatformError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PlatformError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PlatformError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 将唯一约束冲突映射为 Conflict，其余错误映射为数据库操作错误
pub(super) fn map_write_err(err: DbErr, conflict_message: &str, context: &str) -> PlatformError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => PlatformError::conflict(conflict_message),
        _ => PlatformError::database_operation(format!("{context}: {err}")),
    }
}

/// 插入时的外键冲突视为引用的记录不存在
pub(super) fn map_insert_err(
    err: DbErr,
    conflict_message: &str,
    missing_message: &str,
    context: &str,
) -> PlatformError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => PlatformError::not_found(missing_message),
        _ => map_write_err(err, conflict_message, context),
    }
}

/// 批量查询用户全名
pub(super) async fn load_user_names<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
) -> Result<HashMap<i64, String>> {
    let unique: Vec<i64> = ids
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }

    let users = Users::find()
        .filter(UserColumn::Id.is_in(unique))
        .all(conn)
        .await
        .map_err(|e| PlatformError::database_operation(format!("查询用户失败: {e}")))?;

    Ok(users.into_iter().map(|u| (u.id, u.full_name())).collect())
}

/// 查询单个用户全名，不存在时为空串
pub(super) async fn load_user_name<C: ConnectionTrait>(conn: &C, id: i64) -> Result<String> {
    Ok(load_user_names(conn, &[id])
        .await?
        .remove(&id)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("data/app.db").unwrap(),
            "sqlite://data/app.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}

// Storage trait 实现
use crate::models::{
    course_requests::entities::{CourseRequest, CourseRequestStatus},
    courses::{entities::Course, requests::UpdateCourseRequest},
    enrollments::entities::Enrollment,
    submissions::entities::TaskSubmission,
    tasks::{entities::Task, requests::NewTask},
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::{ClaimedBatch, Storage, SubmitOutcome};
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

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>> {
        self.list_users_impl(role).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 课程申请模块
    async fn create_course_request(
        &self,
        professor_id: i64,
        name: &str,
        description: &str,
    ) -> Result<CourseRequest> {
        self.create_course_request_impl(professor_id, name, description)
            .await
    }

    async fn get_course_request_by_id(&self, id: i64) -> Result<Option<CourseRequest>> {
        self.get_course_request_by_id_impl(id).await
    }

    async fn list_course_requests(
        &self,
        professor_id: Option<i64>,
        status: Option<CourseRequestStatus>,
    ) -> Result<Vec<CourseRequest>> {
        self.list_course_requests_impl(professor_id, status).await
    }

    async fn approve_course_request(&self, id: i64) -> Result<(CourseRequest, Course)> {
        self.approve_course_request_impl(id).await
    }

    async fn reject_course_request(&self, id: i64, reason: &str) -> Result<CourseRequest> {
        self.reject_course_request_impl(id, reason).await
    }

    // 课程模块
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn set_course_material(
        &self,
        id: i64,
        material_path: &str,
        material_name: &str,
    ) -> Result<Option<Course>> {
        self.set_course_material_impl(id, material_path, material_name)
            .await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 选课模块
    async fn enroll_student(
        &self,
        course_id: i64,
        student_id: i64,
        notify: bool,
    ) -> Result<Enrollment> {
        self.enroll_student_impl(course_id, student_id, notify)
            .await
    }

    async fn get_enrollment(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, student_id).await
    }

    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        self.list_course_enrollments_impl(course_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    // 任务模块
    async fn create_task(&self, task: NewTask) -> Result<Task> {
        self.create_task_impl(task).await
    }

    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(id).await
    }

    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<Task>> {
        self.list_course_tasks_impl(course_id).await
    }

    // 提交模块
    async fn submit_task(
        &self,
        task_id: i64,
        student_id: i64,
        file_path: &str,
        file_name: &str,
    ) -> Result<SubmitOutcome> {
        self.submit_task_impl(task_id, student_id, file_path, file_name)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<TaskSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_task_submissions(&self, task_id: i64) -> Result<Vec<TaskSubmission>> {
        self.list_task_submissions_impl(task_id).await
    }

    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<TaskSubmission>> {
        self.list_student_submissions_impl(student_id).await
    }

    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<TaskSubmission>> {
        self.list_course_submissions_impl(course_id).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<TaskSubmission>> {
        self.grade_submission_impl(id, grade, comment).await
    }

    // 通知发件箱模块
    async fn claim_outbox_batch(&self, limit: u64) -> Result<ClaimedBatch> {
        self.claim_outbox_batch_impl(limit).await
    }

    async fn purge_dispatched_outbox(
        &self,
        before: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        self.purge_dispatched_outbox_impl(before).await
    }
}
