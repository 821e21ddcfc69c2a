use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    course_requests::entities::{CourseRequest, CourseRequestStatus},
    courses::{entities::Course, requests::UpdateCourseRequest},
    enrollments::entities::Enrollment,
    notifications::entities::OutboxEntry,
    submissions::entities::TaskSubmission,
    tasks::{entities::Task, requests::NewTask},
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 提交任务的结果
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub submission: TaskSubmission,
    /// 是否为重复提交（覆盖了已有记录）
    pub resubmitted: bool,
}

/// 一次领取发件箱的结果
#[derive(Debug, Clone, Default)]
pub struct ClaimedBatch {
    /// 本次查询到的待分发记录数，含被其他分发器抢走或无法解析的记录
    pub fetched: usize,
    pub entries: Vec<OutboxEntry>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户，可按角色筛选
    async fn list_users(&self, role: Option<UserRole>) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 统计某角色的用户数
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 课程申请方法
    // 提交课程申请，并写入通知发件箱
    async fn create_course_request(
        &self,
        professor_id: i64,
        name: &str,
        description: &str,
    ) -> Result<CourseRequest>;
    // 通过ID获取课程申请
    async fn get_course_request_by_id(&self, id: i64) -> Result<Option<CourseRequest>>;
    // 列出课程申请，可按教授和状态筛选
    async fn list_course_requests(
        &self,
        professor_id: Option<i64>,
        status: Option<CourseRequestStatus>,
    ) -> Result<Vec<CourseRequest>>;
    // 批准课程申请：条件更新状态并创建课程，同一事务
    async fn approve_course_request(&self, id: i64) -> Result<(CourseRequest, Course)>;
    // 驳回课程申请：条件更新状态并记录原因，同一事务
    async fn reject_course_request(&self, id: i64, reason: &str) -> Result<CourseRequest>;

    /// 课程管理方法
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 更新课程信息
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    // 设置课程资料，并通知已选课学生
    async fn set_course_material(
        &self,
        id: i64,
        material_path: &str,
        material_name: &str,
    ) -> Result<Option<Course>>;
    // 删除课程及其选课、任务、提交
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 选课方法
    // 选课，重复时返回 Conflict；notify 为真时通知学生
    async fn enroll_student(
        &self,
        course_id: i64,
        student_id: i64,
        notify: bool,
    ) -> Result<Enrollment>;
    // 获取某学生在某课程中的选课记录
    async fn get_enrollment(&self, course_id: i64, student_id: i64)
    -> Result<Option<Enrollment>>;
    // 列出课程的选课记录
    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>>;
    // 列出学生已选的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;

    /// 任务方法
    // 创建任务，并通知已选课学生
    async fn create_task(&self, task: NewTask) -> Result<Task>;
    // 通过ID获取任务
    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>>;
    // 列出课程任务，按截止时间倒序
    async fn list_course_tasks(&self, course_id: i64) -> Result<Vec<Task>>;

    /// 提交方法
    // 提交或覆盖提交，覆盖时清空评分
    async fn submit_task(
        &self,
        task_id: i64,
        student_id: i64,
        file_path: &str,
        file_name: &str,
    ) -> Result<SubmitOutcome>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<TaskSubmission>>;
    // 列出任务的全部提交
    async fn list_task_submissions(&self, task_id: i64) -> Result<Vec<TaskSubmission>>;
    // 列出学生的全部提交
    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<TaskSubmission>>;
    // 列出课程下所有任务的提交
    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<TaskSubmission>>;
    // 评分，并通知学生
    async fn grade_submission(
        &self,
        id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<TaskSubmission>>;

    /// 通知发件箱方法
    // 领取一批待分发的事件（每条至多被领取一次）
    async fn claim_outbox_batch(&self, limit: u64) -> Result<ClaimedBatch>;
    // 清理早于指定时间的已分发事件
    async fn purge_dispatched_outbox(&self, before: chrono::DateTime<chrono::Utc>)
    -> Result<u64>;
}

/// 按配置创建存储实例
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
