use std::collections::HashMap;

use super::outbox::enqueue_event;
use super::{SeaOrmStorage, load_user_names, map_insert_err};
use crate::entity::courses::Entity as Courses;
use crate::entity::task_submissions::{ActiveModel, Column, Entity as TaskSubmissions, Model};
use crate::entity::tasks::{Column as TaskColumn, Entity as Tasks};
use crate::errors::{PlatformError, Result};
use crate::models::{
    notifications::entities::NotificationEvent, submissions::entities::TaskSubmission,
};
use crate::storage::SubmitOutcome;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 批量转换提交并填充任务标题与学生姓名
    async fn hydrate_submissions<C: ConnectionTrait>(
        conn: &C,
        models: Vec<Model>,
    ) -> Result<Vec<TaskSubmission>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let task_ids: Vec<i64> = models.iter().map(|m| m.task_id).collect();
        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();

        let titles: HashMap<i64, String> = Tasks::find()
            .filter(TaskColumn::Id.is_in(task_ids))
            .all(conn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询任务失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t.title))
            .collect();
        let names = load_user_names(conn, &student_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let title = titles.get(&m.task_id).cloned().unwrap_or_default();
                let name = names.get(&m.student_id).cloned().unwrap_or_default();
                m.into_submission(title, name)
            })
            .collect())
    }

    async fn hydrate_submission<C: ConnectionTrait>(
        conn: &C,
        model: Model,
    ) -> Result<TaskSubmission> {
        Self::hydrate_submissions(conn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| PlatformError::internal("Failed to load submission"))
    }

    /// 提交任务
    ///
    /// 首次提交新建记录；再次提交覆盖文件与提交时间，并清空评分、评语与评分时间。
    /// 覆盖更新作为事务内第一条语句，同一学生的并发提交在写锁上排队。
    pub async fn submit_task_impl(
        &self,
        task_id: i64,
        student_id: i64,
        file_path: &str,
        file_name: &str,
    ) -> Result<SubmitOutcome> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        let overwritten = TaskSubmissions::update_many()
            .col_expr(Column::FilePath, Expr::value(file_path))
            .col_expr(Column::FileName, Expr::value(file_name))
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::Grade, Expr::value(Option::<i32>::None))
            .col_expr(Column::Comment, Expr::value(Option::<String>::None))
            .col_expr(Column::GradedAt, Expr::value(Option::<i64>::None))
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("更新提交失败: {e}")))?;

        let resubmitted = overwritten.rows_affected > 0;
        let model = if resubmitted {
            TaskSubmissions::find()
                .filter(Column::TaskId.eq(task_id))
                .filter(Column::StudentId.eq(student_id))
                .one(&txn)
                .await
                .map_err(|e| PlatformError::database_operation(format!("查询提交失败: {e}")))?
                .ok_or_else(|| PlatformError::internal("Failed to load submission"))?
        } else {
            ActiveModel {
                task_id: Set(task_id),
                student_id: Set(student_id),
                file_path: Set(file_path.to_string()),
                file_name: Set(file_name.to_string()),
                grade: Set(None),
                comment: Set(None),
                submitted_at: Set(now),
                graded_at: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                map_insert_err(e, "Submission already exists", "Task not found", "创建提交失败")
            })?
        };

        let submission = Self::hydrate_submission(&txn, model).await?;

        // 只有首次提交通知教授
        if !resubmitted {
            let task = Tasks::find_by_id(task_id)
                .one(&txn)
                .await
                .map_err(|e| PlatformError::database_operation(format!("查询任务失败: {e}")))?
                .ok_or_else(|| PlatformError::not_found("Task not found"))?;
            let course = Courses::find_by_id(task.course_id)
                .one(&txn)
                .await
                .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
                .ok_or_else(|| PlatformError::not_found("Course not found"))?;

            enqueue_event(
                &txn,
                &NotificationEvent::TaskSubmitted {
                    submission: submission.clone(),
                    course_name: course.name,
                    professor_id: course.professor_id,
                },
            )
            .await?;
        }

        txn.commit().await?;
        Ok(SubmitOutcome {
            submission,
            resubmitted,
        })
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<TaskSubmission>> {
        let Some(model) = TaskSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(Some(Self::hydrate_submission(&self.db, model).await?))
    }

    /// 列出任务的全部提交
    pub async fn list_task_submissions_impl(&self, task_id: i64) -> Result<Vec<TaskSubmission>> {
        let models = TaskSubmissions::find()
            .filter(Column::TaskId.eq(task_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询提交列表失败: {e}")))?;

        Self::hydrate_submissions(&self.db, models).await
    }

    /// 列出学生的全部提交
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<TaskSubmission>> {
        let models = TaskSubmissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询提交列表失败: {e}")))?;

        Self::hydrate_submissions(&self.db, models).await
    }

    /// 列出课程下所有任务的提交
    pub async fn list_course_submissions_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<TaskSubmission>> {
        let task_ids: Vec<i64> = Tasks::find()
            .select_only()
            .column(TaskColumn::Id)
            .filter(TaskColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程任务失败: {e}")))?;

        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TaskSubmissions::find()
            .filter(Column::TaskId.is_in(task_ids))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询提交列表失败: {e}")))?;

        Self::hydrate_submissions(&self.db, models).await
    }

    /// 评分并通知学生
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<TaskSubmission>> {
        let txn = self.db.begin().await?;

        let result = TaskSubmissions::update_many()
            .col_expr(Column::Grade, Expr::value(Some(grade)))
            .col_expr(Column::Comment, Expr::value(comment))
            .col_expr(
                Column::GradedAt,
                Expr::value(Some(chrono::Utc::now().timestamp())),
            )
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("评分失败: {e}")))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = TaskSubmissions::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| PlatformError::internal("Failed to load submission"))?;
        let task_id = updated.task_id;

        let submission = Self::hydrate_submission(&txn, updated).await?;

        let course_name = match Tasks::find_by_id(task_id)
            .one(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询任务失败: {e}")))?
        {
            Some(task) => Self::load_course_names(&txn, &[task.course_id])
                .await?
                .remove(&task.course_id)
                .unwrap_or_default(),
            None => String::new(),
        };

        enqueue_event(
            &txn,
            &NotificationEvent::SubmissionGraded {
                submission: submission.clone(),
                course_name,
            },
        )
        .await?;

        txn.commit().await?;
        Ok(Some(submission))
    }
}
