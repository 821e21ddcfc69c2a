use std::collections::HashMap;

use super::{SeaOrmStorage, map_insert_err};
use super::outbox::enqueue_event;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{PlatformError, Result};
use crate::models::{
    notifications::entities::NotificationEvent,
    tasks::{entities::Task, requests::NewTask},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量查询课程名
    pub(super) async fn load_course_names<C: ConnectionTrait>(
        conn: &C,
        ids: &[i64],
    ) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(ids.to_vec()))
            .all(conn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(courses.into_iter().map(|c| (c.id, c.name)).collect())
    }

    /// 创建任务并通知已选课学生
    pub async fn create_task_impl(&self, task: NewTask) -> Result<Task> {
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            course_id: Set(task.course_id),
            title: Set(task.title),
            description: Set(task.description),
            deadline: Set(task.deadline.timestamp()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            map_insert_err(e, "Task already exists", "Course not found", "创建任务失败")
        })?;

        let course = Courses::find_by_id(model.course_id)
            .one(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| PlatformError::not_found("Course not found"))?;

        let task = model.into_task(course.name);

        enqueue_event(&txn, &NotificationEvent::TaskCreated { task: task.clone() }).await?;

        txn.commit().await?;
        Ok(task)
    }

    /// 通过 ID 获取任务
    pub async fn get_task_by_id_impl(&self, id: i64) -> Result<Option<Task>> {
        let Some(model) = Tasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询任务失败: {e}")))?
        else {
            return Ok(None);
        };

        let course_name = Self::load_course_names(&self.db, &[model.course_id])
            .await?
            .remove(&model.course_id)
            .unwrap_or_default();

        Ok(Some(model.into_task(course_name)))
    }

    /// 列出课程任务，截止时间最晚的在前
    pub async fn list_course_tasks_impl(&self, course_id: i64) -> Result<Vec<Task>> {
        let course_name = Self::load_course_names(&self.db, &[course_id])
            .await?
            .remove(&course_id)
            .unwrap_or_default();

        let models = Tasks::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::Deadline)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询任务列表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_task(course_name.clone()))
            .collect())
    }
}
