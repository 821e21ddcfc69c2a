use super::outbox::enqueue_event;
use super::{SeaOrmStorage, load_user_name, load_user_names};
use crate::entity::course_enrollments::{
    Column as EnrollmentColumn, Entity as CourseEnrollments,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model};
use crate::entity::task_submissions::{Column as SubmissionColumn, Entity as TaskSubmissions};
use crate::entity::tasks::{Column as TaskColumn, Entity as Tasks};
use crate::errors::{PlatformError, Result};
use crate::models::{
    courses::{entities::Course, requests::UpdateCourseRequest},
    notifications::entities::NotificationEvent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
    sea_query::{Expr, Query},
};

impl SeaOrmStorage {
    /// 批量转换课程并填充教授姓名
    pub(super) async fn hydrate_courses<C: ConnectionTrait>(
        conn: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Course>> {
        let professor_ids: Vec<i64> = models.iter().map(|m| m.professor_id).collect();
        let names = load_user_names(conn, &professor_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let name = names.get(&m.professor_id).cloned().unwrap_or_default();
                m.into_course(name)
            })
            .collect())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let Some(model) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let professor_name = load_user_name(&self.db, model.professor_id).await?;
        Ok(Some(model.into_course(professor_name)))
    }

    /// 列出全部课程，最新的在前
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let models = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程列表失败: {e}")))?;

        Self::hydrate_courses(&self.db, models).await
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("更新课程失败: {e}")))?;

        let professor_name = load_user_name(&self.db, updated.professor_id).await?;
        Ok(Some(updated.into_course(professor_name)))
    }

    /// 设置课程资料并通知已选课学生
    pub async fn set_course_material_impl(
        &self,
        id: i64,
        material_path: &str,
        material_name: &str,
    ) -> Result<Option<Course>> {
        let txn = self.db.begin().await?;

        let result = Courses::update_many()
            .col_expr(Column::MaterialPath, Expr::value(material_path))
            .col_expr(Column::MaterialName, Expr::value(material_name))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("更新课程资料失败: {e}")))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = Courses::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| PlatformError::internal("Failed to load course"))?;

        enqueue_event(
            &txn,
            &NotificationEvent::CourseMaterialUploaded {
                course_id: updated.id,
                course_name: updated.name.clone(),
                file_name: material_name.to_string(),
            },
        )
        .await?;

        let professor_name = load_user_name(&txn, updated.professor_id).await?;
        txn.commit().await?;

        Ok(Some(updated.into_course(professor_name)))
    }

    /// 删除课程，在同一事务内依次删除提交、任务、选课记录
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let course_tasks = Query::select()
            .column(TaskColumn::Id)
            .from(Tasks)
            .and_where(TaskColumn::CourseId.eq(id))
            .to_owned();
        TaskSubmissions::delete_many()
            .filter(SubmissionColumn::TaskId.in_subquery(course_tasks))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("删除提交失败: {e}")))?;

        Tasks::delete_many()
            .filter(TaskColumn::CourseId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("删除任务失败: {e}")))?;

        CourseEnrollments::delete_many()
            .filter(EnrollmentColumn::CourseId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("删除选课记录失败: {e}")))?;

        let result = Courses::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
