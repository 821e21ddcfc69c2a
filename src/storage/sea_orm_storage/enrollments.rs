use super::outbox::enqueue_event;
use super::{SeaOrmStorage, load_user_name, load_user_names, map_insert_err};
use crate::entity::course_enrollments::{ActiveModel, Column, Entity as CourseEnrollments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::errors::{PlatformError, Result};
use crate::models::{
    courses::entities::Course, enrollments::entities::Enrollment,
    notifications::entities::NotificationEvent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 选课
    ///
    /// 先插入再读取，重复选课由唯一索引转为 Conflict。
    pub async fn enroll_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
        notify: bool,
    ) -> Result<Enrollment> {
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            map_insert_err(
                e,
                "Student already enrolled in this course",
                "Course not found",
                "创建选课记录失败",
            )
        })?;

        let course = Courses::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| PlatformError::not_found("Course not found"))?;

        let names = load_user_names(&txn, &[student_id, course.professor_id]).await?;
        let student_name = names.get(&student_id).cloned().unwrap_or_default();
        let professor_name = names.get(&course.professor_id).cloned().unwrap_or_default();

        if notify {
            enqueue_event(
                &txn,
                &NotificationEvent::StudentEnrolled {
                    course_id,
                    course_name: course.name.clone(),
                    course_description: course.description.clone(),
                    professor_name,
                    student_id,
                },
            )
            .await?;
        }

        txn.commit().await?;
        Ok(model.into_enrollment(course.name, student_name))
    }

    /// 获取某学生在某课程中的选课记录
    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        let Some(model) = CourseEnrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询选课记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let course_name = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .map(|c| c.name)
            .unwrap_or_default();
        let student_name = load_user_name(&self.db, student_id).await?;

        Ok(Some(model.into_enrollment(course_name, student_name)))
    }

    /// 列出课程的选课记录
    pub async fn list_course_enrollments_impl(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        let course_name = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程失败: {e}")))?
            .map(|c| c.name)
            .unwrap_or_default();

        let models = CourseEnrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询选课列表失败: {e}")))?;

        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let names = load_user_names(&self.db, &student_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = names.get(&m.student_id).cloned().unwrap_or_default();
                m.into_enrollment(course_name.clone(), student_name)
            })
            .collect())
    }

    /// 列出学生已选的课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let course_ids: Vec<i64> = CourseEnrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询选课列表失败: {e}")))?
            .into_iter()
            .map(|m| m.course_id)
            .collect();

        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_desc(CourseColumn::CreatedAt)
            .order_by_desc(CourseColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程列表失败: {e}")))?;

        Self::hydrate_courses(&self.db, models).await
    }
}
