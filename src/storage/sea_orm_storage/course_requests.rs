use super::outbox::enqueue_event;
use super::{SeaOrmStorage, load_user_name, load_user_names};
use crate::entity::course_requests::{ActiveModel, Column, Entity as CourseRequests, Model};
use crate::entity::courses::ActiveModel as CourseActiveModel;
use crate::errors::{PlatformError, Result};
use crate::models::{
    course_requests::entities::{CourseRequest, CourseRequestStatus},
    courses::entities::Course,
    notifications::entities::NotificationEvent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 提交课程申请
    pub async fn create_course_request_impl(
        &self,
        professor_id: i64,
        name: &str,
        description: &str,
    ) -> Result<CourseRequest> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            professor_id: Set(professor_id),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            status: Set(CourseRequestStatus::Pending.to_string()),
            rejection_reason: Set(None),
            course_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PlatformError::database_operation(format!("创建课程申请失败: {e}")))?;

        let professor_name = load_user_name(&txn, professor_id).await?;
        let request = model.into_course_request(professor_name);

        enqueue_event(
            &txn,
            &NotificationEvent::CourseRequestCreated {
                request: request.clone(),
            },
        )
        .await?;

        txn.commit().await?;
        Ok(request)
    }

    /// 通过 ID 获取课程申请
    pub async fn get_course_request_by_id_impl(&self, id: i64) -> Result<Option<CourseRequest>> {
        let Some(model) = CourseRequests::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程申请失败: {e}")))?
        else {
            return Ok(None);
        };

        let professor_name = load_user_name(&self.db, model.professor_id).await?;
        Ok(Some(model.into_course_request(professor_name)))
    }

    /// 列出课程申请，最新的在前
    pub async fn list_course_requests_impl(
        &self,
        professor_id: Option<i64>,
        status: Option<CourseRequestStatus>,
    ) -> Result<Vec<CourseRequest>> {
        let mut select = CourseRequests::find();

        if let Some(professor_id) = professor_id {
            select = select.filter(Column::ProfessorId.eq(professor_id));
        }
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PlatformError::database_operation(format!("查询课程申请列表失败: {e}"))
            })?;

        let professor_ids: Vec<i64> = models.iter().map(|m| m.professor_id).collect();
        let names = load_user_names(&self.db, &professor_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let name = names.get(&m.professor_id).cloned().unwrap_or_default();
                m.into_course_request(name)
            })
            .collect())
    }

    /// 在事务内对 PENDING 状态做条件更新
    ///
    /// 条件更新必须是事务内的第一条语句，先拿写锁再读。
    /// 返回更新后的记录；不存在时 NotFound，已处理时 Conflict。
    async fn transition_pending(
        txn: &DatabaseTransaction,
        id: i64,
        target: CourseRequestStatus,
        rejection_reason: Option<String>,
    ) -> Result<Model> {
        let now = chrono::Utc::now().timestamp();
        let result = CourseRequests::update_many()
            .col_expr(Column::Status, Expr::value(target.to_string()))
            .col_expr(Column::RejectionReason, Expr::value(rejection_reason))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(CourseRequestStatus::Pending.to_string()))
            .exec(txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("更新课程申请失败: {e}")))?;

        let current = CourseRequests::find_by_id(id)
            .one(txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询课程申请失败: {e}")))?
            .ok_or_else(|| PlatformError::not_found("Course request not found"))?;

        if result.rows_affected == 0 {
            return Err(PlatformError::conflict(format!(
                "Course request already processed (status: {})",
                current.status
            )));
        }

        Ok(current)
    }

    /// 批准课程申请并创建课程
    pub async fn approve_course_request_impl(&self, id: i64) -> Result<(CourseRequest, Course)> {
        let txn = self.db.begin().await?;

        let approved =
            Self::transition_pending(&txn, id, CourseRequestStatus::Approved, None).await?;

        let now = chrono::Utc::now().timestamp();
        let course = CourseActiveModel {
            professor_id: Set(approved.professor_id),
            name: Set(approved.name.clone()),
            description: Set(approved.description.clone()),
            material_path: Set(None),
            material_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PlatformError::database_operation(format!("创建课程失败: {e}")))?;

        CourseRequests::update_many()
            .col_expr(Column::CourseId, Expr::value(course.id))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PlatformError::database_operation(format!("关联课程失败: {e}")))?;

        let professor_name = load_user_name(&txn, approved.professor_id).await?;
        let updated = Model {
            course_id: Some(course.id),
            ..approved
        };
        let request = updated.into_course_request(professor_name.clone());
        let course = course.into_course(professor_name);

        enqueue_event(
            &txn,
            &NotificationEvent::CourseRequestApproved {
                request: request.clone(),
            },
        )
        .await?;

        txn.commit().await?;
        Ok((request, course))
    }

    /// 驳回课程申请
    pub async fn reject_course_request_impl(&self, id: i64, reason: &str) -> Result<CourseRequest> {
        let txn = self.db.begin().await?;

        let updated = Self::transition_pending(
            &txn,
            id,
            CourseRequestStatus::Rejected,
            Some(reason.to_string()),
        )
        .await?;

        let professor_name = load_user_name(&txn, updated.professor_id).await?;
        let request = updated.into_course_request(professor_name);

        enqueue_event(
            &txn,
            &NotificationEvent::CourseRequestRejected {
                request: request.clone(),
            },
        )
        .await?;

        txn.commit().await?;
        Ok(request)
    }
}
