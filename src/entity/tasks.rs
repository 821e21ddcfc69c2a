//! 任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub deadline: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::task_submissions::Entity")]
    TaskSubmissions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::task_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskSubmissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_task(self, course_name: String) -> crate::models::tasks::entities::Task {
        use crate::models::tasks::entities::{Task, TaskStatus};

        let deadline = super::timestamp_to_utc(self.deadline);
        Task {
            id: self.id,
            course_id: self.course_id,
            course_name,
            title: self.title,
            description: self.description,
            deadline,
            status: TaskStatus::at(deadline, chrono::Utc::now()),
            created_at: super::timestamp_to_utc(self.created_at),
        }
    }
}
