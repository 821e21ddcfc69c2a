//! 任务提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub file_path: String,
    pub file_name: String,
    pub grade: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub submitted_at: i64,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(
        self,
        task_title: String,
        student_name: String,
    ) -> crate::models::submissions::entities::TaskSubmission {
        use crate::models::submissions::entities::TaskSubmission;

        TaskSubmission {
            id: self.id,
            task_id: self.task_id,
            task_title,
            student_id: self.student_id,
            student_name,
            file_path: self.file_path,
            file_name: self.file_name,
            grade: self.grade,
            comment: self.comment,
            submitted_at: super::timestamp_to_utc(self.submitted_at),
            graded_at: self.graded_at.map(super::timestamp_to_utc),
        }
    }
}
