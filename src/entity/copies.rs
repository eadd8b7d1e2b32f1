//! 答卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "copies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub candidate_id: i64,
    pub module_id: i64,
    pub teacher1_id: Option<i64>,
    pub teacher2_id: Option<i64>,
    pub teacher3_id: Option<i64>,
    pub mark1: Option<f64>,
    pub mark2: Option<f64>,
    pub mark3: Option<f64>,
    pub mark1_grader_id: Option<i64>,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CandidateId",
        to = "super::users::Column::Id"
    )]
    Candidate,
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleId",
        to = "super::modules::Column::Id"
    )]
    Module,
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_copy(self) -> crate::models::copies::entities::ExamCopy {
        use crate::models::copies::entities::ExamCopy;
        use chrono::{DateTime, Utc};

        ExamCopy {
            id: self.id,
            candidate_id: self.candidate_id,
            module_id: self.module_id,
            teacher1_id: self.teacher1_id,
            teacher2_id: self.teacher2_id,
            teacher3_id: self.teacher3_id,
            mark1: self.mark1,
            mark2: self.mark2,
            mark3: self.mark3,
            mark1_grader_id: self.mark1_grader_id,
            version: self.version,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
