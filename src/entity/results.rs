//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub candidate_id: i64,
    pub value: f64,
    pub accepted: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CandidateId",
        to = "super::users::Column::Id"
    )]
    Candidate,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::results::entities::CandidateResult {
        use crate::models::results::entities::CandidateResult;
        use chrono::{DateTime, Utc};

        CandidateResult {
            id: self.id,
            candidate_id: self.candidate_id,
            value: self.value,
            accepted: self.accepted,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
