//! 匿名码实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "secret_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub content: String,
    #[sea_orm(unique)]
    pub candidate_id: i64,
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
    pub fn into_secret_code(self) -> crate::models::secret_codes::entities::SecretCode {
        use crate::models::secret_codes::entities::SecretCode;
        use chrono::{DateTime, Utc};

        SecretCode {
            id: self.id,
            content: self.content,
            candidate_id: self.candidate_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
