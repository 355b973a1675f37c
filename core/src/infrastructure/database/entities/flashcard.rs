//! Flashcard entity
//!
//! Term/explanation pairs, cascade-deleted with their group at the
//! relational layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "flashcards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub uuid: Uuid,
    pub group_id: i32,
    pub term: String,
    pub explanation: String,
    /// Display order within the group
    pub position: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flashcard_group::Entity",
        from = "Column::GroupId",
        to = "super::flashcard_group::Column::Id"
    )]
    FlashcardGroup,
}

impl Related<super::flashcard_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlashcardGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
