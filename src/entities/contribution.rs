//! Contribution entity - One history row of a challenge.
//!
//! Each contribution records when money was put toward a challenge, how much,
//! and a short note (`"Manual contribution"`, `"Roulette spin"`, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contribution database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    /// Unique identifier for the contribution
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the challenge this contribution belongs to
    pub challenge_id: String,
    /// When the contribution was recorded
    pub date: DateTimeUtc,
    /// Contributed amount in dollars, always positive
    pub amount: f64,
    /// Short note describing the source of the contribution
    pub note: String,
}

/// Defines relationships between Contribution and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contribution belongs to one challenge
    #[sea_orm(
        belongs_to = "super::challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::challenge::Column::Id"
    )]
    Challenge,
}

impl Related<super::challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
