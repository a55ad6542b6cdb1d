//! Challenge entity - Represents a gamified savings commitment.
//!
//! A challenge carries a type-specific target amount computed at creation,
//! accumulated savings, and a forward-only status. Type-specific
//! configuration columns are nullable; only the columns relevant to a
//! challenge's type are populated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Challenge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    /// Stable unique identifier (millisecond timestamp of creation)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Challenge kind: `"streak"`, `"no-spend"`, `"fixed"`, `"roulette"`, or `"weeks52"`
    pub challenge_type: String,
    /// Display title from the per-type catalog
    pub title: String,
    /// Display description from the per-type catalog
    pub description: String,
    /// Emoji shown on the challenge card
    pub emoji: String,
    /// Color tag for the presentation layer
    pub color: String,
    /// Lifecycle status: `"active"`, `"completed"`, or `"failed"`; transitions only forward
    pub status: String,
    /// When the challenge was created
    pub created_at: DateTimeUtc,
    /// When the challenge window ends; display only, never forces a transition
    pub end_date: DateTimeUtc,
    /// When the challenge reached a terminal status
    pub completed_at: Option<DateTimeUtc>,
    /// Total contributed so far, never negative
    pub saved_amount: f64,
    /// Target amount derived from the type-specific configuration at creation
    pub target_amount: f64,
    /// Duration in days (streak, no-spend, fixed)
    pub duration: Option<i32>,
    /// Minimum amount per day (streak, no-spend) or per spin (roulette)
    pub min_amount: Option<f64>,
    /// Maximum amount per spin (roulette)
    pub max_amount: Option<f64>,
    /// Fixed contribution amount (fixed)
    pub amount: Option<f64>,
    /// Contribution frequency, `"Daily"` or `"Weekly"` (fixed)
    pub frequency: Option<String>,
    /// Spending category to avoid (no-spend)
    pub category: Option<String>,
    /// Spins left before the challenge auto-completes (roulette)
    pub remaining_spins: Option<i32>,
    /// Current week of the 52-week ladder (weeks52)
    pub current_week: Option<i32>,
}

/// Defines relationships between Challenge and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One challenge has many contribution history rows
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
