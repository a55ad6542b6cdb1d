//! Goal entity - Represents a standalone savings target.
//!
//! Goals are independent of envelopes: they accumulate `saved` toward
//! `target` with no upper bound and no completion transition at this layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Savings goal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    /// Stable unique identifier for the goal
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name of the goal (e.g., "New Car")
    pub name: String,
    /// Target amount in dollars, always positive
    pub target: f64,
    /// Amount saved so far; may exceed `target`
    pub saved: f64,
    /// Emoji shown next to the goal in the presentation layer
    pub emoji: String,
    /// Optional target date, display only
    pub date: Option<DateTimeUtc>,
}

/// Goals have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
