//! Notification entity - Append-only log of domain events.
//!
//! The core writes notifications for every successful mutating operation but
//! never reads them back for decision-making; the presentation layer renders
//! and marks them read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Event kind: `"add"`, `"withdraw"`, `"transfer"`, `"goal"`,
    /// `"challenge_created"`, `"challenge_progress"`, or `"challenge_completed"`
    pub kind: String,
    /// Short headline for the event
    pub title: String,
    /// Human-readable description of what happened
    pub description: String,
    /// Amount involved, when the event carries one
    pub amount: Option<f64>,
    /// When the event occurred
    pub date: DateTimeUtc,
    /// Whether the user has seen this notification
    pub is_read: bool,
}

/// Notifications have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
