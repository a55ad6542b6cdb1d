//! Envelope entity - Represents a named savings bucket.
//!
//! Each envelope has a display name, an icon hint for the presentation layer,
//! a current balance, and an optional savings goal that arms the withdrawal
//! guard.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Envelope database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "envelopes")]
pub struct Model {
    /// Stable unique identifier for the envelope
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name of the envelope (e.g., "Travels", "Car")
    pub name: String,
    /// Icon hint for the presentation layer, opaque to the core
    pub icon: String,
    /// Current balance in dollars, never negative
    pub amount: f64,
    /// Optional savings goal; withdrawing below it requires confirmation
    pub goal: Option<f64>,
}

/// Envelopes have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
