//! First-run seeding of envelopes and goals.
//!
//! Seeding is idempotent per collection: a collection that already holds any
//! rows is left untouched, and an empty collection receives exactly the rows
//! from the seed configuration. Both collections are seeded inside one
//! database transaction.

use crate::{
    config::defaults::SeedConfig,
    entities::{Envelope, Goal, envelope, goal},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Seeds the envelope and goal collections when they are empty.
///
/// Each collection is checked independently, so a store that already holds
/// envelopes but no goals still receives the default goals (and vice versa).
pub async fn seed_initial_data(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    let txn = db.begin().await?;

    let envelope_count = Envelope::find().count(&txn).await?;
    if envelope_count == 0 {
        info!("Seeding {} default envelopes", config.envelopes.len());
        for seed in &config.envelopes {
            envelope::ActiveModel {
                id: Set(seed.id.clone()),
                name: Set(seed.name.clone()),
                icon: Set(seed.icon.clone()),
                amount: Set(seed.amount),
                goal: Set(None),
            }
            .insert(&txn)
            .await?;
        }
    } else {
        debug!("Envelopes already present ({envelope_count}), skipping seed");
    }

    let goal_count = Goal::find().count(&txn).await?;
    if goal_count == 0 {
        info!("Seeding {} default goals", config.goals.len());
        for seed in &config.goals {
            goal::ActiveModel {
                id: Set(seed.id.clone()),
                name: Set(seed.name.clone()),
                target: Set(seed.target),
                saved: Set(seed.saved),
                emoji: Set(seed.emoji.clone()),
                date: Set(None),
            }
            .insert(&txn)
            .await?;
        }
    } else {
        debug!("Goals already present ({goal_count}), skipping seed");
    }

    txn.commit().await?;
    Ok(())
}
