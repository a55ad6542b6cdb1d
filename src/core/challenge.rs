//! Challenge business logic - Handles the gamified savings commitments.
//!
//! A challenge is created from a type-specific configuration that determines
//! its target amount, then advances through manual contributions or roulette
//! spins until it reaches a terminal status. Status moves forward only:
//! active challenges can complete (by reaching the target, exhausting spins,
//! or explicit user override) and terminal challenges never change again.
//! No operation moves a challenge to `failed`; the status exists for the
//! display layer but the engine never sets it.

use crate::{
    core::{notification, validate_amount},
    entities::{Challenge, challenge, contribution},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// The five supported challenge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeType {
    /// Save something every day for a fixed number of days
    Streak,
    /// Avoid spending on a chosen category for a fixed number of days
    NoSpend,
    /// Save a fixed amount daily or weekly
    Fixed,
    /// Draw a random amount per spin, a fixed number of times
    Roulette,
    /// The 52-week ladder: $1 in week 1 up to $52 in week 52
    Weeks52,
}

impl ChallengeType {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Streak => "streak",
            Self::NoSpend => "no-spend",
            Self::Fixed => "fixed",
            Self::Roulette => "roulette",
            Self::Weeks52 => "weeks52",
        }
    }

    /// Parses the stored string form back into a type.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "streak" => Some(Self::Streak),
            "no-spend" => Some(Self::NoSpend),
            "fixed" => Some(Self::Fixed),
            "roulette" => Some(Self::Roulette),
            "weeks52" => Some(Self::Weeks52),
            _ => None,
        }
    }

    /// Display catalog entry for this type: (title, description, emoji, color).
    #[must_use]
    pub const fn catalog(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Streak => (
                "Savings Streak",
                "Save something every day",
                "\u{1f525}",
                "streak",
            ),
            Self::NoSpend => (
                "No-Spend Challenge",
                "Avoid spending on specific category",
                "\u{1f6ab}",
                "no-spend",
            ),
            Self::Fixed => (
                "Fixed Amount",
                "Save fixed amount daily/weekly",
                "\u{1f4b5}",
                "fixed",
            ),
            Self::Roulette => (
                "Savings Roulette",
                "Random amount when you spin",
                "\u{1f3b2}",
                "roulette",
            ),
            Self::Weeks52 => (
                "52 Weeks Challenge",
                "Week 1: $1, Week 2: $2... Week 52: $52",
                "\u{1f4c5}",
                "weeks52",
            ),
        }
    }
}

/// Lifecycle status of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStatus {
    /// Accepting contributions
    Active,
    /// Terminal: target reached, spins exhausted, or completed manually
    Completed,
    /// Terminal: representable for the display layer, never set by the engine
    Failed,
}

impl ChallengeStatus {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Type-specific configuration supplied when creating a challenge.
///
/// Only the fields relevant to the chosen [`ChallengeType`] are read; the
/// rest are ignored. Missing or non-positive `duration` falls back to 30
/// days, missing or non-positive `min_amount` falls back to $5 for the
/// streak-style target formula.
#[derive(Debug, Clone, Default)]
pub struct ChallengeParams {
    /// Challenge length in days (streak, no-spend, fixed)
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
    /// Number of spins (roulette)
    pub spins: Option<i32>,
}

/// Result of recording a contribution.
#[derive(Debug, Clone)]
pub struct ContributionOutcome {
    /// The challenge after the contribution was applied
    pub challenge: challenge::Model,
    /// Whether this contribution pushed the challenge into `completed`;
    /// the caller uses this to trigger its celebratory side effect
    pub completed: bool,
}

/// Result of a roulette spin.
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    /// The challenge after the spin was applied
    pub challenge: challenge::Model,
    /// The amount the draw produced
    pub amount: f64,
    /// Whether this spin exhausted the wheel and completed the challenge
    pub completed: bool,
}

/// Retrieves all challenges, oldest first.
pub async fn get_all_challenges(db: &DatabaseConnection) -> Result<Vec<challenge::Model>> {
    Challenge::find()
        .order_by_asc(challenge::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a challenge by its unique ID, returning None if not found.
pub async fn get_challenge_by_id(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Option<challenge::Model>> {
    Challenge::find_by_id(challenge_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the contribution history for a challenge, newest first.
pub async fn get_contributions_for_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Vec<contribution::Model>> {
    crate::entities::Contribution::find()
        .filter(contribution::Column::ChallengeId.eq(challenge_id))
        .order_by_desc(contribution::Column::Date)
        .order_by_desc(contribution::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new challenge from a type and its configuration values.
///
/// The target amount is derived per type:
/// - streak and no-spend: `duration * min_amount` (no-spend carries no amount
///   field of its own and reuses the streak formula)
/// - fixed: `amount * ceil(duration / freq_days)` with `freq_days` 1 for
///   Daily and 7 otherwise
/// - roulette: `spins * ((min_amount + max_amount) / 2)`, the expected value
///   of the draws
/// - weeks52: the closed-form ladder sum 1378, over 365 days, ignoring any
///   supplied duration
///
/// The new challenge starts `active` with nothing saved and an empty history.
#[allow(clippy::too_many_lines)]
pub async fn create_challenge(
    db: &DatabaseConnection,
    challenge_type: ChallengeType,
    params: &ChallengeParams,
    now: DateTime<Utc>,
) -> Result<challenge::Model> {
    let duration = params.duration.filter(|d| *d > 0).unwrap_or(30);
    let (title, description, emoji, color) = challenge_type.catalog();

    let mut end_date = now + Duration::days(i64::from(duration));
    let mut stored_duration = Some(duration);
    let mut min_amount = None;
    let mut max_amount = None;
    let mut amount = None;
    let mut frequency = None;
    let mut category = None;
    let mut remaining_spins = None;
    let mut current_week = None;

    let target_amount = match challenge_type {
        ChallengeType::Streak | ChallengeType::NoSpend => {
            let min = params
                .min_amount
                .filter(|m| m.is_finite() && *m > 0.0)
                .unwrap_or(5.0);
            min_amount = Some(min);
            if challenge_type == ChallengeType::NoSpend {
                category = params.category.clone();
            }
            f64::from(duration) * min
        }
        ChallengeType::Fixed => {
            let amt = params.amount.unwrap_or(0.0);
            validate_amount(amt)?;
            let freq = params
                .frequency
                .clone()
                .unwrap_or_else(|| "Daily".to_string());
            let freq_days = if freq == "Daily" { 1.0 } else { 7.0 };
            amount = Some(amt);
            frequency = Some(freq);
            amt * (f64::from(duration) / freq_days).ceil()
        }
        ChallengeType::Roulette => {
            let min = params.min_amount.ok_or_else(|| Error::Validation {
                message: "Roulette requires a minimum amount".to_string(),
            })?;
            let max = params.max_amount.ok_or_else(|| Error::Validation {
                message: "Roulette requires a maximum amount".to_string(),
            })?;
            validate_amount(min)?;
            if !max.is_finite() || max < min {
                return Err(Error::Validation {
                    message: format!(
                        "Roulette maximum (${max:.2}) must be at least the minimum (${min:.2})"
                    ),
                });
            }
            let spins = params.spins.filter(|s| *s > 0).ok_or_else(|| {
                Error::Validation {
                    message: "Roulette requires a positive number of spins".to_string(),
                }
            })?;
            min_amount = Some(min);
            max_amount = Some(max);
            remaining_spins = Some(spins);
            stored_duration = None;
            f64::from(spins) * ((min + max) / 2.0)
        }
        ChallengeType::Weeks52 => {
            // Closed-form sum 1 + 2 + ... + 52
            end_date = now + Duration::days(365);
            current_week = Some(1);
            stored_duration = None;
            1378.0
        }
    };

    let model = challenge::ActiveModel {
        id: Set(now.timestamp_millis().to_string()),
        challenge_type: Set(challenge_type.as_str().to_string()),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        emoji: Set(emoji.to_string()),
        color: Set(color.to_string()),
        status: Set(ChallengeStatus::Active.as_str().to_string()),
        created_at: Set(now),
        end_date: Set(end_date),
        completed_at: Set(None),
        saved_amount: Set(0.0),
        target_amount: Set(target_amount),
        duration: Set(stored_duration),
        min_amount: Set(min_amount),
        max_amount: Set(max_amount),
        amount: Set(amount),
        frequency: Set(frequency),
        category: Set(category),
        remaining_spins: Set(remaining_spins),
        current_week: Set(current_week),
    };

    let result = model.insert(db).await?;

    notification::record(
        db,
        "challenge_created",
        "New Challenge Started! \u{1f3af}",
        &format!(
            "Started \"{title}\" - Save ${target_amount:.2} in {duration} days"
        ),
        None,
        now,
    )
    .await;

    Ok(result)
}

/// Records a manual contribution toward an active challenge.
///
/// Appends a history row and accumulates `saved_amount`. Reaching the target
/// completes the challenge in the same operation.
pub async fn record_contribution(
    db: &DatabaseConnection,
    challenge_id: &str,
    amount: f64,
    note: &str,
    now: DateTime<Utc>,
) -> Result<ContributionOutcome> {
    validate_amount(amount)?;

    // Use a transaction so the history row and the updated totals land together
    let txn = db.begin().await?;

    let existing = Challenge::find_by_id(challenge_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ChallengeNotFound {
            id: challenge_id.to_string(),
        })?;
    ensure_active(&existing)?;

    contribution::ActiveModel {
        challenge_id: Set(existing.id.clone()),
        date: Set(now),
        amount: Set(amount),
        note: Set(note.to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let title = existing.title.clone();
    let new_saved = existing.saved_amount + amount;
    let completed = new_saved >= existing.target_amount;

    let mut active: challenge::ActiveModel = existing.into();
    active.saved_amount = Set(new_saved);
    if completed {
        active.status = Set(ChallengeStatus::Completed.as_str().to_string());
        active.completed_at = Set(Some(now));
    }
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    if completed {
        notification::record(
            db,
            "challenge_completed",
            "Challenge Completed! \u{1f3c6}",
            &format!(
                "You completed \"{title}\" and saved ${:.2}!",
                updated.saved_amount
            ),
            None,
            now,
        )
        .await;
    } else {
        notification::record(
            db,
            "challenge_progress",
            "Challenge Progress",
            &format!("Added ${amount:.2} toward \"{title}\""),
            Some(amount),
            now,
        )
        .await;
    }

    Ok(ContributionOutcome {
        challenge: updated,
        completed,
    })
}

/// Spins the roulette wheel of an active roulette challenge.
///
/// Draws a uniformly distributed whole-dollar offset in
/// `[min_amount, max_amount]`, credits it, and burns one spin. Exhausting the
/// last spin always completes the challenge, whether or not the accumulated
/// savings reached the expected-value target.
pub async fn spin<R: Rng>(
    db: &DatabaseConnection,
    challenge_id: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<SpinOutcome> {
    let txn = db.begin().await?;

    let existing = Challenge::find_by_id(challenge_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ChallengeNotFound {
            id: challenge_id.to_string(),
        })?;

    if existing.challenge_type != ChallengeType::Roulette.as_str() {
        return Err(Error::Validation {
            message: format!("Challenge {challenge_id} is not a roulette challenge"),
        });
    }
    ensure_active(&existing)?;

    let remaining = existing.remaining_spins.unwrap_or(0);
    if remaining <= 0 {
        return Err(Error::Validation {
            message: format!("Challenge {challenge_id} has no spins remaining"),
        });
    }

    let min = existing.min_amount.unwrap_or(5.0);
    let max = existing.max_amount.unwrap_or(50.0);
    // Cast safety: max >= min is enforced at creation, so the span is a small
    // non-negative whole number.
    #[allow(clippy::cast_possible_truncation)]
    let span = (max - min).floor().max(0.0) as i64;
    #[allow(clippy::cast_precision_loss)]
    let amount = min + rng.gen_range(0..=span) as f64;

    contribution::ActiveModel {
        challenge_id: Set(existing.id.clone()),
        date: Set(now),
        amount: Set(amount),
        note: Set("Roulette spin".to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let title = existing.title.clone();
    let new_saved = existing.saved_amount + amount;
    let spins_left = remaining - 1;
    let completed = spins_left == 0;

    let mut active: challenge::ActiveModel = existing.into();
    active.saved_amount = Set(new_saved);
    active.remaining_spins = Set(Some(spins_left));
    if completed {
        active.status = Set(ChallengeStatus::Completed.as_str().to_string());
        active.completed_at = Set(Some(now));
    }
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    if completed {
        notification::record(
            db,
            "challenge_completed",
            "Challenge Completed! \u{1f3c6}",
            &format!(
                "You completed \"{title}\" and saved ${:.2}!",
                updated.saved_amount
            ),
            None,
            now,
        )
        .await;
    } else {
        notification::record(
            db,
            "challenge_progress",
            "Challenge Progress",
            &format!("Saved ${amount:.2} spinning \"{title}\""),
            Some(amount),
            now,
        )
        .await;
    }

    Ok(SpinOutcome {
        challenge: updated,
        amount,
        completed,
    })
}

/// Marks an active challenge as completed, regardless of its progress.
///
/// This is the explicit user override; no target check is applied.
pub async fn complete_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
    now: DateTime<Utc>,
) -> Result<challenge::Model> {
    let existing = get_challenge_by_id(db, challenge_id)
        .await?
        .ok_or_else(|| Error::ChallengeNotFound {
            id: challenge_id.to_string(),
        })?;
    ensure_active(&existing)?;

    let title = existing.title.clone();
    let mut active: challenge::ActiveModel = existing.into();
    active.status = Set(ChallengeStatus::Completed.as_str().to_string());
    active.completed_at = Set(Some(now));
    let updated = active.update(db).await?;

    notification::record(
        db,
        "challenge_completed",
        "Challenge Completed! \u{1f3c6}",
        &format!(
            "You completed \"{title}\" and saved ${:.2}!",
            updated.saved_amount
        ),
        None,
        now,
    )
    .await;

    Ok(updated)
}

/// Rejects operations on challenges that already reached a terminal status.
fn ensure_active(challenge: &challenge::Model) -> Result<()> {
    if challenge.status != ChallengeStatus::Active.as_str() {
        return Err(Error::ChallengeNotActive {
            id: challenge.id.clone(),
            status: challenge.status.clone(),
        });
    }
    Ok(())
}
