//! Envelope ledger logic - Handles all envelope-related operations.
//!
//! Provides functions for adding, withdrawing, and transferring money between
//! envelopes. Withdrawals are guarded by the envelope's savings goal: when the
//! balance is already below an active goal, the withdrawal is not applied
//! until the caller confirms it explicitly. All functions are async and
//! return Result types for error handling; nothing is mutated on a declined
//! operation.

use crate::{
    core::{notification, validate_amount},
    entities::{Envelope, envelope},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Outcome of a [`withdraw`] call.
///
/// The goal guard is not an error: asking to withdraw from an envelope that
/// sits below its savings goal succeeds, but answers with a confirmation
/// request instead of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawOutcome {
    /// The withdrawal was applied; carries the updated envelope.
    Withdrawn(envelope::Model),
    /// The envelope has an active goal and its balance is already below it.
    /// Nothing was mutated; call [`withdraw_confirmed`] to proceed anyway.
    GoalGuard {
        /// The active savings goal on the envelope
        goal: f64,
        /// Balance currently available
        available: f64,
    },
}

/// Result of a completed [`transfer`], carrying both updated envelopes.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Source envelope after the transfer
    pub from: envelope::Model,
    /// Destination envelope after the transfer
    pub to: envelope::Model,
}

/// Retrieves all envelopes, in stable id order.
pub async fn get_all_envelopes(db: &DatabaseConnection) -> Result<Vec<envelope::Model>> {
    Envelope::find()
        .order_by_asc(envelope::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an envelope by its unique ID, returning None if not found.
pub async fn get_envelope_by_id(
    db: &DatabaseConnection,
    envelope_id: &str,
) -> Result<Option<envelope::Model>> {
    Envelope::find_by_id(envelope_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Updates the balance of an existing envelope by atomically adding an amount.
///
/// This function performs an atomic database-level update to prevent race
/// conditions. Instead of reading the current balance, modifying it, and
/// writing it back, this uses a single SQL UPDATE statement:
/// `UPDATE envelopes SET amount = amount + delta WHERE id = ?`
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `envelope_id` - ID of the envelope to update
/// * `amount_delta` - Amount to add to the balance (use negative for subtraction)
///
/// # Returns
/// The updated envelope model
pub async fn update_envelope_amount_atomic<C>(
    db: &C,
    envelope_id: &str,
    amount_delta: f64,
) -> Result<envelope::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the envelope exists
    let _envelope = Envelope::find_by_id(envelope_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: envelope_id.to_string(),
        })?;

    // Perform atomic update: amount = amount + amount_delta
    Envelope::update_many()
        .col_expr(
            envelope::Column::Amount,
            Expr::col(envelope::Column::Amount).add(amount_delta),
        )
        .filter(envelope::Column::Id.eq(envelope_id))
        .exec(db)
        .await?;

    // Return the updated envelope
    Envelope::find_by_id(envelope_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: envelope_id.to_string(),
        })
}

/// Adds money to an envelope, optionally setting or replacing its savings
/// goal in the same operation.
///
/// # Arguments
/// * `envelope_id` - The envelope to credit
/// * `amount` - Amount to add; must be a positive finite number
/// * `new_goal` - When supplied, overwrites the envelope's savings goal;
///   must be a positive finite number
/// * `now` - Event time used for the emitted notification
pub async fn add_to_envelope(
    db: &DatabaseConnection,
    envelope_id: &str,
    amount: f64,
    new_goal: Option<f64>,
    now: DateTime<Utc>,
) -> Result<envelope::Model> {
    validate_amount(amount)?;
    if let Some(goal) = new_goal {
        if !goal.is_finite() || goal <= 0.0 {
            return Err(Error::InvalidAmount { amount: goal });
        }
    }

    // Use a transaction so the balance and goal updates land together
    let txn = db.begin().await?;

    let updated = update_envelope_amount_atomic(&txn, envelope_id, amount).await?;

    let updated = if new_goal.is_some() {
        let mut active: envelope::ActiveModel = updated.into();
        active.goal = Set(new_goal);
        active.update(&txn).await?
    } else {
        updated
    };

    txn.commit().await?;

    notification::record(
        db,
        "add",
        "Money Added",
        &format!("Added ${amount:.2} to {}", updated.name),
        Some(amount),
        now,
    )
    .await;

    Ok(updated)
}

/// Withdraws money from an envelope, subject to the goal guard.
///
/// The withdrawal is refused with [`Error::InsufficientFunds`] when the
/// envelope does not hold enough. When the envelope carries an active goal
/// and its current balance is already below that goal, the operation returns
/// [`WithdrawOutcome::GoalGuard`] without mutating anything - the caller must
/// ask the user and retry via [`withdraw_confirmed`].
pub async fn withdraw(
    db: &DatabaseConnection,
    envelope_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<WithdrawOutcome> {
    validate_amount(amount)?;

    let env = get_envelope_by_id(db, envelope_id)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: envelope_id.to_string(),
        })?;

    if amount > env.amount {
        return Err(Error::InsufficientFunds {
            available: env.amount,
            attempted: amount,
        });
    }

    // Guard check uses the current balance, not the post-withdrawal one
    if let Some(goal) = env.goal {
        if goal > 0.0 && env.amount < goal {
            return Ok(WithdrawOutcome::GoalGuard {
                goal,
                available: env.amount,
            });
        }
    }

    let updated = apply_withdrawal(db, envelope_id, amount, now).await?;
    Ok(WithdrawOutcome::Withdrawn(updated))
}

/// Withdraws money from an envelope, bypassing the goal guard.
///
/// Used after the user explicitly confirms a goal-guarded withdrawal. The
/// insufficient-funds check still applies.
pub async fn withdraw_confirmed(
    db: &DatabaseConnection,
    envelope_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<envelope::Model> {
    validate_amount(amount)?;

    let env = get_envelope_by_id(db, envelope_id)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: envelope_id.to_string(),
        })?;

    if amount > env.amount {
        return Err(Error::InsufficientFunds {
            available: env.amount,
            attempted: amount,
        });
    }

    apply_withdrawal(db, envelope_id, amount, now).await
}

/// Applies a validated withdrawal and emits its notification.
async fn apply_withdrawal(
    db: &DatabaseConnection,
    envelope_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<envelope::Model> {
    let updated = update_envelope_amount_atomic(db, envelope_id, -amount).await?;

    notification::record(
        db,
        "withdraw",
        "Money Withdrawn",
        &format!("Withdrew ${amount:.2} from {}", updated.name),
        Some(amount),
        now,
    )
    .await;

    Ok(updated)
}

/// Moves money between two envelopes.
///
/// Both balance updates run inside one database transaction, so a transfer
/// either lands on both envelopes or on neither. No goal guard applies to
/// transfers; only the source's available balance is checked.
pub async fn transfer(
    db: &DatabaseConnection,
    from_id: &str,
    to_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<TransferOutcome> {
    if from_id == to_id {
        return Err(Error::Validation {
            message: "Cannot transfer to the same envelope".to_string(),
        });
    }
    validate_amount(amount)?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let from = Envelope::find_by_id(from_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: from_id.to_string(),
        })?;

    let _to = Envelope::find_by_id(to_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::EnvelopeNotFound {
            id: to_id.to_string(),
        })?;

    if amount > from.amount {
        return Err(Error::InsufficientFunds {
            available: from.amount,
            attempted: amount,
        });
    }

    let from = update_envelope_amount_atomic(&txn, from_id, -amount).await?;
    let to = update_envelope_amount_atomic(&txn, to_id, amount).await?;

    txn.commit().await?;

    notification::record(
        db,
        "transfer",
        "Transfer Completed",
        &format!("Transferred ${amount:.2} from {} to {}", from.name, to.name),
        Some(amount),
        now,
    )
    .await;

    Ok(TransferOutcome { from, to })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        create_custom_envelope, create_test_envelope, fixed_now, setup_test_db,
        setup_with_envelope,
    };

    #[tokio::test]
    async fn test_add_to_envelope_validation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_envelope(&db, "e1", "Car").await?;

        // Non-positive amounts
        let result = add_to_envelope(&db, "e1", 0.0, None, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: 0.0 }));

        let result = add_to_envelope(&db, "e1", -10.0, None, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: -10.0 }));

        // Non-finite amounts
        let result = add_to_envelope(&db, "e1", f64::NAN, None, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        // Invalid replacement goal
        let result = add_to_envelope(&db, "e1", 5.0, Some(0.0), fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: 0.0 }));

        // Nothing was mutated by the declined operations
        let env = get_envelope_by_id(&db, "e1").await?.unwrap();
        assert_eq!(env.amount, 20.0);
        assert_eq!(env.goal, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_envelope_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_to_envelope(&db, "missing", 5.0, None, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::EnvelopeNotFound { id: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_envelope_credits_balance() -> Result<()> {
        let (db, envelope) = setup_with_envelope().await?;

        let updated = add_to_envelope(&db, &envelope.id, 12.5, None, fixed_now()).await?;
        assert_eq!(updated.amount, 32.5);
        assert_eq!(updated.goal, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_envelope_sets_goal() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_envelope(&db, "e1", "Car").await?;

        let updated = add_to_envelope(&db, "e1", 5.0, Some(100.0), fixed_now()).await?;
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.goal, Some(100.0));

        // A later add without a goal keeps the existing one
        let updated = add_to_envelope(&db, "e1", 5.0, None, fixed_now()).await?;
        assert_eq!(updated.goal, Some(100.0));

        // Supplying a new goal overwrites it
        let updated = add_to_envelope(&db, "e1", 5.0, Some(250.0), fixed_now()).await?;
        assert_eq!(updated.goal, Some(250.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_boundary() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_envelope(&db, "e1", "Car").await?;

        // Withdrawing the exact balance succeeds and leaves zero
        let outcome = withdraw(&db, "e1", 20.0, fixed_now()).await?;
        match outcome {
            WithdrawOutcome::Withdrawn(env) => assert_eq!(env.amount, 0.0),
            WithdrawOutcome::GoalGuard { .. } => panic!("unexpected goal guard"),
        }

        // One cent more than the balance is refused with the exact figures
        let result = withdraw(&db, "e1", 0.01, fixed_now()).await;
        match result.unwrap_err() {
            Error::InsufficientFunds {
                available,
                attempted,
            } => {
                assert_eq!(available, 0.0);
                assert_eq!(attempted, 0.01);
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_goal_guard_requires_confirmation() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "House", 50.0, Some(100.0)).await?;

        // Balance (50) is below the goal (100): the guard fires, nothing moves
        let outcome = withdraw(&db, "e1", 10.0, fixed_now()).await?;
        assert_eq!(
            outcome,
            WithdrawOutcome::GoalGuard {
                goal: 100.0,
                available: 50.0
            }
        );

        let env = get_envelope_by_id(&db, "e1").await?.unwrap();
        assert_eq!(env.amount, 50.0);

        // Confirming applies the withdrawal
        let updated = withdraw_confirmed(&db, "e1", 10.0, fixed_now()).await?;
        assert_eq!(updated.amount, 40.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_no_guard_when_at_or_above_goal() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "House", 150.0, Some(100.0)).await?;

        // Balance is above the goal, so the guard stays quiet even though the
        // withdrawal will drop the balance below it
        let outcome = withdraw(&db, "e1", 120.0, fixed_now()).await?;
        match outcome {
            WithdrawOutcome::Withdrawn(env) => assert_eq!(env.amount, 30.0),
            WithdrawOutcome::GoalGuard { .. } => panic!("guard must use the current balance"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_confirmed_still_checks_funds() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "House", 50.0, Some(100.0)).await?;

        let result = withdraw_confirmed(&db, "e1", 60.0, fixed_now()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                available: 50.0,
                attempted: 60.0
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_conserves_total() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "Car", 80.0, None).await?;
        create_custom_envelope(&db, "e2", "House", 20.0, None).await?;

        let outcome = transfer(&db, "e1", "e2", 30.0, fixed_now()).await?;
        assert_eq!(outcome.from.amount, 50.0);
        assert_eq!(outcome.to.amount, 50.0);
        assert_eq!(outcome.from.amount + outcome.to.amount, 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_same_account_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_envelope(&db, "e1", "Car").await?;

        let result = transfer(&db, "e1", "e1", 5.0, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_insufficient_funds_mutates_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "Car", 10.0, None).await?;
        create_custom_envelope(&db, "e2", "House", 20.0, None).await?;

        let result = transfer(&db, "e1", "e2", 15.0, fixed_now()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                available: 10.0,
                attempted: 15.0
            }
        ));

        let from = get_envelope_by_id(&db, "e1").await?.unwrap();
        let to = get_envelope_by_id(&db, "e2").await?.unwrap();
        assert_eq!(from.amount, 10.0);
        assert_eq!(to.amount, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_ignores_goal_guard() -> Result<()> {
        let db = setup_test_db().await?;
        // Source sits below its goal, but transfers are not goal-guarded
        create_custom_envelope(&db, "e1", "Car", 50.0, Some(100.0)).await?;
        create_custom_envelope(&db, "e2", "House", 0.0, None).await?;

        let outcome = transfer(&db, "e1", "e2", 25.0, fixed_now()).await?;
        assert_eq!(outcome.from.amount, 25.0);
        assert_eq!(outcome.to.amount, 25.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_operations_emit_notifications() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_envelope(&db, "e1", "Car", 100.0, None).await?;
        create_custom_envelope(&db, "e2", "House", 0.0, None).await?;

        add_to_envelope(&db, "e1", 10.0, None, fixed_now()).await?;
        withdraw(&db, "e1", 5.0, fixed_now()).await?;
        transfer(&db, "e1", "e2", 25.0, fixed_now()).await?;

        let notifications = crate::core::notification::get_all_notifications(&db).await?;
        let kinds: Vec<&str> = notifications.iter().map(|n| n.kind.as_str()).collect();
        assert!(kinds.contains(&"add"));
        assert!(kinds.contains(&"withdraw"));
        assert!(kinds.contains(&"transfer"));

        Ok(())
    }
}
