//! Notification sink - append-only log of domain events.
//!
//! Every mutating operation records a notification describing what happened.
//! The sink is write-only from the core's perspective: nothing here is read
//! back for decision-making, and a failed append must never undo the
//! operation that triggered it.

use crate::{
    entities::{Notification, notification},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::warn;

/// Inserts a notification row.
///
/// The store assigns the identifier; callers supply the event kind, display
/// strings, the amount involved (when the event carries one), and the event
/// time.
pub async fn add_notification(
    db: &DatabaseConnection,
    kind: &str,
    title: &str,
    description: &str,
    amount: Option<f64>,
    now: DateTime<Utc>,
) -> Result<notification::Model> {
    let model = notification::ActiveModel {
        kind: Set(kind.to_string()),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        amount: Set(amount),
        date: Set(now),
        is_read: Set(false),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Fire-and-forget variant of [`add_notification`].
///
/// Storage failures are logged and swallowed: a notification that cannot be
/// saved must not fail the ledger or challenge mutation that produced it.
pub async fn record(
    db: &DatabaseConnection,
    kind: &str,
    title: &str,
    description: &str,
    amount: Option<f64>,
    now: DateTime<Utc>,
) {
    if let Err(e) = add_notification(db, kind, title, description, amount, now).await {
        warn!("Failed to record '{kind}' notification: {e}");
    }
}

/// Retrieves all notifications, newest first.
pub async fn get_all_notifications(db: &DatabaseConnection) -> Result<Vec<notification::Model>> {
    Notification::find()
        .order_by_desc(notification::Column::Date)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks every unread notification as read. Returns how many rows changed.
pub async fn mark_all_read(db: &DatabaseConnection) -> Result<u64> {
    use sea_orm::sea_query::Expr;

    let result = Notification::update_many()
        .col_expr(notification::Column::IsRead, Expr::value(true))
        .filter(notification::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
