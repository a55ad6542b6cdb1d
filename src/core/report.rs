//! Read-only derivations over the collections.
//!
//! This module provides progress calculations, challenge statistics, and
//! display formatting. Nothing here mutates state; all functions are
//! framework-agnostic and return structured data or strings the shell layer
//! can print directly. In particular, `days_left` is display only - a
//! challenge past its end date stays active until completed.

use crate::entities::{challenge, envelope};
use crate::core::challenge::ChallengeStatus;

/// Aggregate statistics over the whole challenge collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeStats {
    /// Number of challenges still accepting contributions
    pub active: usize,
    /// Number of completed challenges
    pub completed: usize,
    /// Total saved across all challenges, regardless of status
    pub total_saved: f64,
}

/// Progress of a challenge toward its target, as a percentage capped at 100.
///
/// A zero (or sub-dollar) target divides by 1 instead, so a fresh challenge
/// with a degenerate target reads as 0% rather than NaN.
#[must_use]
pub fn progress_percent(saved_amount: f64, target_amount: f64) -> f64 {
    (saved_amount / target_amount.max(1.0) * 100.0).min(100.0)
}

/// Progress of an envelope toward its savings goal, capped at 100.
///
/// Returns 0 when the envelope has no active goal.
#[must_use]
pub fn envelope_goal_progress(amount: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (amount / goal * 100.0).min(100.0)
}

/// Whole days remaining until `end_date`, rounded up.
///
/// Negative once the end date has passed. Display only; the engine never
/// fails a challenge based on this.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn days_left(end_date: chrono::DateTime<chrono::Utc>, now: chrono::DateTime<chrono::Utc>) -> i64 {
    const MILLIS_PER_DAY: f64 = 86_400_000.0;

    // Cast safety: day counts are tiny compared to the i64 range.
    #[allow(clippy::cast_precision_loss)]
    let millis = (end_date - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Sum of all envelope balances.
#[must_use]
pub fn total_balance(envelopes: &[envelope::Model]) -> f64 {
    envelopes.iter().map(|e| e.amount).sum()
}

/// Computes aggregate statistics over the challenge collection.
#[must_use]
pub fn challenge_stats(challenges: &[challenge::Model]) -> ChallengeStats {
    ChallengeStats {
        active: challenges
            .iter()
            .filter(|c| c.status == ChallengeStatus::Active.as_str())
            .count(),
        completed: challenges
            .iter()
            .filter(|c| c.status == ChallengeStatus::Completed.as_str())
            .count(),
        total_saved: challenges.iter().map(|c| c.saved_amount).sum(),
    }
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
///
/// # Arguments
/// * `progress_percent` - Progress percentage (0-100)
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    // Result is mathematically in [0, length], truncation/sign loss intentional for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats a dollar amount for display, like `$1234.56`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn challenge_with(status: &str, saved: f64) -> challenge::Model {
        challenge::Model {
            id: saved.to_string(),
            challenge_type: "streak".to_string(),
            title: "Savings Streak".to_string(),
            description: "Save something every day".to_string(),
            emoji: "\u{1f525}".to_string(),
            color: "streak".to_string(),
            status: status.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            end_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().unwrap_or_default(),
            completed_at: None,
            saved_amount: saved,
            target_amount: 150.0,
            duration: Some(30),
            min_amount: Some(5.0),
            max_amount: None,
            amount: None,
            frequency: None,
            category: None,
            remaining_spins: None,
            current_week: None,
        }
    }

    #[test]
    fn test_progress_percent_basic() {
        assert_eq!(progress_percent(50.0, 100.0), 50.0);
        assert_eq!(progress_percent(0.0, 100.0), 0.0);
    }

    #[test]
    fn test_progress_percent_caps_at_hundred() {
        assert_eq!(progress_percent(250.0, 100.0), 100.0);
    }

    #[test]
    fn test_progress_percent_degenerate_target() {
        // A zero target divides by 1 instead of producing NaN
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
        assert_eq!(progress_percent(0.5, 0.0), 50.0);
    }

    #[test]
    fn test_envelope_goal_progress() {
        assert_eq!(envelope_goal_progress(50.0, 100.0), 50.0);
        assert_eq!(envelope_goal_progress(150.0, 100.0), 100.0);
        assert_eq!(envelope_goal_progress(50.0, 0.0), 0.0);
    }

    #[test]
    fn test_days_left_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).single().unwrap_or_default();

        assert_eq!(days_left(now + Duration::days(7), now), 7);
        // Half a day still counts as one day left
        assert_eq!(days_left(now + Duration::hours(12), now), 1);
        assert_eq!(days_left(now, now), 0);
        assert_eq!(days_left(now - Duration::days(3), now), -3);
    }

    #[test]
    fn test_total_balance() {
        let envelopes = vec![
            envelope::Model {
                id: "1".to_string(),
                name: "Travels".to_string(),
                icon: "airplane".to_string(),
                amount: 20.0,
                goal: None,
            },
            envelope::Model {
                id: "2".to_string(),
                name: "Car".to_string(),
                icon: "car".to_string(),
                amount: 35.5,
                goal: Some(100.0),
            },
        ];

        assert_eq!(total_balance(&envelopes), 55.5);
        assert_eq!(total_balance(&[]), 0.0);
    }

    #[test]
    fn test_challenge_stats() {
        let challenges = vec![
            challenge_with("active", 10.0),
            challenge_with("active", 20.0),
            challenge_with("completed", 150.0),
            challenge_with("failed", 5.0),
        ];

        let stats = challenge_stats(&challenges);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 1);
        // Total saved counts every challenge, terminal or not
        assert_eq!(stats.total_saved, 185.0);
    }

    #[test]
    fn test_format_progress_bar_full() {
        let bar = format_progress_bar(100.0, Some(10));
        assert_eq!(bar, "[██████████] 100.0%");
    }

    #[test]
    fn test_format_progress_bar_half() {
        let bar = format_progress_bar(50.0, Some(10));
        assert_eq!(bar, "[█████░░░░░] 50.0%");
    }

    #[test]
    fn test_format_progress_bar_zero() {
        let bar = format_progress_bar(0.0, Some(10));
        assert_eq!(bar, "[░░░░░░░░░░] 0.0%");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5.0), "$5.00");
        assert_eq!(format_amount(1234.567), "$1234.57");
    }
}
