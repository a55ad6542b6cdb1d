//! Pesso status shell.
//!
//! Initializes the local database, seeds it on first run, and renders a
//! read-only overview of envelopes, goals, challenges, and recent
//! notifications. All mutations go through the library's `core` operations;
//! this binary only reads.

use chrono::Utc;
use pesso::config;
use pesso::core::{challenge, envelope, goal, notification, report, seed};
use pesso::errors::Result;
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenvy::dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the seed configuration (config.toml or built-in defaults)
    let seed_config = config::defaults::load_default_config()
        .inspect_err(|e| error!("Failed to load seed configuration: {e}"))?;

    // 4. Initialize database
    std::fs::create_dir_all("data")?;
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. Seed initial envelopes and goals (if the store is empty)
    seed::seed_initial_data(&db, &seed_config)
        .await
        .inspect(|_| info!("Initial data seeded successfully."))
        .inspect_err(|e| error!("Failed to seed initial data: {e}"))?;

    // 6. Render the overview
    render_overview(&db).await?;

    Ok(())
}

async fn render_overview(db: &DatabaseConnection) -> Result<()> {
    let now = Utc::now();

    let envelopes = envelope::get_all_envelopes(db).await?;
    println!(
        "Savings - total {}",
        report::format_amount(report::total_balance(&envelopes))
    );
    for env in &envelopes {
        match env.goal {
            Some(goal) if goal > 0.0 => {
                let progress = report::envelope_goal_progress(env.amount, goal);
                println!(
                    "  {:<14} {:>10}  goal {} {}",
                    env.name,
                    report::format_amount(env.amount),
                    report::format_amount(goal),
                    report::format_progress_bar(progress, Some(10)),
                );
            }
            _ => {
                println!(
                    "  {:<14} {:>10}",
                    env.name,
                    report::format_amount(env.amount)
                );
            }
        }
    }

    let goals = goal::get_all_goals(db).await?;
    if !goals.is_empty() {
        println!("\nGoals");
        for g in &goals {
            let progress = report::progress_percent(g.saved, g.target);
            println!(
                "  {} {:<18} {} / {} {}",
                g.emoji,
                g.name,
                report::format_amount(g.saved),
                report::format_amount(g.target),
                report::format_progress_bar(progress, Some(10)),
            );
        }
    }

    let challenges = challenge::get_all_challenges(db).await?;
    if !challenges.is_empty() {
        let stats = report::challenge_stats(&challenges);
        println!(
            "\nChallenges - {} active, {} completed, {} saved",
            stats.active,
            stats.completed,
            report::format_amount(stats.total_saved)
        );
        for c in &challenges {
            let progress = report::progress_percent(c.saved_amount, c.target_amount);
            let timing = if c.status == "active" {
                let left = report::days_left(c.end_date, now);
                if left > 0 {
                    format!("{left} days left")
                } else {
                    "Last day!".to_string()
                }
            } else {
                c.status.clone()
            };
            println!(
                "  {} {:<20} {} / {} {} ({timing})",
                c.emoji,
                c.title,
                report::format_amount(c.saved_amount),
                report::format_amount(c.target_amount),
                report::format_progress_bar(progress, Some(10)),
            );
        }
    }

    let notifications = notification::get_all_notifications(db).await?;
    let unread = notifications.iter().filter(|n| !n.is_read).count();
    if unread > 0 {
        println!("\nNotifications ({unread} unread)");
        for n in notifications.iter().filter(|n| !n.is_read).take(5) {
            println!("  {} - {}", n.title, n.description);
        }
    }

    Ok(())
}
