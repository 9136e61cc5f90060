//! Daily due-payment reminder job
//!
//! Runs at 07:00 every day and logs the installments falling due within the
//! configured look-ahead window, across all owners.

use chrono::{Days, Utc};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Start the cron scheduler with the daily reminder job
pub async fn start_scheduler(
    pool: PgPool,
    days_ahead: i64,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 0 7 * * *", move |_uuid, _lock| {
        let pool = pool.clone();
        Box::pin(async move {
            if let Err(e) = log_due_payments(&pool, days_ahead).await {
                tracing::error!(error = %e, "Daily reminder job failed");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Daily reminder job scheduled for 07:00");

    Ok(scheduler)
}

async fn log_due_payments(pool: &PgPool, days_ahead: i64) -> Result<(), sqlx::Error> {
    let today = Utc::now().date_naive();
    let window_end = today + Days::new(days_ahead.max(0) as u64);

    let due: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM payments
        WHERE amount_paid < amount_due AND due_date BETWEEN $1 AND $2
        "#,
    )
    .bind(today)
    .bind(window_end)
    .fetch_one(pool)
    .await?;

    if due > 0 {
        tracing::info!(count = due, days_ahead, "Payments coming due");
    }

    Ok(())
}
