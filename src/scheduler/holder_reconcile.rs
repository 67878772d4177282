use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, state::AppState};

/// Starts the periodic holder reconciliation scheduler.
///
/// Every tick runs a reconciliation pass for each configured guild. A tick that fires
/// while the previous pass is still running is skipped.
///
/// # Arguments
/// - `state`: Shared application components
/// - `schedule`: Cron expression with a seconds field, e.g. `0 */10 * * * *`
///
/// # Returns
/// - `Ok(JobScheduler)` - The running scheduler, to be shut down on exit
/// - `Err(AppError)` - Invalid schedule or scheduler start failure
pub async fn start_scheduler(state: AppState, schedule: &str) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let running = Arc::new(Mutex::new(()));

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let state = state.clone();
        let running = running.clone();

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::warn!("Previous holder reconciliation still running; skipping tick");
                return;
            };

            if let Err(e) = process_holder_reconciliation(&state).await {
                tracing::error!("Error processing holder reconciliation: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Holder reconciliation scheduler started ({})", schedule);

    Ok(scheduler)
}

async fn process_holder_reconciliation(state: &AppState) -> Result<(), AppError> {
    let summaries = state.reconcile_service().reconcile_all().await?;

    let attempted: usize = summaries.iter().map(|(_, summary)| summary.attempted).sum();
    tracing::info!(
        "Holder reconciliation finished for {} guilds ({} users updated)",
        summaries.len(),
        attempted
    );

    Ok(())
}
