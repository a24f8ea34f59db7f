use app_api::monthly_reset_notice;
use blood_app::{AppState, until_next_check};
use chrono::Utc;
use http_api::Notifier;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Runs a catch-up check now, then one at the start of every UTC month.
pub fn spawn_monthly_reset(state: AppState, notifier: Option<Notifier>) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_check(&state, notifier.as_ref()).await;
        loop {
            let wait = until_next_check(Utc::now());
            debug!(seconds = wait.as_secs(), "waiting for next monthly check");
            tokio::time::sleep(wait).await;
            run_check(&state, notifier.as_ref()).await;
        }
    })
}

async fn run_check(state: &AppState, notifier: Option<&Notifier>) {
    let ledger = state.services.ledger.clone();
    let cap = ledger.cap();
    match tokio::task::spawn_blocking(move || ledger.check_and_reset_monthly()).await {
        Ok(Ok(true)) => {
            info!(level = cap, "monthly reset applied");
            if let Some(notifier) = notifier {
                if let Err(err) = notifier.post(&monthly_reset_notice(cap)).await {
                    warn!(error = %err, "failed to announce monthly reset");
                }
            }
        }
        Ok(Ok(false)) => debug!("no monthly reset due"),
        Ok(Err(err)) => error!(error = %err, "monthly reset check failed"),
        Err(err) => error!(error = %err, "monthly reset task aborted"),
    }
}
