use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use leadgen_app::platform::logging;
use leadgen_app::{AppConfig, SyncController};
use leadgen_core::{DashboardView, PilotStatus};
use leadgen_logging::{leadgen_info, leadgen_warn};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    logging::initialize(config.log_destination, config.log_level);
    leadgen_info!("Lead dashboard starting against {}", config.api_base);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))?;
    }

    let mut controller = SyncController::new(config.api_settings()?, config.timings)?;
    controller.mount();

    while !shutdown.load(Ordering::SeqCst) {
        controller.pump_timeout(Duration::from_millis(100));
        if let Some(view) = controller.take_dirty_view() {
            log_view(&view);
        }
    }

    controller.teardown();
    leadgen_info!("Lead dashboard stopped");
    Ok(())
}

fn log_view(view: &DashboardView) {
    let pilot = match &view.pilot {
        PilotStatus::Idle => "idle".to_string(),
        PilotStatus::Active { label, progress } => match progress.percent {
            Some(percent) => format!("{label} ({percent}%)"),
            None => label.clone(),
        },
    };
    leadgen_info!(
        "leads={} avg={} healthy={} critical={} loading={} discovery={:?} pilot={}",
        view.stats.total,
        view.stats.average_score,
        view.stats.healthy_count,
        view.stats.critical_count,
        view.is_loading,
        view.discovery,
        pilot
    );
    if let Some(message) = &view.discovery_message {
        leadgen_info!("{}", message);
    }
    if let Some(err) = &view.fetch_error {
        leadgen_warn!("Lead list unavailable: {}", err);
    }
}
