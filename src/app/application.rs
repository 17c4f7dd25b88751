//! Application - Headless Dashboard Lifecycle
//!
//! Wires the services together and drives the console dashboard until
//! Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::app::dashboard::Dashboard;
use crate::constants::{EMAIL_ENV, PASSWORD_ENV};
use crate::domain::config::ClientConfig;
use crate::domain::mine::NotificationLevel;
use crate::error::Result;
use crate::eventing::app_event::{AppEvent, EventSender};
use crate::services::runtime::runtime_handle;
use crate::services::{
    ApiClient, AuthApi, AuthService, DocumentClasses, SensorPoller, SettingsService,
};
use crate::state::sensor_state::SensorStore;
use crate::utils::config_store::ConfigStore;
use crate::utils::format::{format_mine_info, truncate};

/// How often queued events are drained to the console
const EVENT_DRAIN_MS: u64 = 100;

/// Run the dashboard until interrupted
pub async fn run(config: ClientConfig) -> Result<()> {
    let (event_tx, event_rx) = crossbeam_channel::unbounded::<AppEvent>();
    let api = ApiClient::from_config(&config.api)?;
    tracing::info!("Backend: {}", api.base_url());

    let store = ConfigStore::open_default()?;
    tracing::debug!("Settings stored in {}", store.dir().display());
    let settings =
        SettingsService::load(store, DocumentClasses::new()).with_events(event_tx.clone());
    tracing::info!(
        "Presentation: layout {:?}, classes [{}]",
        settings.get().layout,
        settings.applier().classes().join(" ")
    );

    let auth = AuthService::new(api.clone()).with_events(event_tx.clone());
    sign_in_from_env(&auth, &event_tx).await;

    show_site(&api, &event_tx).await;

    let poller = SensorPoller::new(Arc::new(api))
        .with_interval(Duration::from_millis(config.polling.interval_ms))
        .with_events(event_tx.clone())
        .start_on(&runtime_handle()?);

    let mut dashboard = Dashboard::new(config.dashboard.chart_window);
    let mut drain = tokio::time::interval(Duration::from_millis(EVENT_DRAIN_MS));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = &mut shutdown => {
                if let Err(e) = res {
                    tracing::error!("Could not listen for Ctrl-C: {}", e);
                    let _ = event_tx.send(AppEvent::error(format!("Signal handler failed: {e}")));
                }
                break;
            }
            _ = drain.tick() => {
                drain_events(&event_rx, &mut dashboard, poller.store());
            }
        }
    }

    tracing::info!("Shutting down");
    let store = poller.store().clone();
    poller.stop();
    auth.logout();
    drain_events(&event_rx, &mut dashboard, &store);
    Ok(())
}

fn drain_events(rx: &Receiver<AppEvent>, dashboard: &mut Dashboard, store: &SensorStore) {
    for event in rx.try_iter() {
        if let Some(line) = dashboard.handle(&event, store) {
            println!("{line}");
        }
    }
}

/// Log in with credentials from the environment, when both are set
async fn sign_in_from_env<A: AuthApi>(auth: &AuthService<A>, tx: &EventSender) {
    let (Ok(email), Ok(password)) = (std::env::var(EMAIL_ENV), std::env::var(PASSWORD_ENV)) else {
        tracing::debug!("No credentials in environment, continuing anonymously");
        return;
    };

    if let Err(e) = auth.login(&email, &password).await {
        tracing::warn!("Sign-in as {} failed: {}", email, e);
        let _ = tx.send(AppEvent::warn(format!("Sign-in failed: {e}")));
    }
}

/// Mine info and unread notifications, fetched once; failures are not fatal
async fn show_site(api: &ApiClient, tx: &EventSender) {
    match api.fetch_mine_info().await {
        Ok(info) => println!("{}", format_mine_info(&info)),
        Err(e) => {
            tracing::warn!("Mine info unavailable: {}", e);
            let _ = tx.send(AppEvent::warn("Mine info unavailable"));
        }
    }

    match api.fetch_notifications().await {
        Ok(notifications) => {
            let unread: Vec<_> = notifications.iter().filter(|n| !n.read).collect();
            let _ = tx.send(AppEvent::info(format!("{} unread notifications", unread.len())));
            for n in unread.iter().rev().take(5) {
                let tag = match n.level {
                    NotificationLevel::Critical => "CRITICAL",
                    NotificationLevel::Warning => "WARNING",
                    NotificationLevel::Info => "INFO",
                };
                println!("  [{}] {} {}", tag, n.timestamp, truncate(&n.message, 80));
            }
        }
        Err(e) => tracing::warn!("Notifications unavailable: {}", e),
    }
}
