//! Live mirroring of one team

use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use teamhub::api::{AccessTokenProvider, HttpApiClient, StaticToken};
use teamhub::models::User;
use teamhub::stream::SseTransport;
use teamhub::{EventDispatcher, EventStream, SharedStores, Stores, SyncConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run(config: SyncConfig) -> Result<()> {
    let token: Arc<dyn AccessTokenProvider> = Arc::new(StaticToken(config.access_token.clone()));
    let api = Arc::new(HttpApiClient::from_config(&config, token.clone())?);

    let mut stores = Stores::new();
    stores.global.current_user = config.user_id.clone().map(|id| User::new(id.clone(), id));
    let stores = stores.shared();

    let dispatcher = Arc::new(EventDispatcher::new(stores.clone(), api));
    let transport = Arc::new(SseTransport::with_connect_timeout(config.request_timeout())?);
    let stream = EventStream::from_config(&config, transport, token, dispatcher)?;
    info!("Watching {}", stream.url());

    let mut state = stream.state();
    let state_logger = tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = *state.borrow_and_update();
            info!("Connection state: {}", current);
        }
    });

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(stream.run(cancel.clone()));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    cancel.cancel();
    handle.await.context("Event stream task failed")?;
    state_logger.await.context("State logger task failed")?;

    log_summary(&stores).await;
    Ok(())
}

async fn log_summary(stores: &SharedStores) {
    let stores = stores.read().await;
    let nav = &stores.nav;
    info!(
        "Processed {} events; cached {} workspaces, {} folders, {} documents, {} tags, {} templates",
        nav.app_events.len(),
        nav.workspaces.len(),
        nav.folders.len(),
        nav.docs.len(),
        nav.tags.len(),
        nav.templates.len()
    );

    let now = Local::now();
    for folder in nav.smart_folders.values() {
        let count = nav
            .smart_folder_documents(&folder.id, &now)
            .map(|docs| docs.len())
            .unwrap_or(0);
        info!("Smart folder {} ({}): {} documents", folder.name, folder.id, count);
    }
}
