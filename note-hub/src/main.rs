use anyhow::Context;
use axum::http::HeaderName;
use clap::Parser;
use note_hub::api::{self, AppState};
use note_hub::config::{Config, IdentityMode};
use note_hub_core::identity::AdminList;
use note_hub_core::policy::NoteAccessPolicy;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,note_hub=debug,note_hub_core=debug")),
        )
        .init();

    let config = Config::parse();

    let store = config.store();
    if config.init_store && store.init_if_missing()? {
        warn!(path = %store.path().display(), "created empty notes document");
    }
    // the store must be readable before the first request
    let count = store
        .get_all()
        .with_context(|| format!("cannot load notes from {}", store.path().display()))?
        .len();
    info!(path = %store.path().display(), notes = count, "notes document loaded");

    if config.identity_mode == IdentityMode::AdminList {
        let admins = AdminList::load(&config.admins_file)
            .await
            .with_context(|| format!("cannot load admins from {}", config.admins_file.display()))?;
        info!(admins = admins.admins.len(), "admin-list identity check enabled");
    }

    let header = HeaderName::try_from(config.identity_header.as_str())
        .with_context(|| format!("invalid identity header {:?}", config.identity_header))?;
    let state = AppState::new(NoteAccessPolicy::new(store), config.identity_check())
        .with_identity_header(header);

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);
    axum::serve(listener, api::router(state).into_make_service()).await?;
    Ok(())
}
