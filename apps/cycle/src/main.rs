use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{CycleClient, HttpRequestIssuer, RoundtripApi};
use controller::{
    new_roundtrip::NewRoundtripController, roundtrip_details::RoundtripDetailsController,
    roundtrip_list::RoundtripListController, shell::ShellController, Location, NotificationBus,
    SyncStatus,
};
use shared::domain::{RoundtripId, SyncMode};
use tokio::sync::broadcast;

mod config;

use config::{load_settings, Settings, SETTINGS_FILE};

#[derive(Parser, Debug)]
#[command(name = "cycle", about = "Manage and synchronize BPMN roundtrips")]
struct Cli {
    /// Base url of the cycle web application.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all roundtrips.
    List,
    /// Type the given names one after another and report whether the last is free.
    CheckName {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Synchronize a roundtrip in the given direction.
    Sync {
        id: i64,
        #[arg(long, value_enum)]
        mode: ModeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    LeftToRight,
    RightToLeft,
}

impl From<ModeArg> for SyncMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::LeftToRight => SyncMode::LeftToRight,
            ModeArg::RightToLeft => SyncMode::RightToLeft,
        }
    }
}

struct Views {
    location: Location,
    shell: ShellController,
    list: RoundtripListController,
    details: RoundtripDetailsController,
}

impl Views {
    fn new(path: &str) -> Self {
        Self {
            location: Location::new(path),
            shell: ShellController::new(),
            list: RoundtripListController::new(),
            details: RoundtripDetailsController::new(),
        }
    }

    fn dispatch(&mut self, events: &mut broadcast::Receiver<shared::protocol::AppEvent>) {
        while let Ok(event) = events.try_recv() {
            tracing::debug!(event = event.kind(), "dispatching");
            self.shell.handle(&event, &self.location);
            self.list.handle(&event);
            self.details.handle(&event);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, file_error) = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    if let Some(err) = file_error {
        tracing::warn!("ignoring unreadable {SETTINGS_FILE}: {err}");
    }

    let issuer = HttpRequestIssuer::with_timeout(
        &settings.server_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .with_context(|| format!("invalid server url {}", settings.server_url))?;
    let api: Arc<dyn RoundtripApi> = Arc::new(CycleClient::new(issuer));
    let bus = NotificationBus::default();

    match cli.command {
        Command::List => list(api.as_ref(), &bus).await,
        Command::CheckName { names } => check_name(api, &settings, names).await,
        Command::Sync { id, mode } => sync(api.as_ref(), &bus, RoundtripId(id), mode.into()).await,
    }
}

async fn list(api: &dyn RoundtripApi, bus: &NotificationBus) -> Result<()> {
    let mut events = bus.subscribe();
    let mut views = Views::new("/roundtrip");
    views.shell.load_current_user(api).await;
    views
        .list
        .load(api)
        .await
        .context("failed to list roundtrips")?;
    views.dispatch(&mut events);

    if let Some(user) = views.shell.current_user() {
        println!("signed in as {}", user.name);
    }
    for roundtrip in views.list.roundtrips() {
        let last_sync = roundtrip
            .last_sync
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        println!("{:>6}  {:<40}  last sync: {last_sync}", roundtrip.id.0, roundtrip.name);
    }
    Ok(())
}

async fn check_name(api: Arc<dyn RoundtripApi>, settings: &Settings, names: Vec<String>) -> Result<()> {
    let delay = Duration::from_millis(settings.name_check_debounce_ms);
    let mut form = NewRoundtripController::new(api, delay);
    form.open();
    for name in names {
        form.set_name(name);
    }

    let mut checks = form.subscribe();
    let budget = delay + Duration::from_secs(settings.request_timeout_secs);
    let settled = tokio::time::timeout(budget, checks.wait_for(|check| check.checked))
        .await
        .context("name check did not complete")?
        .context("name check state dropped")?
        .clone();

    if settled.unused {
        println!("'{}' is free", settled.name);
    } else {
        println!("'{}' is already used by another roundtrip", settled.name);
    }
    Ok(())
}

async fn sync(
    api: &dyn RoundtripApi,
    bus: &NotificationBus,
    id: RoundtripId,
    mode: SyncMode,
) -> Result<()> {
    let mut events = bus.subscribe();
    let mut views = Views::new(&format!("/roundtrip/{id}"));

    views.list.load(api).await.context("failed to list roundtrips")?;
    views.list.route_changed(Some(&id.to_string()), bus);
    views
        .details
        .load(api, id, &views.location)
        .await
        .with_context(|| format!("failed to load roundtrip {id}"))?;
    views.dispatch(&mut events);
    let trail: Vec<_> = views
        .shell
        .breadcrumbs()
        .iter()
        .map(|crumb| crumb.name.as_str())
        .collect();
    tracing::info!(breadcrumbs = ?trail, "roundtrip opened");

    views.details.open_sync_dialog(mode)?;
    let status = views.details.sync_dialog().perform_sync(api, bus).await?;
    views.dispatch(&mut events);
    println!("{}: {}", views.details.roundtrip().map_or("?", |r| r.name.as_str()), status.label());

    if status == SyncStatus::Failed {
        bail!("synchronization of roundtrip {id} failed");
    }
    views.details.sync_dialog_mut().cancel();
    Ok(())
}
