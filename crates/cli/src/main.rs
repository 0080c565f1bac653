// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod render;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use podium_api::{CreateSeasonRequest, Session, StoreSnapshot};
use podium_domain::{EventId, RunIndex, SeasonId, Sport, WorldId};
use podium_remote::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpBackend};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Podium - run winter and summer sports seasons against a simulation server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root of the REST API
    #[arg(long, env = "PODIUM_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Bearer token from `podium login`
    #[arg(long, env = "PODIUM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "PODIUM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

/// The world and sport a season command works on.
#[derive(Args, Debug)]
struct Scope {
    /// World id
    #[arg(long, env = "PODIUM_WORLD")]
    world: String,

    /// Sport, e.g. `luge`, `alpine`, `speed-skating`
    #[arg(long, env = "PODIUM_SPORT")]
    sport: Sport,
}

impl Scope {
    fn world_id(&self) -> WorldId {
        WorldId::new(self.world.as_str())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a bearer token and print it
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PODIUM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List worlds
    Worlds,
    /// Show the unlocked week of a world
    WeekStatus {
        #[arg(long, env = "PODIUM_WORLD")]
        world: String,
    },
    /// Show the active season and its events
    Season(Scope),
    /// Show the overall standings of the active season
    Standings(Scope),
    /// List the roster
    Roster(Scope),
    /// Start a season and draw its schedule
    CreateSeason {
        #[command(flatten)]
        scope: Scope,
        #[arg(long)]
        name: String,
        #[arg(long)]
        year_start: i32,
        #[arg(long)]
        year_end: i32,
    },
    /// Simulate the next run of an event
    Simulate {
        #[command(flatten)]
        scope: Scope,
        #[arg(long)]
        event: String,
        #[arg(long)]
        run: u8,
    },
    /// Simulate every remaining run of an event
    SimulateAll {
        #[command(flatten)]
        scope: Scope,
        #[arg(long)]
        event: String,
    },
    /// Clear every result of the active season
    Reset(Scope),
    /// Delete a season and its schedule, the active one by default
    DeleteSeason {
        #[command(flatten)]
        scope: Scope,
        #[arg(long)]
        season: Option<String>,
    },
    /// Complete the active season and archive it
    Complete(Scope),
    /// Ask the server whether the season enters its next phase
    CheckAdvance(Scope),
}

fn print_snapshot(snapshot: &StoreSnapshot) {
    print!("{}", render::season(&snapshot.state));
    print!("{}", render::signals(&snapshot.signals));
}

async fn run(cli: Cli) -> Result<()> {
    let mut config: ClientConfig = ClientConfig::new(cli.api_url)?
        .with_timeout(Duration::from_secs(cli.timeout));
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }
    let backend: Arc<HttpBackend> = Arc::new(HttpBackend::new(config)?);
    let session: Session<HttpBackend> = Session::new(Arc::clone(&backend));

    match cli.command {
        Command::Login { email, password } => {
            let token: String = backend
                .login(&email, &password)
                .await
                .wrap_err("login failed")?;
            println!("{token}");
        }
        Command::Worlds => {
            print!("{}", render::worlds(&session.worlds().fetch().await?));
        }
        Command::WeekStatus { world } => {
            let status = session.week_status(&WorldId::new(world)).fetch().await?;
            print!("{}", render::week_status(&status));
        }
        Command::Season(scope) => {
            let snapshot = session.season(&scope.world_id(), scope.sport).fetch().await?;
            print!("{}", render::season(&snapshot.state));
        }
        Command::Standings(scope) => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            let standings = store.standings().await.unwrap_or_default();
            print!("{}", render::standings(&standings.overall));
            for (discipline, table) in &standings.disciplines {
                println!("\n{discipline}");
                print!("{}", render::standings(table));
            }
        }
        Command::Roster(scope) => {
            let entrants = session.roster(&scope.world_id(), scope.sport).fetch().await?;
            print!("{}", render::roster(&entrants));
        }
        Command::CreateSeason {
            scope,
            name,
            year_start,
            year_end,
        } => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            let snapshot = store
                .create_season(CreateSeasonRequest {
                    name,
                    year_start,
                    year_end,
                })
                .await?;
            print_snapshot(&snapshot);
        }
        Command::Simulate { scope, event, run } => {
            let world_id: WorldId = scope.world_id();
            let store = session.season(&world_id, scope.sport);
            store.fetch().await?;
            let snapshot = session
                .request_run(&world_id, scope.sport, &EventId::new(event), RunIndex::new(run)?)
                .await?;
            print_snapshot(&snapshot);
            // Best effort; a failed check was already logged.
            if let Ok(Some(advance)) = store.check_phase_advance().await {
                println!("* phase {} -> {}", advance.from, advance.to);
            }
        }
        Command::SimulateAll { scope, event } => {
            let world_id: WorldId = scope.world_id();
            let store = session.season(&world_id, scope.sport);
            store.fetch().await?;
            let snapshot = session
                .simulate_all(&world_id, scope.sport, &EventId::new(event))
                .await?;
            print_snapshot(&snapshot);
            if let Ok(Some(advance)) = store.check_phase_advance().await {
                println!("* phase {} -> {}", advance.from, advance.to);
            }
        }
        Command::DeleteSeason { scope, season } => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            let season_id: SeasonId = match season {
                Some(id) => SeasonId::new(id),
                None => store.snapshot().await.active_season()?.season.id.clone(),
            };
            print!("{}", render::signals(&store.delete_season(&season_id).await?.signals));
        }
        Command::Reset(scope) => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            print_snapshot(&store.reset_season().await?);
        }
        Command::Complete(scope) => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            print_snapshot(&store.complete_season().await?);
        }
        Command::CheckAdvance(scope) => {
            let store = session.season(&scope.world_id(), scope.sport);
            store.fetch().await?;
            match store.check_phase_advance().await? {
                Some(advance) => println!("phase {} -> {}", advance.from, advance.to),
                None => println!("no phase change"),
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli: Cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(api = %cli.api_url, "Starting podium");
    run(cli).await
}
