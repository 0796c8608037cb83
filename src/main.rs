//! HTTP server for the Ponto Engine.
//!
//! Loads a policy directory and serves the calculation API.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ponto_engine::api::{AppState, create_router};
use ponto_engine::config::PolicyLoader;

/// Time-to-payroll calculation server.
#[derive(Debug, Parser)]
#[command(name = "ponto-engine", version, about)]
struct Args {
    /// Directory holding work_hours.yaml, salary.yaml and hour_bank.yaml.
    #[arg(long, env = "PONTO_POLICY_DIR", default_value = "config/default")]
    policy_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "PONTO_BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let loader = match PolicyLoader::load(&args.policy_dir) {
        Ok(loader) => loader,
        Err(err) => {
            error!(policy_dir = %args.policy_dir.display(), error = %err, "Failed to load policy");
            return Err(err.into());
        }
    };
    info!(
        policy_dir = %args.policy_dir.display(),
        base_salary = %loader.salary().base_salary,
        "Policy loaded"
    );

    let app = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
