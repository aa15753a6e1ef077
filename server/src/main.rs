mod config;
mod console;
mod graphql;
mod http;
mod view;

use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::EmployeeStore;
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
    view::RosterView,
};

#[derive(Parser, Debug)]
#[command(name = "roster-server", version, about = "Employee roster queries")]
struct Cli {
    /// JSON roster fixture to load instead of the demo roster.
    #[arg(long, global = true, value_name = "FILE", env = "ROSTER_PATH")]
    roster: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print every employee.
    List,
    /// Print "name (department)" for every employee.
    Names,
    /// Print the average salary.
    Average,
    /// Print employees older than AGE.
    Filter {
        #[arg(value_name = "AGE", allow_hyphen_values = true)]
        age: String,
    },
    /// Interactive console.
    Console,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let app_config = Arc::new(AppConfig::load(cli.roster)?);
    let load_store = || app_config.build_store().map(Arc::new);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, load_store()?, app_config.clone()).await,
        Command::List => render(load_store()?, |view| view.list().to_string()),
        Command::Names => render(load_store()?, |view| view.name_departments().to_string()),
        Command::Average => render(load_store()?, |view| view.average_salary().to_string()),
        Command::Filter { age } => {
            let mut view = RosterView::new(load_store()?);
            let screen = view.filter(&age)?;
            print!("{screen}");
            Ok(())
        }
        Command::Console => run_console(load_store()?),
        Command::SchemaPrint { output } => schema_print(output),
    }
}

fn render(store: Arc<EmployeeStore>, show: impl FnOnce(&mut RosterView) -> String) -> Result<()> {
    let mut view = RosterView::new(store);
    print!("{}", show(&mut view));
    Ok(())
}

fn run_console(store: Arc<EmployeeStore>) -> Result<()> {
    let mut view = RosterView::new(store);
    let stdin = io::stdin();
    console::run_console(&mut view, stdin.lock(), io::stdout().lock())
}

/// The SDL does not depend on roster contents, so no roster is loaded.
fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let sdl = graphql::build_schema(Arc::new(EmployeeStore::default())).sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "graphql schema written");
        }
        None => print!("{sdl}"),
    }
    Ok(())
}

async fn run_server(
    cmd: ServeCommand,
    store: Arc<EmployeeStore>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let schema = graphql::build_schema(store.clone());
    let state = AppState {
        store,
        schema,
        config,
    };
    http::serve(cmd.into(), state).await
}
