use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use directory_core::{
    DirectoryRuntime, HttpMemberSource, Intent, JsonFilePreferences, LoadState,
};
use shared::domain::Selector;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod render;

use controller::{
    events::parse_command,
    orchestration::{current_view, dispatch_console_command, Flow},
};
use render::{render_intro, render_options, Palette};

#[derive(Parser, Debug)]
#[command(name = "members-directory", about = "Browse the community members directory")]
struct Cli {
    /// Optional TOML file with `api_base_url` and `settings_path`.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    api_base_url: Option<String>,
    /// JSON file holding the dark mode preference.
    #[arg(long)]
    settings_path: Option<PathBuf>,
    #[arg(long)]
    no_intro: bool,
    #[arg(long)]
    no_color: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the directory once and print the matching members.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        role: String,
        #[arg(long, default_value = "all")]
        location: String,
    },
    /// Print the available role filters.
    Roles,
    /// Print the available location filters.
    Locations,
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Line-driven session (the default).
    Interactive,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings(&cli.config);
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(path) = cli.settings_path {
        settings.settings_path = path;
    }
    let api_base_url = config::normalize_api_base_url(&settings.api_base_url)?;
    info!(
        api_base_url = %api_base_url,
        settings_path = %settings.settings_path.display(),
        "starting members directory"
    );

    let source = HttpMemberSource::new(&api_base_url)?;
    let preferences = JsonFilePreferences::new(&settings.settings_path);
    let mut runtime = DirectoryRuntime::new(Arc::new(source), Arc::new(preferences));
    let colors = !cli.no_color;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::List {
            search,
            role,
            location,
        } => {
            runtime.dispatch(Intent::SetSearchText(search));
            runtime.dispatch(Intent::SetRoleSelector(Selector::parse(&role)));
            runtime.dispatch(Intent::SetLocationSelector(Selector::parse(&location)));
            load_once(&mut runtime).await?;
            print!("{}", current_view(&runtime, colors));
        }
        Command::Roles => {
            load_once(&mut runtime).await?;
            let state = runtime.state();
            print!(
                "{}",
                render_options("All Roles", &state.store.role_options(), &state.criteria.role)
            );
        }
        Command::Locations => {
            load_once(&mut runtime).await?;
            let state = runtime.state();
            print!(
                "{}",
                render_options(
                    "All Locations",
                    &state.store.location_options(),
                    &state.criteria.location
                )
            );
        }
        Command::Theme { action } => {
            if let Some(ThemeAction::Toggle) = action {
                runtime.dispatch(Intent::ToggleDarkMode);
            }
            let mode = if runtime.state().dark_mode { "dark" } else { "light" };
            println!("{mode}");
        }
        Command::Interactive => run_interactive(&mut runtime, colors, !cli.no_intro).await?,
    }

    Ok(())
}

async fn load_once(runtime: &mut DirectoryRuntime) -> Result<()> {
    runtime.dispatch(Intent::Reload);
    runtime.settle().await;
    if let LoadState::Failed { message } = runtime.state().store.state() {
        bail!("{message}");
    }
    Ok(())
}

async fn run_interactive(runtime: &mut DirectoryRuntime, colors: bool, intro: bool) -> Result<()> {
    if intro {
        print!(
            "{}",
            render_intro(Palette::select(runtime.state().dark_mode, colors))
        );
    }

    runtime.dispatch(Intent::Reload);
    print!("{}", current_view(runtime, colors));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let loading = runtime.state().store.outstanding().is_some();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        let (flow, output) = dispatch_console_command(runtime, command, colors);
                        print!("{output}");
                        if flow == Flow::Quit {
                            break;
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
            _ = runtime.next_completion(), if loading => {
                print!("{}", current_view(runtime, colors));
            }
        }
    }

    Ok(())
}
