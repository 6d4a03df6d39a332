use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use toptracks::{
    cli,
    config::{self, AuthConfig},
    error,
    management::SessionState,
    spotify::tracks::TimeRange,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Connect with Spotify and list your top tracks
    Tracks(TracksOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// List the tracks of this album instead of your top tracks
    #[clap(long)]
    pub album: Option<String>,

    /// Period the top tracks are computed over
    #[clap(long, value_enum)]
    pub time_range: Option<TimeRange>,

    /// Number of top tracks to request (1-50)
    #[clap(long)]
    pub limit: Option<u32>,

    /// Print the tracks as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Tracks(opt) => {
            if let Err(e) = config::load_env().await {
                error!("Cannot load environment. Err: {}", e);
            }

            let config = match resolve_config(opt.album, opt.time_range, opt.limit) {
                Ok(config) => config,
                Err(e) => error!("Invalid configuration. Err: {}", e),
            };

            let output = if opt.json {
                cli::Output::Json
            } else {
                cli::Output::Table
            };

            let session = cli::tracks(config, output).await;
            if session.state != SessionState::Ready {
                std::process::exit(1);
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

fn resolve_config(
    album: Option<String>,
    time_range: Option<TimeRange>,
    limit: Option<u32>,
) -> Result<AuthConfig, toptracks::error::ConfigError> {
    let mut config = AuthConfig::from_env()?;
    if let Some(album_id) = album {
        config = config.with_fixed_album(album_id);
    }
    if let Some(time_range) = time_range {
        config.time_range = time_range;
    }
    if let Some(limit) = limit {
        config.limit = limit;
    }
    config.validate()?;
    Ok(config)
}
