use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use festify::{cli, config, error, pipeline::RunOptions, types::Festival};

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
  args_conflicts_with_subcommands = true // disallow mixing run flags with subcommands
)]
struct Cli {
    /// Festival key(s); can be repeated
    #[clap(long, value_enum)]
    festival: Vec<Festival>,

    /// Festival year (e.g. 2026)
    #[clap(long)]
    year: Option<i32>,

    /// Number of top tracks per artist
    #[clap(long, default_value_t = config::DEFAULT_TOP_N)]
    top_n: usize,

    /// Export normalized lineup and computed playlist data
    #[clap(long)]
    export: bool,

    /// Create or update the Spotify playlist
    #[clap(long)]
    generate_playlist: bool,

    /// Also remove playlist tracks that are no longer in the lineup's top tracks
    #[clap(long)]
    delete_stale: bool,

    /// Delete all old Festify playlists before rebuilding
    #[clap(long)]
    delete_old_playlists: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        None => {
            if cli.festival.is_empty() {
                error!("At least one --festival is required.");
            }
            let year = match cli.year {
                Some(year) => year,
                None => {
                    error!("--year is required.");
                }
            };

            cli::generate(RunOptions {
                festivals: cli.festival,
                year,
                top_n: cli.top_n,
                export: cli.export,
                generate_playlist: cli.generate_playlist,
                delete_stale: cli.delete_stale,
                delete_old_playlists: cli.delete_old_playlists,
                lineup_root: None,
            })
            .await
        }
    }
}
