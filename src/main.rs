//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::Context;
use bragginrights::{
    cli::{BragginRights, Commands, LineupCmd, StandingsCmd},
    commands::{
        leaderboard::{handle_leaderboard, LeaderboardParams},
        lineup::{
            handle_edit, handle_options, handle_show, handle_submit, OptionsParams, ShowParams,
            SubmitParams,
        },
        players::{handle_players, PlayersParams},
        standings::{handle_standings_record, handle_standings_show, RecordParams},
        CommandContext,
    },
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "bragginrights=debug" } else { "bragginrights=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = BragginRights::parse();
    init_logging(app.global.verbose);

    let require_complete = matches!(
        app.command,
        Commands::Lineup {
            cmd: LineupCmd::Submit {
                require_complete: true,
                ..
            } | LineupCmd::Edit {
                require_complete: true,
                ..
            }
        }
    );
    let ctx = CommandContext::new(app.global.overrides(require_complete))
        .context("could not set up the league configuration and store")?;

    match app.command {
        Commands::Players {
            filters,
            week,
            json,
        } => handle_players(
            &ctx,
            PlayersParams {
                week,
                filter: filters.to_filter(),
                as_json: json,
            },
        )
        .context("could not list the player pool")?,

        Commands::Lineup { cmd } => match cmd {
            LineupCmd::Options {
                manager,
                slot,
                picks,
                filters,
                json,
            } => handle_options(
                &ctx,
                OptionsParams {
                    manager: manager.manager,
                    slot,
                    picks,
                    filter: filters.to_filter(),
                    as_json: json,
                },
            )
            .context("could not list slot options")?,

            LineupCmd::Show {
                manager,
                week,
                json,
            } => handle_show(
                &ctx,
                ShowParams {
                    manager: manager.manager,
                    week,
                    as_json: json,
                },
            )
            .context("could not show the lineup")?,

            LineupCmd::Submit { manager, picks, .. } => handle_submit(
                &ctx,
                SubmitParams {
                    manager: manager.manager,
                    picks,
                },
            )
            .context("lineup was not submitted")?,

            LineupCmd::Edit { manager, .. } => {
                handle_edit(&ctx, &manager.manager).context("lineup editor failed")?
            }
        },

        Commands::Leaderboard {
            week,
            json,
            score_cache,
            refresh,
        } => handle_leaderboard(
            &ctx,
            LeaderboardParams {
                week,
                as_json: json,
                score_cache,
                refresh,
            },
        )
        .await
        .context("could not build the leaderboard")?,

        Commands::Standings { cmd } => match cmd {
            StandingsCmd::Show { json } => {
                handle_standings_show(&ctx, json).context("could not show the standings")?
            }
            StandingsCmd::Record { week, score_cache } => {
                handle_standings_record(&ctx, RecordParams { week, score_cache })
                    .await
                    .context("could not record the week")?
            }
        },
    }

    Ok(())
}
