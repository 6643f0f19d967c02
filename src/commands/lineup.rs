//! Lineup commands: slot options, show, submit and the interactive editor.

use std::str::FromStr;

use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::debug;

use crate::{
    cli::{types::WeekKey, SlotPick},
    error::LeagueError,
    lineup::EditingSession,
    pool::{PlayerFilter, PlayerPool},
    storage::LineupStore,
    Result,
};

use super::common::{format_lineup, CommandContext};

/// Fill the session's draft from `SLOT=Player` picks, in order.
pub fn apply_picks(session: &mut EditingSession, pool: &PlayerPool, picks: &[SlotPick]) -> Result<()> {
    for pick in picks {
        let slot = session.engine().rules().roster.resolve(&pick.slot)?;
        let player = pool.find(&pick.player)?.clone();
        session.assign(slot, Some(player))?;
    }
    Ok(())
}

#[derive(Debug)]
pub struct OptionsParams {
    pub manager: String,
    pub slot: String,
    pub picks: Vec<SlotPick>,
    pub filter: PlayerFilter,
    pub as_json: bool,
}

/// Handle `lineup options`
pub fn handle_options(ctx: &CommandContext, params: OptionsParams) -> Result<()> {
    let manager = ctx.config.resolve_manager(&params.manager)?;
    let (file, pool) = ctx.load_pool(None)?;
    let mut session = EditingSession::open(ctx.engine(), &*ctx.store, manager, file.week)?;
    if !session.is_submitted() {
        apply_picks(&mut session, &pool, &params.picks)?;
    }

    let slot = session.engine().rules().roster.resolve(&params.slot)?;
    let options = session.options(slot, &pool, &params.filter)?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&options)?); // tarpaulin::skip
        return Ok(());
    }

    println!("{} options for {} ({}):", slot, session.manager(), file.week);
    let current = session.lineup().get(slot).map(|p| p.name.as_str());
    for p in options {
        // tarpaulin::skip - console output
        let marker = if current == Some(p.name.as_str()) { " (current)" } else { "" };
        println!("  {}{}", p.label(), marker);
    }
    if session.is_submitted() {
        println!("🔒 Lineup already submitted for {}", file.week);
    }
    Ok(())
}

#[derive(Debug)]
pub struct ShowParams {
    pub manager: String,
    pub week: Option<WeekKey>,
    pub as_json: bool,
}

/// Handle `lineup show`
pub fn handle_show(ctx: &CommandContext, params: ShowParams) -> Result<()> {
    let manager = ctx.config.resolve_manager(&params.manager)?;
    let week = ctx.resolve_week(params.week)?;
    let record = ctx.store.load_one(&manager, week)?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&record)?); // tarpaulin::skip
        return Ok(());
    }

    match record {
        Some(record) => {
            println!("🔒 {}'s lineup for {}", manager, week);
            for line in format_lineup(&ctx.engine(), &record.lineup) {
                println!("  {}", line);
            }
        }
        None => println!("No lineup submitted by {} for {}", manager, week),
    }
    Ok(())
}

#[derive(Debug)]
pub struct SubmitParams {
    pub manager: String,
    pub picks: Vec<SlotPick>,
}

/// Handle `lineup submit`
pub fn handle_submit(ctx: &CommandContext, params: SubmitParams) -> Result<()> {
    let manager = ctx.config.resolve_manager(&params.manager)?;
    let (file, pool) = ctx.load_pool(None)?;
    let mut session = EditingSession::open(ctx.engine(), &*ctx.store, manager, file.week)?;

    if session.is_submitted() {
        print_session(&session);
        return Err(LeagueError::AlreadySubmitted {
            manager: session.manager().clone(),
            week: session.week(),
        });
    }

    apply_picks(&mut session, &pool, &params.picks)?;
    print_session(&session);

    let record = session.submit(&*ctx.store)?;
    println!(
        "✓ Lineup submitted for {} ({} player(s), ${})",
        record.week,
        record.lineup.len(),
        record.lineup.total_salary()
    );
    Ok(())
}

fn print_session(session: &EditingSession) {
    let status = if session.is_submitted() { "🔒 submitted" } else { "editing" };
    println!("{} | {} | {}", session.manager(), session.week(), status);
    for line in format_lineup(session.engine(), session.lineup()) {
        println!("  {}", line);
    }
}

/// One line typed into the interactive editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Show,
    Options(String),
    Assign(SlotPick),
    Clear(String),
    Reset,
    Submit,
    Help,
    Quit,
}

const EDIT_HELP: &str = "\
Commands:
  show                      current lineup and salary
  options <SLOT>            players that can fill a slot
  assign <SLOT> <PLAYER>    put a player in a slot (also: SLOT=PLAYER)
  clear <SLOT>              empty a slot
  reset                     start over (unsaved picks only)
  submit                    lock the lineup in for the week
  quit";

impl FromStr for EditCommand {
    type Err = LeagueError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if !line.contains(' ') && line.contains('=') {
            return Ok(Self::Assign(line.parse()?));
        }

        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let needs_arg = |what: &str| LeagueError::MalformedInput {
            message: format!("`{}` needs {}", verb, what),
        };

        match verb.to_lowercase().as_str() {
            "show" | "" => Ok(Self::Show),
            "options" | "o" if !rest.is_empty() => Ok(Self::Options(rest.to_string())),
            "options" | "o" => Err(needs_arg("a slot")),
            "assign" | "a" => {
                let (slot, player) = rest.split_once(' ').ok_or_else(|| needs_arg("a slot and a player"))?;
                Ok(Self::Assign(SlotPick {
                    slot: slot.to_string(),
                    player: player.trim().to_string(),
                }))
            }
            "clear" | "c" if !rest.is_empty() => Ok(Self::Clear(rest.to_string())),
            "clear" | "c" => Err(needs_arg("a slot")),
            "reset" => Ok(Self::Reset),
            "submit" => Ok(Self::Submit),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ if line.contains('=') => Ok(Self::Assign(line.parse()?)),
            _ => Err(LeagueError::MalformedInput {
                message: format!("unknown command `{}` (try `help`)", verb),
            }),
        }
    }
}

/// Result of running one editor command.
#[derive(Debug, Default)]
pub struct EditOutcome {
    pub lines: Vec<String>,
    pub done: bool,
}

/// Apply one editor command to the session.
pub fn run_edit_command<S: LineupStore + ?Sized>(
    session: &mut EditingSession,
    pool: &PlayerPool,
    store: &S,
    command: EditCommand,
) -> Result<EditOutcome> {
    let roster = session.engine().rules().roster.clone();
    let mut out = EditOutcome::default();

    match command {
        EditCommand::Show => {
            out.lines = format_lineup(session.engine(), session.lineup());
        }
        EditCommand::Options(raw) => {
            let slot = roster.resolve(&raw)?;
            out.lines = session
                .options(slot, pool, &PlayerFilter::default())?
                .into_iter()
                .map(|p| p.label())
                .collect();
        }
        EditCommand::Assign(pick) => {
            apply_picks(session, pool, std::slice::from_ref(&pick))?;
            out.lines = format_lineup(session.engine(), session.lineup());
        }
        EditCommand::Clear(raw) => {
            session.assign(roster.resolve(&raw)?, None)?;
            out.lines = format_lineup(session.engine(), session.lineup());
        }
        EditCommand::Reset => {
            session.reset()?;
            out.lines.push("Draft cleared".to_string());
        }
        EditCommand::Submit => {
            out.lines = format_lineup(session.engine(), session.lineup());
            let record = session.submit(store)?;
            out.lines
                .push(format!("✓ Lineup submitted for {}", record.week));
            out.done = true;
        }
        EditCommand::Help => out.lines.push(EDIT_HELP.to_string()),
        EditCommand::Quit => out.done = true,
    }
    Ok(out)
}

/// Handle `lineup edit`: an interactive build-and-submit loop
pub fn handle_edit(ctx: &CommandContext, manager: &str) -> Result<()> {
    let manager = ctx.config.resolve_manager(manager)?;
    let (file, pool) = ctx.load_pool(None)?;
    let mut session = EditingSession::open(ctx.engine(), &*ctx.store, manager, file.week)?;

    print_session(&session);
    if session.is_submitted() {
        println!("Lineups lock once submitted; nothing left to edit.");
        return Ok(());
    }
    println!("{}", EDIT_HELP);

    // tarpaulin::skip - interactive terminal loop
    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline(&format!("{}> ", session.manager())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        let outcome = line
            .parse::<EditCommand>()
            .and_then(|cmd| run_edit_command(&mut session, &pool, &*ctx.store, cmd));
        match outcome {
            Ok(outcome) => {
                for l in outcome.lines {
                    println!("{}", l);
                }
                if outcome.done {
                    break;
                }
            }
            Err(e) => {
                debug!("editor command failed: {:?}", e);
                println!("⚠ {}", e);
            }
        }
    }
    Ok(())
}
