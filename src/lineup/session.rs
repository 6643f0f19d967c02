//! One manager's editing session for one week.
//!
//! A session starts `Editable` (nothing stored yet) or `Submitted` (a lineup
//! is already stored for the manager and week). `Submitted` is terminal: the
//! stored lineup is shown read-only and every edit is refused.

use tracing::debug;

use crate::{
    cli::types::{ManagerName, WeekKey},
    error::LeagueError,
    lineup::{
        engine::{Lineup, LineupEngine},
        slots::SlotLabel,
    },
    pool::{Player, PlayerFilter, PlayerPool},
    storage::{LineupStore, SubmittedLineup},
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Editable,
    Submitted(SubmittedLineup),
}

/// Explicit context for building one lineup; created per invocation and
/// dropped with it.
#[derive(Debug, Clone)]
pub struct EditingSession {
    engine: LineupEngine,
    manager: ManagerName,
    week: WeekKey,
    draft: Lineup,
    state: SessionState,
}

impl EditingSession {
    /// Start a session, picking up any lineup already stored for the pair.
    pub fn open<S: LineupStore + ?Sized>(
        engine: LineupEngine,
        store: &S,
        manager: ManagerName,
        week: WeekKey,
    ) -> Result<Self> {
        let state = match store.load_one(&manager, week)? {
            Some(existing) => SessionState::Submitted(existing),
            None => SessionState::Editable,
        };
        debug!("opened session for {} in {}: {}", manager, week, state_name(&state));
        Ok(Self {
            engine,
            manager,
            week,
            draft: Lineup::new(),
            state,
        })
    }

    pub fn manager(&self) -> &ManagerName {
        &self.manager
    }

    pub fn week(&self) -> WeekKey {
        self.week
    }

    pub fn engine(&self) -> &LineupEngine {
        &self.engine
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted(_))
    }

    /// The lineup on screen: the stored one once submitted, else the draft.
    pub fn lineup(&self) -> &Lineup {
        match &self.state {
            SessionState::Submitted(record) => &record.lineup,
            SessionState::Editable => &self.draft,
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_submitted() {
            return Err(LeagueError::AlreadySubmitted {
                manager: self.manager.clone(),
                week: self.week,
            });
        }
        Ok(())
    }

    /// Dropdown options for `slot` given the current draft.
    pub fn options<'a>(
        &'a self,
        slot: SlotLabel,
        pool: &'a PlayerPool,
        filter: &PlayerFilter,
    ) -> Result<Vec<&'a Player>> {
        self.engine
            .eligible_players(slot, pool, filter, self.lineup())
    }

    pub fn assign(&mut self, slot: SlotLabel, player: Option<Player>) -> Result<()> {
        self.ensure_editable()?;
        self.engine.assign(&mut self.draft, slot, player)
    }

    /// Throw away the unsaved draft. Never touches a stored lineup.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.draft = Lineup::new();
        Ok(())
    }

    /// Store the draft and lock the session.
    pub fn submit<S: LineupStore + ?Sized>(&mut self, store: &S) -> Result<SubmittedLineup> {
        self.ensure_editable()?;
        let record = match self
            .engine
            .submit(store, &self.manager, self.week, &self.draft)
        {
            Ok(record) => record,
            Err(err @ LeagueError::AlreadySubmitted { .. }) => {
                // Someone else's lineup won; show theirs from now on.
                if let Some(existing) = store.load_one(&self.manager, self.week)? {
                    self.state = SessionState::Submitted(existing);
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        self.draft = Lineup::new();
        self.state = SessionState::Submitted(record.clone());
        Ok(record)
    }
}

fn state_name(state: &SessionState) -> &'static str {
    match state {
        SessionState::Editable => "editable",
        SessionState::Submitted(_) => "submitted",
    }
}
