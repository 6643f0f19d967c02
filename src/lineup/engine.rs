//! Slot assignment and lineup validation.
//!
//! The engine is pure logic: it never touches the pool file, the store or the
//! network except through the [`LineupStore`] handed to [`LineupEngine::submit`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    cli::types::{ManagerName, WeekKey},
    error::LeagueError,
    lineup::slots::{LineupRules, SlotLabel},
    pool::{Player, PlayerFilter, PlayerPool},
    storage::{LineupStore, SubmittedLineup},
    Result,
};

/// Slot → player assignments. Unassigned slots are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineup {
    slots: BTreeMap<SlotLabel, Player>,
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotLabel) -> Option<&Player> {
        self.slots.get(&slot)
    }

    /// Assignments in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotLabel, &Player)> {
        self.slots.iter().map(|(slot, player)| (*slot, player))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot a player currently occupies, if any.
    pub fn slot_of(&self, name: &str) -> Option<SlotLabel> {
        self.slots
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(slot, _)| *slot)
    }

    /// Sum of assigned salaries; empty slots contribute nothing.
    ///
    /// Summed as `u64` so a sheet with absurd salaries cannot overflow.
    pub fn total_salary(&self) -> u64 {
        self.slots.values().map(|p| u64::from(p.salary)).sum()
    }

    pub fn projected_points(&self) -> f64 {
        crate::pool::round2(self.slots.values().map(|p| p.fppg).sum())
    }

    /// Slot → player name, the shape lineups are compared and stored by.
    pub fn names(&self) -> BTreeMap<SlotLabel, &str> {
        self.slots
            .iter()
            .map(|(slot, p)| (*slot, p.name.as_str()))
            .collect()
    }

    pub(crate) fn insert(&mut self, slot: SlotLabel, player: Player) {
        self.slots.insert(slot, player);
    }

    pub(crate) fn clear(&mut self, slot: SlotLabel) -> Option<Player> {
        self.slots.remove(&slot)
    }
}

impl FromIterator<(SlotLabel, Player)> for Lineup {
    fn from_iter<I: IntoIterator<Item = (SlotLabel, Player)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// Builds and validates lineups under one set of [`LineupRules`].
#[derive(Debug, Clone, Default)]
pub struct LineupEngine {
    rules: LineupRules,
}

impl LineupEngine {
    pub fn new(rules: LineupRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LineupRules {
        &self.rules
    }

    /// Required slots in display order.
    pub fn slots(&self) -> Vec<SlotLabel> {
        self.rules.roster.labels()
    }

    fn check_slot(&self, slot: SlotLabel) -> Result<()> {
        if self.rules.roster.contains(slot) {
            Ok(())
        } else {
            Err(LeagueError::UnknownSlot {
                slot: slot.to_string(),
            })
        }
    }

    /// Options for one slot's dropdown.
    ///
    /// Players in a different slot of `lineup` are left out. This slot's own
    /// occupant is always offered, even when `filter` or eligibility would
    /// exclude it, so the current pick never disappears from its own list.
    pub fn eligible_players<'a>(
        &self,
        slot: SlotLabel,
        pool: &'a PlayerPool,
        filter: &PlayerFilter,
        lineup: &'a Lineup,
    ) -> Result<Vec<&'a Player>> {
        self.check_slot(slot)?;

        let mut options: Vec<&Player> = pool
            .players()
            .iter()
            .filter(|p| slot.accepts(p.position) && filter.matches(p))
            .filter(|p| lineup.slot_of(&p.name).map_or(true, |used| used == slot))
            .collect();

        if let Some(current) = lineup.get(slot) {
            if !options.iter().any(|p| p.name == current.name) {
                options.push(current);
            }
        }

        Ok(options)
    }

    /// Put `player` in `slot`, or clear the slot when `player` is `None`.
    ///
    /// Fails without touching `lineup` if the player's position does not fit
    /// the slot or the player already sits in another slot.
    pub fn assign(&self, lineup: &mut Lineup, slot: SlotLabel, player: Option<Player>) -> Result<()> {
        self.check_slot(slot)?;

        let Some(player) = player else {
            if let Some(old) = lineup.clear(slot) {
                debug!("cleared {} (was {})", slot, old.name);
            }
            return Ok(());
        };

        if !slot.accepts(player.position) {
            return Err(LeagueError::InvalidSlotAssignment {
                slot: slot.to_string(),
                player: player.name,
                position: player.position.to_string(),
            });
        }

        if let Some(existing) = lineup.slot_of(&player.name) {
            if existing != slot {
                return Err(LeagueError::DuplicatePlayer {
                    player: player.name,
                    existing_slot: existing.to_string(),
                });
            }
        }

        debug!("{} -> {}", slot, player.name);
        lineup.insert(slot, player);
        Ok(())
    }

    pub fn total_salary(&self, lineup: &Lineup) -> u64 {
        lineup.total_salary()
    }

    /// Cap minus total salary; negative when over the cap.
    pub fn remaining_salary(&self, lineup: &Lineup) -> i64 {
        let total = i64::try_from(lineup.total_salary()).unwrap_or(i64::MAX);
        i64::from(self.rules.salary_cap).saturating_sub(total)
    }

    pub fn is_cap_satisfied(&self, lineup: &Lineup) -> bool {
        lineup.total_salary() <= u64::from(self.rules.salary_cap)
    }

    pub fn missing_slots(&self, lineup: &Lineup) -> Vec<SlotLabel> {
        self.slots()
            .into_iter()
            .filter(|slot| lineup.get(*slot).is_none())
            .collect()
    }

    pub fn is_complete(&self, lineup: &Lineup) -> bool {
        self.missing_slots(lineup).is_empty()
    }

    /// Everything a lineup must satisfy to be saved.
    ///
    /// Slot eligibility and uniqueness are re-checked here because a lineup
    /// can be built without going through [`assign`](Self::assign).
    pub fn validate_for_submit(&self, lineup: &Lineup) -> Result<()> {
        let mut seen: BTreeMap<&str, SlotLabel> = BTreeMap::new();
        for (slot, player) in lineup.iter() {
            self.check_slot(slot)?;
            if !slot.accepts(player.position) {
                return Err(LeagueError::InvalidSlotAssignment {
                    slot: slot.to_string(),
                    player: player.name.clone(),
                    position: player.position.to_string(),
                });
            }
            if let Some(first) = seen.insert(player.name.as_str(), slot) {
                return Err(LeagueError::DuplicatePlayer {
                    player: player.name.clone(),
                    existing_slot: first.to_string(),
                });
            }
        }

        if !self.is_cap_satisfied(lineup) {
            return Err(LeagueError::CapExceeded {
                total: lineup.total_salary(),
                cap: self.rules.salary_cap,
            });
        }

        if self.rules.require_complete {
            let missing = self.missing_slots(lineup).len();
            if missing > 0 {
                return Err(LeagueError::IncompleteLineup { missing });
            }
        }

        Ok(())
    }

    /// Lock `lineup` in for `manager` and `week`.
    ///
    /// A lineup already stored for the pair wins: the call fails with
    /// [`LeagueError::AlreadySubmitted`] and the stored record is untouched,
    /// including when another writer got there between our check and our
    /// write.
    pub fn submit<S: LineupStore + ?Sized>(
        &self,
        store: &S,
        manager: &ManagerName,
        week: WeekKey,
        lineup: &Lineup,
    ) -> Result<SubmittedLineup> {
        let already_submitted = || LeagueError::AlreadySubmitted {
            manager: manager.clone(),
            week,
        };

        if store.load_one(manager, week)?.is_some() {
            return Err(already_submitted());
        }

        self.validate_for_submit(lineup)?;

        match store.save(manager, week, lineup) {
            Ok(record) => {
                info!(
                    "{} submitted {} player(s) for {} (${})",
                    manager,
                    lineup.len(),
                    week,
                    lineup.total_salary()
                );
                Ok(record)
            }
            Err(LeagueError::Conflict { .. }) => Err(already_submitted()),
            Err(e) => Err(e),
        }
    }
}
