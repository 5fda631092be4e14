//! Rosters and the per-GameWeek booster state machine

use crate::config::RosterRules;
use crate::error::{Result, RosterError, ScoringError};
use crate::models::{RosterId, StatsByPlayer};
use player_registry::{PlayerId, PlayerRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Consumable selected by the user for one GameWeek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoosterSpec", into = "BoosterSpec")]
pub enum Booster {
    /// Raises the captain's total multiplier
    DoubleImpact,
    /// Team-wide multiplier after the exclusive bonus
    GoldenGame,
    /// Resets one player's fatigue to full for this pass
    RecoveryBoost { target: PlayerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterKind {
    DoubleImpact,
    GoldenGame,
    RecoveryBoost,
}

/// Wire form of a booster: a kind plus an optional target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoosterSpec {
    pub kind: BoosterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PlayerId>,
}

impl TryFrom<BoosterSpec> for Booster {
    type Error = RosterError;

    fn try_from(spec: BoosterSpec) -> std::result::Result<Self, Self::Error> {
        match (spec.kind, spec.target) {
            (BoosterKind::DoubleImpact, _) => Ok(Booster::DoubleImpact),
            (BoosterKind::GoldenGame, _) => Ok(Booster::GoldenGame),
            (BoosterKind::RecoveryBoost, Some(target)) => Ok(Booster::RecoveryBoost { target }),
            (BoosterKind::RecoveryBoost, None) => Err(RosterError::RecoveryBoostUnbound),
        }
    }
}

impl From<Booster> for BoosterSpec {
    fn from(booster: Booster) -> Self {
        match booster {
            Booster::DoubleImpact => BoosterSpec { kind: BoosterKind::DoubleImpact, target: None },
            Booster::GoldenGame => BoosterSpec { kind: BoosterKind::GoldenGame, target: None },
            Booster::RecoveryBoost { target } => {
                BoosterSpec { kind: BoosterKind::RecoveryBoost, target: Some(target) }
            }
        }
    }
}

impl Booster {
    /// The booster without its target
    pub fn kind(&self) -> BoosterKind {
        BoosterSpec::from(*self).kind
    }

    /// Target player of a Recovery Boost
    pub fn recovery_target(&self) -> Option<PlayerId> {
        match self {
            Booster::RecoveryBoost { target } => Some(*target),
            _ => None,
        }
    }
}

/// `none -> armed(kind) -> resolved`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterState {
    #[default]
    None,
    Armed(Booster),
    Resolved(Booster),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterPhase {
    /// Before the GameWeek deadline
    #[default]
    Editable,
    /// Scoring has begun
    Locked,
}

/// The single post-lock swap of a starter who did not play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub player_out: PlayerId,
    pub player_in: PlayerId,
}

/// One user's lineup for one GameWeek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: RosterId,
    pub game_week: u32,
    starters: Vec<PlayerId>,
    substitutes: Vec<PlayerId>,
    captain: PlayerId,
    #[serde(default)]
    booster: BoosterState,
    #[serde(default)]
    phase: RosterPhase,
    #[serde(default)]
    substitution: Option<Substitution>,
}

impl Roster {
    /// Create an editable roster with no booster
    pub fn new(
        roster_id: RosterId,
        game_week: u32,
        starters: Vec<PlayerId>,
        substitutes: Vec<PlayerId>,
        captain: PlayerId,
    ) -> Self {
        Self {
            roster_id,
            game_week,
            starters,
            substitutes,
            captain,
            booster: BoosterState::None,
            phase: RosterPhase::Editable,
            substitution: None,
        }
    }

    /// Starting lineup in slot order
    pub fn starters(&self) -> &[PlayerId] {
        &self.starters
    }

    pub fn substitutes(&self) -> &[PlayerId] {
        &self.substitutes
    }

    /// Current captain; follows a post-lock substitution
    pub fn captain(&self) -> PlayerId {
        self.captain
    }

    pub fn booster_state(&self) -> BoosterState {
        self.booster
    }

    pub fn phase(&self) -> RosterPhase {
        self.phase
    }

    /// The post-lock substitution, once made
    pub fn substitution(&self) -> Option<Substitution> {
        self.substitution
    }

    /// Whether the GameWeek deadline has passed
    pub fn is_locked(&self) -> bool {
        self.phase == RosterPhase::Locked
    }

    /// The booster in effect, armed or resolved
    pub fn active_booster(&self) -> Option<Booster> {
        match self.booster {
            BoosterState::None => None,
            BoosterState::Armed(b) | BoosterState::Resolved(b) => Some(b),
        }
    }

    /// Whether the player is in the starting lineup
    pub fn is_starter(&self, player_id: PlayerId) -> bool {
        self.starters.contains(&player_id)
    }

    pub fn is_substitute(&self, player_id: PlayerId) -> bool {
        self.substitutes.contains(&player_id)
    }

    /// Starter or substitute
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.is_starter(player_id) || self.is_substitute(player_id)
    }

    fn ensure_editable(&self) -> std::result::Result<(), RosterError> {
        if self.is_locked() {
            return Err(RosterError::RosterLocked);
        }
        Ok(())
    }

    /// Replace the lineup while the roster is still editable
    pub fn set_lineup(
        &mut self,
        starters: Vec<PlayerId>,
        substitutes: Vec<PlayerId>,
    ) -> std::result::Result<(), RosterError> {
        self.ensure_editable()?;
        self.starters = starters;
        self.substitutes = substitutes;
        Ok(())
    }

    /// Move the armband to another starter
    pub fn set_captain(&mut self, captain: PlayerId) -> std::result::Result<(), RosterError> {
        self.ensure_editable()?;
        if !self.is_starter(captain) {
            return Err(RosterError::CaptainNotStarter { captain });
        }
        self.captain = captain;
        Ok(())
    }

    /// Arm a booster. Re-selecting the armed booster is a no-op; a different one replaces it.
    pub fn select_booster(&mut self, booster: Booster) -> std::result::Result<(), RosterError> {
        if self.is_locked() {
            return Err(RosterError::BoosterLocked);
        }
        if let Some(target) = booster.recovery_target() {
            if !self.contains(target) {
                return Err(RosterError::RecoveryTargetNotInRoster { target });
            }
        }
        if self.booster == BoosterState::Armed(booster) {
            return Ok(());
        }
        self.booster = BoosterState::Armed(booster);
        Ok(())
    }

    /// Drop the armed booster while still editable
    pub fn clear_booster(&mut self) -> std::result::Result<(), RosterError> {
        if self.is_locked() {
            return Err(RosterError::BoosterLocked);
        }
        self.booster = BoosterState::None;
        Ok(())
    }

    /// Freeze the roster at the GameWeek deadline. Locking twice is a no-op.
    pub fn lock(&mut self) {
        if self.is_locked() {
            return;
        }
        self.phase = RosterPhase::Locked;
        if let BoosterState::Armed(booster) = self.booster {
            self.booster = BoosterState::Resolved(booster);
        }
        info!("Roster {} locked for GameWeek {}", self.roster_id, self.game_week);
    }

    /// Swap a starter who did not play for a bench player.
    ///
    /// Allowed once, after lock. The incoming player takes the outgoing
    /// player's slot and, if needed, the captaincy.
    pub fn substitute(
        &mut self,
        player_out: PlayerId,
        player_in: PlayerId,
        stats: &StatsByPlayer,
    ) -> Result<()> {
        if !self.is_locked() {
            return Err(RosterError::SubstitutionNotAllowed.into());
        }
        if self.substitution.is_some() {
            return Err(RosterError::SubstitutionAlreadyUsed.into());
        }
        let slot = self
            .starters
            .iter()
            .position(|id| *id == player_out)
            .ok_or(RosterError::NotAStarter { player_id: player_out })?;
        let bench_slot = self
            .substitutes
            .iter()
            .position(|id| *id == player_in)
            .ok_or(RosterError::SubstituteNotOnBench { player_id: player_in })?;

        let record =
            stats.get(&player_out).ok_or(ScoringError::MissingStats { player_id: player_out })?;
        if record.played() {
            return Err(RosterError::StarterPlayed {
                player_id: player_out,
                minutes: record.minutes_played,
            }
            .into());
        }

        self.starters[slot] = player_in;
        self.substitutes[bench_slot] = player_out;
        if self.captain == player_out {
            self.captain = player_in;
        }
        self.substitution = Some(Substitution { player_out, player_in });

        info!(
            "Roster {}: substituted {} for {} in GameWeek {}",
            self.roster_id, player_in, player_out, self.game_week
        );
        Ok(())
    }

    /// Check the roster's shape and references before scoring
    pub fn validate(&self, registry: &PlayerRegistry, rules: &RosterRules) -> Result<()> {
        if self.starters.len() > rules.max_starters {
            return Err(RosterError::TooManyStarters {
                count: self.starters.len(),
                max: rules.max_starters,
            }
            .into());
        }
        if self.substitutes.len() > rules.max_substitutes {
            return Err(RosterError::TooManySubstitutes {
                count: self.substitutes.len(),
                max: rules.max_substitutes,
            }
            .into());
        }

        let mut seen_starters = HashSet::new();
        for &player_id in &self.starters {
            if !seen_starters.insert(player_id) {
                return Err(RosterError::DuplicatePlayer { player_id }.into());
            }
        }
        let mut seen_subs = HashSet::new();
        for &player_id in &self.substitutes {
            if seen_starters.contains(&player_id) {
                return Err(RosterError::PlayerInBothLists { player_id }.into());
            }
            if !seen_subs.insert(player_id) {
                return Err(RosterError::DuplicatePlayer { player_id }.into());
            }
        }

        if !self.starters.is_empty() && !self.is_starter(self.captain) {
            return Err(RosterError::CaptainNotStarter { captain: self.captain }.into());
        }

        for &player_id in self.starters.iter().chain(&self.substitutes) {
            registry.get(player_id)?;
        }

        if let Some(target) = self.active_booster().and_then(|b| b.recovery_target()) {
            if !self.contains(target) {
                return Err(RosterError::RecoveryTargetNotInRoster { target }.into());
            }
            if rules.recovery_target_must_start && !self.is_starter(target) {
                return Err(RosterError::RecoveryTargetNotStarter { target }.into());
            }
        }

        Ok(())
    }
}
