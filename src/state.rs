//! Battle state: both teams, the log and the turn flags.
//!
//! A combatant keeps its base form untouched for the whole battle. Whatever it
//! currently looks like is derived from that base form and its
//! [`Transformation`], so reverting a form never needs a backup copy.

use crate::battle_logger::BattleLog;
use crate::model::{Mechanic, Move, Stats};
use serde::Serialize;

pub const BATTLE_LEVEL: u8 = 50;
pub const MAX_ROSTER: usize = 6;
pub const MAX_MOVES: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn trainer(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Form {
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Stats,
    pub moves: Vec<Move>,
}

/// Resolved Mega/Gigantamax override. `None` fields fall through to the base form.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormOverride {
    pub name: Option<String>,
    pub sprite: Option<String>,
    pub types: Option<Vec<String>>,
    pub stats: Option<Stats>,
    pub moves: Option<Vec<Move>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Transformation {
    Normal,
    Mega(FormOverride),
    Gigantamax { turns_left: u8, form: FormOverride },
    Terastallized { tera_type: String },
}

impl Transformation {
    pub fn mechanic(&self) -> Option<Mechanic> {
        match self {
            Transformation::Normal => None,
            Transformation::Mega(_) => Some(Mechanic::Mega),
            Transformation::Gigantamax { .. } => Some(Mechanic::Gigantamax),
            Transformation::Terastallized { .. } => Some(Mechanic::Terastallize),
        }
    }

    pub fn is_gigantamax(&self) -> bool {
        matches!(self, Transformation::Gigantamax { .. })
    }

    fn form_override(&self) -> Option<&FormOverride> {
        match self {
            Transformation::Mega(form) | Transformation::Gigantamax { form, .. } => Some(form),
            Transformation::Normal | Transformation::Terastallized { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattlePokemon {
    base: Form,
    pub level: u8,
    pub current_hp: u32,
    pub max_hp: u32,
    pub transformation: Transformation,
    pub has_used_mechanic: bool,
    pub charging_move: Option<String>,
    /// Tera type chosen in the roster, if any.
    pub tera_type: Option<String>,
}

impl BattlePokemon {
    pub fn new(base: Form, tera_type: Option<String>) -> Self {
        let hp = base.stats.hp.max(1);
        Self {
            base,
            level: BATTLE_LEVEL,
            current_hp: hp,
            max_hp: hp,
            transformation: Transformation::Normal,
            has_used_mechanic: false,
            charging_move: None,
            tera_type,
        }
    }

    pub fn base(&self) -> &Form {
        &self.base
    }

    pub fn name(&self) -> &str {
        self.transformation
            .form_override()
            .and_then(|o| o.name.as_deref())
            .unwrap_or(self.base.name.as_str())
    }

    pub fn sprite(&self) -> Option<&str> {
        self.transformation
            .form_override()
            .and_then(|o| o.sprite.as_deref())
            .or(self.base.sprite.as_deref())
    }

    pub fn types(&self) -> &[String] {
        match &self.transformation {
            Transformation::Terastallized { tera_type } => std::slice::from_ref(tera_type),
            other => other
                .form_override()
                .and_then(|o| o.types.as_deref())
                .unwrap_or(self.base.types.as_slice()),
        }
    }

    pub fn stats(&self) -> &Stats {
        self.transformation
            .form_override()
            .and_then(|o| o.stats.as_ref())
            .unwrap_or(&self.base.stats)
    }

    pub fn moves(&self) -> &[Move] {
        self.transformation
            .form_override()
            .and_then(|o| o.moves.as_deref())
            .unwrap_or(self.base.moves.as_slice())
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp.saturating_sub(self.current_hp)
    }

    pub fn with_hp(&self, hp: u32) -> Self {
        Self {
            current_hp: hp.min(self.max_hp),
            ..self.clone()
        }
    }

    pub fn tera_target(&self) -> String {
        self.tera_type
            .clone()
            .or_else(|| self.base.types.first().cloned())
            .unwrap_or_else(|| "normal".to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MechanicUsage {
    pub mega: bool,
    pub gigantamax: bool,
    pub terastallize: bool,
}

impl MechanicUsage {
    pub fn is_used(&self, mechanic: Mechanic) -> bool {
        match mechanic {
            Mechanic::Mega => self.mega,
            Mechanic::Gigantamax => self.gigantamax,
            Mechanic::Terastallize => self.terastallize,
        }
    }

    pub fn mark(&mut self, mechanic: Mechanic) {
        match mechanic {
            Mechanic::Mega => self.mega = true,
            Mechanic::Gigantamax => self.gigantamax = true,
            Mechanic::Terastallize => self.terastallize = true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub roster: Vec<BattlePokemon>,
    pub active: usize,
    pub mechanics: MechanicUsage,
    /// Scripted mechanic for the final roster member.
    pub ace_mechanic: Option<Mechanic>,
    pub ace_triggered: bool,
}

impl Team {
    pub fn new(roster: Vec<BattlePokemon>) -> Self {
        Self {
            roster,
            active: 0,
            mechanics: MechanicUsage::default(),
            ace_mechanic: None,
            ace_triggered: false,
        }
    }

    pub fn active(&self) -> &BattlePokemon {
        &self.roster[self.active]
    }

    pub fn is_wiped(&self) -> bool {
        self.roster.iter().all(BattlePokemon::is_fainted)
    }

    /// First living member after the active slot, wrapping around.
    pub fn next_living(&self) -> Option<usize> {
        let len = self.roster.len();
        (1..len)
            .map(|offset| (self.active + offset) % len)
            .find(|&idx| !self.roster[idx].is_fainted())
    }

    pub fn is_last_member_active(&self) -> bool {
        self.active + 1 == self.roster.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleState {
    pub player: Team,
    pub enemy: Team,
    pub log: BattleLog,
    pub turn: u32,
    pub is_player_turn: bool,
    pub must_switch: bool,
    pub winner: Option<Side>,
    pub attacking_side: Option<Side>,
}

impl BattleState {
    pub fn new(player: Team, enemy: Team) -> Self {
        Self {
            player,
            enemy,
            log: BattleLog::new(),
            turn: 0,
            is_player_turn: true,
            must_switch: false,
            winner: None,
            attacking_side: None,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn active(&self, side: Side) -> &BattlePokemon {
        self.team(side).active()
    }

    pub fn active_index(&self, side: Side) -> usize {
        self.team(side).active
    }

    pub fn replace_active(&mut self, side: Side, pokemon: BattlePokemon) {
        let team = self.team_mut(side);
        let idx = team.active;
        team.roster[idx] = pokemon;
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
