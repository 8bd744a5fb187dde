//! Turn orchestration.
//!
//! A [`Battle`] owns the current [`BattleState`] behind an `Arc` and never
//! mutates it in place: every phase builds a new state, swaps it in and
//! records a [`Frame`]. Callers get the frames back and decide how to pace
//! them.

use crate::ai::{BattleAI, GreedyAI};
use crate::damage::{calculate_damage, DamageResult};
use crate::dex::{DataSource, HpModifier, HpModifierKind};
use crate::error::SetupError;
use crate::model::{Mechanic, Move, RosterEntry};
use crate::state::{BattlePokemon, BattleState, Form, Side, Team, MAX_MOVES, MAX_ROSTER};
use crate::transform::{apply_mechanic, decay_end_of_turn, revert_gigantamax};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleOptions {
    pub seed: u64,
    /// Mechanic the enemy ace uses instead of the AI's choice.
    pub ace_mechanic: Option<Mechanic>,
}

/// A player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    UseMove {
        index: usize,
        mechanic: Option<Mechanic>,
    },
    Switch {
        index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    TurnStart,
    EnemyMechanic,
    PlayerMechanic,
    Attack(Side),
    Flinch(Side),
    Faint,
    EndTurn,
    Switch,
    EnemyReply,
}

/// A committed state and the phase that produced it.
#[derive(Clone, Debug)]
pub struct Frame {
    pub phase: Phase,
    pub state: Arc<BattleState>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttackOutcome {
    Continue,
    Flinched,
    EndedEarly,
}

/// Result of resolving every hit of one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitResolution {
    pub total_damage: u32,
    pub hits: u32,
    pub first: Option<DamageResult>,
    pub remaining_hp: u32,
}

pub struct Battle {
    state: Arc<BattleState>,
    dex: Arc<dyn DataSource>,
    ai: Box<dyn BattleAI>,
    rng: SmallRng,
}

impl Battle {
    pub fn setup(
        player: &[RosterEntry],
        enemy: &[RosterEntry],
        options: BattleOptions,
        dex: Arc<dyn DataSource>,
    ) -> Result<Self, SetupError> {
        let player_team = build_team(Side::Player, player, dex.as_ref())?;
        let mut enemy_team = build_team(Side::Enemy, enemy, dex.as_ref())?;
        enemy_team.ace_mechanic = options.ace_mechanic;

        let mut state = BattleState::new(player_team, enemy_team);
        for side in [Side::Player, Side::Enemy] {
            let name = state.active(side).name().to_string();
            state.log.log_send_out(side.trainer(), &name);
        }
        debug!(
            seed = options.seed,
            player = player.len(),
            enemy = enemy.len(),
            "battle set up"
        );
        Ok(Self::from_state(state, dex, options.seed))
    }

    fn from_state(state: BattleState, dex: Arc<dyn DataSource>, seed: u64) -> Self {
        Self {
            state: Arc::new(state),
            dex,
            ai: Box::new(GreedyAI),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn with_ai(mut self, ai: Box<dyn BattleAI>) -> Self {
        self.ai = ai;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<BattleState> {
        Arc::clone(&self.state)
    }

    /// Move slot the AI would pick for the player's active combatant.
    pub fn suggest_move(&mut self) -> usize {
        let attacker = self.state.active(Side::Player);
        let defender = self.state.active(Side::Enemy);
        let picked = self.ai.pick_move(attacker, defender, &mut self.rng);
        attacker
            .moves()
            .iter()
            .position(|mv| mv.name == picked.name)
            .unwrap_or(0)
    }

    /// Apply one player command. Invalid commands produce no frames.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Frame> {
        match intent {
            Intent::UseMove { index, mechanic } => self.execute_turn(index, mechanic),
            Intent::Switch { index } => self.switch_pokemon(index),
        }
    }

    pub fn execute_turn(&mut self, move_index: usize, mechanic: Option<Mechanic>) -> Vec<Frame> {
        let mut frames = Vec::new();
        {
            let state = &self.state;
            if state.is_over() || state.must_switch || !state.is_player_turn {
                debug!(move_index, "turn ignored: not accepting moves");
                return frames;
            }
            if move_index >= state.active(Side::Player).moves().len() {
                debug!(move_index, "turn ignored: no such move");
                return frames;
            }
        }

        let mut next = (*self.state).clone();
        next.turn += 1;
        next.is_player_turn = false;
        next.log.log_turn(next.turn);
        debug!(turn = next.turn, "turn started");
        self.commit(next, Phase::TurnStart, &mut frames);

        self.enemy_pre_turn(&mut frames);

        if let Some(mechanic) = mechanic {
            match apply_mechanic(&self.state, Side::Player, mechanic, self.dex.as_ref()) {
                Some(next) => self.commit(next, Phase::PlayerMechanic, &mut frames),
                None => debug!(?mechanic, "player mechanic unavailable"),
            }
        }

        let player_move = self.player_move(move_index);
        let enemy_move = self.enemy_move(self.state.active(Side::Player).clone());
        let first = self.first_mover(&player_move, &enemy_move);
        let (first_move, second_move) = match first {
            Side::Player => (player_move, enemy_move),
            Side::Enemy => (enemy_move, player_move),
        };
        let second = first.opponent();

        match self.attack(first, &first_move, true, &mut frames) {
            AttackOutcome::Continue => {
                self.attack(second, &second_move, false, &mut frames);
            }
            AttackOutcome::Flinched => {
                let mut next = (*self.state).clone();
                let name = next.active(second).name().to_string();
                next.log.push(format!("{name} flinched and couldn't move!"));
                self.commit(next, Phase::Flinch(second), &mut frames);
            }
            AttackOutcome::EndedEarly => {}
        }

        self.end_turn(&mut frames);
        frames
    }

    pub fn switch_pokemon(&mut self, index: usize) -> Vec<Frame> {
        let mut frames = Vec::new();
        let state = Arc::clone(&self.state);
        let team = &state.player;
        if state.is_over()
            || index >= team.roster.len()
            || team.roster[index].is_fainted()
            || index == team.active
        {
            debug!(index, "switch ignored");
            return frames;
        }

        if state.must_switch {
            let mut next = switched(&state, index);
            next.must_switch = false;
            next.is_player_turn = true;
            self.commit(next, Phase::Switch, &mut frames);
            return frames;
        }
        if !state.is_player_turn {
            debug!(index, "switch ignored: not the player's turn");
            return frames;
        }

        // the enemy commits to its move before seeing the newcomer
        let enemy_move = self.enemy_move(state.active(Side::Player).clone());
        let mut next = switched(&state, index);
        next.is_player_turn = false;
        self.commit(next, Phase::Switch, &mut frames);

        self.perform_enemy_turn(&enemy_move, &mut frames);
        frames
    }

    fn commit(&mut self, next: BattleState, phase: Phase, frames: &mut Vec<Frame>) {
        self.state = Arc::new(next);
        frames.push(Frame {
            phase,
            state: Arc::clone(&self.state),
        });
    }

    /// Scripted mechanic for the enemy's last roster member, once per battle.
    fn enemy_pre_turn(&mut self, frames: &mut Vec<Frame>) {
        let team = &self.state.enemy;
        if team.ace_triggered || !team.is_last_member_active() || self.state.is_over() {
            return;
        }
        let dex = Arc::clone(&self.dex);
        let applied = self
            .ai
            .pick_mechanic(&self.state, Side::Enemy, dex.as_ref())
            .and_then(|mechanic| apply_mechanic(&self.state, Side::Enemy, mechanic, dex.as_ref()));
        match applied {
            Some(mut next) => {
                next.enemy.ace_triggered = true;
                self.commit(next, Phase::EnemyMechanic, frames);
            }
            None => {
                let mut next = (*self.state).clone();
                next.enemy.ace_triggered = true;
                self.state = Arc::new(next);
            }
        }
    }

    fn player_move(&self, index: usize) -> Move {
        let active = self.state.active(Side::Player);
        if let Some(pending) = pending_move(active, self.dex.as_ref()) {
            return pending;
        }
        active.moves().get(index).cloned().unwrap_or_else(|| {
            warn!(index, pokemon = %active.name(), "move slot vanished, using fallback");
            Move::fallback("Struggle")
        })
    }

    fn enemy_move(&mut self, target: BattlePokemon) -> Move {
        let active = self.state.active(Side::Enemy);
        if let Some(pending) = pending_move(active, self.dex.as_ref()) {
            return pending;
        }
        self.ai.pick_move(active, &target, &mut self.rng)
    }

    fn first_mover(&mut self, player_move: &Move, enemy_move: &Move) -> Side {
        let player_speed = self.state.active(Side::Player).stats().speed;
        let enemy_speed = self.state.active(Side::Enemy).stats().speed;
        let order = enemy_move
            .priority
            .cmp(&player_move.priority)
            .then_with(|| enemy_speed.cmp(&player_speed));
        match order {
            std::cmp::Ordering::Less => Side::Player,
            std::cmp::Ordering::Greater => Side::Enemy,
            std::cmp::Ordering::Equal => {
                if self.rng.gen_bool(0.5) {
                    Side::Player
                } else {
                    Side::Enemy
                }
            }
        }
    }

    fn attack(
        &mut self,
        side: Side,
        move_def: &Move,
        moves_first: bool,
        frames: &mut Vec<Frame>,
    ) -> AttackOutcome {
        let dex = Arc::clone(&self.dex);
        let target_side = side.opponent();
        let mut next = (*self.state).clone();
        let mut attacker = next.active(side).clone();
        if attacker.is_fainted() {
            return AttackOutcome::Continue;
        }
        let mut defender = next.active(target_side).clone();
        next.attacking_side = Some(side);
        next.log.log_move(attacker.name(), &move_def.name);

        if let Some(message) = dex.charge_message(&move_def.name) {
            if attacker.charging_move.as_deref() != Some(move_def.name.as_str()) {
                next.log.push(format!("{} {message}", attacker.name()));
                attacker.charging_move = Some(move_def.name.clone());
                debug!(?side, move_name = %move_def.name, "charging");
                next.replace_active(side, attacker);
                self.commit(next, Phase::Attack(side), frames);
                return AttackOutcome::EndedEarly;
            }
            attacker.charging_move = None;
        }

        let auto_hit = attacker.transformation.is_gigantamax() && !move_def.is_status();
        if !auto_hit && !roll_accuracy(move_def, &mut self.rng) {
            next.log.log_miss(attacker.name());
            next.replace_active(side, attacker);
            self.commit(next, Phase::Attack(side), frames);
            return AttackOutcome::Continue;
        }
        if move_def.is_status() {
            next.log.push("But nothing happened!");
            next.replace_active(side, attacker);
            self.commit(next, Phase::Attack(side), frames);
            return AttackOutcome::Continue;
        }

        let planned = roll_hit_count(dex.multi_hit(&move_def.name), &mut self.rng);
        let strike = resolve_hits(&attacker, &defender, move_def, planned, &mut self.rng);
        defender = defender.with_hp(strike.remaining_hp);
        if let Some(first) = strike.first {
            if first.is_critical {
                next.log.log_critical();
            }
            next.log.log_effectiveness(first.effectiveness);
        }
        if planned > 1 {
            next.log.log_hits(strike.hits);
        }
        next.log.log_damage(
            defender.name(),
            strike.total_damage,
            defender.current_hp,
            defender.max_hp,
        );

        if let Some(modifier) = dex.hp_modifier(&move_def.name) {
            let amount = hp_modifier_amount(modifier, strike.total_damage, &attacker);
            if modifier.kind == HpModifierKind::Drain {
                let healed = amount.min(attacker.missing_hp());
                if healed > 0 {
                    attacker = attacker.with_hp(attacker.current_hp + healed);
                    next.log.log_heal(attacker.name(), healed);
                }
            } else {
                let lost = amount.min(attacker.current_hp);
                if lost > 0 {
                    attacker = attacker.with_hp(attacker.current_hp - lost);
                    next.log.log_recoil(attacker.name(), lost);
                }
            }
        }

        let flinched = moves_first
            && strike.total_damage > 0
            && !defender.is_fainted()
            && dex
                .flinch_chance(&move_def.name)
                .is_some_and(|chance| self.rng.gen_range(0..100) < chance);

        next.replace_active(side, attacker);
        next.replace_active(target_side, defender);
        self.commit(next, Phase::Attack(side), frames);

        if self.resolve_faints(target_side, frames) {
            return AttackOutcome::EndedEarly;
        }
        if flinched {
            AttackOutcome::Flinched
        } else {
            AttackOutcome::Continue
        }
    }

    /// Faint checks after an attack, `first` side first. True if anyone fainted.
    fn resolve_faints(&mut self, first: Side, frames: &mut Vec<Frame>) -> bool {
        let mut next = (*self.state).clone();
        let mut fainted = false;
        for side in [first, first.opponent()] {
            if next.is_over() {
                break;
            }
            fainted |= handle_faint(&mut next, side);
        }
        if fainted {
            self.commit(next, Phase::Faint, frames);
        }
        fainted
    }

    fn end_turn(&mut self, frames: &mut Vec<Frame>) {
        let mut next = if self.state.is_over() {
            (*self.state).clone()
        } else {
            decay_end_of_turn(&self.state)
        };
        next.attacking_side = None;
        next.is_player_turn = next.winner.is_none() && !next.must_switch;
        debug!(
            turn = next.turn,
            must_switch = next.must_switch,
            winner = ?next.winner,
            "turn ended"
        );
        self.commit(next, Phase::EndTurn, frames);
    }

    /// Single-hit enemy reply after a voluntary switch. No multi-hit, HP
    /// modifiers or charge turn on this path.
    fn perform_enemy_turn(&mut self, move_def: &Move, frames: &mut Vec<Frame>) {
        let mut next = (*self.state).clone();
        let mut attacker = next.active(Side::Enemy).clone();
        if next.is_over() || attacker.is_fainted() {
            next.is_player_turn = !next.is_over();
            self.commit(next, Phase::EnemyReply, frames);
            return;
        }
        let mut defender = next.active(Side::Player).clone();
        next.attacking_side = Some(Side::Enemy);
        next.log.log_move(attacker.name(), &move_def.name);
        if attacker.charging_move.as_deref() == Some(move_def.name.as_str()) {
            attacker.charging_move = None;
        }

        let auto_hit = attacker.transformation.is_gigantamax() && !move_def.is_status();
        if !auto_hit && !roll_accuracy(move_def, &mut self.rng) {
            next.log.log_miss(attacker.name());
        } else if move_def.is_status() {
            next.log.push("But nothing happened!");
        } else {
            let result = calculate_damage(&attacker, &defender, move_def, &mut self.rng);
            defender = defender.with_hp(defender.current_hp.saturating_sub(result.damage));
            if result.is_critical {
                next.log.log_critical();
            }
            next.log.log_effectiveness(result.effectiveness);
            next.log.log_damage(
                defender.name(),
                result.damage,
                defender.current_hp,
                defender.max_hp,
            );
        }
        next.replace_active(Side::Enemy, attacker);
        next.replace_active(Side::Player, defender);
        handle_faint(&mut next, Side::Player);
        next.attacking_side = None;
        next.is_player_turn = next.winner.is_none() && !next.must_switch;
        self.commit(next, Phase::EnemyReply, frames);
    }
}

fn build_team(side: Side, entries: &[RosterEntry], dex: &dyn DataSource) -> Result<Team, SetupError> {
    let label = side.trainer();
    if entries.is_empty() {
        return Err(SetupError::EmptyRoster { side: label });
    }
    if entries.len() > MAX_ROSTER {
        return Err(SetupError::RosterTooLarge {
            side: label,
            count: entries.len(),
            max: MAX_ROSTER,
        });
    }
    let roster = entries
        .iter()
        .map(|entry| build_pokemon(entry, dex))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Team::new(roster))
}

fn build_pokemon(entry: &RosterEntry, dex: &dyn DataSource) -> Result<BattlePokemon, SetupError> {
    if entry.moves.len() > MAX_MOVES {
        return Err(SetupError::TooManyMoves {
            name: entry.name.clone(),
            count: entry.moves.len(),
            max: MAX_MOVES,
        });
    }
    let mut moves: Vec<Move> = entry
        .moves
        .iter()
        .map(|name| {
            dex.resolve_move(name).unwrap_or_else(|| {
                warn!(move_name = %name, pokemon = %entry.name, "unknown move, using fallback");
                Move::fallback(name)
            })
        })
        .collect();
    if moves.is_empty() {
        warn!(pokemon = %entry.name, "no moves listed, using fallback");
        moves.push(Move::fallback("Struggle"));
    }
    let base = Form {
        name: entry.name.clone(),
        sprite: entry.sprite.clone(),
        types: entry.types.iter().map(|t| t.to_ascii_lowercase()).collect(),
        stats: entry.stats,
        moves,
    };
    Ok(BattlePokemon::new(base, entry.tera_type.clone()))
}

/// The move a charging combatant is locked into, if any.
fn pending_move(pokemon: &BattlePokemon, dex: &dyn DataSource) -> Option<Move> {
    let name = pokemon.charging_move.as_deref()?;
    pokemon
        .moves()
        .iter()
        .find(|mv| mv.name == name)
        .cloned()
        .or_else(|| dex.resolve_move(name))
        .or_else(|| Some(Move::fallback(name)))
}

/// Switch the player's active slot, reverting Gigantamax and dropping any charge.
fn switched(state: &BattleState, index: usize) -> BattleState {
    let mut next = state.clone();
    let mut outgoing = revert_gigantamax(state.active(Side::Player));
    outgoing.charging_move = None;
    let outgoing_name = outgoing.name().to_string();
    let was_fainted = outgoing.is_fainted();
    next.replace_active(Side::Player, outgoing);
    next.player.active = index;
    if !was_fainted {
        next.log.push(format!("{outgoing_name}, come back!"));
    }
    let incoming = next.active(Side::Player).name().to_string();
    next.log.log_send_out(Side::Player.trainer(), &incoming);
    debug!(index, pokemon = %incoming, "switched in");
    next
}

/// Log a faint on `side` and advance or end the battle. True if the active had fainted.
fn handle_faint(state: &mut BattleState, side: Side) -> bool {
    let name = {
        let active = state.active(side);
        if !active.is_fainted() {
            return false;
        }
        active.name().to_string()
    };
    state.log.log_faint(&name);
    let mut fainted = revert_gigantamax(state.active(side));
    fainted.charging_move = None;
    state.replace_active(side, fainted);

    let next_index = state.team(side).next_living();
    match (side, next_index) {
        (Side::Enemy, Some(index)) => {
            state.enemy.active = index;
            let incoming = state.active(Side::Enemy).name().to_string();
            state.log.log_send_out(Side::Enemy.trainer(), &incoming);
        }
        (Side::Player, Some(_)) => {
            state.must_switch = true;
            state.log.push("Choose your next Pokémon!");
        }
        (_, None) => {
            let winner = side.opponent();
            state.winner = Some(winner);
            state.must_switch = false;
            state.log.log_win(winner.trainer());
            info!(?winner, turn = state.turn, "battle finished");
        }
    }
    true
}

fn roll_accuracy<R: Rng + ?Sized>(move_def: &Move, rng: &mut R) -> bool {
    if move_def.accuracy >= 100 {
        return true;
    }
    rng.gen_range(0..100) < move_def.accuracy
}

/// Number of hits from a weight table where index 0 means one hit.
pub fn roll_hit_count<R: Rng + ?Sized>(weights: Option<&[u32]>, rng: &mut R) -> u32 {
    let Some(weights) = weights else {
        return 1;
    };
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 1;
    }
    let mut roll = rng.gen_range(0..total);
    for (idx, &weight) in weights.iter().enumerate() {
        if roll < weight {
            return idx as u32 + 1;
        }
        roll -= weight;
    }
    1
}

/// Resolve up to `planned` hits. The first hit always lands; later hits stop
/// once the defender is at 0 HP.
pub fn resolve_hits<R: Rng + ?Sized>(
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_def: &Move,
    planned: u32,
    rng: &mut R,
) -> HitResolution {
    let mut remaining = defender.current_hp;
    let mut total_damage = 0u32;
    let mut hits = 0;
    let mut first = None;
    for hit in 0..planned.max(1) {
        if hit > 0 && remaining == 0 {
            break;
        }
        let result = calculate_damage(attacker, defender, move_def, rng);
        total_damage = total_damage.saturating_add(result.damage);
        remaining = remaining.saturating_sub(result.damage);
        hits += 1;
        first.get_or_insert(result);
    }
    HitResolution {
        total_damage,
        hits,
        first,
        remaining_hp: remaining,
    }
}

/// HP the attacker gains (drain) or loses (everything else) after dealing `total_damage`.
pub fn hp_modifier_amount(modifier: HpModifier, total_damage: u32, attacker: &BattlePokemon) -> u32 {
    match modifier.kind {
        HpModifierKind::Drain | HpModifierKind::Recoil => {
            if total_damage == 0 {
                return 0;
            }
            let amount = total_damage as u64 * modifier.percent as u64 / 100;
            (amount.max(1)).min(u32::MAX as u64) as u32
        }
        HpModifierKind::RecoilMax => {
            let amount = (attacker.max_hp as u64 * modifier.percent as u64).div_ceil(100);
            amount.min(u32::MAX as u64) as u32
        }
        HpModifierKind::Suicide => attacker.current_hp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use crate::model::{MoveCategory, Stats};
    use crate::state::{FormOverride, Transformation};

    fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> Stats {
        Stats {
            hp,
            attack,
            defense,
            sp_atk: 50,
            sp_def: 50,
            speed,
        }
    }

    fn mon(name: &str, hp: u32) -> BattlePokemon {
        BattlePokemon::new(
            Form {
                name: name.to_string(),
                sprite: None,
                types: vec!["normal".to_string()],
                stats: stats(hp, 100, 100, 50),
                moves: vec![Move::fallback("Tackle")],
            },
            None,
        )
    }

    #[test]
    fn missing_table_means_one_hit() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(roll_hit_count(None, &mut rng), 1);
        assert_eq!(roll_hit_count(Some(&[0, 0][..]), &mut rng), 1);
        assert_eq!(roll_hit_count(Some(&[0, 100][..]), &mut rng), 2);
    }

    #[test]
    fn lethal_first_hit_stops_the_volley() {
        let attacker = mon("Cloyster", 100);
        let defender = mon("Caterpie", 10);
        let mut rng = SmallRng::seed_from_u64(4);
        let bullet = Move {
            name: "Bullet Seed".to_string(),
            move_type: "grass".to_string(),
            category: MoveCategory::Physical,
            power: 25,
            accuracy: 100,
            priority: 0,
            pp: 30,
        };
        let strike = resolve_hits(&attacker, &defender, &bullet, 5, &mut rng);
        assert_eq!(strike.hits, 1);
        assert_eq!(strike.remaining_hp, 0);
        assert!(strike.total_damage >= 10);
    }

    #[test]
    fn fainted_defender_still_takes_the_first_hit() {
        let attacker = mon("Cloyster", 100);
        let defender = mon("Caterpie", 10).with_hp(0);
        let mut rng = SmallRng::seed_from_u64(4);
        let strike = resolve_hits(&attacker, &defender, &Move::fallback("Tackle"), 3, &mut rng);
        assert_eq!(strike.hits, 1);
        assert!(strike.first.is_some());
    }

    #[test]
    fn recoil_amounts() {
        let attacker = mon("Tauros", 100);
        let quarter = HpModifier::new(HpModifierKind::Recoil, 25);
        assert_eq!(hp_modifier_amount(quarter, 60, &attacker), 15);
        assert_eq!(hp_modifier_amount(quarter, 0, &attacker), 0);
        assert_eq!(hp_modifier_amount(quarter, 2, &attacker), 1);
        let half_max = HpModifier::new(HpModifierKind::RecoilMax, 50);
        assert_eq!(hp_modifier_amount(half_max, 0, &mon("Blacephalon", 51)), 26);
        let boom = HpModifier::new(HpModifierKind::Suicide, 100);
        assert_eq!(hp_modifier_amount(boom, 0, &attacker.with_hp(37)), 37);
    }

    #[test]
    fn setup_rejects_oversized_rosters() {
        let entry = RosterEntry {
            name: "Eevee".to_string(),
            types: vec!["normal".to_string()],
            stats: stats(55, 55, 50, 55),
            moves: vec!["Tackle".to_string()],
            tera_type: None,
            sprite: None,
        };
        let dex: Arc<dyn DataSource> = Arc::new(Dex::builtin());
        let seven = vec![entry.clone(); 7];
        let err = Battle::setup(&seven, &[entry.clone()], BattleOptions::default(), Arc::clone(&dex))
            .err()
            .expect("too many members");
        assert_eq!(
            err,
            SetupError::RosterTooLarge {
                side: "Player",
                count: 7,
                max: MAX_ROSTER
            }
        );
        let err = Battle::setup(&[entry], &[], BattleOptions::default(), dex)
            .err()
            .expect("empty enemy roster");
        assert_eq!(err, SetupError::EmptyRoster { side: "Enemy" });
    }

    fn gigantamaxed(pokemon: BattlePokemon) -> BattlePokemon {
        let mut giant = pokemon;
        giant.transformation = Transformation::Gigantamax {
            turns_left: 1,
            form: FormOverride {
                name: Some(format!("Gigantamax {}", giant.name())),
                ..FormOverride::default()
            },
        };
        giant.max_hp *= 2;
        giant
    }

    #[test]
    fn fainted_gigantamax_reverts_before_the_next_member_comes_out() {
        let mut state = BattleState::new(
            Team::new(vec![mon("Pidgey", 40)]),
            Team::new(vec![gigantamaxed(mon("Snorlax", 160)).with_hp(0), mon("Onix", 35)]),
        );
        assert!(handle_faint(&mut state, Side::Enemy));
        let fallen = &state.enemy.roster[0];
        assert_eq!(fallen.transformation, Transformation::Normal);
        assert_eq!(fallen.max_hp, 160);
        assert_eq!(fallen.name(), "Snorlax");
        assert!(state.log.contains("Gigantamax Snorlax fainted!"));
        assert_eq!(state.active_index(Side::Enemy), 1);
    }

    #[test]
    fn fainted_gigantamax_player_does_not_decay_while_waiting_to_switch() {
        let mut state = BattleState::new(
            Team::new(vec![gigantamaxed(mon("Snorlax", 160)).with_hp(0), mon("Pidgey", 40)]),
            Team::new(vec![mon("Onix", 35)]),
        );
        assert!(handle_faint(&mut state, Side::Player));
        assert!(state.must_switch);
        assert_eq!(state.active(Side::Player).transformation, Transformation::Normal);
        let decayed = decay_end_of_turn(&state);
        assert!(!decayed.log.contains("returned to its normal form"));
    }

    #[test]
    fn handle_faint_on_last_member_ends_the_battle() {
        let mut state = BattleState::new(
            Team::new(vec![mon("Pidgey", 40)]),
            Team::new(vec![mon("Rattata", 30).with_hp(0)]),
        );
        assert!(handle_faint(&mut state, Side::Enemy));
        assert_eq!(state.winner, Some(Side::Player));
        assert_eq!(state.log.last(), Some("Player won the battle!"));
        assert!(!handle_faint(&mut state, Side::Player));
    }
}
