use crate::damage::{calculate_damage_with_rolls, DamageRolls};
use crate::dex::DataSource;
use crate::model::{Mechanic, Move};
use crate::state::{BattlePokemon, BattleState, Side};
use crate::transform::can_transform;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

pub trait BattleAI: Send + Sync {
    fn pick_move(&self, attacker: &BattlePokemon, defender: &BattlePokemon, rng: &mut SmallRng) -> Move;

    /// Mechanic for the ace, if any. Called once when the last member comes out.
    fn pick_mechanic(&self, state: &BattleState, side: Side, dex: &dyn DataSource) -> Option<Mechanic>;
}

/// Picks whatever hits hardest right now.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAI;

impl BattleAI for GreedyAI {
    fn pick_move(&self, attacker: &BattlePokemon, defender: &BattlePokemon, rng: &mut SmallRng) -> Move {
        let moves = attacker.moves();
        let mut best: Option<(&Move, u32)> = None;
        for mv in moves {
            let damage = calculate_damage_with_rolls(attacker, defender, mv, DamageRolls::MAX).damage;
            if best.map_or(true, |(_, top)| damage > top) {
                best = Some((mv, damage));
            }
        }
        match best {
            Some((mv, damage)) if damage > 0 => mv.clone(),
            _ => moves
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| Move::fallback("Struggle")),
        }
    }

    fn pick_mechanic(&self, state: &BattleState, side: Side, dex: &dyn DataSource) -> Option<Mechanic> {
        if let Some(configured) = state.team(side).ace_mechanic {
            return can_transform(state, side, configured, dex).then_some(configured);
        }
        [Mechanic::Gigantamax, Mechanic::Mega]
            .into_iter()
            .find(|&mechanic| can_transform(state, side, mechanic, dex))
    }
}
