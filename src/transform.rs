//! Mega Evolution, Gigantamax and Terastallization.
//!
//! Every function takes the current state by reference and hands back a new one;
//! the caller decides when to commit it.

use crate::dex::DataSource;
use crate::model::{FormData, Mechanic, Move};
use crate::state::{BattlePokemon, BattleState, FormOverride, Side, Transformation};
use tracing::{debug, warn};

pub const GIGANTAMAX_TURNS: u8 = 3;

fn resolve_form(form: &FormData, dex: &dyn DataSource) -> FormOverride {
    let moves = form.moves.as_ref().map(|names| {
        names
            .iter()
            .map(|name| {
                dex.resolve_move(name).unwrap_or_else(|| {
                    warn!(move_name = %name, "form move not found, using fallback");
                    Move::fallback(name)
                })
            })
            .collect()
    });
    FormOverride {
        name: form.name.clone(),
        sprite: form.sprite.clone(),
        types: form.types.clone(),
        stats: form.stats,
        moves,
    }
}

/// Whether `side` may use `mechanic` right now.
pub fn can_transform(
    state: &BattleState,
    side: Side,
    mechanic: Mechanic,
    dex: &dyn DataSource,
) -> bool {
    let team = state.team(side);
    let active = team.active();
    if state.is_over()
        || active.is_fainted()
        || active.has_used_mechanic
        || active.transformation != Transformation::Normal
        || team.mechanics.is_used(mechanic)
    {
        return false;
    }
    match mechanic {
        Mechanic::Terastallize => true,
        Mechanic::Mega | Mechanic::Gigantamax => dex
            .variant(&active.base().name)
            .and_then(|entry| entry.form(mechanic))
            .is_some(),
    }
}

/// Mega Evolve or Gigantamax the active combatant of `side`.
pub fn apply_transformation(
    state: &BattleState,
    side: Side,
    mechanic: Mechanic,
    dex: &dyn DataSource,
) -> Option<BattleState> {
    if mechanic == Mechanic::Terastallize || !can_transform(state, side, mechanic, dex) {
        return None;
    }
    let active = state.active(side);
    let form = dex
        .variant(&active.base().name)
        .and_then(|entry| entry.form(mechanic))
        .map(|form| resolve_form(form, dex))?;

    let before = active.name().to_string();
    let mut next = state.clone();
    let mut pokemon = active.clone();
    pokemon.has_used_mechanic = true;
    if mechanic == Mechanic::Gigantamax {
        pokemon.transformation = Transformation::Gigantamax {
            turns_left: GIGANTAMAX_TURNS,
            form,
        };
        pokemon.max_hp = pokemon.max_hp.saturating_mul(2);
        pokemon.current_hp = pokemon.current_hp.saturating_mul(2);
        next.log.push(format!("{before} Gigantamaxed into {}!", pokemon.name()));
    } else {
        pokemon.transformation = Transformation::Mega(form);
        next.log
            .push(format!("{before} has Mega Evolved into {}!", pokemon.name()));
    }
    debug!(?side, ?mechanic, pokemon = %pokemon.name(), "transformation applied");
    next.replace_active(side, pokemon);
    next.team_mut(side).mechanics.mark(mechanic);
    Some(next)
}

pub fn apply_terastallize(state: &BattleState, side: Side, tera_type: &str) -> Option<BattleState> {
    let team = state.team(side);
    let active = team.active();
    if state.is_over()
        || active.is_fainted()
        || active.has_used_mechanic
        || active.transformation != Transformation::Normal
        || team.mechanics.is_used(Mechanic::Terastallize)
    {
        return None;
    }
    let tera_type = tera_type.to_ascii_lowercase();
    let mut next = state.clone();
    let mut pokemon = active.clone();
    pokemon.has_used_mechanic = true;
    pokemon.transformation = Transformation::Terastallized {
        tera_type: tera_type.clone(),
    };
    next.log.push(format!(
        "{} terastallized into the {} type!",
        pokemon.name(),
        capitalize(&tera_type)
    ));
    debug!(?side, %tera_type, "terastallized");
    next.replace_active(side, pokemon);
    next.team_mut(side).mechanics.mark(Mechanic::Terastallize);
    Some(next)
}

/// Apply any mechanic, taking the tera type from the combatant's roster choice.
pub fn apply_mechanic(
    state: &BattleState,
    side: Side,
    mechanic: Mechanic,
    dex: &dyn DataSource,
) -> Option<BattleState> {
    match mechanic {
        Mechanic::Terastallize => {
            let tera_type = state.active(side).tera_target();
            apply_terastallize(state, side, &tera_type)
        }
        Mechanic::Mega | Mechanic::Gigantamax => apply_transformation(state, side, mechanic, dex),
    }
}

/// Drop a Gigantamax form, halving current and max HP (rounding up).
pub fn revert_gigantamax(pokemon: &BattlePokemon) -> BattlePokemon {
    if !pokemon.transformation.is_gigantamax() {
        return pokemon.clone();
    }
    let mut reverted = pokemon.clone();
    reverted.transformation = Transformation::Normal;
    reverted.max_hp = pokemon.max_hp.div_ceil(2).max(1);
    reverted.current_hp = pokemon.current_hp.div_ceil(2).min(reverted.max_hp);
    reverted
}

/// Count down every active Gigantamax form, reverting those that run out.
pub fn decay_end_of_turn(state: &BattleState) -> BattleState {
    let mut next = state.clone();
    for side in [Side::Player, Side::Enemy] {
        let active = next.active(side).clone();
        let Transformation::Gigantamax { turns_left, form } = &active.transformation else {
            continue;
        };
        let remaining = turns_left.saturating_sub(1);
        let updated = if remaining == 0 {
            let reverted = revert_gigantamax(&active);
            next.log.push(format!(
                "{} returned to its normal form as {}!",
                active.name(),
                reverted.name()
            ));
            debug!(?side, pokemon = %reverted.name(), "gigantamax expired");
            reverted
        } else {
            let mut pokemon = active.clone();
            pokemon.transformation = Transformation::Gigantamax {
                turns_left: remaining,
                form: form.clone(),
            };
            pokemon
        };
        next.replace_active(side, updated);
    }
    next
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
