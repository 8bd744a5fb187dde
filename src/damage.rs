use crate::model::Move;
use crate::state::BattlePokemon;
use crate::types::type_effectiveness;
use rand::Rng;

/// One in `CRIT_ODDS` hits is critical.
pub const CRIT_ODDS: u32 = 24;
pub const RANDOM_MIN: u32 = 85;
pub const RANDOM_MAX: u32 = 100;

/// The random inputs of a single damage roll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DamageRolls {
    pub critical: bool,
    /// Percent in `85..=100`.
    pub random: u32,
}

impl DamageRolls {
    /// No crit, top random roll.
    pub const MAX: DamageRolls = DamageRolls {
        critical: false,
        random: RANDOM_MAX,
    };

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            critical: rng.gen_range(0..CRIT_ODDS) == 0,
            random: rng.gen_range(RANDOM_MIN..=RANDOM_MAX),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DamageResult {
    pub damage: u32,
    pub is_critical: bool,
    pub effectiveness: u32,
}

pub fn base_damage(level: u8, power: u32, attack: u32, defense: u32) -> u32 {
    let level = level as u64;
    let defense = defense.max(1) as u64;
    let mut base = 2 * level / 5 + 2;
    base *= power as u64;
    base *= attack as u64;
    base /= defense;
    base /= 50;
    (base + 2).min(u32::MAX as u64) as u32
}

/// Damage for fixed rolls.
///
/// Attack and Defense are used for every category, special moves included.
/// Effectiveness only ever doubles; see [`crate::types`].
pub fn calculate_damage_with_rolls(
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_def: &Move,
    rolls: DamageRolls,
) -> DamageResult {
    let effectiveness = type_effectiveness(&move_def.move_type, defender.types());
    if move_def.is_status() {
        return DamageResult {
            damage: 0,
            is_critical: false,
            effectiveness,
        };
    }
    let mut damage = base_damage(
        attacker.level,
        move_def.power,
        attacker.stats().attack,
        defender.stats().defense,
    ) as u64;
    if rolls.critical {
        damage = damage * 3 / 2;
    }
    damage = damage * rolls.random.clamp(RANDOM_MIN, RANDOM_MAX) as u64 / 100;
    let stab = attacker
        .types()
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&move_def.move_type));
    if stab {
        damage = damage * 3 / 2;
    }
    damage = damage.saturating_mul(effectiveness as u64);
    DamageResult {
        damage: damage.min(u32::MAX as u64) as u32,
        is_critical: rolls.critical,
        effectiveness,
    }
}

pub fn calculate_damage<R: Rng + ?Sized>(
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    move_def: &Move,
    rng: &mut R,
) -> DamageResult {
    calculate_damage_with_rolls(attacker, defender, move_def, DamageRolls::roll(rng))
}
