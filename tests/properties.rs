use pokemon_battle_duel::batch::{next_intent, MAX_TURNS};
use pokemon_battle_duel::battle::{roll_hit_count, Battle, BattleOptions};
use pokemon_battle_duel::damage::{calculate_damage_with_rolls, DamageRolls};
use pokemon_battle_duel::dex::{DataSource, Dex};
use pokemon_battle_duel::model::{Move, MoveCategory, RosterEntry, Stats};
use pokemon_battle_duel::state::{BattlePokemon, BattleState, Form, FormOverride, Transformation};
use pokemon_battle_duel::transform::revert_gigantamax;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;

const TYPES: &[&str] = &[
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

const ATTACKS: &[&str] = &[
    "Tackle",
    "Flamethrower",
    "Surf",
    "Thunderbolt",
    "Bullet Seed",
    "Solar Beam",
    "Drain Punch",
    "Double-Edge",
    "Rock Slide",
    "Earthquake",
    "Icicle Spear",
    "Shadow Ball",
];

fn arb_type() -> impl Strategy<Value = String> {
    proptest::sample::select(TYPES).prop_map(str::to_string)
}

fn arb_stats() -> impl Strategy<Value = Stats> {
    (1u32..256, 1u32..256, 1u32..256, 1u32..256).prop_map(|(hp, attack, defense, speed)| Stats {
        hp,
        attack,
        defense,
        sp_atk: attack,
        sp_def: defense,
        speed,
    })
}

fn arb_pokemon() -> impl Strategy<Value = BattlePokemon> {
    (proptest::collection::vec(arb_type(), 1..=2), arb_stats()).prop_map(|(types, stats)| {
        BattlePokemon::new(
            Form {
                name: "Testmon".to_string(),
                sprite: None,
                types,
                stats,
                moves: Vec::new(),
            },
            None,
        )
    })
}

fn arb_move() -> impl Strategy<Value = Move> {
    (arb_type(), 0u32..=250, prop_oneof![
        Just(MoveCategory::Physical),
        Just(MoveCategory::Special),
        Just(MoveCategory::Status),
    ])
        .prop_map(|(move_type, power, category)| Move {
            name: "Testmove".to_string(),
            move_type,
            category,
            power,
            accuracy: 100,
            priority: 0,
            pp: 10,
        })
}

fn arb_roster() -> impl Strategy<Value = Vec<RosterEntry>> {
    let member = (
        proptest::collection::vec(arb_type(), 1..=2),
        arb_stats(),
        proptest::collection::vec(proptest::sample::select(ATTACKS), 1..=4),
    )
        .prop_map(|(types, stats, moves)| RosterEntry {
            name: "Testmon".to_string(),
            types,
            stats,
            moves: moves.into_iter().map(str::to_string).collect(),
            tera_type: None,
            sprite: None,
        });
    proptest::collection::vec(member, 1..=3)
}

fn assert_hp_in_bounds(state: &BattleState) {
    for team in [&state.player, &state.enemy] {
        for mon in &team.roster {
            assert!(mon.current_hp <= mon.max_hp);
            assert!(mon.max_hp > 0);
        }
    }
}

proptest! {
    #[test]
    fn damage_is_a_function_of_the_rolls(
        attacker in arb_pokemon(),
        defender in arb_pokemon(),
        mv in arb_move(),
        critical in any::<bool>(),
        random in 85u32..=100,
    ) {
        let rolls = DamageRolls { critical, random };
        let first = calculate_damage_with_rolls(&attacker, &defender, &mv, rolls);
        let second = calculate_damage_with_rolls(&attacker, &defender, &mv, rolls);
        prop_assert_eq!(first, second);
        if mv.is_status() {
            prop_assert_eq!(first.damage, 0);
        }
        let low = calculate_damage_with_rolls(&attacker, &defender, &mv, DamageRolls { critical, random: 85 });
        let high = calculate_damage_with_rolls(&attacker, &defender, &mv, DamageRolls { critical, random: 100 });
        prop_assert!(low.damage <= high.damage);
    }

    #[test]
    fn bullet_seed_table_hits_two_to_five_times(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..16 {
            let hits = roll_hit_count(Some(&[0, 35, 35, 15, 15][..]), &mut rng);
            prop_assert!((2..=5).contains(&hits));
        }
    }

    #[test]
    fn gigantamax_revert_halves_rounding_up(max_hp in 2u32..2000, current in 0u32..2000) {
        let mut mon = BattlePokemon::new(
            Form {
                name: "Testmon".to_string(),
                sprite: None,
                types: vec!["normal".to_string()],
                stats: Stats { hp: 10, attack: 10, defense: 10, sp_atk: 10, sp_def: 10, speed: 10 },
                moves: Vec::new(),
            },
            None,
        );
        mon.transformation = Transformation::Gigantamax { turns_left: 1, form: FormOverride::default() };
        mon.max_hp = max_hp;
        mon.current_hp = current.min(max_hp);
        let reverted = revert_gigantamax(&mon);
        prop_assert_eq!(reverted.max_hp, max_hp.div_ceil(2));
        prop_assert!(reverted.current_hp <= reverted.max_hp);
        prop_assert_eq!(reverted.transformation, Transformation::Normal);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn hp_stays_in_bounds_and_wipes_end_the_battle(
        player in arb_roster(),
        enemy in arb_roster(),
        seed in any::<u64>(),
    ) {
        let dex: Arc<dyn DataSource> = Arc::new(Dex::builtin());
        let mut battle = Battle::setup(&player, &enemy, BattleOptions { seed, ace_mechanic: None }, dex)
            .expect("generated rosters are valid");
        while battle.state().turn < MAX_TURNS {
            let Some(intent) = next_intent(&mut battle) else { break };
            let frames = battle.dispatch(intent);
            prop_assert!(!frames.is_empty());
            for frame in &frames {
                assert_hp_in_bounds(&frame.state);
            }
        }
        let state = battle.state();
        match state.winner {
            Some(winner) => {
                prop_assert!(state.team(winner.opponent()).is_wiped());
                prop_assert!(!state.is_player_turn);
            }
            None => prop_assert!(state.turn >= MAX_TURNS),
        }
    }
}
