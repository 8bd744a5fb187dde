use crate::battle::{Battle, BattleOptions, Intent};
use crate::dex::DataSource;
use crate::error::SetupError;
use crate::model::{Mechanic, TeamsFile};
use crate::state::Side;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

pub const MAX_TURNS: u32 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub player_wins: u64,
    pub enemy_wins: u64,
    pub unfinished: u64,
}

impl BatchSummary {
    pub fn total(&self) -> u64 {
        self.player_wins + self.enemy_wins + self.unfinished
    }

    /// Player win rate, counting unfinished battles as half.
    pub fn win_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.player_wins as f64 + 0.5 * self.unfinished as f64) / total as f64
    }

    fn record(&mut self, winner: Option<Side>) {
        match winner {
            Some(Side::Player) => self.player_wins += 1,
            Some(Side::Enemy) => self.enemy_wins += 1,
            None => self.unfinished += 1,
        }
    }
}

/// The player's next command when the AI plays that side too: the AI's move,
/// or the first living bench member when a switch is forced.
pub fn next_intent(battle: &mut Battle) -> Option<Intent> {
    if battle.state().is_over() {
        return None;
    }
    if battle.state().must_switch {
        return battle
            .state()
            .player
            .next_living()
            .map(|index| Intent::Switch { index });
    }
    Some(Intent::UseMove {
        index: battle.suggest_move(),
        mechanic: None,
    })
}

/// Play both sides with the battle's AI until someone wins or `max_turns` pass.
pub fn autoplay(battle: &mut Battle, max_turns: u32) -> Option<Side> {
    while battle.state().turn < max_turns {
        let Some(intent) = next_intent(battle) else {
            break;
        };
        if battle.dispatch(intent).is_empty() {
            break;
        }
    }
    battle.state().winner
}

/// Run `sims` independent battles of the same teams in parallel.
pub fn simulate_many(
    teams: &TeamsFile,
    dex: Arc<dyn DataSource>,
    sims: usize,
    seed: u64,
    ace_mechanic: Option<Mechanic>,
) -> Result<BatchSummary, SetupError> {
    let mut seed_rng = SmallRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..sims).map(|_| seed_rng.gen()).collect();
    let ace_mechanic = ace_mechanic.or(teams.ace_mechanic);
    let winners: Vec<Option<Side>> = seeds
        .par_iter()
        .map(|&battle_seed| {
            let options = BattleOptions {
                seed: battle_seed,
                ace_mechanic,
            };
            let mut battle = Battle::setup(&teams.player, &teams.enemy, options, Arc::clone(&dex))?;
            Ok(autoplay(&mut battle, MAX_TURNS))
        })
        .collect::<Result<_, SetupError>>()?;

    let mut summary = BatchSummary::default();
    for winner in winners {
        summary.record(winner);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use crate::model::{RosterEntry, Stats};
    use std::collections::HashMap;

    fn member(name: &str, types: &[&str], speed: u32, moves: &[&str]) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: Stats {
                hp: 80,
                attack: 90,
                defense: 80,
                sp_atk: 90,
                sp_def: 80,
                speed,
            },
            moves: moves.iter().map(|m| m.to_string()).collect(),
            tera_type: None,
            sprite: None,
        }
    }

    fn teams() -> TeamsFile {
        TeamsFile {
            player: vec![
                member("Venusaur", &["grass", "poison"], 80, &["Giga Drain", "Bullet Seed"]),
                member("Pikachu", &["electric"], 110, &["Thunderbolt", "Fake Out"]),
            ],
            enemy: vec![
                member("Lucario", &["fighting", "steel"], 90, &["Close Combat", "Iron Head"]),
                member("Charizard", &["fire", "flying"], 100, &["Flamethrower", "Air Slash"]),
            ],
            ace_mechanic: None,
            moves: Vec::new(),
            variants: HashMap::new(),
        }
    }

    #[test]
    fn autoplay_finishes_a_battle() {
        let teams = teams();
        let dex: Arc<dyn DataSource> = Arc::new(Dex::builtin());
        let options = BattleOptions {
            seed: 11,
            ace_mechanic: None,
        };
        let mut battle = Battle::setup(&teams.player, &teams.enemy, options, dex).expect("setup");
        let winner = autoplay(&mut battle, MAX_TURNS);
        assert!(winner.is_some());
        assert_eq!(battle.state().winner, winner);
        assert!(battle.state().team(winner.expect("finished").opponent()).is_wiped());
    }

    #[test]
    fn batch_is_reproducible() {
        let teams = teams();
        let dex: Arc<dyn DataSource> = Arc::new(Dex::builtin());
        let first = simulate_many(&teams, Arc::clone(&dex), 16, 5, None).expect("batch");
        let second = simulate_many(&teams, dex, 16, 5, None).expect("batch");
        assert_eq!(first.total(), 16);
        assert_eq!(first, second);
    }

    #[test]
    fn batch_reports_setup_errors() {
        let mut teams = teams();
        teams.enemy.clear();
        let dex: Arc<dyn DataSource> = Arc::new(Dex::builtin());
        let err = simulate_many(&teams, dex, 4, 1, None).err();
        assert_eq!(err, Some(SetupError::EmptyRoster { side: "Enemy" }));
    }

    #[test]
    fn win_rate_counts_unfinished_as_half() {
        let summary = BatchSummary {
            player_wins: 3,
            enemy_wins: 1,
            unfinished: 2,
        };
        assert_eq!(summary.total(), 6);
        assert!((summary.win_rate() - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(BatchSummary::default().win_rate(), 0.0);
    }
}
