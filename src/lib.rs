pub mod ai;
pub mod batch;
pub mod battle;
pub mod battle_logger;
pub mod damage;
pub mod dex;
pub mod error;
pub mod model;
pub mod state;
pub mod transform;
pub mod types;

pub use crate::battle::{Battle, BattleOptions, Frame, Intent, Phase};
pub use crate::error::SetupError;
pub use crate::state::{BattleState, Side};

use crate::batch::{next_intent, simulate_many, MAX_TURNS};
use crate::dex::{DataSource, Dex};
use crate::model::{Mechanic, TeamsFile};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub teams_path: PathBuf,
    pub seed: u64,
    /// Number of parallel battles; 0 narrates a single battle instead.
    pub sims: usize,
    pub ace_mechanic: Option<Mechanic>,
    pub pace: Duration,
}

pub fn load_teams(path: &Path) -> anyhow::Result<TeamsFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file at {}", path.display()))?;
    let parsed: TeamsFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(parsed)
}

/// Built-in dex extended with the moves and variants listed in the teams file.
pub fn build_dex(teams: &TeamsFile) -> Dex {
    let mut dex = Dex::builtin();
    dex.extend(teams.moves.clone(), teams.variants.clone());
    dex
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let teams = load_teams(&opts.teams_path)?;
    let dex = build_dex(&teams);
    info!(
        moves = dex.move_count(),
        player = teams.player.len(),
        enemy = teams.enemy.len(),
        "teams loaded"
    );
    let dex: Arc<dyn DataSource> = Arc::new(dex);
    let ace_mechanic = opts.ace_mechanic.or(teams.ace_mechanic);

    if opts.sims > 0 {
        let summary = simulate_many(&teams, dex, opts.sims, opts.seed, ace_mechanic)
            .context("Failed to set up battles")?;
        println!(
            "{} battles: player {} / enemy {} / unfinished {} (player win rate {:.4})",
            summary.total(),
            summary.player_wins,
            summary.enemy_wins,
            summary.unfinished,
            summary.win_rate()
        );
        return Ok(());
    }

    let options = BattleOptions {
        seed: opts.seed,
        ace_mechanic,
    };
    let mut battle = Battle::setup(&teams.player, &teams.enemy, options, dex)
        .context("Failed to set up battle")?;
    for line in battle.state().log.lines() {
        println!("{line}");
    }
    let mut printed = battle.state().log.len();
    while battle.state().winner.is_none() && battle.state().turn < MAX_TURNS {
        let Some(intent) = next_intent(&mut battle) else {
            break;
        };
        let frames = battle.dispatch(intent);
        if frames.is_empty() {
            break;
        }
        for frame in frames {
            for line in &frame.state.log.lines()[printed..] {
                println!("{line}");
            }
            printed = frame.state.log.len();
            if !opts.pace.is_zero() {
                std::thread::sleep(opts.pace);
            }
        }
    }
    if battle.state().winner.is_none() {
        println!("No winner after {} turns.", battle.state().turn);
    }
    Ok(())
}
