use pokemon_battle_duel::model::Mechanic;
use pokemon_battle_duel::{run, CliOptions};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--teams teams.json] [--seed SEED] [--sims N] \
[--ace mega|gigantamax|terastallize] [--pace-ms MS]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut teams_path = PathBuf::from("teams.json");
    let mut seed = 0u64;
    let mut sims = 0usize;
    let mut ace_mechanic = None;
    let mut pace = Duration::ZERO;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--teams" => {
                teams_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--teams requires a path (e.g. --teams teams.json)")
                })?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--sims" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims requires a number"))?;
                sims = val.parse()?;
            }
            "--ace" => {
                let val = args.next().ok_or_else(|| {
                    anyhow::anyhow!("--ace requires mega, gigantamax or terastallize")
                })?;
                ace_mechanic = Some(
                    Mechanic::parse(&val)
                        .ok_or_else(|| anyhow::anyhow!("Unknown mechanic {val}"))?,
                );
            }
            "--pace-ms" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--pace-ms requires milliseconds"))?;
                pace = Duration::from_millis(val.parse()?);
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        teams_path,
        seed,
        sims,
        ace_mechanic,
        pace,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
    let opts = parse_args()?;
    run(opts)
}
