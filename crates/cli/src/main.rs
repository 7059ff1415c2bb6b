mod host;
mod render;

use anyhow::{bail, Context};
use host::CliHost;
use render::Renderer;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use striena_core::{BattleArea, EndingLedger, MemoryStore, RunError, Step, TurnEngine, Wait};
use striena_data::{
    builtin_content, default_store_path, load_content, load_settings_or_default, JsonFileStore,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
struct CliOptions {
    auto: bool,
    json: bool,
    memory: bool,
    seed: Option<u64>,
    pace: f64,
    settings: Option<PathBuf>,
    content: Option<PathBuf>,
    store: Option<PathBuf>,
}

const USAGE: &str = "usage: striena [--auto] [--json] [--seed N] [--pace F] \
[--settings FILE] [--content DIR] [--store FILE | --memory]";

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "--auto" => options.auto = true,
            "--json" => options.json = true,
            "--memory" => options.memory = true,
            "--seed" => {
                let raw = flag_value(args, &mut idx)?;
                options.seed = Some(raw.parse().with_context(|| format!("invalid seed {raw}"))?);
            }
            "--pace" => {
                let raw = flag_value(args, &mut idx)?;
                options.pace = raw.parse().with_context(|| format!("invalid pace {raw}"))?;
            }
            "--settings" => options.settings = Some(PathBuf::from(flag_value(args, &mut idx)?)),
            "--content" => options.content = Some(PathBuf::from(flag_value(args, &mut idx)?)),
            "--store" => options.store = Some(PathBuf::from(flag_value(args, &mut idx)?)),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other}\n{USAGE}"),
        }
        idx += 1;
    }
    Ok(options)
}

fn flag_value<'a>(args: &'a [String], idx: &mut usize) -> anyhow::Result<&'a str> {
    let flag = &args[*idx];
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .with_context(|| format!("{flag} expects a value"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = parse_cli_options(&args).and_then(run);
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn open_ledger(options: &CliOptions) -> anyhow::Result<EndingLedger> {
    if options.memory {
        return Ok(EndingLedger::new(Box::new(MemoryStore::new())));
    }
    let path = match options.store.clone().or_else(default_store_path) {
        Some(path) => path,
        None => {
            tracing::warn!(
                target: "striena::cli",
                "no store path available, endings will not persist"
            );
            return Ok(EndingLedger::new(Box::new(MemoryStore::new())));
        }
    };
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("open ending store {}", path.display()))?;
    tracing::info!(target: "striena::cli", path = %path.display(), "ending store opened");
    Ok(EndingLedger::new(Box::new(store)))
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn build_engine(options: &CliOptions) -> anyhow::Result<TurnEngine> {
    let settings = load_settings_or_default(options.settings.as_deref())?;
    let content = match &options.content {
        Some(dir) => load_content(dir, &settings)?,
        None => builtin_content(&settings)?,
    };
    let ledger = open_ledger(options)?;
    let seed = options.seed.unwrap_or_else(seed_from_clock);
    tracing::info!(
        target: "striena::cli",
        seed,
        cards = content.cards.len(),
        events = content.events.len(),
        "starting run"
    );
    Ok(TurnEngine::new(settings, content, seed, ledger))
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let mut engine = build_engine(&options)?;
    let renderer = Renderer::new(options.json);
    let mut host = CliHost::new(options.pace, !options.json && !options.auto);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if !renderer.is_json() {
        println!("seed {}", engine.rng_seed());
    }
    loop {
        let step = engine.run_until_blocked(&mut host);
        renderer.flush_events(&mut engine)?;
        match step {
            Step::Finished(_) => break,
            Step::Advanced(_) | Step::Suspended(Wait::SubsystemReady) => continue,
            Step::Suspended(Wait::CardSelection) => {
                if options.auto {
                    auto_select_card(&mut engine, &mut host)?;
                    continue;
                }
                renderer.print_status(&engine);
                renderer.print_hand(&engine);
                if !prompt_card(&mut engine, &mut host, &renderer, &mut lines)? {
                    println!("run abandoned");
                    return Ok(());
                }
            }
            Step::Suspended(Wait::AreaSelection) => {
                if options.auto {
                    engine.skip_area_selection()?;
                    continue;
                }
                if !prompt_area(&mut engine, &mut lines)? {
                    println!("run abandoned");
                    return Ok(());
                }
            }
        }
    }

    if let Some(outcome) = engine.outcome() {
        renderer.print_outcome(outcome)?;
    }
    Ok(())
}

/// Plays the first enabled card, reshuffling as the action when none is.
fn auto_select_card(engine: &mut TurnEngine, host: &mut CliHost) -> anyhow::Result<()> {
    let player = engine.player();
    let choice = player
        .hand()
        .iter()
        .position(|card| !player.is_card_disabled(&card.id()));
    match choice {
        Some(index) => engine.select_card_at(index)?,
        None => {
            tracing::info!(
                target: "striena::cli",
                "every card disabled, reshuffling as the action"
            );
            engine.reset_hand(true, host)?;
            if engine.pending_card().is_none() {
                bail!("no playable card in hand");
            }
        }
    }
    Ok(())
}

fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<String>> {
    print!("> ");
    io::stdout().flush().context("flush stdout")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("read stdin")?.trim().to_string())),
        None => Ok(None),
    }
}

/// Returns `false` when the player quits or stdin closes.
fn prompt_card(
    engine: &mut TurnEngine,
    host: &mut CliHost,
    renderer: &Renderer,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<bool> {
    loop {
        let Some(line) = read_line(lines)? else {
            return Ok(false);
        };
        match line.as_str() {
            "q" | "quit" => return Ok(false),
            "s" | "status" => {
                renderer.print_status(engine);
                renderer.print_hand(engine);
            }
            "r" | "reset" => match engine.reset_hand(true, host) {
                Ok(_) => {
                    renderer.flush_events(engine)?;
                    return Ok(true);
                }
                Err(err) => println!("cannot reset: {err}"),
            },
            "?" | "help" => {
                println!("<index> play a card, r reshuffle as your action, s status, q quit")
            }
            raw => {
                let Ok(index) = raw.parse::<usize>() else {
                    println!("unknown command {raw}");
                    continue;
                };
                match engine.select_card_at(index) {
                    Ok(()) => return Ok(true),
                    Err(err @ (RunError::CardDisabled(_) | RunError::InvalidHandIndex(_))) => {
                        println!("{err}");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
}

fn prompt_area(
    engine: &mut TurnEngine,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<bool> {
    let Some((first, second)) = engine.offered_areas() else {
        bail!("retreat without offered areas");
    };
    loop {
        let Some(line) = read_line(lines)? else {
            return Ok(false);
        };
        let choice: BattleArea = match line.as_str() {
            "q" | "quit" => return Ok(false),
            "" => {
                engine.skip_area_selection()?;
                return Ok(true);
            }
            "1" => first,
            "2" => second,
            other => {
                println!("choose 1 or 2, got {other}");
                continue;
            }
        };
        engine.select_area(choice)?;
        return Ok(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_values() {
        let options = parse_cli_options(&args(&[
            "--auto", "--seed", "17", "--pace", "0.5", "--store", "/tmp/endings.json",
        ]))
        .expect("options");
        assert!(options.auto);
        assert!(!options.json);
        assert_eq!(options.seed, Some(17));
        assert_eq!(options.pace, 0.5);
        assert_eq!(options.store, Some(PathBuf::from("/tmp/endings.json")));
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_cli_options(&args(&["--seed"])).is_err());
        assert!(parse_cli_options(&args(&["--seed", "soon"])).is_err());
        assert!(parse_cli_options(&args(&["--turbo"])).is_err());
    }

    #[test]
    fn auto_policy_finishes_a_builtin_run() {
        let options = CliOptions {
            auto: true,
            memory: true,
            seed: Some(5),
            ..CliOptions::default()
        };
        let mut engine = build_engine(&options).expect("engine");
        let mut host = CliHost::new(0.0, false);
        let ending = loop {
            match engine.run_until_blocked(&mut host) {
                Step::Finished(ending) => break ending,
                Step::Suspended(Wait::CardSelection) => {
                    auto_select_card(&mut engine, &mut host).expect("select")
                }
                Step::Suspended(Wait::AreaSelection) => {
                    engine.skip_area_selection().expect("area");
                }
                other => panic!("unexpected step {other:?}"),
            }
        };
        assert_eq!(engine.outcome().map(|outcome| outcome.ending), Some(ending));
        assert!(engine.turn() <= 20);
    }
}
