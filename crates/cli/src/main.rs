mod options;
mod persistence;

use options::{build_players, load_rules, parse_cli_options, CliOptions};
use persistence::{default_state_path, load_state_file, save_state_file};
use rusequence_autoplay::{run_autoplay, AutoplayConfig, RunStatus, ThinkingDelay};
use rusequence_core::{Event, EventBus, GameEngine, RulesConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RUSEQUENCE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(options: &CliOptions, events: &mut EventBus) -> anyhow::Result<(GameEngine, u32)> {
    if let Some(path) = &options.load {
        let saved = load_state_file(path)?;
        info!(path = %path.display(), turns = saved.turns_played, "resuming saved game");
        return Ok((GameEngine::restore(saved.snapshot), saved.turns_played));
    }
    let rules = match &options.config {
        Some(path) => load_rules(path)?,
        None => RulesConfig::default(),
    };
    let seed = options.seed.unwrap_or(DEFAULT_RUN_SEED);
    let mut engine = GameEngine::new(rules, seed);
    engine.start_game(build_players(options), events)?;
    Ok((engine, 0))
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let mut events = EventBus::default();
    let (mut engine, turns_before) = build_engine(options, &mut events)?;
    let config = AutoplayConfig {
        seed: options.seed.unwrap_or(DEFAULT_RUN_SEED),
        max_turns: options
            .max_turns
            .unwrap_or(AutoplayConfig::default().max_turns),
        thinking: ThinkingDelay {
            scale: options.think_scale,
            ..ThinkingDelay::default()
        },
    };
    let result = run_autoplay(&mut engine, &config, &mut events)?;
    for event in events.drain() {
        if let Event::SequenceCompleted { sequence, team_total } = &event {
            info!(team = %sequence.team, anchor = %sequence.anchor, team_total, "sequence");
        } else {
            debug!(?event);
        }
    }

    if options.json {
        println!("{}", result.to_json_pretty()?);
    } else {
        print!("{}", engine.board());
        match result.status {
            RunStatus::Won(team) => println!("{team} wins after {} turns", result.stats.turns),
            RunStatus::TurnLimit => println!("turn limit reached after {} turns", result.stats.turns),
            RunStatus::Stalled => println!("no moves left after {} turns", result.stats.turns),
        }
        for tally in &result.teams {
            println!(
                "  {:<6} sequences={} markers={}",
                tally.team.to_string(),
                tally.sequences,
                tally.markers
            );
        }
    }

    let save_path = options.save.clone().or_else(|| {
        (options.load.is_some() && engine.winner().is_none())
            .then(default_state_path)
            .flatten()
    });
    if let Some(path) = save_path {
        save_state_file(engine.snapshot(), turns_before + result.stats.turns, &path)?;
        info!(path = %path.display(), "game saved");
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
