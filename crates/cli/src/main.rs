use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yahtzee_autoplay::{
    simulate_matches, write_json, write_text, write_trace_lines, Clock, OpponentConfig,
    OpponentTurn, StepOutcome, SystemClock, TurnReport, TurnTrace, VirtualClock,
};
use yahtzee_core::{
    slot_label, Category, Event, EventBus, MatchState, Player, RandomSource, RngState,
    CATEGORY_COUNT, DICE_COUNT, SLOT_COUNT,
};
use yahtzee_data::{default_results_path, load_opponent_config, ResultStore};

const DEFAULT_AUTO_SEED: u64 = 0xD1CE;
const DEFAULT_AUTO_GAMES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    auto: bool,
    games: u32,
    fast: bool,
    seed: Option<u64>,
    results: Option<PathBuf>,
    config: Option<PathBuf>,
    trace: Option<PathBuf>,
    clear_results: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Roll,
    Toggle(Vec<usize>),
    Commit(Category),
    Sheet,
    Stats,
    Help,
    Quit,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        auto: false,
        games: DEFAULT_AUTO_GAMES,
        fast: false,
        seed: None,
        results: None,
        config: None,
        trace: None,
        clear_results: false,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--fast" => options.fast = true,
            "--clear-results" => options.clear_results = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--games" => {
                if let Some(value) = args.get(idx + 1) {
                    options.games = value.parse::<u32>().unwrap_or(DEFAULT_AUTO_GAMES);
                    idx += 1;
                }
            }
            "--results" => {
                if let Some(value) = args.get(idx + 1) {
                    options.results = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--trace" => {
                if let Some(value) = args.get(idx + 1) {
                    options.trace = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();
    let command = match cmd.to_ascii_lowercase().as_str() {
        "roll" | "r" => Command::Roll,
        "toggle" | "t" => Command::Toggle(parse_die_indices(&args)?),
        "commit" | "c" => {
            if args.is_empty() {
                return Err("missing category".to_string());
            }
            let name = args.join(" ");
            let category =
                Category::parse(&name).ok_or_else(|| format!("unknown category '{name}'"))?;
            Command::Commit(category)
        }
        "sheet" | "s" => Command::Sheet,
        "stats" => Command::Stats,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(command))
}

fn parse_die_indices(args: &[&str]) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let idx = part
                .parse::<usize>()
                .map_err(|_| format!("invalid index '{part}'"))?;
            if idx >= DICE_COUNT {
                return Err(format!("die index {idx} out of range 0-{}", DICE_COUNT - 1));
            }
            indices.push(idx);
        }
    }
    if indices.is_empty() {
        return Err("missing indices".to_string());
    }
    Ok(indices)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let config = match options.config.as_deref() {
        Some(path) => load_opponent_config(path)?,
        None => OpponentConfig::default(),
    };
    if options.auto {
        return run_auto(options, &config);
    }
    let mut store = open_store(options);
    if options.clear_results {
        if let Some(store) = store.as_mut() {
            let removed = store.clear()?;
            println!("cleared {removed} stored results");
        }
    }
    run_interactive(options, &config, store.as_mut())
}

fn open_store(options: &CliOptions) -> Option<ResultStore> {
    let path = options.results.clone().or_else(default_results_path);
    if path.is_none() {
        warn!("no result store path; finished matches will not be saved");
    }
    path.map(ResultStore::new)
}

fn run_auto(options: &CliOptions, config: &OpponentConfig) -> anyhow::Result<()> {
    let seed = options.seed.unwrap_or(DEFAULT_AUTO_SEED);
    info!(seed, games = options.games, "auto mode");
    let report = simulate_matches(seed, options.games, config)?;
    println!("{}", report.to_text_report());
    if let Some(path) = options.trace.as_deref() {
        let is_text = path.extension().is_some_and(|ext| ext == "txt");
        if is_text {
            write_text(path, &report)?;
        } else {
            write_json(path, &report)?;
        }
        println!("report written to {}", path.display());
    }
    Ok(())
}

fn run_interactive(
    options: &CliOptions,
    config: &OpponentConfig,
    mut store: Option<&mut ResultStore>,
) -> anyhow::Result<()> {
    let mut rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    info!(seed = rng.seed(), "new match");
    let mut state = MatchState::new(&mut rng);
    let mut events = EventBus::default();
    let mut traces: Vec<TurnTrace> = Vec::new();

    println!("Yahtzee: you against the computer. Type 'help' for commands.");
    match state.active_player() {
        Some(Player::Human) => println!("You go first."),
        _ => println!("The opponent goes first."),
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        match state.active_player() {
            None => break,
            Some(Player::Computer) => {
                let report = if options.fast {
                    play_opponent_turn(
                        &mut state,
                        config,
                        &mut rng,
                        &mut VirtualClock::new(),
                        &mut events,
                    )?
                } else {
                    play_opponent_turn(&mut state, config, &mut rng, &mut SystemClock, &mut events)?
                };
                traces.push(report.trace);
                continue;
            }
            Some(Player::Human) => {}
        }

        print_prompt(&state);
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Sheet => print_sheet(&state),
            Command::Stats => print_stats(store.as_deref()),
            Command::Roll => {
                if let Err(err) = state.roll(Player::Human, &mut rng, &mut events) {
                    println!("{err}");
                }
            }
            Command::Toggle(indices) => {
                for idx in indices {
                    if let Err(err) = state.toggle_die(Player::Human, idx, &mut events) {
                        println!("{err}");
                        break;
                    }
                }
            }
            Command::Commit(category) => {
                if let Err(err) = state.commit_category(Player::Human, category, &mut events) {
                    println!("{err}");
                }
            }
        }
        drain_events(&mut events);
    }

    if state.is_finished() {
        print_sheet(&state);
        if let Some(store) = store.as_deref_mut() {
            if state.flush_result(store)? {
                println!("result saved to {}", store.path().display());
            }
            print_stats(Some(&*store));
        }
    } else {
        println!("match abandoned");
    }
    if let Some(path) = options.trace.as_deref() {
        write_trace_lines(path, &traces)?;
        println!("opponent trace written to {}", path.display());
    }
    Ok(())
}

/// Steps the opponent's turn, printing what happened after every step.
fn play_opponent_turn(
    state: &mut MatchState,
    config: &OpponentConfig,
    rng: &mut impl RandomSource,
    clock: &mut impl Clock,
    events: &mut EventBus,
) -> anyhow::Result<TurnReport> {
    let mut turn = OpponentTurn::new(Player::Computer, config.clone());
    loop {
        let outcome = turn.step(state, rng, events)?;
        drain_events(events);
        match outcome {
            StepOutcome::Wait(delay) => clock.sleep(delay),
            StepOutcome::Committed(report) => return Ok(report),
        }
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        if let Some(line) = format_event(&event) {
            println!("{line}");
        }
    }
}

fn format_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::TurnStarted { player, turns_left } => {
            format!("-- {player}'s turn ({turns_left} turns left)")
        }
        Event::DiceRolled {
            player,
            hand,
            rolls_left,
        } => format!("{player} rolled {hand} ({rolls_left} rolls left)"),
        Event::SelectionChanged {
            player: Player::Human,
            selected,
        } => format!("reroll: {}", format_selection(selected)),
        Event::SelectionChanged { .. } => return None,
        Event::CategoryCommitted {
            player,
            category,
            score,
            ..
        } => format!("{player} scored {score} in {}", category.label()),
        Event::MatchFinished {
            outcome,
            player_total,
            opponent_total,
        } => format!("match over: {outcome} ({player_total} to {opponent_total})"),
    };
    Some(line)
}

fn format_selection(selected: &[bool; DICE_COUNT]) -> String {
    let picked: Vec<String> = selected
        .iter()
        .enumerate()
        .filter(|(_, selected)| **selected)
        .map(|(idx, _)| idx.to_string())
        .collect();
    if picked.is_empty() {
        "none".to_string()
    } else {
        picked.join(" ")
    }
}

fn print_prompt(state: &MatchState) {
    if state.has_rolled() {
        println!(
            "hand {} | reroll {} | rolls left {}",
            state.hand(),
            format_selection(&state.selected()),
            state.rolls_left()
        );
    }
    print!("> ");
    let _ = io::stdout().flush();
}

fn print_sheet(state: &MatchState) {
    let view = state.view();
    let cell = |(value, filled): (u32, bool)| {
        if filled {
            value.to_string()
        } else {
            "-".to_string()
        }
    };
    println!("{:>3} {:<16} {:>6} {:>9}", "#", "category", "you", "opponent");
    for slot in 0..SLOT_COUNT {
        let candidate = view
            .candidates
            .filter(|_| view.active_player == Some(Player::Human))
            .and_then(|scores| scores.get(slot).copied().flatten())
            .map(|score| format!(" (+{score})"))
            .unwrap_or_default();
        let index = if slot < CATEGORY_COUNT {
            slot.to_string()
        } else {
            String::new()
        };
        println!(
            "{:>3} {:<16} {:>6} {:>9}{}",
            index,
            slot_label(slot),
            cell(view.player_sheet[slot]),
            cell(view.opponent_sheet[slot]),
            candidate
        );
    }
}

fn print_stats(store: Option<&ResultStore>) {
    let Some(store) = store else {
        println!("no result store configured");
        return;
    };
    match store.stats() {
        Ok(Some(stats)) => print!("{}", stats.report(&stats_owner())),
        Ok(None) => println!("no finished matches yet"),
        Err(err) => println!("could not read results: {err:#}"),
    }
}

fn stats_owner() -> String {
    std::env::var("USER").unwrap_or_else(|_| "local user".to_string())
}

fn print_help() {
    let lines = [
        "roll | r                 roll the selected dice (all five on the first roll)",
        "toggle | t <idx..>       mark or unmark dice 0-4 for the next roll",
        "commit | c <category>    score the hand, by index, id or name",
        "sheet | s                show both score sheets",
        "stats                    show statistics from stored results",
        "help | h                 show this help",
        "quit | q                 leave the match",
    ];
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn cli_defaults() {
        let options = parse_cli_options(&[]);
        assert!(!options.auto);
        assert!(!options.fast);
        assert_eq!(options.games, DEFAULT_AUTO_GAMES);
        assert_eq!(options.seed, None);
        assert_eq!(options.results, None);
    }

    #[test]
    fn cli_reads_values_and_flags() {
        let options = parse_cli_options(&args(&[
            "--auto",
            "--games",
            "25",
            "--seed",
            "99",
            "--fast",
            "--results",
            "/tmp/r.json",
            "--config",
            "opp.json",
            "--trace",
            "out.txt",
        ]));
        assert!(options.auto);
        assert!(options.fast);
        assert_eq!(options.games, 25);
        assert_eq!(options.seed, Some(99));
        assert_eq!(options.results, Some(PathBuf::from("/tmp/r.json")));
        assert_eq!(options.config, Some(PathBuf::from("opp.json")));
        assert_eq!(options.trace, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn cli_ignores_bad_numbers() {
        let options = parse_cli_options(&args(&["--seed", "abc", "--games", "-3"]));
        assert_eq!(options.seed, None);
        assert_eq!(options.games, DEFAULT_AUTO_GAMES);
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("r"), Ok(Some(Command::Roll)));
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("toggle 0 2,4"),
            Ok(Some(Command::Toggle(vec![0, 2, 4])))
        );
        assert_eq!(
            parse_command("c full house"),
            Ok(Some(Command::Commit(Category::FullHouse)))
        );
        assert_eq!(
            parse_command("commit 12"),
            Ok(Some(Command::Commit(Category::Yahtzee)))
        );
        assert_eq!(parse_command("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn command_errors_are_reported() {
        assert!(parse_command("t 5").is_err());
        assert!(parse_command("t").is_err());
        assert!(parse_command("c").is_err());
        assert!(parse_command("c bogus").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn opponent_selection_is_not_printed() {
        let event = Event::SelectionChanged {
            player: Player::Computer,
            selected: [true; DICE_COUNT],
        };
        assert_eq!(format_event(&event), None);
        assert_eq!(format_selection(&[false, true, false, false, true]), "1 4");
        assert_eq!(format_selection(&[false; DICE_COUNT]), "none");
    }
}
