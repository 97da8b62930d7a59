//! Dice Duel CLI
//!
//! Price, check and simulate over/under/exact dice duels from the terminal.

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use diceduel::duel::{
    self, check_win_mode, lobby_rows, now_millis, quote, roll_range, CreateGameForm, DebugDuel,
    DiceResult, DuelError, DuelSettings, GameSnapshot, GameStatus, GameView, OddsModel,
    OddsQuote, PlayerSide, Prediction, DICE_FACES, EMPTY_LOBBY_MESSAGE, SETTINGS_FILE_NAME,
};

/// Dice Duel - over/under/exact dice betting
#[derive(Parser)]
#[command(name = "diceduel")]
#[command(
    author,
    version,
    about = "Dice Duel - price, check and simulate two-player dice duels"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (RON); defaults are used when it does not exist
    #[arg(long, global = true, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the roll range and default target for a dice count
    Range {
        /// Dice to roll (e.g., "2", "2d6")
        #[arg(value_parser = parse_dice_arg)]
        dice: u32,
    },

    /// Quote fair odds for a bet
    Odds {
        #[arg(value_parser = parse_dice_arg)]
        dice: u32,

        /// over, under or exact
        #[arg(value_parser = parse_prediction_arg)]
        prediction: Prediction,

        /// Target number; defaults to the middle of the roll range
        target: Option<u32>,

        /// Count favorable outcomes from the real distribution of the total
        #[arg(long)]
        exact: bool,

        /// Quote every target in the roll range
        #[arg(long, conflicts_with = "target")]
        table: bool,
    },

    /// Check whether a total wins a prediction
    Check {
        total: u32,

        /// over, under or exact (lowercase); anything else never wins
        prediction: String,

        target: u32,
    },

    /// Roll dice for display
    Roll {
        #[arg(value_parser = parse_dice_arg)]
        dice: u32,

        /// Seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a local two-player duel
    #[command(visible_alias = "sim")]
    Simulate {
        #[arg(short, long, value_parser = parse_dice_arg)]
        dice: Option<u32>,

        #[arg(long, value_parser = parse_prediction_arg, default_value = "over")]
        p1: Prediction,

        /// Player one's target; defaults to the middle of the roll range
        #[arg(long)]
        p1_target: Option<u32>,

        #[arg(long, value_parser = parse_prediction_arg, default_value = "under")]
        p2: Prediction,

        /// Player two's target; defaults to the middle of the roll range
        #[arg(long)]
        p2_target: Option<u32>,

        /// Which player you are (1 or 2)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
        you: u8,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Prepare a create-game request
    Create {
        /// Creator wallet (base58)
        #[arg(long)]
        wallet: Option<String>,

        /// Wager in whole tokens
        #[arg(long)]
        wager: Option<f64>,

        #[arg(short, long, value_parser = parse_dice_arg)]
        dice: Option<u32>,

        #[arg(short, long, value_parser = parse_prediction_arg, default_value = "over")]
        prediction: Prediction,

        #[arg(short, long)]
        target: Option<u32>,

        /// Print the request as JSON only
        #[arg(long)]
        json: bool,
    },

    /// List games from a JSON snapshot file
    Lobby {
        /// File holding a JSON array of game snapshots
        file: PathBuf,
    },

    /// Show one game from a JSON snapshot file
    Game {
        file: PathBuf,

        /// Your wallet (base58)
        #[arg(long)]
        viewer: Option<String>,

        /// Prepare a join request for --viewer with this prediction
        #[arg(long, value_parser = parse_prediction_arg)]
        join: Option<Prediction>,

        /// Seed for the revealed dice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the active settings
    Settings {
        /// Write the active settings back to the settings file
        #[arg(long)]
        write: bool,
    },
}

// ============================================================================
// Argument Parsing
// ============================================================================

fn parse_dice_arg(s: &str) -> Result<u32, String> {
    let s = s.trim().to_lowercase();

    let (count_str, faces_str) = match s.find('d') {
        Some(0) => ("1", &s[1..]),
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s.as_str(), ""),
    };

    if !faces_str.is_empty() && faces_str != DICE_FACES.to_string() {
        return Err(format!(
            "Unsupported die: d{}. Dice Duel only uses d{}",
            faces_str, DICE_FACES
        ));
    }

    let count: u32 = count_str
        .parse()
        .map_err(|_| format!("Invalid dice count: {}. Use format like '2' or '2d6'", count_str))?;
    if count == 0 {
        return Err("Dice count must be at least 1".to_string());
    }

    Ok(count)
}

fn parse_prediction_arg(s: &str) -> Result<Prediction, String> {
    Prediction::parse(s).ok_or_else(|| DuelError::UnknownPrediction(s.to_string()).to_string())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = &cli.command else {
        eprintln!("{} No command specified", "Error:".red().bold());
        eprintln!("Use --help to see available commands");
        eprintln!("\nExamples:");
        eprintln!("  diceduel odds 2d6 over 7");
        eprintln!("  diceduel odds 2 exact --table --exact");
        eprintln!("  diceduel check 9 over 7");
        eprintln!("  diceduel simulate --dice 2 --p1 over --p2 exact --p2-target 7");
        std::process::exit(1);
    };

    let settings = match DuelSettings::load(&cli.settings) {
        Ok(s) => s,
        Err(e) => fail(&format!("Failed to load settings: {}", e)),
    };
    debug!(
        path = %cli.settings.display(),
        odds_model = settings.odds_model.name(),
        "settings ready"
    );

    if let Err(e) = run(command, &settings, &cli.settings) {
        fail(&e.to_string());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn run(command: &Commands, settings: &DuelSettings, settings_path: &Path) -> duel::Result<()> {
    match command {
        Commands::Range { dice } => {
            show_range(*dice);
        }
        Commands::Odds {
            dice,
            prediction,
            target,
            exact,
            table,
        } => {
            let model = if *exact {
                OddsModel::Exact
            } else {
                settings.odds_model
            };
            debug!(dice, %prediction, model = model.name(), "quoting odds");
            if *table {
                show_odds_table(*dice, *prediction, model);
            } else {
                let target = target.unwrap_or_else(|| duel::default_target(*dice));
                show_quote(*dice, *prediction, target, &quote(model, *dice, *prediction, target));
            }
        }
        Commands::Check {
            total,
            prediction,
            target,
        } => {
            show_check(*total, prediction, *target);
        }
        Commands::Roll { dice, seed } => {
            settings.check_dice_count(*dice)?;
            let result = roll_dice(*dice, *seed);
            print_banner();
            println!("{} {}d{}", "Rolling:".bold().white(), dice, DICE_FACES);
            print_dice(&result);
            print_banner();
        }
        Commands::Simulate {
            dice,
            p1,
            p1_target,
            p2,
            p2_target,
            you,
            seed,
        } => {
            let mut sim = DebugDuel::new(settings);
            if let Some(dice) = dice {
                sim.set_dice_count(*dice, settings)?;
            }
            sim.player1.prediction = *p1;
            sim.player2.prediction = *p2;
            if let Some(t) = p1_target {
                sim.player1.target = *t;
            }
            if let Some(t) = p2_target {
                sim.player2.target = *t;
            }
            sim.you_are = PlayerSide::from_number(*you).unwrap_or(PlayerSide::One);
            run_simulation(&sim, *seed);
        }
        Commands::Create {
            wallet,
            wager,
            dice,
            prediction,
            target,
            json,
        } => {
            let mut form = CreateGameForm::new(settings);
            if let Some(dice) = dice {
                form.set_dice_count(*dice)?;
            }
            form.prediction = *prediction;
            if let Some(t) = target {
                form.set_target(*t);
            }
            if let Some(w) = wager {
                form.wager = *w;
            }

            let request = form.submit(wallet.as_deref(), settings, &mut OsRng)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                show_create(&form, settings, &request)?;
            }
        }
        Commands::Lobby { file } => {
            let text = std::fs::read_to_string(file)?;
            let games = GameSnapshot::list_from_json(&text)?;
            show_lobby(&games);
        }
        Commands::Game {
            file,
            viewer,
            join,
            seed,
        } => {
            let text = std::fs::read_to_string(file)?;
            let game = GameSnapshot::from_json(&text)?;
            debug!(path = %file.display(), game = %game.public_key, "loaded game snapshot");
            show_game(&game, viewer.as_deref(), *join, *seed, settings)?;
        }
        Commands::Settings { write } => {
            println!("{}", settings.to_ron()?);
            if *write {
                settings.save(settings_path)?;
                println!(
                    "{} {}",
                    "Saved:".bold().green(),
                    settings_path.display()
                );
            }
        }
    }

    Ok(())
}

// ============================================================================
// Odds
// ============================================================================

fn print_banner() {
    println!("{}", "═══════════════════════════════════════".cyan());
}

fn show_range(dice: u32) {
    let (min, max) = roll_range(dice);
    print_banner();
    println!("{} {}d{}", "Dice:".bold().white(), dice, DICE_FACES);
    println!("{} {}-{}", "Range:".bold().white(), min, max);
    println!(
        "{} {}",
        "Default target:".bold().white(),
        duel::default_target(dice).to_string().yellow()
    );
    print_banner();
}

fn format_odds(odds: f64) -> String {
    if odds > 0.0 {
        format!("{:.2}x", odds)
    } else {
        "-".to_string()
    }
}

fn show_quote(dice: u32, prediction: Prediction, target: u32, q: &OddsQuote) {
    print_banner();
    println!(
        "{} {}d{} {} {}",
        "Bet:".bold().white(),
        dice,
        DICE_FACES,
        prediction.label().yellow().bold(),
        target
    );
    println!("{} {}", "Model:".bold().white(), q.model.name().dimmed());

    if !q.is_priced() {
        let (min, max) = roll_range(dice);
        println!(
            "{} {}",
            "Odds:".bold().white(),
            format!("cannot be priced (target range {}-{})", min, max).red()
        );
    } else {
        println!(
            "{} {} / {}",
            "Outcomes:".bold().white(),
            q.favorable,
            q.total
        );
        println!(
            "{} {:.2}%",
            "Win chance:".bold().white(),
            q.probability * 100.0
        );
        println!(
            "{} {}",
            "Odds:".bold().white(),
            format_odds(q.odds).bright_green().bold()
        );
    }
    print_banner();
}

fn show_odds_table(dice: u32, prediction: Prediction, model: OddsModel) {
    let (min, max) = roll_range(dice);
    print_banner();
    println!(
        "{} {}d{} {} ({})",
        "Odds table:".bold().white(),
        dice,
        DICE_FACES,
        prediction.label().yellow().bold(),
        model.name().dimmed()
    );
    println!("  {:>6}  {:>10}  {:>8}", "Target", "Win chance", "Odds");
    for target in min..=max {
        let q = quote(model, dice, prediction, target);
        println!(
            "  {:>6}  {:>9.2}%  {:>8}",
            target,
            q.probability * 100.0,
            format_odds(q.odds)
        );
    }
    print_banner();
}

fn show_check(total: u32, prediction: &str, target: u32) {
    print_banner();
    println!(
        "{} {} {} {}",
        "Check:".bold().white(),
        total,
        prediction.yellow(),
        target
    );
    if Prediction::from_wire(prediction).is_none() {
        println!(
            "{}",
            format!("Unknown prediction '{}' never wins", prediction).dimmed()
        );
    }
    if check_win_mode(total, prediction, target) {
        println!("{}", "WIN".bright_green().bold());
    } else {
        println!("{}", "LOSE".bright_red().bold());
    }
    print_banner();
}

// ============================================================================
// Rolling and Simulation
// ============================================================================

fn roll_dice(dice: u32, seed: Option<u64>) -> DiceResult {
    match seed {
        Some(seed) => DiceResult::roll_seeded(dice, seed),
        None => DiceResult::roll(dice, &mut rand::thread_rng()),
    }
}

fn print_dice(result: &DiceResult) {
    let rolls_str: Vec<String> = result
        .rolls
        .iter()
        .map(|r| format!("[{}]", r).bright_white().bold().to_string())
        .collect();
    println!("{} {}", "Dice:".bold().white(), rolls_str.join(" "));
    println!(
        "{} {}",
        "Total:".bold().white(),
        result.total.to_string().yellow().bold()
    );
}

fn run_simulation(sim: &DebugDuel, seed: Option<u64>) {
    let outcome = match seed {
        Some(seed) => sim.play(&mut StdRng::seed_from_u64(seed)),
        None => sim.play(&mut rand::thread_rng()),
    };

    print_banner();
    println!("{}", "DEBUG DUEL".bold().yellow());
    print_banner();
    for (side, wins) in [
        (PlayerSide::One, outcome.player1_wins),
        (PlayerSide::Two, outcome.player2_wins),
    ] {
        let player = sim.player(side);
        let mark = if wins {
            "Won".bright_green().bold()
        } else {
            "Lost".dimmed()
        };
        println!(
            "  {} {} {}  {}",
            format!("{}:", sim.seat_name(side)).bold(),
            player.prediction.name().cyan(),
            player.target,
            mark
        );
    }
    println!();
    print_dice(&outcome.roll);

    let title = if outcome.is_tie() {
        outcome.title().yellow().bold()
    } else if outcome.you_won {
        outcome.title().bright_green().bold()
    } else {
        outcome.title().bright_red().bold()
    };
    println!("{}", title);
    if let Some(detail) = outcome.tie_detail() {
        println!("{}", detail.dimmed());
    }
    print_banner();
}

// ============================================================================
// Create, Lobby and Game Screens
// ============================================================================

fn show_create(
    form: &CreateGameForm,
    settings: &DuelSettings,
    request: &duel::CreateGameRequest,
) -> duel::Result<()> {
    let symbol = settings
        .token
        .as_ref()
        .map(|t| t.symbol.as_str())
        .unwrap_or("SOL");
    let config = form.config();
    let q = form.quote(settings.odds_model);

    print_banner();
    println!("{}", "CREATE DICE DUEL".bold().yellow());
    print_banner();
    println!("{} {} {}", "Wager:".bold().white(), form.wager, symbol);
    println!("{} {}", "Bet:".bold().white(), config.label().cyan());
    println!("{} {}", "Odds:".bold().white(), format_odds(q.odds).green());
    println!(
        "{} {} bps",
        "Platform fee:".bold().white(),
        request.creator_fee_bps
    );
    println!(
        "{} {}",
        "Game seed:".bold().white(),
        request.params.game_seed.to_string().dimmed()
    );
    println!("{} {}", "Metadata:".bold().white(), request.metadata);
    println!("\n{}", serde_json::to_string_pretty(&request.params)?);
    print_banner();
    Ok(())
}

fn show_lobby(games: &[GameSnapshot]) {
    print_banner();
    println!("{}", "DICE DUEL LOBBY".bold().yellow());
    print_banner();

    if games.is_empty() {
        println!("{}", EMPTY_LOBBY_MESSAGE.dimmed());
        print_banner();
        return;
    }

    println!(
        "  {:<8} {:<16} {:<8} {:<10} {}",
        "Creator", "Config", "Players", "Bet", "Status"
    );
    for row in lobby_rows(games, now_millis() as i64) {
        let status = match row.status {
            duel::LobbyStatus::Waiting { .. } => row.status.label().yellow(),
            duel::LobbyStatus::Ready => row.status.label().green(),
            duel::LobbyStatus::Started => row.status.label().dimmed(),
        };
        println!(
            "  {:<8} {:<16} {:<8} {:<10} {}",
            row.creator, row.config, row.players, row.bet, status
        );
    }
    print_banner();
}

/// Status shown while a revealed result is held back for `reveal_delay`.
fn held_back_status(view: &GameView, reveal_delay: Duration) -> Option<GameStatus> {
    (view.revealed().is_some() && !reveal_delay.is_zero()).then_some(GameStatus::Rolling)
}

fn show_game(
    game: &GameSnapshot,
    viewer: Option<&str>,
    join: Option<Prediction>,
    seed: Option<u64>,
    settings: &DuelSettings,
) -> duel::Result<()> {
    let mut view = GameView::new(game, viewer);
    match seed {
        Some(seed) => view.reveal(settings, &mut StdRng::seed_from_u64(seed)),
        None => view.reveal(settings, &mut rand::thread_rng()),
    };

    print_banner();
    println!(
        "{} {}",
        "Game:".bold().white(),
        game.public_key.as_str().dimmed()
    );

    let reveal_delay = Duration::from_millis(settings.reveal_delay_ms);
    if let Some(pending) = held_back_status(&view, reveal_delay) {
        println!(
            "{} {}",
            "Status:".bold().white(),
            pending.label().yellow()
        );
        thread::sleep(reveal_delay);
    }

    let status = view.status();
    println!("{} {}", "Status:".bold().white(), status.label().yellow());
    if let Some(countdown) = view.countdown_label(now_millis() as i64) {
        println!("  {}", countdown);
    }

    let (p1, p2) = view.player_slots();
    let winner = view.winner();
    for (n, slot) in [(1, p1), (2, p2)] {
        match slot {
            Some(slot) => {
                let name = if winner == Some(slot.key.as_str()) {
                    slot.name().bright_green().bold()
                } else {
                    slot.name().bold()
                };
                println!(
                    "  {} {}  {}",
                    format!("P{}:", n).bold(),
                    name,
                    slot.prediction_label().cyan()
                );
            }
            None => println!("  {} {}", format!("P{}:", n).bold(), "Open slot".dimmed()),
        }
    }

    if let Some(roll) = view.revealed() {
        println!();
        print_dice(roll);
        let title = if view.i_won() {
            view.result_title().bright_green().bold()
        } else {
            view.result_title().bright_red().bold()
        };
        println!("{}", title);
        if let Some(subtitle) = view.result_subtitle() {
            println!("{}", subtitle);
        }
    }

    if let Some(prediction) = join {
        if viewer.is_none() || view.can_join() {
            let request = view.join(viewer, settings, prediction)?;
            println!("{}", "Join request:".bold().white());
            println!("{}", serde_json::to_string_pretty(&request)?);
        } else {
            println!("{}", "Cannot join this game".dimmed());
        }
    }
    print_banner();
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
