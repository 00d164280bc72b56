use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use td_connect_four::ai::{HumanPlayer, Player, RandomPlayer, ReplayTdPlayer, TdPlayer};
use td_connect_four::arena::{Match, MatchResult};
use td_connect_four::config::AppConfig;
use td_connect_four::game::Color;
use td_connect_four::training::Trainer;

/// Train Connect Four players via self-play, then optionally play them.
#[derive(Parser)]
#[command(name = "td-connect-four", about = "Connect Four self-play TD training")]
struct Cli {
    /// White player (moves first): td, replay, or random
    #[arg(long, default_value = "td")]
    white: String,

    /// Red player: td, replay, or random
    #[arg(long, default_value = "td")]
    red: String,

    /// Override number of training matches
    #[arg(long)]
    matches: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override exploration rate for both learner kinds
    #[arg(long)]
    epsilon: Option<f64>,

    /// Override learning rate for both learner kinds
    #[arg(long)]
    alpha: Option<f64>,

    /// After training, play console matches against the trained players
    #[arg(long)]
    play: bool,
}

fn build_player(kind: &str, config: &AppConfig) -> Result<Box<dyn Player>> {
    Ok(match kind {
        "td" => Box::new(TdPlayer::new(config.td.clone())),
        "replay" => Box::new(ReplayTdPlayer::new(config.replay.clone())),
        "random" => Box::new(RandomPlayer::new()),
        other => bail!(
            "unknown player kind '{}' (expected 'td', 'replay', or 'random')",
            other
        ),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides, then re-validate.
    if let Some(matches) = cli.matches {
        config.training.num_matches = matches;
    }
    if let Some(epsilon) = cli.epsilon {
        config.td.epsilon = epsilon;
        config.replay.epsilon = epsilon;
    }
    if let Some(alpha) = cli.alpha {
        config.td.alpha = alpha;
        config.replay.alpha = alpha;
    }
    config.validate()?;

    let mut white = build_player(&cli.white, &config)?;
    let mut red = build_player(&cli.red, &config)?;

    println!(
        "Training {} (White) vs {} (Red) for {} matches...",
        cli.white, cli.red, config.training.num_matches
    );
    let trainer = Trainer::new(config.training.clone());
    let metrics = trainer.train(white.as_mut(), red.as_mut());

    let window = metrics.total_matches();
    println!("-------------------------------------------");
    println!(
        "Final (last {} matches): white {:.1}% | red {:.1}% | draw {:.1}%",
        window.min(100),
        metrics.win_rate(Color::White, 100) * 100.0,
        metrics.win_rate(Color::Red, 100) * 100.0,
        metrics.draw_rate(100) * 100.0,
    );

    if cli.play {
        white.set_learning(false);
        red.set_learning(false);
        play_against(white.as_mut(), red.as_mut())?;
    }

    Ok(())
}

/// Alternate console matches: the human takes White against the trained Red
/// player, then Red against the trained White player.
fn play_against(white: &mut dyn Player, red: &mut dyn Player) -> Result<()> {
    loop {
        let mut human = HumanPlayer::new();
        let result = Match::new(&mut human, &mut *red).play();
        announce(result, Color::White);

        let mut human = HumanPlayer::new();
        let result = Match::new(&mut *white, &mut human).play();
        announce(result, Color::Red);

        print!("Play again? (Y/N) ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if !line.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
    }
}

fn announce(result: MatchResult, human_color: Color) {
    match result.winner {
        Some(color) if color == human_color => {
            println!("You win after {} moves!", result.moves)
        }
        Some(color) => println!("{} wins after {} moves.", color.name(), result.moves),
        None => println!("A draw."),
    }
}
