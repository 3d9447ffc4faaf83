#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Slide Merge game.

mod render;
mod settings;

use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use slide_merge_core::{GameStatus, SwipeCommand, TileValue};
use slide_merge_system_session::Session;

use crate::{render::render_board, settings::GameSettings};

/// Plays swipes against a fresh board and prints the board after each one.
#[derive(Parser, Debug)]
#[command(name = "slide-merge", version, about)]
struct Cli {
    /// Path to a TOML settings file; flags override its values.
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Number of cells along each board edge.
    #[arg(long)]
    size: Option<u32>,

    /// Seed for tile placement; omit for a random game.
    #[arg(long)]
    seed: Option<u64>,

    /// Tile value that wins the game.
    #[arg(long)]
    target: Option<u32>,

    /// Value of the very first tile on an empty board.
    #[arg(long)]
    first_tile: Option<u32>,

    /// Comma-separated pool that spawned values are drawn from.
    #[arg(long, value_delimiter = ',')]
    values: Option<Vec<u32>>,

    /// Tiles placed on a fresh board.
    #[arg(long)]
    initial_tiles: Option<usize>,

    /// Swipes to play, e.g. "up,left,ArrowDown" or "ULDR".
    #[arg(long, default_value = "")]
    moves: String,
}

impl Cli {
    fn overrides(&self) -> Result<GameSettings> {
        let values = match &self.values {
            Some(raw) => Some(
                raw.iter()
                    .map(|value| TileValue::new(*value))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(GameSettings {
            size: self.size,
            seed: self.seed,
            target: self.target.map(TileValue::new).transpose()?,
            first_tile: self.first_tile.map(TileValue::new).transpose()?,
            values,
            initial_tiles: self.initial_tiles,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let file_settings = match &cli.config {
        Some(path) => GameSettings::from_path(path)?,
        None => GameSettings::default(),
    };
    let settings = file_settings.merged_with(cli.overrides()?);
    let swipes = parse_moves(&cli.moves)?;

    let mut session = Session::new(settings.into_session_config()?)
        .context("failed to start a new game")?;
    let board = session.board().context("session has no board")?;
    println!("{}", render_board(board));

    for (turn, swipe) in swipes.into_iter().enumerate() {
        if session.status() == GameStatus::Lost {
            info!("no moves left after {turn} swipes");
            break;
        }
        let moved = session
            .swipe(swipe)
            .with_context(|| format!("swipe {swipe:?} failed"))?;
        session.settle()?;
        info!("turn {}: {swipe:?} moved={moved}", turn + 1);

        let board = session.board().context("session has no board")?;
        println!("{swipe:?}\n{}", render_board(board));
    }

    println!("status: {:?}", session.status());
    Ok(())
}

/// Splits a move script into swipes.
///
/// Tokens are separated by commas or whitespace; a token that is not a swipe
/// name is read as a run of single-letter swipes.
fn parse_moves(script: &str) -> Result<Vec<SwipeCommand>> {
    let mut swipes = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        if let Ok(swipe) = SwipeCommand::from_str(token) {
            swipes.push(swipe);
            continue;
        }
        for letter in token.chars() {
            match SwipeCommand::from_str(letter.encode_utf8(&mut [0; 4])) {
                Ok(swipe) => swipes.push(swipe),
                Err(_) => bail!("unrecognised move {token:?}"),
            }
        }
    }
    Ok(swipes)
}
