//! Self-play match generation.
//!
//! Plays whole matches with random reinforcements: every turn each player
//! may spawn a unit on its home row, then one turn is resolved. Matches run
//! until a player is eliminated or the turn limit is reached. Used for
//! soak-testing the resolver and for benchmarking.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{
    Board, BoardError, BoardSetup, Coord, PlayerSetup, PlayerSnapshot, Side, UnitKind, UnitSetup,
};
use crate::config::TurnConfig;
use crate::observe::{NoSkills, NullObserver};
use crate::resolve::TurnResolver;

const KINDS: [UnitKind; 3] = [UnitKind::Footman, UnitKind::Archer, UnitKind::Knight];

/// Errors that stop a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("grid must be at least 1x4, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("spawn chance must be within 0..=1, got {0}")]
    InvalidSpawnChance(f64),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play match generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_matches: usize,
    /// Turn limit per match.
    pub max_turns: u32,
    pub width: usize,
    /// Rows including both scoring rows.
    pub height: usize,
    pub player_hp: i32,
    /// Chance per player per turn of spawning a unit.
    pub spawn_chance: f64,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Base turn configuration. Scoring rows are overridden from `height`.
    pub turn: TurnConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_matches: 10,
            max_turns: 200,
            width: 5,
            height: 8,
            player_hp: 20,
            spawn_chance: 0.6,
            threads: 4,
            seed: 0,
            turn: TurnConfig::default(),
        }
    }
}

/// Summary of one finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub match_id: usize,
    pub turns: u32,
    /// The eliminated player, or `None` if the turn limit was hit.
    pub loser: Option<String>,
    pub final_players: Vec<PlayerSnapshot>,
    pub units_spawned: usize,
    pub units_lost: usize,
    pub combat_events: usize,
}

fn check_config(config: &SelfPlayConfig) -> Result<(), SelfPlayError> {
    if config.width < 1 || config.height < 4 {
        return Err(SelfPlayError::GridTooSmall {
            width: config.width,
            height: config.height,
        });
    }
    if !(0.0..=1.0).contains(&config.spawn_chance) {
        return Err(SelfPlayError::InvalidSpawnChance(config.spawn_chance));
    }
    Ok(())
}

fn empty_board(config: &SelfPlayConfig) -> Result<Board, SelfPlayError> {
    let player = |name: &str, side| PlayerSetup {
        name: name.to_string(),
        hp: config.player_hp,
        mp: 0,
        side,
    };
    Ok(Board::from_setup(&BoardSetup {
        width: config.width,
        height: config.height,
        players: vec![player("north", Side::Top), player("south", Side::Bottom)],
        units: Vec::new(),
    })?)
}

/// Row a side's reinforcements appear on: one row inside its own scoring row.
fn home_row(side: Side, height: usize) -> i32 {
    match side {
        Side::Top => 1,
        Side::Bottom => height as i32 - 2,
    }
}

/// Possibly spawns one unit per player. Returns the number spawned.
fn spawn_reinforcements(
    board: &mut Board,
    config: &SelfPlayConfig,
    serial: &mut usize,
    rng: &mut SmallRng,
) -> Result<usize, BoardError> {
    let mut spawned = 0;
    let owners: Vec<(String, Side)> = board
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.side))
        .collect();
    for (owner, side) in owners {
        if !rng.gen_bool(config.spawn_chance) {
            continue;
        }
        let at = Coord::new(
            rng.gen_range(0..config.width as i32),
            home_row(side, config.height),
        );
        if board.grid().get(at).is_some() {
            continue;
        }
        let kind = KINDS[rng.gen_range(0..KINDS.len())];
        *serial += 1;
        let name = format!("{}-{}{}", owner, kind.symbol(), serial);
        board.place_unit(UnitSetup::new(
            &name,
            kind,
            &owner,
            at,
            rng.gen_range(6..=12),
            rng.gen_range(1..=10),
        ))?;
        spawned += 1;
    }
    Ok(spawned)
}

/// Plays a single match and returns its record.
pub fn play_match(
    config: &SelfPlayConfig,
    match_id: usize,
    rng: &mut SmallRng,
) -> Result<MatchRecord, SelfPlayError> {
    check_config(config)?;
    let mut board = empty_board(config)?;
    let mut turn_config = config.turn.clone();
    turn_config.score_row_top = 0;
    turn_config.score_row_bottom = config.height as i32 - 1;
    turn_config.seed = rng.gen();
    let mut resolver = TurnResolver::with_parts(turn_config, NoSkills, NullObserver);

    let mut record = MatchRecord {
        match_id,
        turns: 0,
        loser: None,
        final_players: Vec::new(),
        units_spawned: 0,
        units_lost: 0,
        combat_events: 0,
    };
    let mut serial = 0;

    while record.turns < config.max_turns {
        record.units_spawned += spawn_reinforcements(&mut board, config, &mut serial, rng)?;
        let report = resolver.resolve(&mut board)?;
        record.turns += 1;
        record.units_lost += report.updated_units.iter().filter(|u| !u.alive).count();
        record.combat_events += report.combat_log.len();
        if report.loser.is_some() {
            record.loser = report.loser;
            break;
        }
    }

    record.final_players = board.players().iter().map(|p| p.snapshot()).collect();
    Ok(record)
}

fn match_rng(seed: u64, match_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(match_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays `config.num_matches` matches and returns their records in match
/// order.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
/// Each match owns its board and RNG; nothing is shared between them.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<MatchRecord>, SelfPlayError> {
    check_config(config)?;
    if config.threads <= 1 {
        return (0..config.num_matches)
            .map(|i| play_match(config, i, &mut match_rng(config.seed, i)))
            .collect();
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    pool.install(|| {
        (0..config.num_matches)
            .into_par_iter()
            .map(|i| {
                let record = play_match(config, i, &mut match_rng(config.seed, i));
                if let Ok(r) = &record {
                    tracing::debug!(
                        match_id = i,
                        turns = r.turns,
                        loser = r.loser.as_deref().unwrap_or("-"),
                        "match finished"
                    );
                }
                record
            })
            .collect()
    })
}

/// Writes match records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints aggregate results to stderr.
pub fn print_summary(records: &[MatchRecord]) {
    let total = records.len();
    let undecided = records.iter().filter(|r| r.loser.is_none()).count();
    let turns: u64 = records.iter().map(|r| r.turns as u64).sum();

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Matches: {}", total);
    for name in ["north", "south"] {
        let losses = records
            .iter()
            .filter(|r| r.loser.as_deref() == Some(name))
            .count();
        eprintln!("{} eliminated: {}", name, losses);
    }
    eprintln!("Undecided (turn limit): {}", undecided);
    if total > 0 {
        eprintln!("Average turns: {:.1}", turns as f64 / total as f64);
    }
}
