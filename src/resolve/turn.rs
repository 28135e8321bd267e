//! Turn orchestration.
//!
//! Sorts units into acting order once, then runs scoring, skills, attacks,
//! and movement. Scoring can eliminate a player, which ends the turn (and
//! the match) before any other phase runs.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::board::{Board, BoardError};
use crate::config::TurnConfig;
use crate::observe::{NoSkills, SkillEngine, TracingObserver, TurnObserver};

use super::initiative::sort_by_initiative;
use super::phase::TurnPhase;
use super::report::TurnReport;
use super::{attack, movement, scoring, skill};

/// Resolves turns for one match.
///
/// Owns the configuration, the attack-roll RNG, and the two collaborators.
/// Reuse one resolver across the turns of a match so the roll sequence
/// continues from where the last turn left off.
#[derive(Debug, Clone)]
pub struct TurnResolver<S = NoSkills, O = TracingObserver> {
    config: TurnConfig,
    rng: SmallRng,
    skills: S,
    observer: O,
}

impl TurnResolver {
    /// Creates a resolver with no skill effects that logs through `tracing`.
    pub fn new(config: TurnConfig) -> Self {
        TurnResolver::with_parts(config, NoSkills, TracingObserver::default())
    }
}

impl<S: SkillEngine, O: TurnObserver> TurnResolver<S, O> {
    /// Creates a resolver with the given collaborators, seeded from
    /// `config.seed`.
    pub fn with_parts(config: TurnConfig, skills: S, observer: O) -> Self {
        let rng = SmallRng::seed_from_u64(config.seed);
        TurnResolver {
            config,
            rng,
            skills,
            observer,
        }
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    pub fn skills(&self) -> &S {
        &self.skills
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Applies one turn to `board`.
    ///
    /// On success the board holds no dead units and its grid agrees with the
    /// unit arena. An error means the board was malformed; its contents are
    /// then partially resolved and should be discarded.
    pub fn resolve(&mut self, board: &mut Board) -> Result<TurnReport, BoardError> {
        let mut report = TurnReport::default();
        sort_by_initiative(&mut board.units);

        self.observer.phase_started(TurnPhase::Scoring);
        let loser = scoring::run(board, &self.config, &mut report)?;
        self.observer.phase_finished(TurnPhase::Scoring, &report);
        if let Some(name) = loser {
            self.observer.player_eliminated(&name);
            report.loser = Some(name);
            return Ok(report);
        }

        self.observer.phase_started(TurnPhase::Skill);
        skill::run(board, &mut self.skills, &mut report)?;
        self.observer.phase_finished(TurnPhase::Skill, &report);

        self.observer.phase_started(TurnPhase::Attack);
        attack::run(board, &self.config, &mut self.rng, &mut report)?;
        self.observer.phase_finished(TurnPhase::Attack, &report);

        self.observer.phase_started(TurnPhase::Move);
        movement::run(board, &mut self.observer, &mut report)?;
        self.observer.phase_finished(TurnPhase::Move, &report);

        board.check_consistency()?;
        Ok(report)
    }
}

/// Builds one default resolver per match, match `i` seeded with
/// `config.seed + i`.
pub fn match_resolvers(config: &TurnConfig, count: usize) -> Vec<TurnResolver> {
    (0..count)
        .map(|i| {
            let mut match_config = config.clone();
            match_config.seed = config.seed.wrapping_add(i as u64);
            TurnResolver::new(match_config)
        })
        .collect()
}

/// Resolves one turn on each of many independent matches in parallel.
///
/// Each match keeps its own resolver, so calling this once per turn
/// continues every match's roll sequence. Results come back in match order.
pub fn resolve_matches<S, O>(
    matches: &mut [(TurnResolver<S, O>, Board)],
) -> Vec<Result<TurnReport, BoardError>>
where
    S: SkillEngine + Send,
    O: TurnObserver + Send,
{
    matches
        .par_iter_mut()
        .map(|(resolver, board)| resolver.resolve(board))
        .collect()
}
