//! Adaptive situational compensation.
//!
//! The komi is adapted to the measured game situation, by one of two
//! indicators:
//! - score: push the extra komi a time-varying fraction of the way towards
//!   the average playout score margin;
//! - value: while the winrate sits outside a hysteresis band, nudge the komi
//!   a fixed (or margin-scaled) step in the right direction.
//!
//! Adjustments happen in [`AdaptiveDynkomi::permove`]; whether that runs once
//! per move or periodically during a single move's search is the engine's
//! cadence to choose. `persim` only hands back the tree-wide cached value.

use gz_core::{komi_in_pov, Board, Stone};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::options::{parse_flag, parse_value, split_options, ConfigError};
use crate::stats::MoveStats;
use crate::tree::Tree;

/// Stone value used for the handicap-derived komi during the lead moves.
const LEAD_STONE_VALUE: f32 = 7.0;

/// Cap on the per-update adaptation rate: never let a single update swing
/// the full measured average into effect at once.
const MAX_ADAPT_RATE: f32 = 0.9;

/// Ratchet bound meaning "no losing level recorded yet".
const RATCHET_UNSET: f32 = 1000.0;

/// What signal drives the adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Expected score margin with the current komi.
    #[default]
    Score,
    /// Winrate with the current komi.
    Value,
}

/// How the score indicator's adaptation rate evolves with game progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adapter {
    /// Logistic curve over game progress: near 0 early, crosses 0.5 at
    /// `adapt_phase`, approaches 1 towards the end; slope is `adapt_rate`.
    #[default]
    Sigmoid,
    /// Linear ramp over the first `adapt_moves` moves, direction and
    /// magnitude given by `adapt_dir`; 0 past the budget.
    Linear,
}

/// Adaptive strategy configuration.
///
/// `Default` carries the large-board values; [`AdaptiveConfig::defaults_for`]
/// shortens the lead phase on small boards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Ignore measured statistics for the first N moves; the variance is too
    /// high, so the handicap-derived komi is used instead.
    pub lead_moves: u32,
    /// Maximum komi we will pretend the opponent gives us (hard floor).
    pub max_losing_komi: f32,
    pub indicator: Indicator,

    /// Value-indicator hysteresis band: reduce komi below `zone_red`, leave
    /// it alone up to `zone_green`, enlarge it above.
    pub zone_red: f32,
    pub zone_green: f32,
    /// Fixed komi adjustment step in points.
    pub score_step: i32,
    /// If nonzero, scale the step with the average score margin instead.
    pub score_step_byavg: f32,
    pub use_komi_ratchet: bool,
    /// Ratchet expiry: after this many ratchet-limited increases the bound is
    /// forgotten. 0 disables expiry.
    pub komi_ratchet_maxage: u32,

    pub adapter: Adapter,
    /// Base adaptation rate in [0, 1); the adapter output is scaled into the
    /// remaining range above it.
    pub adapt_base: f32,
    /// Sigmoid slope, [1, inf).
    pub adapt_rate: f32,
    /// Sigmoid phase shift, [0, 1].
    pub adapt_phase: f32,
    /// Alternative game-progress estimate from the free-point count instead
    /// of the move counter.
    pub adapt_aport: bool,
    /// Linear adapter move budget.
    pub adapt_moves: u32,
    /// Linear adapter direction, [-1, 1].
    pub adapt_dir: f32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        AdaptiveConfig {
            lead_moves: 20,
            max_losing_komi: 10.0,
            indicator: Indicator::Score,
            zone_red: 0.45,
            zone_green: 0.6,
            score_step: 2,
            score_step_byavg: 0.0,
            use_komi_ratchet: true,
            komi_ratchet_maxage: 0,
            adapter: Adapter::Sigmoid,
            adapt_base: 0.0,
            adapt_rate: 20.0,
            adapt_phase: 0.5,
            adapt_aport: false,
            adapt_moves: 200,
            adapt_dir: -0.5,
        }
    }
}

impl AdaptiveConfig {
    pub fn defaults_for(board: &Board) -> AdaptiveConfig {
        let mut cfg = AdaptiveConfig::default();
        if !board.is_large() {
            cfg.lead_moves = 4;
        }
        cfg
    }
}

/// Last komi level that still put us into the red zone, with an age counter
/// for expiry. Extra komi never grows back to (or past) the bound while the
/// ratchet holds; reductions are always allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ratchet {
    pub(crate) bound: f32,
    pub(crate) age: u32,
}

impl Ratchet {
    fn unset() -> Ratchet {
        Ratchet {
            bound: RATCHET_UNSET,
            age: 0,
        }
    }
}

/// The adaptive feedback controller.
#[derive(Debug)]
pub struct AdaptiveDynkomi {
    pub cfg: AdaptiveConfig,
    pub(crate) ratchet: Ratchet,
}

impl AdaptiveDynkomi {
    pub fn new(args: Option<&str>, board: &Board) -> Result<AdaptiveDynkomi, ConfigError> {
        let mut cfg = AdaptiveConfig::defaults_for(board);
        if let Some(args) = args {
            for (name, value) in split_options(args) {
                match name.as_str() {
                    "lead_moves" => cfg.lead_moves = parse_value(&name, value)?,
                    "max_losing_komi" => cfg.max_losing_komi = parse_value(&name, value)?,
                    "indicator" => cfg.indicator = parse_indicator(&name, value)?,

                    "zone_red" => cfg.zone_red = parse_value(&name, value)?,
                    "zone_green" => cfg.zone_green = parse_value(&name, value)?,
                    "score_step" => cfg.score_step = parse_value(&name, value)?,
                    "score_step_byavg" => cfg.score_step_byavg = parse_value(&name, value)?,
                    "use_komi_ratchet" => cfg.use_komi_ratchet = parse_flag(&name, value)?,
                    "komi_ratchet_age" => cfg.komi_ratchet_maxage = parse_value(&name, value)?,

                    "adapter" => cfg.adapter = parse_adapter(&name, value)?,
                    "adapt_base" => cfg.adapt_base = parse_value(&name, value)?,
                    "adapt_rate" => cfg.adapt_rate = parse_value(&name, value)?,
                    "adapt_phase" => cfg.adapt_phase = parse_value(&name, value)?,
                    "adapt_aport" => cfg.adapt_aport = parse_flag(&name, value)?,
                    "adapt_moves" => cfg.adapt_moves = parse_value(&name, value)?,
                    "adapt_dir" => cfg.adapt_dir = parse_value(&name, value)?,

                    _ => return Err(ConfigError::InvalidOption { name }),
                }
            }
        }
        Ok(AdaptiveDynkomi::with_config(cfg))
    }

    pub fn with_config(cfg: AdaptiveConfig) -> AdaptiveDynkomi {
        AdaptiveDynkomi {
            cfg,
            ratchet: Ratchet::unset(),
        }
    }

    pub fn permove(
        &mut self,
        board: &Board,
        tree: &Tree,
        score: &mut MoveStats,
        value: &mut MoveStats,
    ) -> f32 {
        debug!(
            "dynkomi: move {}/{} extra_komi {:.3} score {:.3}/{}",
            board.moves, self.cfg.lead_moves, tree.extra_komi, score.mean, score.playouts
        );
        if board.moves <= self.cfg.lead_moves {
            return board.effective_handicap(LEAD_STONE_VALUE);
        }

        let pov = tree.root_color.other();
        // Lower bound on the komi we take, so we never concede more than the
        // configured maximum no matter what the indicator does.
        let min_komi = komi_in_pov(-self.cfg.max_losing_komi, pov);

        let komi = match self.cfg.indicator {
            Indicator::Score => self.komi_by_score(board, tree, score),
            Indicator::Value => self.komi_by_value(tree, pov, score, value),
        };
        debug!("dynkomi: {:.3} -> {:.3}", tree.extra_komi, komi);

        if komi_in_pov(komi - min_komi, pov) > 0.0 {
            komi
        } else {
            min_komi
        }
    }

    /// Per-simulation value: the tree-wide cache, untouched.
    #[inline]
    pub fn persim(&self, tree: &Tree) -> f32 {
        tree.extra_komi
    }

    /// Push the extra komi a rate-limited fraction towards the measured
    /// average score margin.
    ///
    /// The POV is deliberately not consulted here: the score statistic is
    /// assumed to already be in the canonical frame.
    fn komi_by_score(&self, board: &Board, tree: &Tree, score: &mut MoveStats) -> f32 {
        if !score.is_trustworthy() {
            return tree.extra_komi;
        }
        let snapshot = score.soft_reset();

        let mut p = self.adaptation_rate(board);
        p = self.cfg.adapt_base + p * (1.0 - self.cfg.adapt_base);
        if p > MAX_ADAPT_RATE {
            p = MAX_ADAPT_RATE;
        }
        debug!("score indicator: += {:.3} * {:.3}", p, snapshot.mean);
        tree.extra_komi + p * snapshot.mean
    }

    /// Step the komi by zone membership of the measured winrate.
    fn komi_by_value(
        &mut self,
        tree: &Tree,
        pov: Stone,
        score: &mut MoveStats,
        value: &mut MoveStats,
    ) -> f32 {
        if !value.is_trustworthy() {
            return tree.extra_komi;
        }
        let mut winrate = value.soft_reset().mean;
        // Statistics are stored for Black.
        if pov.is_white() {
            winrate = 1.0 - winrate;
        }

        // Work in pov's frame so "increase" and "decrease" mean the same
        // thing for either side; map back on every return path.
        let mut local_komi = komi_in_pov(tree.extra_komi, pov);

        let mut step = self.cfg.score_step as f32;
        if self.cfg.score_step_byavg != 0.0 {
            let mut margin = score.soft_reset().mean;
            if pov.is_white() {
                margin = -margin;
            }
            if margin >= 0.0 {
                step = (margin * self.cfg.score_step_byavg).round();
            }
        }

        if winrate < self.cfg.zone_red {
            // Red zone: losing too often at this komi. Remember the level
            // that lost, then take extra komi.
            debug!(
                "value indicator: red {:.3}, -{} | ratchet {:.1} -> {:.3}",
                winrate, step, self.ratchet.bound, local_komi
            );
            if local_komi > 0.0 {
                self.ratchet.bound = local_komi;
            }
            local_komi -= step;
        } else if winrate < self.cfg.zone_green {
            // Yellow zone: hold.
        } else {
            // Green zone: winning comfortably, give extra komi — but not up
            // to a level the ratchet remembers as losing.
            local_komi += step;
            debug!(
                "value indicator: green {:.3}, +{} | ratchet {:.1} age {}",
                winrate, step, self.ratchet.bound, self.ratchet.age
            );
            if self.cfg.komi_ratchet_maxage > 0 && self.ratchet.age > self.cfg.komi_ratchet_maxage {
                self.ratchet = Ratchet::unset();
            }
            if self.cfg.use_komi_ratchet && local_komi >= self.ratchet.bound {
                local_komi = self.ratchet.bound - 1.0;
                self.ratchet.age += 1;
            }
        }
        komi_in_pov(local_komi, pov)
    }

    fn adaptation_rate(&self, board: &Board) -> f32 {
        match self.cfg.adapter {
            Adapter::Sigmoid => self.adapter_sigmoid(board),
            Adapter::Linear => self.adapter_linear(board),
        }
    }

    fn adapter_sigmoid(&self, board: &Board) -> f32 {
        let progress = if !self.cfg.adapt_aport {
            let total_moves = board.moves + 2 * board.estimated_moves_left();
            board.moves as f32 / total_moves as f32
        } else {
            1.0 - board.legal_moves as f32 / board.area() as f32
        };
        let l = progress - self.cfg.adapt_phase;
        1.0 / (1.0 + (-self.cfg.adapt_rate * l).exp())
    }

    fn adapter_linear(&self, board: &Board) -> f32 {
        if self.cfg.adapt_moves == 0 || board.moves > self.cfg.adapt_moves {
            return 0.0;
        }
        if self.cfg.adapt_dir < 0.0 {
            1.0 - (-self.cfg.adapt_dir) * board.moves as f32 / self.cfg.adapt_moves as f32
        } else {
            self.cfg.adapt_dir * board.moves as f32 / self.cfg.adapt_moves as f32
        }
    }
}

fn parse_indicator(name: &str, value: Option<&str>) -> Result<Indicator, ConfigError> {
    let raw = value.ok_or_else(|| ConfigError::InvalidOption {
        name: name.to_string(),
    })?;
    match raw.to_ascii_lowercase().as_str() {
        "score" => Ok(Indicator::Score),
        "value" => Ok(Indicator::Value),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_adapter(name: &str, value: Option<&str>) -> Result<Adapter, ConfigError> {
    let raw = value.ok_or_else(|| ConfigError::InvalidOption {
        name: name.to_string(),
    })?;
    match raw.to_ascii_lowercase().as_str() {
        "sigmoid" => Ok(Adapter::Sigmoid),
        "linear" => Ok(Adapter::Linear),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
