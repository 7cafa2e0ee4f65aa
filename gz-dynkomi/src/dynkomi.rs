//! Strategy dispatch and the `none` / `linear` variants.

use gz_core::Board;
use serde::{Deserialize, Serialize};

use crate::adaptive::AdaptiveDynkomi;
use crate::options::{parse_flag, parse_value, split_options, ConfigError};
use crate::stats::MoveStats;
use crate::tree::{Node, Tree};

/// Dynamic komi controller owned by the search session.
///
/// Created once per game via [`Dynkomi::create`] (or [`Dynkomi::from_spec`]),
/// queried before each move's search (`permove`) and once per simulation
/// (`persim`). The search feeds the `score` and `value` statistics with one
/// Black-POV result per finished playout; the adaptive strategy consumes them
/// with a snapshot + soft-reset at move granularity.
#[derive(Debug)]
pub struct Dynkomi {
    strategy: Strategy,
    /// Running expected score margin (Black POV points).
    pub score: MoveStats,
    /// Running Black win probability in [0, 1].
    pub value: MoveStats,
}

#[derive(Debug)]
enum Strategy {
    None,
    Linear(LinearDynkomi),
    Adaptive(AdaptiveDynkomi),
}

impl Dynkomi {
    /// Build a strategy by name with an optional colon-separated option list.
    ///
    /// Accepted names (case-insensitive): `none`/`fixed`, `linear`/
    /// `scheduled`, `adaptive`. Any configuration problem is fatal: no
    /// controller is created.
    pub fn create(kind: &str, args: Option<&str>, board: &Board) -> Result<Dynkomi, ConfigError> {
        let strategy = match kind.to_ascii_lowercase().as_str() {
            "none" | "fixed" => {
                if args.is_some() {
                    return Err(ConfigError::UnexpectedArguments { strategy: "none" });
                }
                Strategy::None
            }
            "linear" | "scheduled" => Strategy::Linear(LinearDynkomi::new(args, board)?),
            "adaptive" => Strategy::Adaptive(AdaptiveDynkomi::new(args, board)?),
            _ => {
                return Err(ConfigError::UnknownStrategy {
                    name: kind.to_string(),
                })
            }
        };
        Ok(Dynkomi {
            strategy,
            score: MoveStats::new(),
            value: MoveStats::new(),
        })
    }

    /// Build from a combined `kind[:options]` spec string, the form a
    /// `dynkomi=...` engine option arrives in.
    pub fn from_spec(spec: &str, board: &Board) -> Result<Dynkomi, ConfigError> {
        match spec.split_once(':') {
            Some((kind, args)) => Dynkomi::create(kind, Some(args), board),
            None => Dynkomi::create(spec, None, board),
        }
    }

    /// Compensation to apply for the upcoming move's search.
    ///
    /// The caller stores the result in [`Tree::extra_komi`]; re-invoking
    /// mid-search (continuous re-adaptation) is the caller's policy.
    pub fn permove(&mut self, board: &Board, tree: &Tree) -> f32 {
        match &mut self.strategy {
            Strategy::None => 0.0,
            Strategy::Linear(linear) => linear.permove(board),
            Strategy::Adaptive(adaptive) => {
                adaptive.permove(board, tree, &mut self.score, &mut self.value)
            }
        }
    }

    /// Compensation to apply at one simulation's node. O(1), no side effects.
    pub fn persim(&self, board: &Board, tree: &Tree, node: &Node) -> f32 {
        match &self.strategy {
            Strategy::None => 0.0,
            Strategy::Linear(linear) => linear.persim(board, tree, node),
            Strategy::Adaptive(adaptive) => adaptive.persim(tree),
        }
    }
}

/// Linear strategy configuration.
///
/// The `Default` values are the large-board ones; [`LinearConfig::defaults_for`]
/// picks the small-board engine default (`moves = 0`, inert) below 19x19.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// Move budget: compensation reaches zero here and stays there.
    pub moves: u32,
    /// Point value of a single handicap stone.
    pub handicap_value: f32,
    /// Share one tree-wide value per move instead of recomputing per node depth.
    pub rootbased: bool,
}

impl Default for LinearConfig {
    fn default() -> Self {
        LinearConfig {
            moves: 200,
            handicap_value: 7.0,
            rootbased: false,
        }
    }
}

impl LinearConfig {
    pub fn defaults_for(board: &Board) -> LinearConfig {
        let mut cfg = LinearConfig::default();
        if !board.is_large() {
            cfg.moves = 0;
        }
        cfg
    }
}

/// Linearly decreasing handicap compensation.
///
/// At move 0 the extra komi is the full handicap compensation
/// (`effective_handicap * handicap_value`), decayed linearly to exactly zero
/// at `moves` moves played and beyond.
#[derive(Debug)]
pub struct LinearDynkomi {
    pub cfg: LinearConfig,
}

impl LinearDynkomi {
    pub fn new(args: Option<&str>, board: &Board) -> Result<LinearDynkomi, ConfigError> {
        let mut cfg = LinearConfig::defaults_for(board);
        if let Some(args) = args {
            for (name, value) in split_options(args) {
                match name.as_str() {
                    "moves" => cfg.moves = parse_value(&name, value)?,
                    "handicap_value" => cfg.handicap_value = parse_value(&name, value)?,
                    "rootbased" => cfg.rootbased = parse_flag(&name, value)?,
                    _ => return Err(ConfigError::InvalidOption { name }),
                }
            }
        }
        Ok(LinearDynkomi::with_config(cfg))
    }

    pub fn with_config(cfg: LinearConfig) -> LinearDynkomi {
        LinearDynkomi { cfg }
    }

    pub fn permove(&self, board: &Board) -> f32 {
        self.extra_komi_at(board, board.moves)
    }

    pub fn persim(&self, board: &Board, tree: &Tree, node: &Node) -> f32 {
        if self.cfg.rootbased {
            return tree.extra_komi;
        }
        // Compute the value for this node's own depth rather than reusing
        // tree.extra_komi, so values attached to a subtree stay correct when
        // it is promoted to root on tree reuse.
        self.extra_komi_at(board, board.moves + node.depth)
    }

    fn extra_komi_at(&self, board: &Board, played: u32) -> f32 {
        // The guard also covers moves == 0 (small-board default): the
        // strategy is inert and the division below can't see a zero budget.
        if played >= self.cfg.moves {
            return 0.0;
        }
        let base_komi = board.effective_handicap(self.cfg.handicap_value);
        base_komi * (self.cfg.moves - played) as f32 / self.cfg.moves as f32
    }
}
