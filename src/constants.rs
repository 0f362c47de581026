//! Engine parameters: board defaults, game-end thresholds and search tuning.

// =============================================================================
// Board and rollout
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Rollout step cap factor: a playout is cut off after
/// `ROLLOUT_CAP_FACTOR * size * size` moves, which leaves room for captures
/// and refills without letting a simulation run forever.
pub const ROLLOUT_CAP_FACTOR: usize = 3;

// =============================================================================
// Game-end thresholds (counts of remaining legal moves)
// =============================================================================

/// A side left with this many legal moves or fewer has effectively lost;
/// the game is treated as decided.
pub const TERMINATION_THRESHOLD: usize = 2;

/// Passing becomes available once a side is down to this many legal moves
/// or fewer. Offering the pass earlier would only widen the branching.
pub const PASS_THRESHOLD: usize = 10;

// =============================================================================
// Search tuning
// =============================================================================

/// Default number of simulations per search.
pub const DEFAULT_SIMULATIONS: usize = 1400;

/// Minimum visits before a leaf node is expanded.
pub const EXPAND_VISITS: u32 = 8;

/// UCB1 exploration weight.
pub const UCB_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Fast-play threshold at 20% of simulations.
pub const FASTPLAY20_THRES: f64 = 0.8;

/// Fast-play threshold at 5% of simulations.
pub const FASTPLAY5_THRES: f64 = 0.95;
