//! Tengen: the decision core for a Go-playing AI.
//!
//! The crate pairs a full board rule engine (stone placement, chain and
//! liberty computation, capture resolution, suicide prevention, a
//! simplified ko rule, area scoring) with a Monte Carlo tree search that
//! explores it through cloned, independently owned game states.
//!
//! ## Modules
//!
//! - [`coord`] - Coordinates, cell colors and player sides
//! - [`board`] - The board rule engine
//! - [`game`] - Turn sequencing over one authoritative board
//! - [`state`] - The search-facing game state and move types
//! - [`mcts`] - The generic tree search consuming that state
//! - [`constants`] - Engine parameters
//!
//! ## Example
//!
//! ```
//! use tengen::mcts::{Mcts, MctsConfig};
//! use tengen::state::GoState;
//!
//! let state = GoState::new(5);
//! let config = MctsConfig { simulations: 50, ..MctsConfig::default() };
//! let mut search = Mcts::new(state, config, 42);
//! if let Some(best) = search.search() {
//!     println!("{best}");
//! }
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod game;
pub mod mcts;
pub mod state;
