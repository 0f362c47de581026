//! Monte Carlo tree search over any game exposing the search contract.
//!
//! The tree never inspects a move's contents; it only stores moves as edges
//! and hands them back to the state. Selection uses UCB1, leaves are
//! expanded after a visit threshold, and new leaves are evaluated by the
//! state's own random rollout. Every simulation's outcome is a scalar in
//! [0, 1] from player one's perspective and is backpropagated along the
//! path taken.
//!
//! Randomness is owned by the search session and seeded explicitly, so runs
//! are reproducible.

use std::fmt;

use log::debug;

use crate::constants::{
    DEFAULT_SIMULATIONS, EXPAND_VISITS, FASTPLAY20_THRES, FASTPLAY5_THRES, UCB_EXPLORATION,
};

/// The contract a game must satisfy to be searchable.
pub trait SearchState: Clone {
    type Move: Clone + fmt::Display;

    /// Every move available in this state, pass included when offered.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The successor state after `mv`. The receiver is never mutated.
    fn apply(&self, mv: &Self::Move) -> Self;

    fn is_terminal(&self) -> bool;

    /// Simulate to the end of the game: 1.0 = player one wins,
    /// 0.0 = player two wins, 0.5 = draw.
    fn rollout(&self, rng: &mut fastrand::Rng) -> f64;

    /// True when the first-moving player is to move.
    fn player1_to_move(&self) -> bool;
}

/// Search parameters.
#[derive(Debug, Clone, Copy)]
pub struct MctsConfig {
    /// Simulations per search call.
    pub simulations: usize,
    /// Visits a node needs before its children are generated.
    pub expand_visits: u32,
    /// UCB1 exploration weight.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            simulations: DEFAULT_SIMULATIONS,
            expand_visits: EXPAND_VISITS,
            exploration: UCB_EXPLORATION,
        }
    }
}

/// A node in the search tree: a state, the move that led to it, and the
/// statistics gathered below it.
pub struct TreeNode<S: SearchState> {
    state: S,
    mv: Option<S::Move>,
    visits: u32,
    /// Sum of rollout outcomes, player-one perspective.
    wins: f64,
    children: Vec<TreeNode<S>>,
}

impl<S: SearchState> TreeNode<S> {
    fn new(state: S, mv: Option<S::Move>) -> Self {
        TreeNode {
            state,
            mv,
            visits: 0,
            wins: 0.0,
            children: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn mv(&self) -> Option<&S::Move> {
        self.mv.as_ref()
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn children(&self) -> &[TreeNode<S>] {
        &self.children
    }

    /// Mean outcome from player one's (`player1` true) or player two's
    /// perspective. Unvisited nodes report -0.1 so they read as unexplored.
    pub fn winrate(&self, player1: bool) -> f64 {
        if self.visits == 0 {
            return -0.1;
        }
        let mean = self.wins / self.visits as f64;
        if player1 { mean } else { 1.0 - mean }
    }

    /// Generate one child per legal move. No-op on terminal or already
    /// expanded nodes.
    fn expand(&mut self) {
        if !self.children.is_empty() || self.state.is_terminal() {
            return;
        }
        for mv in self.state.legal_moves() {
            let child_state = self.state.apply(&mv);
            self.children.push(TreeNode::new(child_state, Some(mv)));
        }
    }

    /// UCB1 urgency, judged from the parent's point of view. Unvisited
    /// children are infinitely urgent so each gets tried once.
    fn urgency(&self, parent_visits: u32, parent_player1: bool, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let exploit = self.winrate(parent_player1);
        let explore =
            exploration * ((parent_visits.max(1) as f64).ln() / self.visits as f64).sqrt();
        exploit + explore
    }
}

/// A search session: the tree root plus its private random generator.
pub struct Mcts<S: SearchState> {
    root: TreeNode<S>,
    rng: fastrand::Rng,
    config: MctsConfig,
}

impl<S: SearchState> Mcts<S> {
    pub fn new(state: S, config: MctsConfig, seed: u64) -> Self {
        Mcts {
            root: TreeNode::new(state, None),
            rng: fastrand::Rng::with_seed(seed),
            config,
        }
    }

    pub fn root(&self) -> &TreeNode<S> {
        &self.root
    }

    /// Grow the tree for the configured number of simulations and return
    /// the best move found: the most visited root child. `None` when the
    /// root is terminal.
    pub fn search(&mut self) -> Option<S::Move> {
        self.root.expand();
        let sims = self.config.simulations;

        for i in 0..sims {
            self.simulate();

            // Stop early once one move clearly dominates.
            let root_player1 = self.root.state.player1_to_move();
            let best = self
                .root
                .children
                .iter()
                .filter(|c| c.visits > 0)
                .map(|c| c.winrate(root_player1))
                .fold(0.0_f64, f64::max);
            if (i > sims / 20 && best > FASTPLAY5_THRES)
                || (i > sims / 5 && best > FASTPLAY20_THRES)
            {
                debug!("early stop after {} simulations, best winrate {best:.3}", i + 1);
                break;
            }
        }

        self.log_children();
        self.best_move()
    }

    /// One selection / expansion / rollout / backpropagation pass.
    fn simulate(&mut self) {
        let config = self.config;

        // Descend to a leaf, remembering the child indices taken.
        let mut path: Vec<usize> = Vec::new();
        let mut node = &mut self.root;
        loop {
            if node.children.is_empty() || node.state.is_terminal() {
                break;
            }

            let parent_visits = node.visits;
            let player1 = node.state.player1_to_move();
            let idx = node
                .children
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.urgency(parent_visits, player1, config.exploration)
                        .partial_cmp(&b.urgency(parent_visits, player1, config.exploration))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i)
                .unwrap_or(0);
            path.push(idx);

            let child = &mut node.children[idx];
            if child.children.is_empty() && child.visits >= config.expand_visits {
                child.expand();
            }

            node = &mut node.children[idx];
        }

        let outcome = node.state.rollout(&mut self.rng);

        // Backpropagate along the recorded path.
        let mut node = &mut self.root;
        node.visits += 1;
        node.wins += outcome;
        for &idx in &path {
            node = &mut node.children[idx];
            node.visits += 1;
            node.wins += outcome;
        }
    }

    fn best_move(&self) -> Option<S::Move> {
        self.root
            .children
            .iter()
            .max_by_key(|c| c.visits)
            .and_then(|c| c.mv.clone())
    }

    fn log_children(&self) {
        let player1 = self.root.state.player1_to_move();
        for child in &self.root.children {
            if let Some(mv) = &child.mv {
                debug!(
                    "{mv}: visits={} winrate={:.3}",
                    child.visits,
                    child.winrate(player1)
                );
            }
        }
    }
}
