//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each simulation walks down the tree by UCT, expands a leaf the first time
//! it is reached, scores a fresh child with one random playout, and adds the
//! result to every node on the way back up. Adjacent levels belong to
//! opposite sides, so the outcome is flipped at each step.
//!
//! Children are stored by value in a `Vec` that is filled once by
//! [`TreeNode::expand`] and never grown afterwards. Descent addresses them by
//! index, so the recursion holds exactly one `&mut` path through the tree.

use fastrand::Rng;
use log::{debug, trace};

use crate::constants::{EPSILON, EXPLORATION, N_SIMS};
use crate::error::{EngineError, Result};
use crate::playout::{playout, resolve_winner};
use crate::position::{Player, Position, Square, square_name};

/// A node in the MCTS search tree.
///
/// `wins` counts simulations won by `player`, the side to move here.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// The game position at this node
    pub pos: Position,
    /// Side to move
    pub player: Player,
    /// Square played to reach this node (`None` at a root built from a position)
    pub mv: Option<Square>,
    /// Number of simulations won by `player`
    pub wins: u32,
    /// Number of simulations through this node
    pub simulations: u32,
    /// Child nodes in move-generation order
    pub children: Vec<TreeNode>,
    /// Set when expansion found no legal move
    pub terminal: bool,
}

impl TreeNode {
    /// Create a root node for `pos` with `player` to move.
    pub fn new(pos: Position, player: Player) -> Self {
        Self::with_move(pos, player, None)
    }

    fn with_move(pos: Position, player: Player, mv: Option<Square>) -> Self {
        Self {
            pos,
            player,
            mv,
            wins: 0,
            simulations: 0,
            children: Vec::new(),
            terminal: false,
        }
    }

    /// True until the first expansion, unless that expansion found no move.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.terminal
    }

    /// Fraction of simulations won by the side to move here.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.simulations > 0 {
            self.wins as f64 / self.simulations as f64
        } else {
            0.0
        }
    }

    /// UCT score of this node as a child of a node with `parent_simulations` visits.
    pub fn uct_value(&self, parent_simulations: u32) -> f64 {
        let visits = self.simulations as f64 + EPSILON;
        let mean = self.wins as f64 / visits;
        mean + EXPLORATION * ((parent_simulations as f64 + 1.0).ln() / visits).sqrt()
    }

    /// Generate one child per legal move, or mark the node terminal.
    ///
    /// Does nothing on a node that is no longer a leaf.
    pub fn expand(&mut self) {
        if !self.is_leaf() {
            return;
        }

        let next = self.player.opponent();
        self.children = self
            .pos
            .successors(self.player)
            .map(|(sq, child)| TreeNode::with_move(child, next, Some(sq)))
            .collect();
        self.terminal = self.children.is_empty();
        trace!(
            "expanded node for {}: {} children{}",
            self.player,
            self.children.len(),
            if self.terminal { " (terminal)" } else { "" }
        );
    }

    /// Index of the child with the highest UCT score.
    ///
    /// Ties go to the earliest child, so a node whose children are all
    /// unvisited selects its first child. Returns `None` without children.
    pub fn select(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, child) in self.children.iter().enumerate() {
            let value = child.uct_value(self.simulations);
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((i, value));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Run one simulation through this node.
    ///
    /// Returns 1 if the side to move here won the simulation, 0 otherwise.
    pub fn run_simulation(&mut self, rng: &mut Rng) -> u32 {
        if self.is_leaf() {
            self.expand();
        }

        let outcome = match self.select() {
            None => {
                let winner = resolve_winner(&self.pos, rng);
                trace!("terminal node, winner {winner}");
                u32::from(winner == self.player)
            }
            Some(idx) => {
                let child = &mut self.children[idx];
                let child_outcome = if child.simulations == 0 {
                    let winner = playout(child.pos, child.player, rng);
                    let v = u32::from(winner == child.player);
                    child.record(v);
                    v
                } else {
                    child.run_simulation(rng)
                };
                1 - child_outcome
            }
        };

        self.record(outcome);
        outcome
    }

    #[inline]
    fn record(&mut self, outcome: u32) {
        self.simulations += 1;
        self.wins += outcome;
    }

    /// Index of the most simulated child, earliest on ties.
    pub fn best_move(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, child) in self.children.iter().enumerate() {
            if best.is_none_or(|(_, max)| child.simulations > max) {
                best = Some((i, child.simulations));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Run `sims` simulations from `root` and return the most visited child.
///
/// # Errors
/// - [`EngineError::ZeroBudget`] if `sims` is zero
pub fn tree_search(root: &mut TreeNode, sims: usize, rng: &mut Rng) -> Result<Option<usize>> {
    if sims == 0 {
        return Err(EngineError::ZeroBudget);
    }

    for _ in 0..sims {
        root.run_simulation(rng);
    }

    let best = root.best_move();
    if let Some(idx) = best {
        let child = &root.children[idx];
        debug!(
            "{} plays {} after {} simulations (visits {}, root winrate {:.3})",
            root.player,
            child.mv.map(square_name).unwrap_or_default(),
            sims,
            child.simulations,
            root.winrate()
        );
    } else {
        debug!("{} has no legal move", root.player);
    }
    Ok(best)
}

/// The square MCTS picks for `player` in `pos` after `sims` simulations.
///
/// # Errors
/// - [`EngineError::ZeroBudget`] if `sims` is zero
pub fn best_move_for(
    pos: Position,
    player: Player,
    sims: usize,
    rng: &mut Rng,
) -> Result<Option<Square>> {
    let mut root = TreeNode::new(pos, player);
    let best = tree_search(&mut root, sims, rng)?;
    Ok(best.and_then(|idx| root.children[idx].mv))
}

/// Log statistics for every child of `root`.
pub fn dump_children(root: &TreeNode) {
    for child in &root.children {
        debug!(
            "move {} sims={} wins={} wr={:.3} uct={:.3}",
            child.mv.map(square_name).unwrap_or_default(),
            child.simulations,
            child.wins,
            child.winrate(),
            child.uct_value(root.simulations)
        );
    }
}

/// Search settings.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Simulations per decision
    pub simulations: usize,
    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: N_SIMS,
            seed: None,
        }
    }
}

/// A search tree that follows a game, re-rooting after each committed move.
pub struct Search {
    root: TreeNode,
    rng: Rng,
    simulations: usize,
}

impl Search {
    /// Start a search at `pos` with `player` to move.
    ///
    /// # Errors
    /// - [`EngineError::ZeroBudget`] if `config.simulations` is zero
    pub fn new(pos: Position, player: Player, config: &SearchConfig) -> Result<Self> {
        if config.simulations == 0 {
            return Err(EngineError::ZeroBudget);
        }
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Ok(Self {
            root: TreeNode::new(pos, player),
            rng,
            simulations: config.simulations,
        })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Run `sims` more simulations on the current root.
    ///
    /// # Errors
    /// - [`EngineError::ZeroBudget`] if `sims` is zero
    pub fn run(&mut self, sims: usize) -> Result<Option<usize>> {
        tree_search(&mut self.root, sims, &mut self.rng)
    }

    /// Spend the configured budget and return the chosen square, if any.
    pub fn think(&mut self) -> Result<Option<Square>> {
        let best = self.run(self.simulations)?;
        Ok(best.and_then(|idx| self.root.children[idx].mv))
    }

    /// Make child `index` the new root. Its siblings are dropped.
    ///
    /// # Errors
    /// - [`EngineError::NoSuchChild`] if the root has no such child
    pub fn commit(&mut self, index: usize) -> Result<()> {
        let children = self.root.children.len();
        if index >= children {
            return Err(EngineError::NoSuchChild { index, children });
        }
        let child = self.root.children.swap_remove(index);
        self.root = child;
        Ok(())
    }

    /// Search, then commit the best move. `None` once the side to move is stuck.
    pub fn play_best(&mut self) -> Result<Option<Square>> {
        let Some(idx) = self.run(self.simulations)? else {
            return Ok(None);
        };
        let mv = self.root.children[idx].mv;
        self.commit(idx)?;
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded_opening() -> TreeNode {
        let mut node = TreeNode::new(Position::opening(), Player::Dark);
        node.expand();
        node
    }

    #[test]
    fn test_new_node_is_leaf() {
        let node = TreeNode::new(Position::opening(), Player::Dark);
        assert!(node.is_leaf());
        assert!(!node.terminal);
        assert_eq!(node.select(), None);
        assert_eq!(node.best_move(), None);
    }

    #[test]
    fn test_expand_opening() {
        let node = expanded_opening();
        assert!(!node.is_leaf());
        assert_eq!(node.children.len(), 4);
        let moves: Vec<_> = node.children.iter().map(|c| c.mv).collect();
        assert_eq!(moves, vec![Some(19), Some(26), Some(37), Some(44)]);
        for child in &node.children {
            assert_eq!(child.player, Player::Light);
            assert_eq!(child.wins, 0);
            assert_eq!(child.simulations, 0);
            assert!(child.is_leaf());
        }
    }

    #[test]
    fn test_expand_without_moves_is_terminal() {
        let pos = Position::from_bits(0, 0b11).unwrap();
        let mut node = TreeNode::new(pos, Player::Dark);
        node.expand();
        assert!(node.terminal);
        assert!(!node.is_leaf());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_select_unvisited_picks_first() {
        let mut node = expanded_opening();
        assert_eq!(node.select(), Some(0));
        node.simulations = 12;
        assert_eq!(node.select(), Some(0));
    }

    #[test]
    fn test_select_matches_uct_formula() {
        let mut node = expanded_opening();
        let stats = [(5, 10), (1, 2), (3, 3), (0, 1)];
        for (child, &(w, s)) in node.children.iter_mut().zip(&stats) {
            child.wins = w;
            child.simulations = s;
        }
        node.simulations = 16;

        let uct = |w: f64, s: f64| {
            w / (s + 1e-7) + 2f64.sqrt() * ((17f64).ln() / (s + 1e-7)).sqrt()
        };
        let expected = stats
            .iter()
            .enumerate()
            .map(|(i, &(w, s))| (i, uct(w as f64, s as f64)))
            .fold((0, f64::MIN), |acc, x| if x.1 > acc.1 { x } else { acc })
            .0;
        assert_eq!(node.select(), Some(expected));
        for (child, &(w, s)) in node.children.iter().zip(&stats) {
            assert!((child.uct_value(16) - uct(w as f64, s as f64)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_best_move_by_visits_with_ties() {
        let mut node = expanded_opening();
        for (child, s) in node.children.iter_mut().zip([3, 7, 7, 1]) {
            child.simulations = s;
            child.wins = 0;
        }
        // Child 2 has the same visits as child 1; the earlier one wins.
        node.children[2].wins = 7;
        assert_eq!(node.best_move(), Some(1));
    }

    #[test]
    fn test_first_simulation_scores_first_child() {
        let mut rng = Rng::with_seed(11);
        let mut node = TreeNode::new(Position::opening(), Player::Dark);
        let outcome = node.run_simulation(&mut rng);
        assert_eq!(node.simulations, 1);
        assert_eq!(node.wins, outcome);
        assert_eq!(node.children[0].simulations, 1);
        assert_eq!(node.children[0].wins, 1 - outcome);
        assert!(node.children[0].is_leaf(), "rollouts do not expand the child");
        for child in &node.children[1..] {
            assert_eq!(child.simulations, 0);
        }
    }

    #[test]
    fn test_terminal_node_scoring() {
        // Dark is stuck and owns more disks.
        let pos = Position::from_bits(0b111, 0).unwrap();
        let mut rng = Rng::with_seed(5);
        let mut node = TreeNode::new(pos, Player::Dark);
        for _ in 0..5 {
            assert_eq!(node.run_simulation(&mut rng), 1);
        }
        assert!(node.terminal);
        assert_eq!((node.wins, node.simulations), (5, 5));

        let mut node = TreeNode::new(pos, Player::Light);
        for _ in 0..5 {
            assert_eq!(node.run_simulation(&mut rng), 0);
        }
        assert_eq!((node.wins, node.simulations), (0, 5));
    }

    fn check_stats(node: &TreeNode) {
        assert!(node.wins <= node.simulations);
        let child_sims: u32 = node.children.iter().map(|c| c.simulations).sum();
        assert!(child_sims <= node.simulations);
        for child in &node.children {
            assert_eq!(child.player, node.player.opponent());
            check_stats(child);
        }
    }

    #[test]
    fn test_tree_statistics_stay_consistent() {
        let mut rng = Rng::with_seed(2024);
        let mut root = TreeNode::new(Position::opening(), Player::Dark);
        for _ in 0..300 {
            root.run_simulation(&mut rng);
        }
        assert_eq!(root.simulations, 300);
        let child_sims: u32 = root.children.iter().map(|c| c.simulations).sum();
        assert_eq!(child_sims, 300, "every root simulation passes through one child");
        check_stats(&root);
    }

    /// Wins a node collected through its children, seen from its own side.
    fn wins_via_children(node: &TreeNode) -> u32 {
        node.children.iter().map(|c| c.simulations - c.wins).sum()
    }

    fn check_alternating_wins(node: &TreeNode) {
        let via_children = wins_via_children(node);
        let child_sims: u32 = node.children.iter().map(|c| c.simulations).sum();
        // Simulations that ended here (a rollout into this node, or a terminal
        // resolution) are the only ones not accounted for by a child.
        let direct = node.simulations - child_sims;
        assert!(
            node.wins >= via_children && node.wins <= via_children + direct,
            "wins {} outside [{}, {}] at {:?}",
            node.wins,
            via_children,
            via_children + direct,
            node.mv
        );
        for child in &node.children {
            check_alternating_wins(child);
        }
    }

    #[test]
    fn test_backpropagation_alternates_perspective() {
        let mut rng = Rng::with_seed(9);
        let mut root = TreeNode::new(Position::opening(), Player::Dark);
        for _ in 0..3000 {
            root.run_simulation(&mut rng);
        }
        assert_eq!(
            root.wins,
            wins_via_children(&root),
            "root wins are exactly its children's losses"
        );
        assert!(
            root.children.iter().any(|c| !c.children.is_empty()),
            "search should reach below the first level"
        );
        check_alternating_wins(&root);
    }

    #[test]
    fn test_tree_search_rejects_zero_budget() {
        let mut rng = Rng::with_seed(0);
        let mut root = TreeNode::new(Position::opening(), Player::Dark);
        assert_eq!(tree_search(&mut root, 0, &mut rng), Err(EngineError::ZeroBudget));
        assert_eq!(root.simulations, 0);
    }

    #[test]
    fn test_search_is_reproducible() {
        let config = SearchConfig {
            simulations: 200,
            seed: Some(99),
        };
        let mut a = Search::new(Position::opening(), Player::Dark, &config).unwrap();
        let mut b = Search::new(Position::opening(), Player::Dark, &config).unwrap();
        assert_eq!(a.think().unwrap(), b.think().unwrap());
        let stats = |s: &Search| -> Vec<(u32, u32)> {
            s.root().children.iter().map(|c| (c.wins, c.simulations)).collect()
        };
        assert_eq!(stats(&a), stats(&b));
    }

    #[test]
    fn test_commit_reroots() {
        let config = SearchConfig {
            simulations: 50,
            seed: Some(1),
        };
        let mut search = Search::new(Position::opening(), Player::Dark, &config).unwrap();
        search.run(50).unwrap();
        let expected = search.root().children[2].pos;
        let visits = search.root().children[2].simulations;
        search.commit(2).unwrap();
        assert_eq!(search.root().pos, expected);
        assert_eq!(search.root().player, Player::Light);
        assert_eq!(search.root().simulations, visits);
        assert_eq!(
            search.commit(99),
            Err(EngineError::NoSuchChild {
                index: 99,
                children: search.root().children.len()
            })
        );
    }

    #[test]
    fn test_search_rejects_zero_budget() {
        let config = SearchConfig {
            simulations: 0,
            seed: Some(1),
        };
        assert!(matches!(
            Search::new(Position::opening(), Player::Dark, &config),
            Err(EngineError::ZeroBudget)
        ));
    }
}
