use serde::Serialize;

use crate::board::Board;
use crate::engine::apply::apply_move;
use crate::state::{legal_moves, Move};

/// UCB1 with a square-root exploration term:
/// `wins/visits + c * sqrt(parent_visits) / sqrt(visits)`; unvisited nodes score +inf.
#[inline]
pub fn ucb1(wins: u32, visits: u32, parent_visits: u32, c: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let v = f64::from(visits);
    f64::from(wins) / v + c * f64::from(parent_visits).sqrt() / v.sqrt()
}

/// Aggregated statistics of one root child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildStats {
    #[serde(rename = "move")]
    pub mv: Move,
    pub wins: u32,
    pub visits: u32,
}

impl ChildStats {
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}

#[derive(Debug)]
struct Node {
    board: Board,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Move that produced this node from its parent (None at the root).
    mv: Option<Move>,
    wins: u32,
    visits: u32,
    unexplored: Vec<Move>,
}

impl Node {
    fn new(board: Board, parent: Option<usize>, mv: Option<Move>) -> Self {
        let unexplored = legal_moves(&board);
        Self {
            board,
            parent,
            children: Vec::new(),
            mv,
            wins: 0,
            visits: 0,
            unexplored,
        }
    }
}

/// Arena-backed search tree. Node 0 is the root; children are owned by the
/// arena and point back to their parent by index.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: usize = 0;

    pub fn new(root: Board) -> Self {
        Self { nodes: vec![Node::new(root, None, None)] }
    }

    #[inline]
    pub fn board(&self, idx: usize) -> &Board {
        &self.nodes[idx].board
    }

    #[inline]
    pub fn visits(&self, idx: usize) -> u32 {
        self.nodes[idx].visits
    }

    #[inline]
    pub fn wins(&self, idx: usize) -> u32 {
        self.nodes[idx].wins
    }

    #[inline]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].parent
    }

    /// Descend from the root while the current node is fully expanded and has
    /// children, taking the first child with the highest UCB1 score.
    pub fn select(&self, c: f64) -> usize {
        let mut current = Self::ROOT;
        loop {
            let node = &self.nodes[current];
            if node.children.is_empty() || !node.unexplored.is_empty() {
                return current;
            }
            let mut best = node.children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &child_idx in &node.children {
                let child = &self.nodes[child_idx];
                let score = ucb1(child.wins, child.visits, node.visits, c);
                if score > best_score {
                    best_score = score;
                    best = child_idx;
                }
            }
            current = best;
        }
    }

    /// Pop the last unexplored move of `idx`, apply it to a clone of the
    /// node's board and attach the result as a new child.
    pub fn expand(&mut self, idx: usize) -> Option<usize> {
        loop {
            let mv = self.nodes[idx].unexplored.pop()?;
            // Unexplored moves were legal when enumerated, so this only skips on a bug.
            let Ok(board) = apply_move(&self.nodes[idx].board, mv) else { continue };
            let child_idx = self.nodes.len();
            self.nodes.push(Node::new(board, Some(idx), Some(mv)));
            self.nodes[idx].children.push(child_idx);
            return Some(child_idx);
        }
    }

    /// Walk parent links from `idx` to the root, counting a visit everywhere
    /// and a win where `win` is set.
    pub fn backpropagate(&mut self, idx: usize, win: bool) {
        let mut current = Some(idx);
        while let Some(i) = current {
            let node = &mut self.nodes[i];
            node.visits += 1;
            if win {
                node.wins += 1;
            }
            current = node.parent;
        }
    }

    /// Statistics of the root's children in expansion order.
    pub fn root_children(&self) -> impl Iterator<Item = ChildStats> + '_ {
        self.nodes[Self::ROOT].children.iter().filter_map(move |&i| {
            let n = &self.nodes[i];
            n.mv.map(|mv| ChildStats { mv, wins: n.wins, visits: n.visits })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::types::COLUMNS;

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    /// Root with exactly two legal moves: 5s onto 6h (col 1) or onto 6d (col 2).
    fn two_move_board() -> Board {
        let mut table: [Vec<Card>; COLUMNS] = Default::default();
        table[0] = vec![c("9c"), c("5s")];
        table[1] = vec![c("9d"), c("6h")];
        table[2] = vec![c("Kc"), c("6d")];
        for (col, top) in table.iter_mut().skip(3).zip(["Ks", "Qc", "Qs", "Jc", "Js"]) {
            *col = vec![c(top)];
        }
        Board::from_parts(table, vec![c("2c"), c("2s"), c("3c"), c("3s")], [0; 4])
    }

    #[test]
    fn ucb1_prefers_unvisited_and_matches_formula() {
        assert!(ucb1(0, 0, 10, 1.4).is_infinite());
        let expected = 0.5 + 1.4 * 16f64.sqrt() / 4f64.sqrt();
        assert!((ucb1(2, 4, 16, 1.4) - expected).abs() < 1e-12);
    }

    #[test]
    fn expansion_is_lifo_over_enumerated_moves() {
        let board = two_move_board();
        let moves = legal_moves(&board);
        assert_eq!(
            moves,
            vec![Move::ColumnToColumn { src: 0, dst: 1 }, Move::ColumnToColumn { src: 0, dst: 2 }]
        );
        let mut tree = Tree::new(board);
        let child = tree.expand(Tree::ROOT).expect("child");
        assert_eq!(tree.root_children().next().map(|s| s.mv), Some(moves[1]));
        assert_eq!(tree.parent(child), Some(Tree::ROOT));
        assert_eq!(tree.board(child).column_top(2), Some(c("5s")));
    }

    #[test]
    fn backpropagation_reaches_root() {
        let mut tree = Tree::new(two_move_board());
        let a = tree.expand(Tree::ROOT).unwrap();
        tree.backpropagate(a, true);
        tree.backpropagate(a, false);
        assert_eq!(tree.visits(Tree::ROOT), 2);
        assert_eq!(tree.wins(Tree::ROOT), 1);
        assert_eq!(tree.visits(a), 2);
        assert_eq!(tree.wins(a), 1);
    }

    #[test]
    fn selection_descends_only_once_fully_expanded() {
        let mut tree = Tree::new(two_move_board());
        assert_eq!(tree.select(1.4), Tree::ROOT);
        let first = tree.expand(Tree::ROOT).unwrap();
        tree.backpropagate(first, false);
        assert_eq!(tree.select(1.4), Tree::ROOT, "root still has an unexplored move");
        let second = tree.expand(Tree::ROOT).unwrap();
        tree.backpropagate(second, false);
        // Equal scores: the first child in expansion order wins the tie.
        assert_eq!(tree.select(1.4), first);
        tree.backpropagate(first, false);
        assert_eq!(tree.select(1.4), second, "fewer visits means a larger exploration term");
    }
}
