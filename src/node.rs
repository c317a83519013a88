use std::rc::Rc;

use crate::board::Board;

/// A board reached after `moves` slides, with a shared handle to the node it
/// was expanded from.
///
/// Parents are reference counted, so a chain stays alive exactly as long as
/// some descendant (or the frontier) still holds it.
#[derive(Debug)]
pub struct SearchNode {
    board: Board,
    moves: usize,
    priority: usize,
    parent: Option<Rc<SearchNode>>,
}

impl SearchNode {
    pub fn new(board: Board, moves: usize, parent: Option<Rc<SearchNode>>) -> Self {
        let priority = moves + board.manhattan_distance();
        Self {
            board,
            moves,
            priority,
            parent,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// `moves` plus the Manhattan estimate, fixed at construction.
    pub fn priority(&self) -> usize {
        self.priority
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    /// Boards from the root of this node's chain down to this node.
    pub fn path(&self) -> Vec<Board> {
        let mut boards = vec![self.board.clone()];
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            boards.push(node.board.clone());
            current = node.parent.as_deref();
        }
        boards.reverse();
        boards
    }
}

/// Key function used to order search nodes in a frontier.
pub fn priority(node: &Rc<SearchNode>) -> usize {
    node.priority
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_adds_moves_and_manhattan() {
        let board = Board::new(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        let node = SearchNode::new(board, 4, None);
        assert_eq!(node.moves(), 4);
        assert_eq!(node.priority(), 5);
        assert!(node.parent().is_none());
    }

    #[test]
    fn path_walks_back_to_root() {
        let goal = Board::goal(3).unwrap();
        let one = goal.slide(crate::Move::Down).unwrap();
        let two = one.slide(crate::Move::Right).unwrap();

        let root = Rc::new(SearchNode::new(two.clone(), 0, None));
        let mid = Rc::new(SearchNode::new(one.clone(), 1, Some(Rc::clone(&root))));
        let leaf = SearchNode::new(goal.clone(), 2, Some(Rc::clone(&mid)));

        assert_eq!(leaf.path(), vec![two, one, goal]);
        assert_eq!(leaf.priority(), 2);
        assert_eq!(priority(&mid), 1 + mid.board().manhattan_distance());
    }

    #[test]
    fn siblings_share_a_parent() {
        let root = Rc::new(SearchNode::new(Board::goal(2).unwrap(), 0, None));
        let children: Vec<SearchNode> = root
            .board()
            .neighbors()
            .map(|b| SearchNode::new(b, 1, Some(Rc::clone(&root))))
            .collect();

        assert_eq!(children.len(), 2);
        assert_eq!(Rc::strong_count(&root), 3);
        drop(children);
        assert_eq!(Rc::strong_count(&root), 1);
    }
}
