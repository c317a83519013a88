use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Board, Move};
use crate::config::SolverConfig;
use crate::error::{FrontierError, SolveError};
use crate::frontier::PriorityFrontier;
use crate::node::{self, SearchNode};

type Frontier = PriorityFrontier<Rc<SearchNode>, fn(&Rc<SearchNode>) -> usize>;

const PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Solved,
    Unsolvable,
}

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// `boards` runs from the initial board to the goal, both included.
    Solved { moves: usize, boards: Vec<Board> },
    Unsolvable,
}

impl Solution {
    pub fn is_solvable(&self) -> bool {
        matches!(self, Solution::Solved { .. })
    }

    /// Minimum number of moves, or `None` when the puzzle cannot be solved.
    pub fn moves(&self) -> Option<usize> {
        match self {
            Solution::Solved { moves, .. } => Some(*moves),
            Solution::Unsolvable => None,
        }
    }

    /// Minimum number of moves, or -1 when the puzzle cannot be solved.
    pub fn move_count(&self) -> isize {
        self.moves().map_or(-1, |moves| moves as isize)
    }

    pub fn boards(&self) -> Option<&[Board]> {
        match self {
            Solution::Solved { boards, .. } => Some(boards),
            Solution::Unsolvable => None,
        }
    }

    /// The slides between consecutive boards of the solution path.
    pub fn moves_made(&self) -> Vec<Move> {
        self.boards()
            .unwrap_or_default()
            .windows(2)
            .filter_map(|pair| pair[0].move_to(&pair[1]))
            .collect()
    }

    /// `(moves, Some(boards))` when solved, `(-1, None)` otherwise.
    pub fn into_parts(self) -> (isize, Option<Vec<Board>>) {
        match self {
            Solution::Solved { moves, boards } => (moves as isize, Some(boards)),
            Solution::Unsolvable => (-1, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Primary,
    Twin,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Side::Primary => Side::Twin,
            Side::Twin => Side::Primary,
        }
    }
}

enum Step {
    Continue,
    Goal(Rc<SearchNode>),
}

/// A* search over a board and its twin, expanded in lockstep.
///
/// Exactly one of the two is solvable, so whichever search reaches a goal
/// first decides the outcome.
#[derive(Debug)]
pub struct Solver {
    primary: Frontier,
    twin: Frontier,
    state: SearchState,
    outcome: Option<Solution>,
    config: SolverConfig,
    expansions: u64,
    elapsed: Duration,
}

impl Solver {
    pub fn new(initial: Board) -> Self {
        Self::with_config(initial, SolverConfig::default())
    }

    pub fn with_config(initial: Board, config: SolverConfig) -> Self {
        debug!(
            dimension = initial.dimension(),
            manhattan = initial.manhattan_distance(),
            hamming = initial.hamming_distance(),
            ?config,
            "creating solver"
        );

        let twin = initial.twin();
        let mut primary = new_frontier();
        primary.insert(Rc::new(SearchNode::new(initial, 0, None)));
        let mut twin_frontier = new_frontier();
        twin_frontier.insert(Rc::new(SearchNode::new(twin, 0, None)));

        Self {
            primary,
            twin: twin_frontier,
            state: SearchState::Running,
            outcome: None,
            config,
            expansions: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Nodes expanded so far, counting both searches.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Runs the search to completion on the first call; later calls return
    /// the same outcome without searching again.
    pub fn solution(&mut self) -> Result<&Solution, SolveError> {
        let solution = match self.outcome.take() {
            Some(solution) => solution,
            None => {
                let started = Instant::now();
                let result = self.run(started);
                self.elapsed += started.elapsed();
                let solution = result?;

                // Neither search is needed anymore; release both trees.
                self.primary = new_frontier();
                self.twin = new_frontier();
                solution
            }
        };

        Ok(&*self.outcome.insert(solution))
    }

    pub fn is_solvable(&mut self) -> Result<bool, SolveError> {
        Ok(self.solution()?.is_solvable())
    }

    pub fn moves(&mut self) -> Result<Option<usize>, SolveError> {
        Ok(self.solution()?.moves())
    }

    fn run(&mut self, started: Instant) -> Result<Solution, SolveError> {
        let mut side = Side::Primary;
        loop {
            self.charge(started)?;

            let frontier = match side {
                Side::Primary => &mut self.primary,
                Side::Twin => &mut self.twin,
            };
            let step = expand(frontier)?;
            self.expansions += 1;

            if let Step::Goal(goal) = step {
                return Ok(self.finish(side, &goal));
            }

            if self.expansions % PROGRESS_INTERVAL == 0 {
                debug!(
                    expansions = self.expansions,
                    primary = self.primary.len(),
                    twin = self.twin.len(),
                    "searching"
                );
            }
            side = side.other();
        }
    }

    /// Fails if the next expansion would go over the configured budget.
    fn charge(&self, started: Instant) -> Result<(), SolveError> {
        if let Some(max) = self.config.max_expansions {
            if self.expansions >= max {
                warn!(expansions = self.expansions, "expansion budget exhausted");
                return Err(SolveError::BudgetExceeded {
                    expansions: self.expansions,
                });
            }
        }

        if let Some(limit) = self.config.time_limit {
            let elapsed = self.elapsed + started.elapsed();
            if elapsed >= limit {
                warn!(?elapsed, expansions = self.expansions, "time limit exceeded");
                return Err(SolveError::TimedOut {
                    elapsed,
                    expansions: self.expansions,
                });
            }
        }

        Ok(())
    }

    fn finish(&mut self, side: Side, goal: &SearchNode) -> Solution {
        match side {
            Side::Primary => {
                self.state = SearchState::Solved;
                info!(
                    moves = goal.moves(),
                    expansions = self.expansions,
                    "puzzle solved"
                );
                Solution::Solved {
                    moves: goal.moves(),
                    boards: goal.path(),
                }
            }
            Side::Twin => {
                self.state = SearchState::Unsolvable;
                info!(expansions = self.expansions, "twin solved, puzzle is unsolvable");
                Solution::Unsolvable
            }
        }
    }
}

fn new_frontier() -> Frontier {
    PriorityFrontier::new(node::priority as fn(&Rc<SearchNode>) -> usize)
}

/// One A* expansion. Neighbors equal to the parent's board are skipped;
/// nothing further back in the chain is checked.
fn expand(frontier: &mut Frontier) -> Result<Step, FrontierError> {
    let current = frontier.extract_min()?;
    if current.board().is_goal() {
        return Ok(Step::Goal(current));
    }

    let previous = current.parent().map(|parent| parent.board());
    for neighbor in current.board().neighbors() {
        if previous == Some(&neighbor) {
            continue;
        }
        frontier.insert(Rc::new(SearchNode::new(
            neighbor,
            current.moves() + 1,
            Some(Rc::clone(&current)),
        )));
    }

    Ok(Step::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u32; 3]]) -> Board {
        Board::new(rows).unwrap()
    }

    #[test]
    fn solves_reference_puzzle() {
        let initial = board(&[[5, 2, 6], [3, 7, 1], [8, 4, 0]]);
        let mut solver = Solver::new(initial.clone());
        assert_eq!(solver.state(), SearchState::Running);

        let solution = solver.solution().unwrap().clone();
        assert_eq!(solver.state(), SearchState::Solved);

        let moves = solution.moves().unwrap();
        assert!(moves > 0);
        let boards = solution.boards().unwrap();
        assert_eq!(boards.len(), moves + 1);
        assert_eq!(boards.first(), Some(&initial));
        assert_eq!(boards.last(), Some(&board(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]])));
        for pair in boards.windows(2) {
            assert!(pair[0].move_to(&pair[1]).is_some());
        }
        assert_eq!(solution.moves_made().len(), moves);
    }

    #[test]
    fn detects_unsolvable_puzzle() {
        let mut solver = Solver::new(board(&[[1, 2, 3], [4, 5, 6], [8, 7, 0]]));
        let solution = solver.solution().unwrap().clone();
        assert_eq!(solver.state(), SearchState::Unsolvable);
        assert_eq!(solution, Solution::Unsolvable);
        assert_eq!(solution.move_count(), -1);
        assert!(solution.moves_made().is_empty());
        assert_eq!(solution.into_parts(), (-1, None));
    }

    #[test]
    fn trivial_boards() {
        let mut single = Solver::new(Board::goal(1).unwrap());
        assert_eq!(single.moves().unwrap(), Some(0));
        assert_eq!(single.expansions(), 1);

        let mut goal = Solver::new(Board::goal(3).unwrap());
        let solution = goal.solution().unwrap();
        assert_eq!(solution.move_count(), 0);
        assert_eq!(solution.boards(), Some(&[Board::goal(3).unwrap()][..]));
    }

    #[test]
    fn finds_optimal_move_counts() {
        let cases: [([[u32; 3]; 3], usize); 4] = [
            ([[1, 2, 3], [4, 5, 6], [7, 0, 8]], 1),
            ([[1, 2, 3], [4, 0, 6], [7, 5, 8]], 2),
            ([[0, 1, 3], [4, 2, 5], [7, 8, 6]], 4),
            ([[0, 2, 3], [1, 4, 6], [7, 5, 8]], 4),
        ];
        for (rows, expected) in cases {
            let mut solver = Solver::new(board(&rows));
            assert_eq!(solver.moves().unwrap(), Some(expected), "{:?}", rows);
        }
    }

    #[test]
    fn repeated_calls_return_the_same_solution() {
        let mut solver = Solver::new(board(&[[5, 2, 6], [3, 7, 1], [8, 4, 0]]));
        let first = solver.solution().unwrap().clone();
        let expansions = solver.expansions();
        let second = solver.solution().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(solver.expansions(), expansions);
    }

    #[test]
    fn expansion_budget_is_enforced() {
        let config = SolverConfig::new().with_max_expansions(3);
        let mut solver = Solver::with_config(board(&[[5, 2, 6], [3, 7, 1], [8, 4, 0]]), config);
        assert_eq!(
            solver.solution(),
            Err(SolveError::BudgetExceeded { expansions: 3 })
        );
        assert_eq!(solver.state(), SearchState::Running);
        // The budget is cumulative, so the solver stays exhausted.
        assert_eq!(
            solver.solution(),
            Err(SolveError::BudgetExceeded { expansions: 3 })
        );
    }

    #[test]
    fn time_limit_is_enforced() {
        let config = SolverConfig::new().with_time_limit(Duration::ZERO);
        let mut solver = Solver::with_config(board(&[[5, 2, 6], [3, 7, 1], [8, 4, 0]]), config);
        assert!(matches!(
            solver.solution(),
            Err(SolveError::TimedOut { expansions: 0, .. })
        ));
    }

    #[test]
    fn expand_skips_only_the_parent_board() {
        let root_board = board(&[[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let mut frontier = new_frontier();
        frontier.insert(Rc::new(SearchNode::new(root_board.clone(), 0, None)));

        assert!(matches!(expand(&mut frontier), Ok(Step::Continue)));
        assert_eq!(frontier.len(), 4);

        // Expanding a child yields its neighbors minus the way back.
        let child = frontier.extract_min().unwrap();
        let mut child_frontier = new_frontier();
        let child_neighbors = child.board().neighbors().count();
        child_frontier.insert(child);
        assert!(matches!(expand(&mut child_frontier), Ok(Step::Continue)));
        assert_eq!(child_frontier.len(), child_neighbors - 1);
        while let Ok(node) = child_frontier.extract_min() {
            assert_ne!(node.board(), &root_board);
            assert_eq!(node.moves(), 2);
        }

        assert_eq!(expand(&mut child_frontier).err(), Some(FrontierError::Empty));
    }
}
