//! # Sliding-tile puzzle solver
//!
//! A* search for n×n sliding puzzles, with the twin trick to prove
//! unsolvability: the input board and a copy with two tiles swapped are
//! searched in lockstep, and exactly one of them can reach the goal.
//!
//! ## Modules
//! - `board`: immutable `Board` values, slides (`Move`), neighbors, distance
//!   metrics and the text format.
//! - `node`: `SearchNode`, a board with its path cost and shared parent chain.
//! - `frontier`: `PriorityFrontier`, a resizable binary min-heap keyed by a
//!   caller-supplied function.
//! - `solver`: the `Solver` state machine and its `Solution`.
//! - `config`: optional search budget.
//! - `error`: error types for all of the above.
//!
//! ```
//! use slider_astar::{Board, Solver};
//!
//! let board = Board::new(&[[0, 1, 3], [4, 2, 5], [7, 8, 6]]).unwrap();
//! let mut solver = Solver::new(board);
//! assert_eq!(solver.moves().unwrap(), Some(4));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod frontier;
pub mod node;
pub mod solver;

pub use board::{Board, Move};
pub use config::SolverConfig;
pub use error::{BoardError, FrontierError, SolveError};
pub use frontier::PriorityFrontier;
pub use node::SearchNode;
pub use solver::{SearchState, Solution, Solver};
