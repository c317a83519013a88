use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Direction a tile slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    /// Order in which neighbors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset of the tile that slides, relative to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable n×n arrangement of tiles, stored row-major with 0 as the blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Builds a board from its rows, rejecting anything that is not a square
    /// permutation of `0..n²`.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut tiles = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            tiles.extend_from_slice(values);
        }

        Self::from_tiles(size, tiles)
    }

    /// Builds a board from a flat row-major tile sequence of length `size²`.
    pub fn from_tiles(size: usize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        let (expected, max) = cell_count(size)?;
        if tiles.len() != expected {
            return Err(BoardError::WrongTileCount {
                expected,
                got: tiles.len(),
            });
        }

        let mut seen = vec![false; expected];
        for &tile in &tiles {
            if tile > max {
                return Err(BoardError::TileOutOfRange { tile, max });
            }
            if seen[tile as usize] {
                return Err(BoardError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
        }

        // A permutation of 0..n² always holds a 0, but keep the lookup fallible.
        let blank = tiles
            .iter()
            .position(|&tile| tile == 0)
            .ok_or(BoardError::MissingBlank)?;

        Ok(Self { size, tiles, blank })
    }

    /// The solved board: 1..n²-1 in order, blank last.
    pub fn goal(size: usize) -> Result<Self, BoardError> {
        let (cells, max) = cell_count(size)?;
        let tiles: Vec<u32> = (1..=max).chain(std::iter::once(0)).collect();
        Ok(Self {
            size,
            tiles,
            blank: cells - 1,
        })
    }

    /// A uniformly random arrangement. Half of these are unsolvable.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut tiles = Self::goal(size)?.tiles;
        tiles.shuffle(rng);
        Self::from_tiles(size, tiles)
    }

    /// A random walk of `steps` slides away from the goal. Never undoes the
    /// previous slide, so the result is always solvable in at most `steps` moves.
    pub fn scrambled<R: Rng + ?Sized>(
        size: usize,
        steps: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Self::goal(size)?;
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<(Move, Board)> = Move::ALL
                .iter()
                .filter(|&&dir| last.map_or(true, |prev| dir != prev.opposite()))
                .filter_map(|&dir| board.slide(dir).map(|next| (dir, next)))
                .collect();

            match options.choose(rng) {
                Some((dir, next)) => {
                    last = Some(*dir);
                    board = next.clone();
                }
                None => break,
            }
        }

        Ok(board)
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Tile at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`dimension`](Self::dimension).
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) is outside a {}x{} board",
            row,
            col,
            self.size,
            self.size
        );
        self.tiles[row * self.size + col]
    }

    /// Row and column of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Number of the first n²-1 cells that do not hold their goal tile.
    pub fn hamming_distance(&self) -> usize {
        (1..self.tiles.len())
            .filter(|&pos| self.tiles[pos - 1] != pos as u32)
            .count()
    }

    /// Sum over non-blank tiles of the row and column distance to the goal cell.
    pub fn manhattan_distance(&self) -> usize {
        let size = self.size as u32;
        let mut distance = 0;
        for (pos, &value) in self.tiles.iter().enumerate() {
            if value != 0 {
                let (i, j) = (pos / self.size, pos % self.size);
                let target_x = (value - 1) / size;
                let target_y = (value - 1) % size;
                distance += (i as isize - target_x as isize).unsigned_abs();
                distance += (j as isize - target_y as isize).unsigned_abs();
            }
        }
        distance
    }

    pub fn is_goal(&self) -> bool {
        self.tiles[..self.tiles.len() - 1]
            .iter()
            .zip(1u32..)
            .all(|(&tile, expected)| tile == expected)
    }

    /// Boards one slide away, generated lazily in [`Move::ALL`] order.
    pub fn neighbors(&self) -> Neighbors<'_> {
        Neighbors {
            board: self,
            moves: Move::ALL.into_iter(),
        }
    }

    /// The board after sliding a tile in direction `dir`, if one is there.
    pub fn slide(&self, dir: Move) -> Option<Board> {
        let (dx, dy) = dir.as_offset();
        let (x, y) = self.blank();

        let new_x = x as isize + dx;
        let new_y = y as isize + dy;
        if new_x < 0 || new_x >= self.size as isize || new_y < 0 || new_y >= self.size as isize {
            return None;
        }

        let target = new_x as usize * self.size + new_y as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// The move that turns `self` into `next`, if they are one slide apart.
    pub fn move_to(&self, next: &Board) -> Option<Move> {
        Move::ALL
            .iter()
            .copied()
            .find(|&dir| self.slide(dir).as_ref() == Some(next))
    }

    /// Swaps the first two non-blank tiles in row-major order.
    ///
    /// Exactly one of a board and its twin is solvable. A 1×1 board has no
    /// pair to swap and is returned unchanged.
    pub fn twin(&self) -> Board {
        let mut filled = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != 0)
            .map(|(pos, _)| pos);

        let mut tiles = self.tiles.clone();
        if let (Some(a), Some(b)) = (filled.next(), filled.next()) {
            tiles.swap(a, b);
        }
        Self {
            size: self.size,
            tiles,
            blank: self.blank,
        }
    }

    /// Inversion-count parity test for solvability.
    pub fn is_solvable_by_parity(&self) -> bool {
        let inversions = self.count_inversions();
        let (empty_row, _) = self.blank();

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + empty_row) % 2 == 1
        }
    }

    fn count_inversions(&self) -> usize {
        let flattened = &self.tiles;
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

/// Number of cells of a `size`×`size` board and the largest tile value it holds.
fn cell_count(size: usize) -> Result<(usize, u32), BoardError> {
    if size == 0 {
        return Err(BoardError::Empty);
    }
    let cells = size
        .checked_mul(size)
        .ok_or(BoardError::TooLarge { size })?;
    let max = u32::try_from(cells - 1).map_err(|_| BoardError::TooLarge { size })?;
    Ok((cells, max))
}

/// Iterator returned by [`Board::neighbors`].
#[derive(Debug)]
pub struct Neighbors<'a> {
    board: &'a Board,
    moves: std::array::IntoIter<Move, 4>,
}

impl Iterator for Neighbors<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        for dir in self.moves.by_ref() {
            if let Some(next) = self.board.slide(dir) {
                return Some(next);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.moves.len()))
    }
}

/// Dimension on the first line, then one line per row of space-separated tiles.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.size)?;
        for row in self.tiles.chunks(self.size) {
            writeln!(f)?;
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", val)?;
            }
        }
        Ok(())
    }
}

/// Parses the layout produced by `Display`. Any whitespace separates values.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = s.split_whitespace().map(|token| {
            token
                .parse::<u32>()
                .map_err(|e| BoardError::Parse(format!("invalid number {:?}: {}", token, e)))
        });

        let size = values
            .next()
            .ok_or_else(|| BoardError::Parse("missing dimension".to_string()))??
            as usize;
        let tiles = values.collect::<Result<Vec<u32>, _>>()?;
        Self::from_tiles(size, tiles)
    }
}
