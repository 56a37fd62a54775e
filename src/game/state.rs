use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake, stored tail first: the head is the most recently added cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// A single-cell snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from cells ordered tail to head.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Position {
        // length >= 1 is upheld by every constructor and by `advance`
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Cells from tail to head
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Append `new_head`; drop the tail unless growing.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_back(new_head);
        if !grow {
            self.body.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a well-formed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// What a board cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Snake,
    Food,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub game_over: bool,
    pub high_score: usize,
    /// Whole seconds counted by the clock trigger
    pub time_played: u64,
    pub board_size: usize,
}

impl GameState {
    /// Create a running game state with zeroed counters
    pub fn new(snake: Snake, food: Position, direction: Direction, board_size: usize) -> Self {
        Self {
            snake,
            food,
            direction,
            game_over: false,
            high_score: 0,
            time_played: 0,
            board_size,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Running
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Classify a single cell. Snake wins over food on overlap.
    pub fn cell_at(&self, pos: Position) -> Cell {
        if self.snake.contains(pos) {
            Cell::Snake
        } else if pos == self.food {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    /// Row-major classification of the whole board; `cells()[y][x]`
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        (0..self.board_size as i32)
            .map(|y| {
                (0..self.board_size as i32)
                    .map(|x| self.cell_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }
}
