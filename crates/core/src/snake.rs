//! Snake engine
//!
//! A square board, a snake stored head-first in a deque and one piece of food.
//! Direction changes are buffered in `pending_direction` and only committed at the
//! start of the next tick, so two quick turns inside one tick can never reverse the
//! snake onto itself.

use std::collections::VecDeque;

use crate::game::{CueBuffer, Cues, Game, GameOverReport, Outcome};
use crate::rng::SimpleRng;
use crate::scoring::{snake_faster_interval, snake_speed_level, snake_speeds_up_at};
use crate::snapshot::{SnakeSnapshot, Snapshot};
use crate::types::{
    Command, Direction, GameKind, Point, RunState, SoundCue, FOOD_POINTS, SNAKE_BASE_INTERVAL_MS,
    SNAKE_BOARD_SIZE,
};

#[derive(Debug, Clone)]
pub struct SnakeEngine {
    board_size: u8,
    snake: VecDeque<Point>,
    food: Option<Point>,
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    high_score: u32,
    interval_ms: u32,
    state: RunState,
    last_result: Option<GameOverReport>,
    rng: SimpleRng,
    cues: CueBuffer,
}

impl SnakeEngine {
    /// Build an engine on a `board_size` x `board_size` grid and reset it.
    ///
    /// `high_score` is the persisted best, read once by the caller.
    pub fn new(board_size: u8, high_score: u32, seed: u32) -> Self {
        let mut engine = Self {
            board_size: board_size.max(1),
            snake: VecDeque::with_capacity(board_size as usize * board_size as usize),
            food: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score,
            interval_ms: SNAKE_BASE_INTERVAL_MS,
            state: RunState::NotStarted,
            last_result: None,
            rng: SimpleRng::new(seed),
            cues: CueBuffer::default(),
        };
        engine.reset_state();
        engine
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    /// Segments, head first
    pub fn snake(&self) -> &VecDeque<Point> {
        &self.snake
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.front().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn speed_level(&self) -> u32 {
        snake_speed_level(self.interval_ms)
    }

    fn in_bounds(&self, p: Point) -> bool {
        let size = self.board_size as i16;
        p.x >= 0 && p.x < size && p.y >= 0 && p.y < size
    }

    /// Place food on a random empty cell.
    ///
    /// Gives up after `size * size` draws and leaves the food unset.
    pub fn spawn_food(&mut self) -> bool {
        let size = self.board_size as u32;
        let max_attempts = size * size;

        for _ in 0..max_attempts {
            let candidate = Point::new(
                self.rng.next_range(size) as i16,
                self.rng.next_range(size) as i16,
            );
            if !self.snake.contains(&candidate) {
                self.food = Some(candidate);
                return true;
            }
        }

        log::warn!(
            "could not spawn food after {} attempts (snake length {})",
            max_attempts,
            self.snake.len()
        );
        self.food = None;
        false
    }

    fn end_game(&mut self) -> Outcome {
        self.state = RunState::GameOver;
        self.cues.push(SoundCue::GameOver);
        let report = GameOverReport::settle(self.score, &mut self.high_score);
        self.last_result = Some(report);
        log::info!(
            "snake game over: score {} (new high score: {})",
            report.final_score,
            report.new_high_score
        );
        Outcome {
            changed: true,
            new_interval_ms: None,
            game_over: Some(report),
        }
    }

    #[cfg(test)]
    fn place(&mut self, segments: &[Point], direction: Direction, food: Option<Point>) {
        self.snake = segments.iter().copied().collect();
        self.direction = direction;
        self.pending_direction = direction;
        self.food = food;
    }
}

impl Default for SnakeEngine {
    fn default() -> Self {
        Self::new(SNAKE_BOARD_SIZE, 0, 1)
    }
}

impl Game for SnakeEngine {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn reset_state(&mut self) {
        let center = (self.board_size / 2) as i16;
        self.snake.clear();
        self.snake.push_back(Point::new(center, center));
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.interval_ms = SNAKE_BASE_INTERVAL_MS;
        self.state = RunState::NotStarted;
        self.last_result = None;
        self.spawn_food();
    }

    fn start(&mut self) {
        if self.state == RunState::NotStarted {
            self.state = RunState::Running;
        }
    }

    fn advance_tick(&mut self) -> Outcome {
        if self.state != RunState::Running {
            return Outcome::unchanged();
        }

        self.direction = self.pending_direction;

        let Some(head) = self.head() else {
            return Outcome::unchanged();
        };
        let next = head.step(self.direction);

        // Checked against the pre-move body, tail included.
        if !self.in_bounds(next) || self.snake.contains(&next) {
            return self.end_game();
        }

        self.snake.push_front(next);
        let mut outcome = Outcome::changed();

        if self.food == Some(next) {
            self.score += FOOD_POINTS;
            self.cues.push(SoundCue::Eat);

            if snake_speeds_up_at(self.score) {
                self.interval_ms = snake_faster_interval(self.interval_ms);
                self.cues.push(SoundCue::LevelUp);
                outcome.new_interval_ms = Some(self.interval_ms);
                log::debug!("snake speed level {}", self.speed_level());
            }

            self.spawn_food();
        } else {
            self.snake.pop_back();
        }

        outcome
    }

    fn handle_input(&mut self, command: Command) -> Outcome {
        if self.state != RunState::Running {
            return Outcome::unchanged();
        }

        let Some(candidate) = command.direction() else {
            return Outcome::unchanged();
        };

        if candidate == self.direction.opposite() {
            return Outcome::unchanged();
        }

        self.pending_direction = candidate;
        self.cues.push(SoundCue::Move);
        Outcome::unchanged()
    }

    fn halt(&mut self) {
        if self.state.is_running() {
            self.state = RunState::NotStarted;
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => self.state = RunState::Paused,
            RunState::Paused => self.state = RunState::Running,
            _ => return false,
        }
        true
    }

    fn state(&self) -> RunState {
        self.state
    }

    fn tick_interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn take_cues(&mut self) -> Cues {
        self.cues.take()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Snake(SnakeSnapshot {
            board_size: self.board_size,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            high_score: self.high_score,
            speed_level: self.speed_level(),
            interval_ms: self.interval_ms,
            state: self.state,
            last_result: self.last_result,
        })
    }
}
