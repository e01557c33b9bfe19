//! Session Controller
//!
//! Owns both engines and at most one active game. Every engine call goes through
//! [`Session::apply`], which drains cues, keeps the tick timer in step with the
//! engine, persists high scores and pushes a fresh frame to the render sink.
//!
//! Collaborator failures (store writes, rendering) are logged and swallowed; nothing
//! here returns an error to the event loop.

use crate::config::ArcadeConfig;
use crate::core::{BlockEngine, Game, GameOverReport, Outcome, SnakeEngine};
use crate::cues::CueSink;
use crate::render::{MenuView, RenderSink};
use crate::scheduler::TickScheduler;
use crate::store::KeyValueStore;
use crate::types::{Command, GameKind, RunState};

pub struct Session {
    snake: SnakeEngine,
    blocks: BlockEngine,
    active: Option<GameKind>,
    scheduler: Box<dyn TickScheduler>,
    cues: Box<dyn CueSink>,
    renderer: Box<dyn RenderSink>,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Build both engines, reading their high scores from `store` once.
    pub fn new(
        config: &ArcadeConfig,
        store: Box<dyn KeyValueStore>,
        scheduler: Box<dyn TickScheduler>,
        cues: Box<dyn CueSink>,
        renderer: Box<dyn RenderSink>,
    ) -> Self {
        let high_score = |kind: GameKind| store.get_u32(kind.high_score_key()).unwrap_or(0);

        let snake = SnakeEngine::new(config.snake_size, high_score(GameKind::Snake), config.seed);
        let blocks = BlockEngine::new(
            high_score(GameKind::Blocks),
            config.seed.wrapping_add(1),
        );

        log::info!(
            "session ready (seed {}, snake board {}, high scores {}/{})",
            config.seed,
            config.snake_size,
            snake.high_score(),
            blocks.high_score()
        );

        Self {
            snake,
            blocks,
            active: None,
            scheduler,
            cues,
            renderer,
            store,
        }
    }

    pub fn active_kind(&self) -> Option<GameKind> {
        self.active
    }

    pub fn active_game(&self) -> Option<&dyn Game> {
        self.active.map(|kind| self.game(kind))
    }

    pub fn snake(&self) -> &SnakeEngine {
        &self.snake
    }

    pub fn blocks(&self) -> &BlockEngine {
        &self.blocks
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn scheduler(&self) -> &dyn TickScheduler {
        self.scheduler.as_ref()
    }

    pub fn sound_enabled(&self) -> bool {
        self.cues.is_enabled()
    }

    pub fn menu_view(&self) -> MenuView {
        MenuView {
            snake_high_score: self.snake.high_score(),
            blocks_high_score: self.blocks.high_score(),
            sound_enabled: self.cues.is_enabled(),
        }
    }

    fn game(&self, kind: GameKind) -> &dyn Game {
        match kind {
            GameKind::Snake => &self.snake,
            GameKind::Blocks => &self.blocks,
        }
    }

    fn game_mut(&mut self, kind: GameKind) -> &mut dyn Game {
        match kind {
            GameKind::Snake => &mut self.snake,
            GameKind::Blocks => &mut self.blocks,
        }
    }

    /// Activate `kind` on a fresh board and start its timer.
    pub fn select_game(&mut self, kind: GameKind) {
        self.scheduler.cancel();
        self.active = Some(kind);

        let game = self.game_mut(kind);
        game.reset_state();
        game.start();
        let interval_ms = game.tick_interval_ms();
        let over = game.is_over();

        log::info!("selected {} ({}ms)", kind.as_str(), interval_ms);

        if !over {
            self.scheduler.schedule(interval_ms);
        }
        self.apply(kind, Outcome::changed());
    }

    /// Translate a raw key and hand it to the active game.
    ///
    /// Returns false when the key was ignored: no active game or not a game key.
    pub fn route_input(&mut self, raw_key: &str) -> bool {
        let Some(kind) = self.active else {
            return false;
        };
        let Some(command) = Command::from_key(raw_key) else {
            return false;
        };

        let outcome = match command {
            Command::Pause => Outcome::from_changed(self.game_mut(kind).toggle_pause()),
            Command::Cancel => {
                self.deactivate();
                return true;
            }
            Command::Restart => {
                self.restart();
                return true;
            }
            _ => self.game_mut(kind).handle_input(command),
        };

        self.apply(kind, outcome);
        true
    }

    /// Advance the active game if `generation` belongs to the live timer.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if !self.scheduler.accepts(generation) {
            log::trace!("dropping stale tick gen {}", generation);
            return false;
        }
        let Some(kind) = self.active else {
            return false;
        };

        let outcome = self.game_mut(kind).advance_tick();
        self.apply(kind, outcome);
        true
    }

    /// Pause the active game if it is running, e.g. when the terminal loses focus.
    pub fn suspend(&mut self) {
        let Some(kind) = self.active else {
            return;
        };
        let game = self.game_mut(kind);
        if game.state() != RunState::Running {
            return;
        }
        let paused = game.toggle_pause();
        log::debug!("suspended {}", kind.as_str());
        self.apply(kind, Outcome::from_changed(paused));
    }

    /// Start the current game over.
    pub fn restart(&mut self) {
        if let Some(kind) = self.active {
            self.select_game(kind);
        }
    }

    /// Leave the active game and go back to the selection screen.
    pub fn deactivate(&mut self) {
        self.scheduler.cancel();
        if let Some(kind) = self.active.take() {
            self.game_mut(kind).halt();
            log::info!("left {}", kind.as_str());
        }
        self.render();
    }

    /// Flip sound on or off, persisting the preference.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.cues.toggle(self.store.as_mut());
        self.render();
        enabled
    }

    /// Nudge the sound volume, persisting it. `None` when the cue sink has no volume.
    pub fn change_volume(&mut self, delta: f32) -> Option<f32> {
        self.cues.change_volume(delta, self.store.as_mut())
    }

    /// Push the current screen to the render sink again.
    pub fn redraw(&mut self) {
        self.render();
    }

    /// Stop the timer before the session is dropped.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.active = None;
    }

    fn apply(&mut self, kind: GameKind, outcome: Outcome) {
        let cues = self.game_mut(kind).take_cues();
        for cue in cues {
            self.cues.cue(cue);
        }

        match outcome.game_over {
            Some(report) => self.finish(kind, report),
            None => {
                if let Some(interval_ms) = outcome.new_interval_ms {
                    self.scheduler.schedule(interval_ms);
                }
            }
        }

        if outcome.changed || outcome.game_over.is_some() {
            self.render();
        }
    }

    fn finish(&mut self, kind: GameKind, report: GameOverReport) {
        self.scheduler.cancel();
        log::info!(
            "{} over: score {}{}",
            kind.as_str(),
            report.final_score,
            if report.new_high_score { " (new high score)" } else { "" }
        );

        if report.new_high_score {
            if let Err(err) = self
                .store
                .set_u32(kind.high_score_key(), report.final_score)
            {
                log::warn!("failed to save {} high score: {:#}", kind.as_str(), err);
            }
        }
    }

    fn render(&mut self) {
        let result = match self.active {
            Some(kind) => {
                let snapshot = self.game(kind).snapshot();
                self.renderer.render(&snapshot)
            }
            None => {
                let menu = self.menu_view();
                self.renderer.render_menu(&menu)
            }
        };
        if let Err(err) = result {
            log::warn!("render failed: {:#}", err);
        }
    }
}
