//! Game loop orchestrator.
//!
//! Owns the current `GameState` and the high-score file.  The front-end calls
//! `handle_input` and `update` once per frame, then draws `state()`.

use rand::Rng;
use tracing::{info, warn};

use crate::compute::{self, Controls};
use crate::entities::{GameState, GameStatus, SoundCue};
use crate::highscore::HighScoreFile;

pub struct Game {
    state: GameState,
    store: HighScoreFile,
    /// Last value read from the file or offered to it; a failed write is not
    /// retried until the score climbs again.
    saved_high_score: u32,
}

impl Game {
    pub fn new(
        store: HighScoreFile,
        width: f32,
        height: f32,
        now: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let high_score = store.load();
        info!(high_score, path = %store.path().display(), "starting game");
        Self {
            state: compute::init_state(width, height, high_score, now, rng),
            store,
            saved_high_score: high_score,
        }
    }

    /// Resume from an existing state; `store` is only written once the state's
    /// high score beats what is already on disk.
    pub fn with_state(store: HighScoreFile, state: GameState) -> Self {
        let saved_high_score = store.load();
        Self {
            state,
            store,
            saved_high_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Hand the sound cues raised since the last call to the front-end.
    pub fn take_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.state.sounds)
    }

    pub fn handle_input(&mut self, controls: &Controls, now: f64) {
        self.state = compute::handle_input(&self.state, controls, now);
    }

    /// Advance one frame, or wait for the restart key once the game is over.
    pub fn update(&mut self, controls: &Controls, now: f64, rng: &mut impl Rng) {
        if !self.state.is_running() {
            if controls.restart {
                self.reset(now, rng);
            }
            return;
        }

        let level = self.state.level;
        self.state = compute::tick(&self.state, now, rng);

        if self.state.level != level {
            info!(
                level = self.state.level,
                interval = self.state.alien_laser_interval,
                "new wave"
            );
        }
        if self.state.status == GameStatus::GameOver {
            info!(score = self.state.score, level = self.state.level, "game over");
        }
        self.check_for_high_score();
    }

    fn check_for_high_score(&mut self) {
        let high_score = self.state.high_score;
        if high_score <= self.saved_high_score {
            return;
        }
        self.saved_high_score = high_score;
        if let Err(err) = self.store.save(high_score) {
            warn!(error = %err, "could not persist high score");
        }
    }

    fn reset(&mut self, now: f64, rng: &mut impl Rng) {
        let on_disk = self.store.load();
        let high_score = on_disk.max(self.state.high_score);
        info!(high_score, "restarting");
        self.state = compute::init_state(self.state.width, self.state.height, high_score, now, rng);
        self.saved_high_score = self.saved_high_score.max(on_disk);
    }
}
