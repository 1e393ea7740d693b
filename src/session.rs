//! Session driver
//!
//! A `Session` is the sole owner of the live `GameState`. Hosts push input
//! commands into it and call `frame` once per display frame; collaborators
//! only ever see the returned snapshot and events.

use std::sync::Arc;

use crate::audio::{AudioBackend, AudioManager, MusicTrack};
use crate::consts::MAX_FRAME_DT;
use crate::highscores::{HighScoreEntry, Leaderboard, LeaderboardError, ScoreSubmitter};
use crate::sim::{Command, CommandQueue, GameEvent, GameState, Phase, TickResult, tick};

pub struct Session<B: AudioBackend, L: Leaderboard + 'static> {
    state: GameState,
    commands: CommandQueue,
    audio: AudioManager<B>,
    scores: ScoreSubmitter<L>,
    standings: Option<Vec<HighScoreEntry>>,
    player_name: String,
}

impl<B: AudioBackend, L: Leaderboard + 'static> Session<B, L> {
    pub fn new(
        state: GameState,
        mut audio: AudioManager<B>,
        leaderboard: Arc<L>,
        player_name: impl Into<String>,
    ) -> Self {
        audio.play_music(MusicTrack::Runner);
        log::info!("Session started with seed {}", state.seed);
        Self {
            state,
            commands: CommandQueue::new(),
            audio,
            scores: ScoreSubmitter::new(leaderboard),
            standings: None,
            player_name: player_name.into(),
        }
    }

    /// Queue an input command for the next frame
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame of `dt` seconds
    ///
    /// Long frames (tab switches, breakpoints) are clamped so the simulation
    /// never takes one huge step.
    pub fn frame(&mut self, dt: f32) -> TickResult {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let commands = self.commands.drain();
        let result = tick(&mut self.state, &commands, dt);

        for event in &result.events {
            self.audio.handle_event(event);
            match event {
                GameEvent::Reset => self.scores.new_run(),
                GameEvent::GameOver { final_score } => {
                    let entry = HighScoreEntry::new(
                        self.player_name.clone(),
                        *final_score,
                        self.state.phase == Phase::Chase,
                    );
                    self.scores.submit(entry);
                }
                _ => {}
            }
        }

        if let Some(outcome) = self.scores.poll() {
            self.record_standings(outcome);
        }

        result
    }

    fn record_standings(&mut self, outcome: Result<Vec<HighScoreEntry>, LeaderboardError>) {
        match outcome {
            Ok(top) => {
                log::info!("Leaderboard updated ({} entries)", top.len());
                self.standings = Some(top);
            }
            Err(e) => log::warn!("Score submission failed: {e}"),
        }
    }

    /// Block until pending leaderboard work is done (shutdown)
    pub fn flush_scores(&mut self) {
        while let Some(outcome) = self.scores.wait() {
            self.record_standings(outcome);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Last leaderboard received, for display only
    pub fn standings(&self) -> Option<&[HighScoreEntry]> {
        self.standings.as_deref()
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }
}
