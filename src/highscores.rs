//! High score leaderboard
//!
//! `HighScores` is the ranked top-10 table. A `Leaderboard` stores it
//! somewhere; `ScoreSubmitter` sends the final score of a run to one on a
//! worker thread so a slow or failing store never stalls the game.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Whether the run made it to the chase phase
    pub reached_chase: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u64, reached_chase: bool) -> Self {
        Self {
            name: name.into(),
            score,
            reached_chase,
            timestamp: now_ms(),
        }
    }
}

fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending; ties keep the older entry first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Why a leaderboard call failed
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere scores are ranked and kept
pub trait Leaderboard: Send + Sync {
    /// Record a finished run and return the current top entries
    fn submit(&self, entry: HighScoreEntry) -> Result<Vec<HighScoreEntry>, LeaderboardError>;
}

/// Leaderboard kept in a JSON file on disk
#[derive(Debug)]
pub struct LocalLeaderboard {
    path: PathBuf,
    scores: Mutex<Option<HighScores>>,
}

impl LocalLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scores: Mutex::new(None),
        }
    }

    fn read(&self) -> Result<HighScores, LeaderboardError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let scores: HighScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(HighScores::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Leaderboard for LocalLeaderboard {
    fn submit(&self, entry: HighScoreEntry) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|_| LeaderboardError::Unavailable("score table lock poisoned".to_string()))?;
        if guard.is_none() {
            *guard = Some(self.read()?);
        }
        let Some(scores) = guard.as_mut() else {
            return Err(LeaderboardError::Unavailable("score table not loaded".to_string()));
        };

        if let Some(rank) = scores.add(entry) {
            log::info!("New high score, rank {rank}");
            let json = serde_json::to_string_pretty(&*scores)?;
            std::fs::write(&self.path, json)?;
            log::info!("High scores saved ({} entries)", scores.entries.len());
        }
        Ok(scores.entries.clone())
    }
}

type SubmitResult = Result<Vec<HighScoreEntry>, LeaderboardError>;

/// Sends each run's final score to a leaderboard off the game thread
///
/// At most one submission is in flight. A run submits at most once; runs that
/// end while a submission is running wait their turn in order.
pub struct ScoreSubmitter<L: Leaderboard + 'static> {
    leaderboard: Arc<L>,
    in_flight: Option<Receiver<SubmitResult>>,
    queued: VecDeque<HighScoreEntry>,
    submitted: bool,
}

impl<L: Leaderboard + 'static> ScoreSubmitter<L> {
    pub fn new(leaderboard: Arc<L>) -> Self {
        Self {
            leaderboard,
            in_flight: None,
            queued: VecDeque::new(),
            submitted: false,
        }
    }

    /// Submit this run's score. Returns false if the run already submitted.
    pub fn submit(&mut self, entry: HighScoreEntry) -> bool {
        if self.submitted {
            log::debug!("Score {} already submitted for this run", entry.score);
            return false;
        }
        self.submitted = true;
        if self.in_flight.is_some() {
            log::debug!("Submission in flight, queueing score {}", entry.score);
            self.queued.push_back(entry);
        } else {
            self.dispatch(entry);
        }
        true
    }

    /// Allow the next run to submit
    pub fn new_run(&mut self) {
        self.submitted = false;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || !self.queued.is_empty()
    }

    fn dispatch(&mut self, entry: HighScoreEntry) {
        let (tx, rx) = mpsc::channel();
        let leaderboard = Arc::clone(&self.leaderboard);
        log::info!("Submitting score {}", entry.score);
        std::thread::spawn(move || {
            // Receiver may be gone if the game shut down first
            let _ = tx.send(leaderboard.submit(entry));
        });
        self.in_flight = Some(rx);
    }

    /// Check for a finished submission without blocking
    pub fn poll(&mut self) -> Option<SubmitResult> {
        let result = match self.in_flight.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LeaderboardError::Unavailable(
                "submission worker exited without a result".to_string(),
            )),
        };
        self.finish_in_flight();
        Some(result)
    }

    /// Block until the current submission finishes
    pub fn wait(&mut self) -> Option<SubmitResult> {
        let result = match self.in_flight.as_ref()?.recv() {
            Ok(result) => result,
            Err(_) => Err(LeaderboardError::Unavailable(
                "submission worker exited without a result".to_string(),
            )),
        };
        self.finish_in_flight();
        Some(result)
    }

    fn finish_in_flight(&mut self) {
        self.in_flight = None;
        if let Some(entry) = self.queued.pop_front() {
            self.dispatch(entry);
        }
    }
}
