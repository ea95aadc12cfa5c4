//! Feedback-driven adaptive threshold learning.
//!
//! A single continuous state variable (the threshold multiplier) is
//! nudged by retrieval feedback: good retrieval reinforces the current
//! operating point with a half-step, poor retrieval takes a full step
//! down to produce different boundaries. This is a two-sided asymmetric
//! step rule in the contextual-bandit style: no value function, no
//! discounting, no exploration beyond the fixed steps.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use semchunk_core::{AdaptiveConfig, Result};

/// One recorded feedback event.
#[derive(Debug, Clone)]
struct FeedbackEvent {
    useful: bool,
    score: f32,
    threshold_before: f32,
}

/// Mutable learner state, guarded by the mutex in [`AdaptiveThreshold`].
#[derive(Debug)]
struct ThresholdState {
    multiplier: f32,
    feedback: VecDeque<FeedbackEvent>,
    multiplier_history: VecDeque<f32>,
    total_updates: u64,
    useful_count: u64,
    score_sum: f64,
    // Lifetime extremes; survive history truncation.
    min_seen: f32,
    max_seen: f32,
}

/// Observational snapshot of the learner.
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveStats {
    /// Total feedback updates applied over the process lifetime.
    pub total_updates: u64,

    /// Current threshold multiplier.
    pub current_multiplier: f32,

    /// Fraction of feedback events marked useful.
    pub useful_rate: f32,

    /// Mean retrieval score across all feedback events.
    pub avg_retrieval_score: f32,

    /// Last 10 multiplier values, oldest first.
    pub multiplier_history_tail: Vec<f32>,

    /// Lifetime (min, max) of the multiplier.
    pub multiplier_range: (f32, f32),
}

/// Process-wide adaptive threshold learner.
///
/// Created once and shared: feedback calls from concurrent
/// query-answering flows mutate it while documents are being chunked.
/// Updates are applied under the internal mutex so a threshold read
/// never observes a torn value; a threshold computed from a slightly
/// stale multiplier is accepted.
pub struct AdaptiveThreshold {
    config: AdaptiveConfig,
    state: Mutex<ThresholdState>,
}

impl AdaptiveThreshold {
    /// Create a new learner.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for out-of-range parameters
    /// (e.g. `min_multiplier > max_multiplier`).
    pub fn new(config: AdaptiveConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "AdaptiveThreshold initialized: multiplier={}, lr={}",
            config.initial_multiplier, config.learning_rate
        );

        let mut multiplier_history = VecDeque::with_capacity(config.history_limit);
        multiplier_history.push_back(config.initial_multiplier);

        let state = ThresholdState {
            multiplier: config.initial_multiplier,
            feedback: VecDeque::with_capacity(config.history_limit),
            multiplier_history,
            total_updates: 0,
            useful_count: 0,
            score_sum: 0.0,
            min_seen: config.initial_multiplier,
            max_seen: config.initial_multiplier,
        };

        Ok(Self {
            config,
            state: Mutex::new(state),
        })
    }

    fn state(&self) -> MutexGuard<'_, ThresholdState> {
        // A poisoned lock only means a panic elsewhere; the numeric
        // state is still consistent after every update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update the multiplier from retrieval feedback.
    ///
    /// Useful feedback with a high score (> 0.7) reinforces with half
    /// a learning-rate step; unuseful feedback or a low score (< 0.3)
    /// steps down a full learning rate. Anything in between leaves the
    /// multiplier untouched. The result is clipped to the configured
    /// bounds after every update.
    pub fn update_from_feedback(&self, chunk_was_useful: bool, retrieval_score: f32) {
        let mut state = self.state();

        let before = state.multiplier;
        push_bounded(
            &mut state.feedback,
            FeedbackEvent {
                useful: chunk_was_useful,
                score: retrieval_score,
                threshold_before: before,
            },
            self.config.history_limit,
        );

        if chunk_was_useful && retrieval_score > 0.7 {
            state.multiplier += self.config.learning_rate * 0.5;
        } else if !chunk_was_useful || retrieval_score < 0.3 {
            state.multiplier -= self.config.learning_rate;
        }

        state.multiplier = state
            .multiplier
            .clamp(self.config.min_multiplier, self.config.max_multiplier);

        let after = state.multiplier;
        push_bounded(&mut state.multiplier_history, after, self.config.history_limit);
        state.min_seen = state.min_seen.min(after);
        state.max_seen = state.max_seen.max(after);
        state.total_updates += 1;
        if chunk_was_useful {
            state.useful_count += 1;
        }
        state.score_sum += f64::from(retrieval_score);

        debug!(
            "Threshold updated: {:.3} -> {:.3} (useful={}, score={:.2})",
            before, after, chunk_was_useful, retrieval_score
        );
    }

    /// Current threshold multiplier.
    pub fn current_multiplier(&self) -> f32 {
        self.state().multiplier
    }

    /// Cut threshold for a similarity distribution: similarities below
    /// `mean - multiplier * std` are treated as topic breaks.
    pub fn threshold_for(&self, mean: f32, std: f32) -> f32 {
        mean - self.current_multiplier() * std
    }

    /// Learning statistics. Purely observational, no side effects.
    pub fn statistics(&self) -> AdaptiveStats {
        let state = self.state();

        let (useful_rate, avg_score) = if state.total_updates == 0 {
            (0.0, 0.0)
        } else {
            (
                state.useful_count as f32 / state.total_updates as f32,
                (state.score_sum / state.total_updates as f64) as f32,
            )
        };

        let tail_start = state.multiplier_history.len().saturating_sub(10);
        let multiplier_history_tail = state
            .multiplier_history
            .iter()
            .skip(tail_start)
            .copied()
            .collect();

        AdaptiveStats {
            total_updates: state.total_updates,
            current_multiplier: state.multiplier,
            useful_rate,
            avg_retrieval_score: avg_score,
            multiplier_history_tail,
            multiplier_range: (state.min_seen, state.max_seen),
        }
    }

    /// The threshold_before recorded with the most recent feedback
    /// event, if any.
    #[cfg(test)]
    fn last_threshold_before(&self) -> Option<f32> {
        self.state().feedback.back().map(|f| f.threshold_before)
    }
}

impl std::fmt::Debug for AdaptiveThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveThreshold")
            .field("multiplier", &self.current_multiplier())
            .field("learning_rate", &self.config.learning_rate)
            .finish()
    }
}

fn push_bounded<T>(queue: &mut VecDeque<T>, value: T, limit: usize) {
    if queue.len() == limit {
        queue.pop_front();
    }
    queue.push_back(value);
}
