//! Lottery engine: uniform selection with an at-most-one-draw guard
//!
//! State machine `Idle → Drawing → Idle`. The Drawing span covers the
//! presentation ceremony: [`LotteryEngine::begin_draw`] fixes the winner,
//! the caller animates for as long as it likes, then [`LotteryEngine::commit`]
//! (or [`LotteryEngine::abort`]) returns the engine to Idle. A second
//! `begin_draw` while Drawing is rejected, never queued. [`PendingDraw`]
//! cannot be cloned, so each draw commits at most once.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{GachaError, GachaResult};
use crate::item::Item;
use crate::repository::ItemRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawState {
    Idle,
    Drawing,
}

/// A selection waiting for its ceremony to finish.
#[derive(Debug)]
pub struct PendingDraw {
    item: Item,
}

impl PendingDraw {
    /// Snapshot of the selected item, not yet flagged as a winner.
    pub fn item(&self) -> &Item {
        &self.item
    }
}

pub struct LotteryEngine {
    state: DrawState,
    rng: Pcg32,
}

impl LotteryEngine {
    pub fn new() -> Self {
        Self {
            state: DrawState::Idle,
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: DrawState::Idle,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Whether a draw is currently in flight.
    pub fn is_running(&self) -> bool {
        self.state == DrawState::Drawing
    }

    /// Select a winner uniformly from `eligible` and enter the Drawing
    /// state. The winner is fixed here; the ceremony only delays the reveal.
    pub fn begin_draw(&mut self, eligible: &[Item]) -> GachaResult<PendingDraw> {
        if self.state == DrawState::Drawing {
            return Err(GachaError::AlreadyRunning);
        }
        if eligible.is_empty() {
            return Err(GachaError::NoEligibleItems);
        }

        let roll: f64 = self.rng.random();
        let item = eligible[pick_index(eligible.len(), roll)].clone();
        self.state = DrawState::Drawing;
        log::debug!(
            "Selected \"{}\" from {} eligible items",
            item.name,
            eligible.len()
        );
        Ok(PendingDraw { item })
    }

    /// Make the pending selection durable through the repository. The
    /// engine returns to Idle whether the commit succeeds or fails; on
    /// failure the winner flag is unchanged and the draw never happened.
    pub fn commit(&mut self, pending: PendingDraw, repo: &mut ItemRepository) -> GachaResult<Item> {
        self.state = DrawState::Idle;
        repo.mark_as_winner(pending.item.id)
    }

    /// Discard a pending selection without committing (ceremony fault path).
    pub fn abort(&mut self, pending: PendingDraw) {
        log::warn!("Draw aborted before commit: \"{}\"", pending.item.name);
        self.state = DrawState::Idle;
    }

    /// One-shot draw with no ceremony: select and commit immediately.
    pub fn draw(&mut self, repo: &mut ItemRepository) -> GachaResult<Item> {
        let pending = self.begin_draw(&repo.eligible_items())?;
        self.commit(pending, repo)
    }
}

impl Default for LotteryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform index over `len` items from a roll in `[0, 1)`: the roll is
/// scaled by `len` and floored, giving every index probability `1/len`.
pub fn pick_index(len: usize, roll: f64) -> usize {
    debug_assert!(len > 0);
    ((roll * len as f64) as usize).min(len - 1)
}
