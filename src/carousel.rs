use serde::{Deserialize, Serialize};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use thiserror::Error;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use ts_rs::TS;
use utoipa::ToSchema;

/// Direction
///
/// One step forward or backward through a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    Empty,
}

/// Carousel
///
/// Cyclic index over a fixed, non-empty list. The index is always in
/// `[0, len)`: every mutation computes it modulo the length or clamps it.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

// Non-empty by construction, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl<T> Carousel<T> {
    pub fn new(items: Vec<T>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self { items, index: 0 })
    }

    /// Moves one step with wraparound and returns the new index.
    pub fn advance(&mut self, direction: Direction) -> usize {
        let len = self.items.len();
        self.index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Prev => (self.index + len - 1) % len,
        };
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.advance(Direction::Next)
    }

    pub fn prev(&mut self) -> usize {
        self.advance(Direction::Prev)
    }

    /// Jumps straight to `index`. Values past the end clamp to the last item.
    pub fn select_index(&mut self, index: usize) -> usize {
        let last = self.items.len() - 1;
        if index > last {
            tracing::debug!(requested = index, clamped = last, "carousel index out of range");
        }
        self.index = index.min(last);
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

/// A carousel shared between its owning page and an autoplay task.
pub type SharedCarousel<T> = Arc<Mutex<Carousel<T>>>;

/// Autoplay
///
/// Advances a shared carousel on a fixed period. The returned handle owns the
/// timer: dropping it (or calling `stop`) cancels the task, so nothing touches
/// the carousel after its owner is gone.
pub struct Autoplay;

impl Autoplay {
    /// Must be called from within a Tokio runtime.
    pub fn spawn<T: Send + 'static>(
        carousel: SharedCarousel<T>,
        every: Duration,
    ) -> AutoplayHandle {
        // tokio's interval rejects a zero period.
        let every = every.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Ok(mut guard) = carousel.lock() else {
                    tracing::error!("carousel lock poisoned; autoplay stopping");
                    break;
                };
                let index = guard.next();
                tracing::trace!(index, "autoplay advanced carousel");
            }
        });

        AutoplayHandle { task }
    }
}

/// AutoplayHandle
///
/// Cancels the autoplay task on `stop` or drop.
#[derive(Debug)]
pub struct AutoplayHandle {
    task: JoinHandle<()>,
}

impl AutoplayHandle {
    pub fn stop(self) {
        // Drop does the work.
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for AutoplayHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Lightbox
///
/// Overlay over one selected item. Being open without a selection is not
/// representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lightbox<T> {
    Closed,
    Open(T),
}

impl<T> Default for Lightbox<T> {
    fn default() -> Self {
        Lightbox::Closed
    }
}

impl<T> Lightbox<T> {
    pub fn open(&mut self, item: T) {
        *self = Lightbox::Open(item);
    }

    /// Explicit close and backdrop click both land here.
    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open(_))
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Lightbox::Open(item) => Some(item),
            Lightbox::Closed => None,
        }
    }
}
