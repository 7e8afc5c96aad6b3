//! CarouselInstance - one root's index, stage and timer lifecycle

use std::sync::Arc;
use std::time::Duration;

use contracts::{CarouselId, Direction, ImageRef, Preloader, RootId};
use observability::{record_rotation, record_timer_start};
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::CarouselError;
use crate::stage::Stage;
use crate::timer::{RotationTimer, Tick, TickSender};

/// Everything needed to build an instance
#[derive(Debug, Clone)]
pub struct CarouselSetup {
    pub root_id: RootId,
    pub interval: Duration,
    /// Ordered images, at least one
    pub images: Vec<ImageRef>,
    /// Index shown first
    pub initial_index: usize,
    pub stage: Stage,
}

/// Point-in-time view of one carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub id: CarouselId,
    pub root_id: RootId,
    pub current_index: usize,
    pub len: usize,
    pub running: bool,
    pub attached: bool,
    pub active_src: String,
    pub rotations: u64,
}

/// A single carousel root
///
/// `current_index` is always a valid index into `images`, and the instance
/// is running exactly when it holds a timer.
pub struct CarouselInstance {
    id: CarouselId,
    root_id: RootId,
    images: Vec<ImageRef>,
    current_index: usize,
    interval: Duration,
    stage: Stage,
    timer: Option<RotationTimer>,
    last_generation: u64,
    ticks: TickSender,
    preloader: Arc<dyn Preloader>,
    attached: bool,
    rotations: u64,
}

impl std::fmt::Debug for CarouselInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselInstance")
            .field("id", &self.id)
            .field("root_id", &self.root_id)
            .field("current_index", &self.current_index)
            .field("len", &self.images.len())
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .field("attached", &self.attached)
            .finish()
    }
}

impl CarouselInstance {
    /// Build an instance and preload the image after the initial one.
    ///
    /// The timer is not started; call [`CarouselInstance::start`].
    ///
    /// # Errors
    /// Empty image list, out-of-range initial index, zero interval
    pub fn new(
        id: CarouselId,
        setup: CarouselSetup,
        ticks: TickSender,
        preloader: Arc<dyn Preloader>,
    ) -> Result<Self, CarouselError> {
        let CarouselSetup {
            root_id,
            interval,
            images,
            initial_index,
            stage,
        } = setup;

        if images.is_empty() {
            return Err(CarouselError::EmptyImageList { root_id });
        }
        if initial_index >= images.len() {
            return Err(CarouselError::InitialIndexOutOfRange {
                root_id,
                index: initial_index,
                len: images.len(),
            });
        }
        if interval.is_zero() {
            return Err(CarouselError::ZeroInterval { root_id });
        }

        let instance = Self {
            id,
            root_id,
            images,
            current_index: initial_index,
            interval,
            stage,
            timer: None,
            last_generation: 0,
            ticks,
            preloader,
            attached: true,
            rotations: 0,
        };
        instance.preload_next();
        Ok(instance)
    }

    pub fn id(&self) -> CarouselId {
        self.id
    }

    pub fn root_id(&self) -> &RootId {
        &self.root_id
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_image(&self) -> &ImageRef {
        &self.images[self.current_index]
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Whether a rotation timer is live
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether the root is still attached to the document
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Index moves applied so far (timer and user)
    pub fn rotation_count(&self) -> u64 {
        self.rotations
    }

    /// Start periodic rotation. No-op while already running.
    #[instrument(level = "debug", name = "carousel_start", skip(self), fields(root_id = %self.root_id))]
    pub fn start(&mut self) {
        if self.timer.is_some() {
            trace!("Already running");
            return;
        }
        if !self.attached {
            debug!("Root detached, not starting");
            return;
        }

        self.last_generation += 1;
        self.timer = Some(RotationTimer::spawn(
            self.id,
            self.last_generation,
            self.interval,
            self.ticks.clone(),
        ));
        record_timer_start(self.root_id.as_str());
        debug!(generation = self.last_generation, interval_ms = self.interval.as_millis() as u64, "Rotation started");
    }

    /// Cancel the rotation timer. Idempotent.
    #[instrument(level = "debug", name = "carousel_stop", skip(self), fields(root_id = %self.root_id))]
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(generation = timer.generation(), "Rotation stopped");
        }
    }

    /// Apply a timer tick. Returns `false` for ticks of a cancelled timer.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        let live = self
            .timer
            .as_ref()
            .is_some_and(|timer| timer.generation() == tick.generation);
        if !live {
            trace!(root_id = %self.root_id, generation = tick.generation, "Stale tick ignored");
            return false;
        }

        self.step(Direction::Forward, "timer");
        true
    }

    /// Move forward one image (wrapping) and restart the timer if running
    pub fn advance(&mut self) {
        self.step(Direction::Forward, "user");
        self.restart_timer();
    }

    /// Move back one image (wrapping) and restart the timer if running
    pub fn retreat(&mut self) {
        self.step(Direction::Backward, "user");
        self.restart_timer();
    }

    /// Move in `direction` as a user action
    pub fn navigate(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.advance(),
            Direction::Backward => self.retreat(),
        }
    }

    /// Show image `index` directly.
    ///
    /// Out-of-range indices are rejected and leave the carousel untouched.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            debug!(root_id = %self.root_id, index, len = self.images.len(), "jump_to out of range, ignored");
            return false;
        }
        if index != self.current_index {
            self.move_to(index, "jump");
        }
        self.restart_timer();
        true
    }

    /// Pointer entered the root: pause
    pub fn on_hover_enter(&mut self) {
        self.stop();
    }

    /// Pointer left the root: resume
    pub fn on_hover_leave(&mut self) {
        self.start();
    }

    /// Hand the current image to the overlay and pause rotation
    pub fn on_open_requested(&mut self) -> ImageRef {
        self.stop();
        self.current_image().clone()
    }

    /// Root removed from the document: cancel the timer for good
    pub fn teardown(&mut self) {
        self.stop();
        self.attached = false;
        debug!(root_id = %self.root_id, "Carousel torn down");
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            id: self.id,
            root_id: self.root_id.clone(),
            current_index: self.current_index,
            len: self.images.len(),
            running: self.is_running(),
            attached: self.attached,
            active_src: self.stage.active_element().src.clone(),
            rotations: self.rotations,
        }
    }

    fn step(&mut self, direction: Direction, trigger: &'static str) {
        let len = self.images.len();
        if len < 2 {
            return;
        }
        let next = match direction {
            Direction::Forward => (self.current_index + 1) % len,
            Direction::Backward => (self.current_index + len - 1) % len,
        };
        self.move_to(next, trigger);
    }

    fn move_to(&mut self, index: usize, trigger: &'static str) {
        self.stage.show(index, &self.images[index]);
        self.current_index = index;
        self.rotations += 1;
        record_rotation(self.root_id.as_str(), trigger);
        trace!(root_id = %self.root_id, index, trigger, "Moved");
        self.preload_next();
    }

    fn restart_timer(&mut self) {
        if self.timer.is_some() {
            self.stop();
            self.start();
        }
    }

    fn preload_next(&self) {
        let len = self.images.len();
        if len > 1 {
            let next = (self.current_index + 1) % len;
            self.preloader.preload(&self.images[next].id);
        }
    }
}
