//! Page - the event loop driving every carousel timer and input event
//!
//! All state changes happen on this loop: timer tasks only enqueue ticks and
//! input only enqueues events, so a timer-driven move and a user-driven move
//! are never applied concurrently.

use std::sync::Arc;

use carousel::{CarouselInstance, CarouselRegistry, CarouselSnapshot, Tick};
use contracts::{InputEvent, ManifestFetcher, PageBlueprint, Preloader};
use image_source::HttpManifestFetcher;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::error::ViewerError;
use crate::gallery::Gallery;
use crate::overlay::{Focus, Overlay, OverlayState};
use crate::router::{InputRouter, Routed};

/// Sender half used to feed input into a page
pub type InputSender = mpsc::UnboundedSender<InputEvent>;

/// Outcome of one [`Page::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A timer tick; `applied` is false for stale ticks
    Tick { applied: bool },
    Input(Routed),
}

/// Observable state of the whole page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub carousels: Vec<CarouselSnapshot>,
    pub overlay: Option<OverlayState>,
    pub focus: Option<Focus>,
}

impl PageSnapshot {
    pub fn carousel(&self, root_id: &str) -> Option<&CarouselSnapshot> {
        self.carousels.iter().find(|c| c.root_id == root_id)
    }
}

/// One page: its carousels, the shared overlay and the optional gallery
pub struct Page {
    registry: CarouselRegistry,
    overlay: Option<Overlay>,
    gallery: Option<Gallery>,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
    input_tx: Option<InputSender>,
    /// Latest state, published after every handled message once spawned
    publisher: Option<watch::Sender<PageSnapshot>>,
}

impl Page {
    /// Initialise every carousel of `blueprint` and start rotation
    #[instrument(
        name = "page_build",
        skip(blueprint, fetcher, preloader),
        fields(roots = blueprint.carousels.len())
    )]
    pub async fn build<F: ManifestFetcher>(
        blueprint: &PageBlueprint,
        fetcher: &F,
        preloader: Arc<dyn Preloader>,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        let mut registry = CarouselRegistry::new(tick_tx, preloader);
        registry.discover(blueprint, fetcher).await;
        registry.start_all();

        let overlay = Overlay::from_markup(blueprint.overlay.as_ref());
        let gallery = Gallery::from_markup(blueprint.gallery.as_ref());
        info!(
            carousels = registry.len(),
            overlay = overlay.is_some(),
            gallery = gallery.is_some(),
            "Page ready"
        );

        Self {
            registry,
            overlay,
            gallery,
            tick_rx,
            input_rx,
            input_tx: Some(input_tx),
            publisher: None,
        }
    }

    /// Build a page fetching manifests and preloading over HTTP
    ///
    /// # Errors
    /// Invalid origin in the page settings
    pub async fn from_blueprint(blueprint: &PageBlueprint) -> Result<Self, ViewerError> {
        let fetcher = HttpManifestFetcher::from_settings(&blueprint.settings)?;
        let preloader = Arc::new(fetcher.preloader());
        Ok(Self::build(blueprint, &fetcher, preloader).await)
    }

    /// Sender for feeding input into this page
    pub fn input_sender(&self) -> Option<InputSender> {
        self.input_tx.clone()
    }

    pub fn registry(&self) -> &CarouselRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    /// Instance built for `root_id`
    pub fn carousel(&self, root_id: &str) -> Option<&CarouselInstance> {
        self.registry
            .id_for_root(root_id)
            .and_then(|id| self.registry.get(id))
    }

    /// Apply one input event immediately
    pub fn dispatch(&mut self, event: InputEvent) -> Routed {
        InputRouter::new(&mut self.registry, self.overlay.as_mut(), self.gallery.as_ref()).route(&event)
    }

    /// Wait for the next tick or input event and apply it
    pub async fn step(&mut self) -> Option<Step> {
        tokio::select! {
            Some(tick) = self.tick_rx.recv() => Some(Step::Tick {
                applied: self.registry.apply_tick(tick),
            }),
            Some(event) = self.input_rx.recv() => Some(Step::Input(self.dispatch(event))),
            else => None,
        }
    }

    /// Apply everything already queued without waiting. Returns the number
    /// of messages handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        loop {
            if let Ok(tick) = self.tick_rx.try_recv() {
                self.registry.apply_tick(tick);
            } else if let Ok(event) = self.input_rx.try_recv() {
                self.dispatch(event);
            } else {
                break;
            }
            handled += 1;
        }
        handled
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            carousels: self.registry.snapshots(),
            overlay: self.overlay.as_ref().map(|o| o.state().clone()),
            focus: self.overlay.as_ref().map(Overlay::focus),
        }
    }

    /// Run the event loop until every input sender is dropped.
    ///
    /// Stops all carousels on exit and returns the final state.
    #[instrument(name = "page_run", skip(self))]
    pub async fn run(mut self) -> PageSnapshot {
        // Only external senders keep the loop alive
        self.input_tx = None;
        info!(carousels = self.registry.len(), "Page event loop started");

        let mut events: u64 = 0;
        let mut ticks: u64 = 0;
        loop {
            tokio::select! {
                biased;
                event = self.input_rx.recv() => match event {
                    Some(event) => {
                        events += 1;
                        self.dispatch(event);
                    }
                    None => break,
                },
                Some(tick) = self.tick_rx.recv() => {
                    ticks += 1;
                    if !self.registry.apply_tick(tick) {
                        continue;
                    }
                }
            }
            self.publish();
        }

        self.registry.stop_all();
        self.publish();
        info!(events, ticks, "Page input closed, event loop stopped");
        self.snapshot()
    }

    fn publish(&self) {
        if let Some(publisher) = &self.publisher {
            publisher.send_replace(self.snapshot());
        }
    }

    /// Run the event loop as a background task
    pub fn spawn(mut self) -> PageHandle {
        let input_tx = match self.input_tx.take() {
            Some(tx) => tx,
            None => {
                let (tx, rx) = mpsc::unbounded_channel();
                self.input_rx = rx;
                tx
            }
        };
        let (publisher, snapshots) = watch::channel(self.snapshot());
        self.publisher = Some(publisher);

        let join = tokio::spawn(self.run());
        PageHandle {
            input_tx,
            snapshots,
            join,
        }
    }
}

/// Handle to a page running in the background
#[derive(Debug)]
pub struct PageHandle {
    input_tx: InputSender,
    snapshots: watch::Receiver<PageSnapshot>,
    join: JoinHandle<PageSnapshot>,
}

impl PageHandle {
    /// Queue an input event
    ///
    /// # Errors
    /// The event loop has stopped
    pub fn send(&self, event: InputEvent) -> Result<(), ViewerError> {
        self.input_tx.send(event).map_err(|_| ViewerError::LoopClosed)
    }

    /// Additional sender for the same page
    pub fn sender(&self) -> InputSender {
        self.input_tx.clone()
    }

    /// State as of the last message the loop handled
    pub fn latest(&self) -> PageSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Whether the loop task has exited
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop the event loop and return the final page state.
    ///
    /// Waits for senders obtained through [`PageHandle::sender`] to be
    /// dropped as well.
    ///
    /// # Errors
    /// The loop task panicked or was cancelled
    #[instrument(name = "page_handle_shutdown", skip(self))]
    pub async fn shutdown(self) -> Result<PageSnapshot, ViewerError> {
        drop(self.input_tx);
        match self.join.await {
            Ok(snapshot) => {
                debug!("Page shutdown complete");
                Ok(snapshot)
            }
            Err(e) => {
                error!(error = ?e, "Page event loop task failed");
                Err(ViewerError::Join(e.to_string()))
            }
        }
    }
}
