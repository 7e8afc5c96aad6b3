//! CarouselRegistry - discovers roots and initialises each exactly once

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use config_loader::carousel_config;
use contracts::{
    CarouselConfig, CarouselId, ImageRef, ManifestFetcher, PageBlueprint, Preloader, RootId,
    RootMarkup, StageVariant,
};
use image_source::ImageSource;
use observability::{record_source_resolved, SourceStep};
use tracing::{debug, info, instrument, warn};

use crate::instance::{CarouselInstance, CarouselSetup, CarouselSnapshot};
use crate::stage::Stage;
use crate::timer::{Tick, TickSender};

/// All carousel instances of one page, keyed by id and by root
pub struct CarouselRegistry {
    instances: BTreeMap<CarouselId, CarouselInstance>,
    by_root: HashMap<RootId, CarouselId>,
    /// Roots already handled, whether or not construction succeeded
    initialized: HashSet<RootId>,
    next_id: u32,
    ticks: TickSender,
    preloader: Arc<dyn Preloader>,
}

impl std::fmt::Debug for CarouselRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselRegistry")
            .field("instances", &self.instances.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl CarouselRegistry {
    /// Create an empty registry whose timers emit into `ticks`
    pub fn new(ticks: TickSender, preloader: Arc<dyn Preloader>) -> Self {
        Self {
            instances: BTreeMap::new(),
            by_root: HashMap::new(),
            initialized: HashSet::new(),
            next_id: 1,
            ticks,
            preloader,
        }
    }

    /// Initialise every carousel root of the page.
    ///
    /// The home root goes first; the generic sweep then covers every root
    /// flagged for it. Roots already initialised are skipped, so a home root
    /// that also matches the sweep is built once.
    #[instrument(
        name = "carousel_registry_discover",
        skip(self, blueprint, fetcher),
        fields(roots = blueprint.carousels.len())
    )]
    pub async fn discover<F: ManifestFetcher>(
        &mut self,
        blueprint: &PageBlueprint,
        fetcher: &F,
    ) -> Vec<CarouselId> {
        let source = ImageSource::new(fetcher, &blueprint.settings.fallback_images);
        let mut created = Vec::new();

        let home = blueprint.carousels.iter().filter(|root| root.home);
        let sweep = blueprint.carousels.iter().filter(|root| root.sweep);

        for root in home.chain(sweep) {
            if let Some(id) = self.initialize(root, &source).await {
                created.push(id);
            }
        }

        info!(carousels = created.len(), "Carousels initialised");
        created
    }

    /// Initialise one root unless it was handled before
    #[instrument(
        name = "carousel_registry_initialize",
        skip(self, root, source),
        fields(root_id = %root.root_id)
    )]
    pub async fn initialize<F: ManifestFetcher>(
        &mut self,
        root: &RootMarkup,
        source: &ImageSource<'_, F>,
    ) -> Option<CarouselId> {
        if !self.initialized.insert(root.root_id.clone()) {
            debug!("Root already initialised, skipping");
            return None;
        }

        let config = carousel_config(root);
        let setup = build_setup(&config, source).await;

        let id = CarouselId(self.next_id);
        match CarouselInstance::new(id, setup, self.ticks.clone(), Arc::clone(&self.preloader)) {
            Ok(instance) => {
                self.next_id += 1;
                debug!(%id, images = instance.len(), variant = ?config.variant, "Carousel created");
                self.by_root.insert(root.root_id.clone(), id);
                self.instances.insert(id, instance);
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Carousel not created");
                None
            }
        }
    }

    /// Start rotation on every attached instance
    pub fn start_all(&mut self) {
        for instance in self.instances.values_mut() {
            instance.start();
        }
    }

    /// Stop rotation on every instance
    pub fn stop_all(&mut self) {
        for instance in self.instances.values_mut() {
            instance.stop();
        }
    }

    /// Route a timer tick to its carousel. Returns whether it moved anything.
    pub fn apply_tick(&mut self, tick: Tick) -> bool {
        self.instances
            .get_mut(&tick.carousel)
            .is_some_and(|instance| instance.on_tick(tick))
    }

    pub fn get(&self, id: CarouselId) -> Option<&CarouselInstance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: CarouselId) -> Option<&mut CarouselInstance> {
        self.instances.get_mut(&id)
    }

    /// Id of the instance built for `root_id`
    pub fn id_for_root(&self, root_id: &str) -> Option<CarouselId> {
        self.by_root.get(root_id).copied()
    }

    /// Whether `root_id` has been handled (built or rejected)
    pub fn is_initialized(&self, root_id: &str) -> bool {
        self.initialized.contains(root_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarouselInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn snapshots(&self) -> Vec<CarouselSnapshot> {
        self.instances.values().map(CarouselInstance::snapshot).collect()
    }
}

/// Pick images and stage for a root.
///
/// A toggle root with pre-rendered children uses them as its slide set;
/// every other root resolves its list through the image source.
async fn build_setup<F: ManifestFetcher>(
    config: &CarouselConfig,
    source: &ImageSource<'_, F>,
) -> CarouselSetup {
    if config.variant == StageVariant::Toggle && !config.children.is_empty() {
        let images: Vec<ImageRef> = config
            .children
            .iter()
            .map(|child| {
                ImageRef::new(
                    child.src.clone(),
                    child.alt.clone().unwrap_or_else(|| config.alt_text.clone()),
                )
            })
            .collect();
        let (stage, initial_index) = Stage::from_children(&config.children, &config.alt_text);
        record_source_resolved(SourceStep::Markup, images.len());

        return CarouselSetup {
            root_id: config.root_id.clone(),
            interval: config.interval,
            images,
            initial_index,
            stage,
        };
    }

    let resolved = source.resolve(config).await;
    let stage = match config.variant {
        StageVariant::Crossfade => Stage::crossfade(&resolved.images[0], config.children.first()),
        StageVariant::Toggle => Stage::toggle(&resolved.images, 0),
    };

    CarouselSetup {
        root_id: config.root_id.clone(),
        interval: config.interval,
        images: resolved.images,
        initial_index: 0,
        stage,
    }
}
