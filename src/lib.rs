pub mod arrows;
pub mod block;
pub mod config;
pub mod filter;
pub mod location;
pub mod markup;
pub mod pagination;
pub mod slide;
pub mod sort;
pub mod source;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::arrows::{visible_arrow_state, ArrowVisibility, Direction};
    pub use crate::block::{Block, BlockContent, CarouselEvent, MountHandle, RenderedCarousel, Track};
    pub use crate::config::{CarouselConfig, Layout};
    pub use crate::location::{LocationProvider, StaticLocations};
    pub use crate::pagination::{Pagination, PaginationState, ScrollBehavior, ScrollTrack};
    pub use crate::slide::Slide;
    pub use crate::source::{ContentSource, HttpContentSource, JsonFileSource, StaticContentSource};
    pub use crate::types::ContentItem;
    pub use crate::{Carousel, DecorateOutcome};
}

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::block::{Block, BlockContent, RenderedCarousel, Track};
use crate::config::CarouselConfig;
use crate::filter::filter_by_location;
use crate::location::LocationProvider;
use crate::slide::render_slides;
use crate::sort::sort_by_last_modified;
use crate::source::ContentSource;
use crate::types::ContentItem;

/// What one `decorate` call did to its block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecorateOutcome {
    /// New content swapped in.
    Rendered { slides: usize, pages: usize },
    /// No source reference configured; the block is left as authored.
    Inactive,
    /// The block was unmounted or re-decorated while loading; result dropped.
    Stale,
    /// Fetch or location lookup failed; prior content left untouched.
    Failed(String),
}

/// Loads, filters, sorts and paginates content into carousel blocks.
/// One instance may decorate any number of blocks; each block keeps its own page state.
pub struct Carousel {
    id: Uuid,
    content: Arc<dyn ContentSource>,
    locations: Arc<dyn LocationProvider>,
}

impl Carousel {
    pub fn new(content: Arc<dyn ContentSource>, locations: Arc<dyn LocationProvider>) -> Self {
        Self { id: Uuid::new_v4(), content, locations }
    }

    pub fn id(&self) -> Uuid { self.id }

    /// Decorate `block` using the configuration authored on it.
    pub async fn decorate(&self, block: &mut Block) -> DecorateOutcome {
        let config = CarouselConfig::from_authoring(&block.props);
        self.decorate_with(block, &config).await
    }

    /// Decorate `block` with an explicit configuration. Never fails: errors are
    /// logged here and reported through the outcome.
    pub async fn decorate_with(&self, block: &mut Block, config: &CarouselConfig) -> DecorateOutcome {
        let Some(reference) = config.active_reference() else {
            tracing::debug!(carousel = %self.id, "no content reference; block left inactive");
            return DecorateOutcome::Inactive;
        };

        let generation = block.begin_decorate();
        let span = tracing::info_span!("decorate", carousel = %self.id, reference, generation);
        let loaded = self.load(reference).instrument(span).await;

        if !block.is_current(generation) {
            tracing::debug!(carousel = %self.id, generation, "block changed while loading; discarding result");
            return DecorateOutcome::Stale;
        }

        let items = match loaded {
            Ok(items) => items,
            Err(e) => {
                let msg = format!("{e:#}");
                tracing::error!(
                    carousel = %self.id,
                    error = %msg,
                    "error loading content fragments or user location"
                );
                return DecorateOutcome::Failed(msg);
            }
        };

        let per_page = config.slides_per_page();
        let slides = render_slides(&items, per_page, &config.layout);
        let rendered = RenderedCarousel::new(slides, per_page, config.arrow_navigation, Track::new(block.track_width));
        let outcome =
            DecorateOutcome::Rendered { slides: rendered.slides.len(), pages: rendered.pagination.total_pages() };

        block.content = BlockContent::Rendered(rendered);
        if let Some(style) = &config.custom_style {
            block.add_class(style);
        }
        tracing::info!(carousel = %self.id, ?outcome, "carousel rendered");
        outcome
    }

    /// Fetch and location lookup run together; both must succeed.
    /// Returns the filtered, newest-first item list.
    pub async fn load(&self, reference: &str) -> Result<Vec<ContentItem>> {
        let (items, locations) = futures::try_join!(self.content.fetch(reference), self.locations.locations())?;
        let fetched = items.len();
        let filtered = filter_by_location(&items, locations);
        tracing::debug!(fetched, kept = filtered.len(), "filtered by location");
        Ok(sort_by_last_modified(filtered))
    }
}
