use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::arrows::Direction;
use crate::pagination::{Pagination, ScrollBehavior, ScrollTrack};
use crate::slide::Slide;

/// Input reaching a mounted carousel. Every UI event is turned into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CarouselEvent {
    IndicatorClicked(usize),
    ArrowClicked(Direction),
    ScrollSettled { scroll_left: f64 },
}

/// Headless stand-in for the scrolling slide container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    pub scroll_left: f64,
    pub client_width: f64,
    /// Most recent programmatic scroll, kept for hosts that animate it.
    pub last_scroll: Option<(f64, ScrollBehavior)>,
}

impl Track {
    pub fn new(client_width: f64) -> Self {
        Self { client_width, ..Self::default() }
    }
}

impl ScrollTrack for Track {
    fn client_width(&self) -> f64 { self.client_width }

    fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior) {
        self.last_scroll = Some((left, behavior));
        self.scroll_left = left;
    }
}

/// Rendered carousel: slides, the track they sit in, and the page model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCarousel {
    pub slides: Vec<Slide>,
    pub track: Track,
    pub pagination: Pagination,
}

impl RenderedCarousel {
    pub fn new(slides: Vec<Slide>, slides_per_page: usize, arrows_enabled: bool, track: Track) -> Self {
        let pagination = Pagination::initialize(slides.len(), slides_per_page, arrows_enabled);
        Self { slides, track, pagination }
    }

    /// Route one input to the page model. Returns the resulting current page.
    pub fn dispatch(&mut self, event: CarouselEvent) -> usize {
        match event {
            CarouselEvent::IndicatorClicked(page) => self.pagination.go_to_page(page, &mut self.track),
            CarouselEvent::ArrowClicked(dir) => {
                self.pagination.arrow_clicked(dir, &mut self.track);
                self.pagination.current_page()
            }
            CarouselEvent::ScrollSettled { scroll_left } => {
                self.track.scroll_left = scroll_left;
                self.pagination.on_scroll_settle(scroll_left, self.track.client_width)
            }
        }
    }

    /// Resync indicator selection to the page owning `active_slide`, without scrolling.
    /// Unknown slide indices leave the state untouched.
    pub fn update_buttons(&mut self, active_slide: usize) -> Option<usize> {
        let page = self.slides.get(active_slide)?.page;
        Some(self.pagination.select_page(page))
    }

    pub fn set_slides_per_page(&mut self, slides_per_page: usize) -> usize {
        let page = self.pagination.reconfigure(slides_per_page, &mut self.track);
        let per = self.pagination.slides_per_page();
        let width = crate::slide::slide_width_percent(per);
        for s in &mut self.slides {
            s.page = s.index / per;
            s.width_percent = width;
        }
        page
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BlockContent {
    /// Raw authoring markup, not yet decorated.
    Authoring,
    Rendered(RenderedCarousel),
}

/// Generation counter shared between a block and whoever may unmount it.
#[derive(Debug, Clone, Default)]
pub struct MountHandle(Arc<AtomicU64>);

impl MountHandle {
    pub fn generation(&self) -> u64 { self.0.load(Ordering::SeqCst) }

    /// Detach the block; any decorate still in flight discards its result.
    pub fn unmount(&self) { self.0.fetch_add(1, Ordering::SeqCst); }

    fn bump(&self) -> u64 { self.0.fetch_add(1, Ordering::SeqCst) + 1 }
}

/// Mount point for one carousel on the page.
#[derive(Debug)]
pub struct Block {
    pub props: HashMap<String, String>,
    pub classes: Vec<String>,
    pub content: BlockContent,
    /// Width the track will report once laid out.
    pub track_width: f64,
    handle: MountHandle,
}

impl Block {
    pub fn new(props: HashMap<String, String>) -> Self {
        Self {
            props,
            classes: vec!["cf-carousel".to_string(), "block".to_string()],
            content: BlockContent::Authoring,
            track_width: 0.0,
            handle: MountHandle::default(),
        }
    }

    pub fn with_track_width(mut self, width: f64) -> Self {
        self.track_width = width;
        self
    }

    pub fn handle(&self) -> MountHandle { self.handle.clone() }

    /// Start a new decoration cycle; earlier cycles become stale.
    pub(crate) fn begin_decorate(&self) -> u64 { self.handle.bump() }

    pub(crate) fn is_current(&self, generation: u64) -> bool { self.handle.generation() == generation }

    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if !class.is_empty() && !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn rendered(&self) -> Option<&RenderedCarousel> {
        match &self.content {
            BlockContent::Rendered(r) => Some(r),
            BlockContent::Authoring => None,
        }
    }

    pub fn rendered_mut(&mut self) -> Option<&mut RenderedCarousel> {
        match &mut self.content {
            BlockContent::Rendered(r) => Some(r),
            BlockContent::Authoring => None,
        }
    }

    /// Forward an event if the block has been decorated.
    pub fn dispatch(&mut self, event: CarouselEvent) -> Option<usize> {
        self.rendered_mut().map(|r| r.dispatch(event))
    }

    pub fn update_buttons(&mut self, active_slide: usize) -> Option<usize> {
        self.rendered_mut()?.update_buttons(active_slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::slide::render_slides;
    use crate::types::ContentItem;

    fn carousel(n: usize, per: usize, arrows: bool) -> RenderedCarousel {
        let items: Vec<ContentItem> = (0..n).map(|i| ContentItem::new(format!("{i}"))).collect();
        RenderedCarousel::new(render_slides(&items, per, &Layout::Verticle), per, arrows, Track::new(500.0))
    }

    #[test]
    fn indicator_click_scrolls_smoothly() {
        let mut c = carousel(9, 3, false);
        assert_eq!(c.dispatch(CarouselEvent::IndicatorClicked(1)), 1);
        assert_eq!(c.track.scroll_left, 500.0);
        assert_eq!(c.track.last_scroll, Some((500.0, ScrollBehavior::Smooth)));
    }

    #[test]
    fn scroll_settle_after_programmatic_jump() {
        let mut c = carousel(9, 3, true);
        c.dispatch(CarouselEvent::IndicatorClicked(2));
        let last = c.track.last_scroll;
        assert_eq!(c.dispatch(CarouselEvent::ScrollSettled { scroll_left: 0.0 }), 0);
        assert_eq!(c.pagination.selected_indicator(), Some(0));
        assert!(!c.pagination.arrows().show_left);
        assert_eq!(c.track.last_scroll, last);
    }

    #[test]
    fn second_click_mid_animation_wins() {
        let mut c = carousel(9, 3, true);
        c.dispatch(CarouselEvent::ArrowClicked(Direction::Right));
        c.dispatch(CarouselEvent::ArrowClicked(Direction::Right));
        assert_eq!(c.pagination.current_page(), 2);
        c.dispatch(CarouselEvent::ArrowClicked(Direction::Right));
        assert_eq!(c.pagination.current_page(), 2);
        assert_eq!(c.pagination.selected_indicator(), Some(2));
    }

    #[test]
    fn update_buttons_uses_owning_page() {
        let mut c = carousel(7, 3, false);
        assert_eq!(c.update_buttons(4), Some(1));
        assert_eq!(c.pagination.selected_indicator(), Some(1));
        assert_eq!(c.track.last_scroll, None);
        assert_eq!(c.update_buttons(70), None);
        assert_eq!(c.pagination.current_page(), 1);
    }

    #[test]
    fn reconfigure_updates_slides() {
        let mut c = carousel(7, 3, false);
        c.set_slides_per_page(2);
        assert_eq!(c.pagination.total_pages(), 4);
        assert_eq!(c.slides[6].page, 3);
        assert_eq!(c.slides[0].width_percent, 50.0);
    }

    #[test]
    fn unmount_invalidates_generation() {
        let block = Block::new(HashMap::new());
        let g = block.begin_decorate();
        assert!(block.is_current(g));
        block.handle().unmount();
        assert!(!block.is_current(g));
    }

    #[test]
    fn undecorated_block_ignores_events() {
        let mut block = Block::new(HashMap::new());
        assert_eq!(block.dispatch(CarouselEvent::IndicatorClicked(1)), None);
        assert_eq!(block.update_buttons(0), None);
    }

    #[test]
    fn classes_are_deduplicated() {
        let mut block = Block::new(HashMap::new());
        block.add_class("promo");
        block.add_class(" promo ");
        block.add_class("");
        assert_eq!(block.classes.iter().filter(|c| *c == "promo").count(), 1);
    }
}
