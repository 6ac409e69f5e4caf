//! Page model and the single writer of the current page.
//!
//! Three inputs move the carousel: indicator clicks, arrow clicks and the
//! user free-scrolling the track. All of them end up in [`Pagination::go_to_page`]
//! or [`Pagination::on_scroll_settle`], which update `current_page` first and
//! then derive indicator selection and arrow visibility from it. The state write
//! happens at call time, not when a smooth scroll animation finishes, so a
//! second click mid-animation always sees a consistent page.

use serde::Serialize;
use std::ops::Range;

use crate::arrows::{visible_arrow_state, ArrowVisibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The horizontally scrolling element holding the slides.
pub trait ScrollTrack {
    /// Visible width; one page spans exactly this many pixels.
    fn client_width(&self) -> f64;
    fn scroll_to(&mut self, left: f64, behavior: ScrollBehavior);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
    pub slides_per_page: usize,
}

/// One page-indicator button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub page: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    state: PaginationState,
    total_slides: usize,
    indicators: Vec<Indicator>,
    arrows_enabled: bool,
    arrows: ArrowVisibility,
}

/// `ceil(total_slides / slides_per_page)`, and 1 for an empty carousel.
pub fn total_pages(total_slides: usize, slides_per_page: usize) -> usize {
    total_slides.div_ceil(slides_per_page.max(1)).max(1)
}

/// Slide index range covered by each page; the last page may be short.
pub fn page_ranges(total_slides: usize, slides_per_page: usize) -> Vec<Range<usize>> {
    let per = slides_per_page.max(1);
    (0..total_slides)
        .step_by(per)
        .map(|start| start..(start + per).min(total_slides))
        .collect()
}

pub fn indicator_label(page: usize, slides_per_page: usize, total_slides: usize) -> String {
    let per = slides_per_page.max(1);
    let start = page * per + 1;
    let end = ((page + 1) * per).min(total_slides);
    format!("Go to slides {start}-{end}")
}

impl Pagination {
    /// Fresh page model positioned at page 0. An empty carousel gets no indicators.
    pub fn initialize(total_slides: usize, slides_per_page: usize, arrows_enabled: bool) -> Self {
        let slides_per_page = slides_per_page.max(1);
        let total_pages = total_pages(total_slides, slides_per_page);
        let mut p = Self {
            state: PaginationState { current_page: 0, total_pages, slides_per_page },
            total_slides,
            indicators: Vec::new(),
            arrows_enabled,
            arrows: ArrowVisibility::HIDDEN,
        };
        p.rebuild_indicators();
        p.sync(0);
        p
    }

    pub fn state(&self) -> PaginationState { self.state }
    pub fn current_page(&self) -> usize { self.state.current_page }
    pub fn total_pages(&self) -> usize { self.state.total_pages }
    pub fn slides_per_page(&self) -> usize { self.state.slides_per_page }
    pub fn total_slides(&self) -> usize { self.total_slides }
    pub fn indicators(&self) -> &[Indicator] { &self.indicators }
    pub fn arrows_enabled(&self) -> bool { self.arrows_enabled }

    /// Current arrow visibility; always hidden when arrows are disabled.
    pub fn arrows(&self) -> ArrowVisibility { self.arrows }

    pub fn selected_indicator(&self) -> Option<usize> {
        self.indicators.iter().position(|i| i.selected)
    }

    pub fn clamp_page(&self, page: usize) -> usize {
        page.min(self.state.total_pages - 1)
    }

    /// Scroll `track` so `page` is left-aligned and make it current.
    /// Out-of-range pages are clamped. Returns the page actually selected.
    pub fn go_to_page<T: ScrollTrack + ?Sized>(&mut self, page: usize, track: &mut T) -> usize {
        let page = self.clamp_page(page);
        track.scroll_to(track.client_width() * page as f64, ScrollBehavior::Smooth);
        self.sync(page);
        page
    }

    /// The user stopped scrolling at `scroll_left`. Picks the nearest page and
    /// resyncs indicators and arrows without issuing another scroll.
    pub fn on_scroll_settle(&mut self, scroll_left: f64, track_width: f64) -> usize {
        let page = self.page_at_offset(scroll_left, track_width);
        self.sync(page);
        page
    }

    /// Resync selection to a specific page without scrolling, e.g. from a visible slide.
    pub fn select_page(&mut self, page: usize) -> usize {
        let page = self.clamp_page(page);
        self.sync(page);
        page
    }

    /// Nearest page for a scroll offset. A track that has not been laid out yet
    /// (zero or non-finite width) maps to page 0.
    pub fn page_at_offset(&self, scroll_left: f64, track_width: f64) -> usize {
        if !(track_width.is_finite() && track_width > 0.0) || !scroll_left.is_finite() {
            return 0;
        }
        let raw = (scroll_left / track_width).round();
        if raw <= 0.0 {
            0
        } else {
            self.clamp_page(raw as usize)
        }
    }

    /// Change the page size. The first slide of the current page stays in view.
    pub fn reconfigure<T: ScrollTrack + ?Sized>(&mut self, slides_per_page: usize, track: &mut T) -> usize {
        let slides_per_page = slides_per_page.max(1);
        if slides_per_page == self.state.slides_per_page {
            return self.state.current_page;
        }
        let first_visible = self.state.current_page * self.state.slides_per_page;
        self.state.slides_per_page = slides_per_page;
        self.state.total_pages = total_pages(self.total_slides, slides_per_page);
        self.rebuild_indicators();
        let page = self.clamp_page(first_visible / slides_per_page);
        track.scroll_to(track.client_width() * page as f64, ScrollBehavior::Instant);
        self.sync(page);
        page
    }

    pub fn set_arrows_enabled(&mut self, enabled: bool) {
        self.arrows_enabled = enabled;
        self.sync(self.state.current_page);
    }

    fn rebuild_indicators(&mut self) {
        let per = self.state.slides_per_page;
        let total = self.total_slides;
        self.indicators = page_ranges(total, per)
            .into_iter()
            .enumerate()
            .map(|(page, _)| Indicator { page, label: indicator_label(page, per, total), selected: false })
            .collect();
    }

    // Only place `current_page` is written after construction.
    fn sync(&mut self, page: usize) {
        self.state.current_page = page;
        for ind in &mut self.indicators {
            ind.selected = ind.page == page;
        }
        self.arrows = if self.arrows_enabled {
            visible_arrow_state(page, self.state.total_pages)
        } else {
            ArrowVisibility::HIDDEN
        };
    }
}
