use serde::Serialize;

use crate::config::Layout;
use crate::types::ContentItem;

/// Render-ready unit bound to one content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    /// Position in the filtered, sorted sequence.
    pub index: usize,
    pub page: usize,
    /// Percentage of the track width, `100 / slides_per_page`.
    pub width_percent: f64,
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub image: String,
}

pub fn slide_width_percent(slides_per_page: usize) -> f64 {
    100.0 / slides_per_page.max(1) as f64
}

pub fn render_slides(items: &[ContentItem], slides_per_page: usize, layout: &Layout) -> Vec<Slide> {
    let per_page = slides_per_page.max(1);
    let width = slide_width_percent(per_page);
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Slide {
            index,
            page: index / per_page,
            width_percent: width,
            layout: layout.clone(),
            title: item.title.clone(),
            description: item.description_text().to_string(),
            image: item.image_path().to_string(),
        })
        .collect()
}
