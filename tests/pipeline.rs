use std::collections::HashMap;
use std::sync::Arc;

use cfcarousel::filter::filter_by_location;
use cfcarousel::markup::render_block;
use cfcarousel::prelude::*;
use cfcarousel::sort::sort_by_last_modified;
use serde_json::json;

fn response(n: usize) -> serde_json::Value {
    let items: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "title": format!("Offer {i}"),
                "description": { "plaintext": format!("Details {i}") },
                "image": { "_path": format!("/content/dam/offer-{i}.jpg") },
                "locationTag": ["region:Delhi"],
                "_metadata": { "calendarMetadata": [
                    { "name": "cq:lastModified", "value": format!("2024-01-{:02}T00:00:00.000Z", i + 1) }
                ]}
            })
        })
        .collect();
    json!({ "data": { "offersList": { "items": items } } })
}

fn authoring(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

async fn decorated(n: usize, pairs: &[(&str, &str)]) -> Block {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("response.json");
    std::fs::write(&path, response(n).to_string()).unwrap();
    let carousel = Carousel::new(Arc::new(JsonFileSource::new(&path)), Arc::new(StaticLocations::new(["delhi"])));
    let mut block = Block::new(authoring(pairs)).with_track_width(500.0);
    let outcome = carousel.decorate(&mut block).await;
    assert!(matches!(outcome, DecorateOutcome::Rendered { .. }), "{outcome:?}");
    block
}

#[tokio::test]
async fn seven_items_three_per_page() {
    let block = decorated(7, &[("reference", "offers"), ("slidesToShow", "3")]).await;
    let r = block.rendered().unwrap();
    assert_eq!(r.pagination.total_pages(), 3);
    let per_page: Vec<usize> = (0..3).map(|p| r.slides.iter().filter(|s| s.page == p).count()).collect();
    assert_eq!(per_page, vec![3, 3, 1]);
    assert_eq!(r.pagination.indicators()[2].label, "Go to slides 7-7");
    // newest first
    assert_eq!(r.slides[0].title, "Offer 6");
    assert_eq!(r.slides[6].title, "Offer 0");
}

#[test]
fn case_insensitive_location_match() {
    let items = vec![ContentItem::new("a").with_tags(["region:Delhi"])];
    assert_eq!(filter_by_location(&items, ["delhi"]).len(), 1);
}

#[test]
fn dated_item_sorts_before_undated() {
    let out = sort_by_last_modified(vec![
        ContentItem::new("undated"),
        ContentItem::new("dated").with_last_modified("2023-05-01T12:00:00Z"),
    ]);
    assert_eq!(out[0].title, "dated");
}

#[tokio::test]
async fn free_scroll_back_to_start() {
    let mut block = decorated(9, &[("reference", "offers"), ("arrowNavigation", "1")]).await;
    block.dispatch(CarouselEvent::IndicatorClicked(2));
    assert_eq!(block.rendered().unwrap().track.scroll_left, 1000.0);

    assert_eq!(block.dispatch(CarouselEvent::ScrollSettled { scroll_left: 0.0 }), Some(0));
    let r = block.rendered().unwrap();
    assert_eq!(r.pagination.selected_indicator(), Some(0));
    assert!(!r.pagination.arrows().show_left);
    assert!(r.pagination.arrows().show_right);
}

#[tokio::test]
async fn markup_reflects_state() {
    let mut block = decorated(
        4,
        &[("reference", "offers"), ("slidesToShow", "2"), ("arrowNavigation", "1"), ("customStyle", "promo")],
    )
    .await;
    block.dispatch(CarouselEvent::ArrowClicked(Direction::Right));
    let html = render_block(&block);
    assert!(html.contains(r#"class="cf-carousel block promo""#));
    assert!(html.contains(r#"<button title="Go to slides 3-4" class="selected">"#));
    assert!(html.contains(r#"cf-carousel-arrow-right" style="display: none;""#));
    assert_eq!(html.matches(r#"class="slide verticle""#).count(), 4);
}

#[tokio::test]
async fn two_blocks_keep_independent_state() {
    let mut a = decorated(9, &[("reference", "offers")]).await;
    let b = decorated(9, &[("reference", "offers")]).await;
    a.dispatch(CarouselEvent::IndicatorClicked(1));
    assert_eq!(a.rendered().unwrap().pagination.current_page(), 1);
    assert_eq!(b.rendered().unwrap().pagination.current_page(), 0);
}
