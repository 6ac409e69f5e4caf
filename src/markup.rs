//! HTML output for a decorated block.

use std::fmt::Write;

use crate::block::{Block, RenderedCarousel};
use crate::slide::Slide;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_percent(p: f64) -> String {
    let s = format!("{p:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn render_slide(slide: &Slide) -> String {
    format!(
        r#"<div class="slide {layout}" style="width: {width}%;">
  <div class="cf-carousel-image"><picture><img src="{src}" loading="eager"></picture></div>
  <div class="cf-carousel-text">
    <h3>{title}</h3>
    <p>{desc}</p>
  </div>
</div>"#,
        layout = escape(slide.layout.as_class()),
        width = fmt_percent(slide.width_percent),
        src = escape(&slide.image),
        title = escape(&slide.title),
        desc = escape(&slide.description),
    )
}

/// Indicator buttons; empty carousels render no container at all.
pub fn render_buttons(carousel: &RenderedCarousel) -> String {
    let indicators = carousel.pagination.indicators();
    if indicators.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<div class="cf-carousel-buttons">"#);
    for ind in indicators {
        let class = if ind.selected { r#" class="selected""# } else { "" };
        let _ = write!(out, r#"<button title="{}"{}></button>"#, escape(&ind.label), class);
    }
    out.push_str("</div>");
    out
}

pub fn render_arrows(carousel: &RenderedCarousel) -> String {
    if !carousel.pagination.arrows_enabled() {
        return String::new();
    }
    let vis = carousel.pagination.arrows();
    let style = |shown: bool| if shown { "" } else { r#" style="display: none;""# };
    format!(
        concat!(
            r#"<button class="cf-carousel-arrow cf-carousel-arrow-left"{}>&#8592;</button>"#,
            r#"<button class="cf-carousel-arrow cf-carousel-arrow-right"{}>&#8594;</button>"#,
        ),
        style(vis.show_left),
        style(vis.show_right),
    )
}

/// The block element followed by its sibling controls, as one wrapper.
pub fn render_block(block: &Block) -> String {
    let classes = block.classes.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" ");
    let Some(carousel) = block.rendered() else {
        return format!(r#"<div class="cf-carousel-wrapper"><div class="{classes}"></div></div>"#);
    };
    let slides = carousel.slides.iter().map(render_slide).collect::<Vec<_>>().join("\n");
    format!(
        "<div class=\"cf-carousel-wrapper\">\n<div class=\"{classes}\">\n{slides}\n</div>\n{}{}\n</div>",
        render_buttons(carousel),
        render_arrows(carousel),
    )
}
