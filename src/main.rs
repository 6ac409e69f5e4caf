mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cfcarousel::markup::render_block;
use cfcarousel::pagination::{indicator_label, page_ranges, total_pages};
use cfcarousel::prelude::*;
use cli::{Cli, Commands, SourceArgs};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cfcarousel=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = CarouselConfig::load(cli.config.as_deref())?;
    config.apply_env();

    match cli.command {
        Commands::Render { source, json } => {
            let block = decorate(&source, &mut config).await?;
            if json {
                let summary = serde_json::json!({
                    "classes": block.classes,
                    "carousel": block.rendered(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", render_block(&block));
            }
        }
        Commands::Pages { total, slides } => {
            let slides = slides.max(1);
            println!("{} slide(s), {} per page, {} page(s)", total, slides, total_pages(total, slides));
            for (page, range) in page_ranges(total, slides).into_iter().enumerate() {
                println!("  page {page}: {} slide(s)  \"{}\"", range.len(), indicator_label(page, slides, total));
            }
        }
        Commands::Simulate { source, events } => {
            let mut block = decorate(&source, &mut config).await?;
            let Some(carousel) = block.rendered_mut() else { bail!("carousel did not render") };
            print_state("init", carousel);
            for ev in &events {
                apply_event(carousel, ev)?;
                print_state(ev, carousel);
            }
        }
    }
    Ok(())
}

async fn decorate(args: &SourceArgs, config: &mut CarouselConfig) -> Result<Block> {
    if let Some(r) = &args.reference { config.reference = Some(r.clone()); }
    if let Some(n) = args.slides { config.slides_to_show = n.max(1); }
    if args.arrows { config.arrow_navigation = true; }

    let content: Arc<dyn ContentSource> = match &args.file {
        Some(path) => {
            // A saved response needs no real reference.
            if config.active_reference().is_none() { config.reference = Some("local".into()); }
            Arc::new(JsonFileSource::new(path))
        }
        None => Arc::new(HttpContentSource::new(config.source.clone())?),
    };
    let locations: Arc<dyn LocationProvider> = if args.locations.is_empty() {
        Arc::new(StaticLocations::default())
    } else {
        Arc::new(StaticLocations::new(args.locations.clone()))
    };

    let mut block = Block::new(Default::default()).with_track_width(args.width);
    let carousel = Carousel::new(content, locations);
    match carousel.decorate_with(&mut block, config).await {
        DecorateOutcome::Rendered { slides, pages } => tracing::info!(slides, pages, "decorated"),
        DecorateOutcome::Inactive => bail!("no content reference configured (use --reference or --file)"),
        DecorateOutcome::Stale => bail!("decoration was superseded"),
        DecorateOutcome::Failed(msg) => bail!("decoration failed: {msg}"),
    }
    Ok(block)
}

fn apply_event(carousel: &mut RenderedCarousel, ev: &str) -> Result<()> {
    let (name, arg) = ev.split_once(':').unwrap_or((ev, ""));
    let num = || arg.trim().parse::<f64>().with_context(|| format!("bad number in event `{ev}`"));
    let event = match name {
        "page" => CarouselEvent::IndicatorClicked(num()? as usize),
        "left" => CarouselEvent::ArrowClicked(Direction::Left),
        "right" => CarouselEvent::ArrowClicked(Direction::Right),
        "scroll" => CarouselEvent::ScrollSettled { scroll_left: num()? },
        "slide" => {
            carousel.update_buttons(num()? as usize);
            return Ok(());
        }
        "per-page" => {
            carousel.set_slides_per_page(num()? as usize);
            return Ok(());
        }
        other => bail!("unknown event `{other}`"),
    };
    carousel.dispatch(event);
    Ok(())
}

fn print_state(label: &str, carousel: &RenderedCarousel) {
    let p = &carousel.pagination;
    let marks: String = p.indicators().iter().map(|i| if i.selected { '●' } else { '○' }).collect();
    let arrows = p.arrows();
    println!(
        "{label:>12}  page {}/{}  [{marks}]  scroll {:.0}  arrows {}{}",
        p.current_page() + 1,
        p.total_pages(),
        carousel.track.scroll_left,
        if arrows.show_left { '<' } else { ' ' },
        if arrows.show_right { '>' } else { ' ' },
    );
}
