use std::path::PathBuf;

use atx_comedy_shows::creek_cave::CreekCaveScraper;
use atx_comedy_shows::render::{generate_rss, listing_line};
use atx_comedy_shows::showclix::ShowClixScraper;
use atx_comedy_shows::velveeta::VelveetaScraper;
use atx_comedy_shows::{Catalog, PipelineOptions, RawShow, Result, VenueScraper, build_client, process};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "atx-shows", version, about = "Austin comedy show listings")]
struct Args {
    /// Only scrape venues whose name contains this text
    #[arg(long)]
    venue: Option<String>,

    /// Treat this day as today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// JSON catalog of known shows, free shows and venue settings
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Days ahead to list dated shows
    #[arg(long, default_value_t = atx_comedy_shows::pipeline::DEFAULT_WINDOW_DAYS)]
    window_days: u32,

    /// Where to write the RSS feed
    #[arg(long, value_name = "FILE", default_value = "docs/feeds/atx-comedy.xml")]
    rss: PathBuf,

    /// Print the listing without writing the feed
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let catalog = match args.catalog {
        Some(ref path) => Catalog::from_path(path)?,
        None => Catalog::austin(),
    };

    let scrapers: Vec<Box<dyn VenueScraper>> = vec![
        Box::new(CreekCaveScraper::new()),
        Box::new(ShowClixScraper::creek_and_cave()),
        Box::new(VelveetaScraper::new()),
    ];
    let wanted = args.venue.as_deref().map(str::to_lowercase);

    let client = build_client()?;
    let mut raws: Vec<RawShow> = Vec::new();
    for scraper in &scrapers {
        let venue = scraper.venue_name();
        if let Some(ref wanted) = wanted
            && !venue.to_lowercase().contains(wanted.as_str())
        {
            continue;
        }
        if let Err(e) = scraper.warm_up(&client).await {
            warn!(venue, error = %e, "warm-up failed");
        }
        match scraper.fetch_shows(&client).await {
            Ok(shows) => {
                info!(venue, count = shows.len(), "scraped");
                raws.extend(shows);
            }
            Err(e) => warn!(venue, error = %e, "scrape failed, skipping venue"),
        }
    }

    let mut options = PipelineOptions::new(today);
    options.window_days = Some(args.window_days);
    let shows = process(&raws, &catalog, &options);

    for show in &shows {
        println!("{}", listing_line(show, today));
    }

    if args.dry_run {
        return Ok(());
    }

    let xml = generate_rss(
        &shows,
        &catalog,
        today,
        "Austin Comedy Shows",
        "https://www.creekandcave.com",
        "Upcoming comedy shows around Austin",
    )?;
    if let Some(dir) = args.rss.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&args.rss, xml)?;
    info!(path = %args.rss.display(), count = shows.len(), "wrote feed");
    Ok(())
}
