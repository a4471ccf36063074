use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use spotdash::dashboard::{
    self, DashboardPage, PageOutcome, SortKey, SortOrder, TableSort, terminal,
};
use spotdash::interaction::SurfaceRect;
use spotdash::render::NullRenderer;
use spotdash::source::HttpPriceSource;
use spotdash::{DashResult, DashboardConfig, DisplayTimeZone, Locale};

#[derive(Parser)]
#[command(author, version, about = "Hourly electricity spot-price dashboard", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON config file (-c, --config)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Price feed URL, overriding the config
    #[arg(long, global = true)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Display language (-l, --locale)
    #[arg(short = 'l', long, value_enum, global = true)]
    locale: Option<CliLocale>,

    /// Fixed display offset from UTC in minutes, e.g. 120 for EET
    #[arg(long, global = true, allow_negative_numbers = true)]
    utc_offset_minutes: Option<i16>,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stat cards, guidance, best times and the hourly price table
    Summary(SummaryCommand),

    /// Write the bar chart and histogram as JSON frames or PNG images
    Render(RenderCommand),

    /// Resolve the bar chart tooltip for a pointer position
    Hover(HoverCommand),
}

#[derive(Args)]
struct SummaryCommand {
    /// Table sort key (-s, --sort)
    #[arg(short = 's', long, value_enum, default_value_t = CliSortKey::Time)]
    sort: CliSortKey,

    /// Table sort order (-r, --order)
    #[arg(short = 'r', long, value_enum, default_value_t = CliSortOrder::Asc)]
    order: CliSortOrder,
}

#[derive(Args)]
struct RenderCommand {
    /// Output directory (-o, --out-dir)
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Output format (-f, --format)
    #[arg(short = 'f', long, value_enum, default_value_t = CliFormat::Json)]
    format: CliFormat,
}

#[derive(Args)]
struct HoverCommand {
    /// Pointer x in client pixels
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Pointer y in client pixels
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Left edge of the displayed chart
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rect_left: f64,

    /// Top edge of the displayed chart
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rect_top: f64,

    /// Displayed width; defaults to the logical chart width
    #[arg(long)]
    rect_width: Option<f64>,

    /// Displayed height; defaults to the logical chart height
    #[arg(long)]
    rect_height: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLocale {
    Fi,
    En,
}

impl From<CliLocale> for Locale {
    fn from(value: CliLocale) -> Self {
        match value {
            CliLocale::Fi => Locale::Fi,
            CliLocale::En => Locale::En,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSortKey {
    Time,
    Price,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliFormat {
    Json,
    Png,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = spotdash::telemetry::init_default_tracing("info");

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> DashResult<ExitCode> {
    let config = resolve_config(&cli)?;
    let now = cli.at.unwrap_or_else(Utc::now);
    let source = HttpPriceSource::new(&config.source)?;

    let page = match dashboard::build_page(&source, &config, now) {
        PageOutcome::Ready(page) => page,
        PageOutcome::Failed(view) => {
            println!("{}", terminal::render_error(&view));
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command {
        Commands::Summary(command) => {
            let sort = TableSort::new(
                match command.sort {
                    CliSortKey::Time => SortKey::Time,
                    CliSortKey::Price => SortKey::Price,
                },
                match command.order {
                    CliSortOrder::Asc => SortOrder::Asc,
                    CliSortOrder::Desc => SortOrder::Desc,
                },
            );
            println!("{}", terminal::render_page(&page, sort));
        }
        Commands::Render(command) => write_charts(&page, &command)?,
        Commands::Hover(command) => hover(&page, &command)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_config(cli: &Cli) -> DashResult<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(url) = &cli.url {
        config = config.with_url(url.clone());
    }
    if cli.timeout_secs.is_some() {
        config = config.with_timeout_secs(cli.timeout_secs);
    }
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale.into());
    }
    if let Some(minutes) = cli.utc_offset_minutes {
        config = config.with_time_zone(DisplayTimeZone::FixedOffsetMinutes { minutes });
    }
    config.validate()?;
    Ok(config)
}

fn write_charts(page: &DashboardPage, command: &RenderCommand) -> DashResult<()> {
    fs::create_dir_all(&command.out_dir)?;
    match command.format {
        CliFormat::Json => {
            for (name, frame) in [
                ("price_chart.json", &page.price_chart),
                ("histogram.json", &page.histogram),
            ] {
                let path = command.out_dir.join(name);
                fs::write(&path, frame.to_json_pretty()?)?;
                info!(path = %path.display(), "wrote chart frame");
            }
            Ok(())
        }
        CliFormat::Png => write_pngs(page, &command.out_dir),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_pngs(page: &DashboardPage, out_dir: &Path) -> DashResult<()> {
    use spotdash::render::{CairoRenderer, Renderer};

    for (name, frame) in [
        ("price_chart.png", &page.price_chart),
        ("histogram.png", &page.histogram),
    ] {
        let mut renderer = CairoRenderer::for_viewport(frame.viewport)?;
        renderer.render(frame)?;
        let path = out_dir.join(name);
        renderer.write_png(&path)?;
        info!(path = %path.display(), "wrote chart png");
    }
    Ok(())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_pngs(_page: &DashboardPage, _out_dir: &Path) -> DashResult<()> {
    Err(spotdash::DashError::InvalidConfig(
        "png output requires feature `cairo-backend`".to_owned(),
    ))
}

fn hover(page: &DashboardPage, command: &HoverCommand) -> DashResult<()> {
    let viewport = page.bar_chart().viewport();
    let rect = SurfaceRect::new(
        command.rect_left,
        command.rect_top,
        command.rect_width.unwrap_or(f64::from(viewport.width)),
        command.rect_height.unwrap_or(f64::from(viewport.height)),
    );

    let mut controller = page.tooltip_controller(NullRenderer::default());
    controller.mount()?;
    match controller.pointer_move(command.x, command.y, rect)? {
        Some(tooltip) => {
            println!("{}", tooltip.price_text);
            println!("{}", tooltip.detail_text);
            println!(
                "bar {} anchored at ({:.1}, {:.1})",
                tooltip.index, tooltip.anchor_x, tooltip.anchor_y
            );
        }
        None => println!("no bar under pointer"),
    }
    Ok(())
}
