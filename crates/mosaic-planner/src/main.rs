//! Mosaic Planner entry point.
//!
//! Loads the persisted settings, applies command-line overrides through the
//! same validated setters, and prints the panel grid for the selected
//! equipment.
//!
//! # Usage
//!
//! ```text
//! mosaic-planner [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Settings file [default: platform config dir]
//!   --enable / --disable Turn mosaic mode on or off
//!   --panels-x <N>       Panels across (clamped to 1..=20)
//!   --panels-y <N>       Panels down (clamped to 1..=20)
//!   --overlap <PCT>      Overlap between panels (clamped to 0..=50)
//!   --rotation <DEG>     Grid rotation (wrapped into [0, 360))
//!   --equipment <NAME>   Select a catalog entry by name
//!   --fov <DEG>          Use a fixed square field of view instead
//!   --format <FMT>       text | json [default: text]
//!   --save               Write the resulting settings back to the config file
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- TOML settings (defaults on first run)
//!  └─ MosaicPlanner::new()       -- settings + grid cache + equipment catalog
//!       └─ apply persisted values, then CLI overrides
//!  └─ planner.plan()             -- cached panel grid
//!  └─ render_text / render_json  -- print the report
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mosaic_planner::application::equipment::Equipment;
use mosaic_planner::application::plan_mosaic::MosaicPlanner;
use mosaic_planner::infrastructure::render::{render_json, render_text, PanelReport};
use mosaic_planner::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, EquipmentConfig, MosaicConfig,
    PlannerConfig,
};

/// Name of the catalog entry created by `--fov`.
const FOV_OVERRIDE_NAME: &str = "command-line field of view";

/// Output format for the panel report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Plans a mosaic of overlapping panels for the selected telescope equipment.
#[derive(Debug, Parser)]
#[command(
    name = "mosaic-planner",
    about = "Computes the panel layout of a sky mosaic for the selected equipment",
    version
)]
struct Cli {
    /// Settings file to load (and to write with --save).
    #[arg(long, env = "MOSAIC_CONFIG")]
    config: Option<PathBuf>,

    /// Turn mosaic mode on.
    #[arg(long, conflicts_with = "disable")]
    enable: bool,

    /// Turn mosaic mode off.
    #[arg(long)]
    disable: bool,

    /// Number of panels across; out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    panels_x: Option<i32>,

    /// Number of panels down; out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    panels_y: Option<i32>,

    /// Overlap between adjacent panels in percent; clamped to 0..=50.
    #[arg(long, allow_negative_numbers = true)]
    overlap: Option<f64>,

    /// Rotation of the grid in degrees; wrapped into [0, 360).
    #[arg(long, allow_negative_numbers = true)]
    rotation: Option<f64>,

    /// Select a catalog entry by name.
    #[arg(long, conflicts_with = "fov")]
    equipment: Option<String>,

    /// Use a fixed square field of view (degrees) instead of the catalog.
    #[arg(long)]
    fov: Option<f64>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write the resulting mosaic settings and equipment selection back.
    #[arg(long)]
    save: bool,
}

impl Cli {
    /// Resolves the settings file path: `--config` or the platform default.
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path().context("no --config given and no platform config directory"),
        }
    }

    /// Requested mosaic-mode change, if any.
    fn enabled_override(&self) -> Option<bool> {
        match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path()?;
    let config = load_config_from(&config_path)
        .with_context(|| format!("failed to load settings from {}", config_path.display()))?;

    // `RUST_LOG` wins; otherwise use the level from the settings file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(path = %config_path.display(), "mosaic planner starting");

    let mut planner = MosaicPlanner::new(config.equipment.to_catalog());
    planner.update(|state| config.mosaic.apply_to(state));

    // ── Command-line overrides ────────────────────────────────────────────────
    if let Some(enabled) = cli.enabled_override() {
        planner.set_enabled(enabled);
    }
    if let Some(n) = cli.panels_x {
        planner.set_panels_x(n);
    }
    if let Some(n) = cli.panels_y {
        planner.set_panels_y(n);
    }
    if let Some(p) = cli.overlap {
        planner.set_overlap_percent(p);
    }
    if let Some(a) = cli.rotation {
        planner.set_rotation_deg(a);
    }
    if let Some(name) = &cli.equipment {
        planner
            .provider_mut()
            .select(name)
            .context("cannot select equipment")?;
    }
    if let Some(deg) = cli.fov {
        let catalog = planner.provider_mut();
        catalog.insert(
            FOV_OVERRIDE_NAME,
            Equipment::Fixed {
                width_deg: deg,
                height_deg: deg,
            },
        );
        catalog.select(FOV_OVERRIDE_NAME)?;
    }

    let settings = planner.settings();
    debug!(?settings, generation = planner.state().generation(), "effective settings");

    // ── Render ────────────────────────────────────────────────────────────────
    let plan = planner.plan();
    let equipment = planner.provider().selected().map(|e| e.name.clone());
    let report = PanelReport::from_plan(&plan, equipment);

    match cli.format {
        ReportFormat::Text => print!("{}", render_text(&report)),
        ReportFormat::Json => println!("{}", render_json(&report).context("failed to encode report")?),
    }

    // ── Persist ───────────────────────────────────────────────────────────────
    if cli.save {
        let mut equipment = EquipmentConfig::from_catalog(planner.provider());
        // A one-off --fov is not part of the user's catalog.
        equipment.entries.retain(|e| e.name() != FOV_OVERRIDE_NAME);
        if equipment.selected.as_deref() == Some(FOV_OVERRIDE_NAME) {
            equipment.selected = config.equipment.selected.clone();
        }

        let updated = PlannerConfig {
            general: config.general.clone(),
            mosaic: MosaicConfig::from_settings(&settings),
            equipment,
        };
        save_config_to(&config_path, &updated)
            .with_context(|| format!("failed to save settings to {}", config_path.display()))?;
    }

    Ok(())
}
