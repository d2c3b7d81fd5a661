//! Run configuration.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, an optional TOML file, and interactive prompts (model and export
//! space only). The result is an immutable [`RunConfig`] that every stage
//! receives by reference.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use serde::Deserialize;
use tracing::warn;

use crate::correct::CorrectionModel;
use crate::error::ConfigError;
use crate::export::ExportSpace;
use crate::proj::epsg::CrsIdentifier;
use crate::proj::{Hemisphere, ProjectionBackend, ProjectionContext};
use crate::prompt::{self, Prompter};

/// Command-line interface.
#[derive(Parser, Debug, Default)]
#[command(name = "traverse-closure")]
#[command(version)]
#[command(about = "Correct the closure error of a surveyed traverse and export the result")]
pub struct Cli {
    /// Input point file (header line, then `label;latitude;longitude` rows)
    pub input: Option<PathBuf>,

    /// Corrected coordinates as `Longitude;Latitude` text
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Point shapefile to write
    #[arg(long)]
    pub points: Option<PathBuf>,

    /// Polygon shapefile to write
    #[arg(long)]
    pub polygon: Option<PathBuf>,

    /// UTM zone (1-60)
    #[arg(short, long)]
    pub zone: Option<i64>,

    /// Hemisphere: N or S
    #[arg(long)]
    pub hemisphere: Option<String>,

    /// CRS tag for the shapefiles, e.g. EPSG:32629
    #[arg(long)]
    pub crs: Option<String>,

    /// Correction model: uniform (1), proportional (2) or composed (3)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Exported coordinates: planar (1) or geographic (2)
    #[arg(short, long)]
    pub export_space: Option<String>,

    /// Projection implementation: native or proj4rs
    #[arg(long)]
    pub backend: Option<String>,

    /// Write a comparison plot (SVG) to this path
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Never prompt; missing selections are errors
    #[arg(long)]
    pub no_prompt: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Settings as written in a TOML config file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub points: Option<PathBuf>,
    pub polygon: Option<PathBuf>,
    pub zone: Option<i64>,
    pub hemisphere: Option<String>,
    pub crs: Option<String>,
    pub model: Option<String>,
    pub export_space: Option<String>,
    pub backend: Option<String>,
    pub plot: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay command-line values on top of file values.
    pub fn merge_cli(self, cli: &Cli) -> Self {
        Self {
            input: cli.input.clone().or(self.input),
            output: cli.output.clone().or(self.output),
            points: cli.points.clone().or(self.points),
            polygon: cli.polygon.clone().or(self.polygon),
            zone: cli.zone.or(self.zone),
            hemisphere: cli.hemisphere.clone().or(self.hemisphere),
            crs: cli.crs.clone().or(self.crs),
            model: cli.model.clone().or(self.model),
            export_space: cli.export_space.clone().or(self.export_space),
            backend: cli.backend.clone().or(self.backend),
            plot: cli.plot.clone().or(self.plot),
        }
    }
}

/// Immutable parameters for one correction run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_text: PathBuf,
    pub points_path: PathBuf,
    pub polygon_path: PathBuf,
    pub projection: ProjectionContext,
    pub backend: ProjectionBackend,
    pub crs: CrsIdentifier,
    pub model: CorrectionModel,
    pub export_space: ExportSpace,
    pub plot_path: Option<PathBuf>,
}

fn invalid(what: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidSelection {
        what,
        value: value.to_string(),
        expected,
    }
}

impl RunConfig {
    /// Build from the command line, reading `--config` if given.
    pub fn from_cli(cli: &Cli, prompter: &mut dyn Prompter) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file.merge_cli(cli), prompter)
    }

    /// Validate merged settings, prompting for a missing model or export space.
    ///
    /// Everything is checked before the run touches the file system.
    pub fn resolve(settings: FileConfig, prompter: &mut dyn Prompter) -> Result<Self, ConfigError> {
        let input = settings.input.ok_or(ConfigError::Missing("input"))?;
        let output_text = settings.output.ok_or(ConfigError::Missing("output"))?;
        let points_path = settings.points.ok_or(ConfigError::Missing("points"))?;
        let polygon_path = settings.polygon.ok_or(ConfigError::Missing("polygon"))?;

        let zone = settings.zone.ok_or(ConfigError::Missing("zone"))?;
        let hemisphere: Hemisphere = settings
            .hemisphere
            .as_deref()
            .ok_or(ConfigError::Missing("hemisphere"))?
            .parse()?;
        let projection = ProjectionContext::new(zone, hemisphere)?;

        let backend = match settings.backend.as_deref() {
            Some(name) => ProjectionBackend::from_name(name)
                .ok_or_else(|| invalid("projection backend", name, "native, proj4rs"))?,
            None => ProjectionBackend::default(),
        };

        let model = match settings.model.as_deref() {
            Some(name) => CorrectionModel::from_name(name).ok_or_else(|| {
                invalid("correction model", name, "1/uniform, 2/proportional, 3/composed")
            })?,
            None => prompt::ask_model(prompter)?,
        };

        let export_space = match settings.export_space.as_deref() {
            Some(name) => ExportSpace::from_name(name)
                .ok_or_else(|| invalid("export space", name, "1/planar, 2/geographic"))?,
            None => prompt::ask_export_space(prompter)?,
        };

        let crs = match settings.crs.as_deref() {
            Some(code) => code.parse::<CrsIdentifier>()?,
            None => match export_space {
                ExportSpace::Planar => CrsIdentifier::from(projection),
                ExportSpace::Geographic => CrsIdentifier::Wgs84Geographic,
            },
        };
        if crs.is_geographic() != (export_space == ExportSpace::Geographic) {
            warn!(%crs, ?export_space, "CRS tag does not match the exported coordinate space");
        }

        Ok(Self {
            input,
            output_text,
            points_path,
            polygon_path,
            projection,
            backend,
            crs,
            model,
            export_space,
            plot_path: settings.plot,
        })
    }
}
