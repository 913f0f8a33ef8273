//! Runtime configuration.
//!
//! Settings are read from `config/default.toml` (or `config/local.toml` when
//! present) under the project root, overlaid with `FILMSTACK_*` environment
//! variables, and finally with command-line arguments.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use log::info;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{
    dispersion::RefrIndexModel,
    error::StackError,
    fresnel::ParallelConvention,
    layer::{Layer, Stack},
    problem::Problem,
};


/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    /// Sign convention for p-polarized reflection.
    #[serde(default)]
    pub convention: ParallelConvention,
    /// Output directory.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Also write results as JSON.
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub problems: Vec<ProblemSettings>,
}

fn default_directory() -> String {
    ".".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            convention: ParallelConvention::default(),
            directory: default_directory(),
            json: false,
            problems: Vec::new(),
        }
    }
}

/// One stack and its illumination, as written in the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProblemSettings {
    #[serde(default = "default_name")]
    pub name: String,
    /// Free-space wavelength, in the units of the film thicknesses.
    pub wavelength: f64,
    /// Angle of incidence in the cover medium, in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Layers from cover to substrate.
    pub layers: Vec<LayerSettings>,
}

fn default_name() -> String {
    "problem".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LayerSettings {
    pub n: RefrIndexModel,
    /// Omitted for the semi-infinite cover and substrate.
    #[serde(default)]
    pub thickness: Option<f64>,
}

impl LayerSettings {
    pub fn semi_infinite(n: Complex64) -> Self {
        Self {
            n: n.into(),
            thickness: None,
        }
    }

    pub fn film(n: Complex64, thickness: f64) -> Self {
        Self {
            n: n.into(),
            thickness: Some(thickness),
        }
    }
}

impl ProblemSettings {
    /// Evaluates the refractive index models at the problem wavelength and
    /// builds a validated [`Problem`].
    pub fn to_problem(&self, convention: ParallelConvention) -> Result<Problem, StackError> {
        let layers = self
            .layers
            .iter()
            .map(|layer| Layer {
                refr_index: layer.n.at(self.wavelength),
                thickness: layer.thickness,
            })
            .collect();
        let stack = Stack::new(layers)?;

        let problem = Problem::new(stack, self.wavelength, self.angle.to_radians())?;
        Ok(problem.with_convention(convention))
    }
}

/// Loads `config/default.toml` without environment or command-line overrides.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let config = Config::builder()
        .add_source(File::from(root.join("config/default.toml")).required(true))
        .build()
        .context("Error loading configuration")?;

    config
        .try_deserialize()
        .context("Error deserializing configuration")
}

/// Loads the configuration and applies environment and command-line overrides.
pub fn load_config() -> Result<Settings> {
    let args = CliArgs::parse();

    let config_file = match &args.config {
        Some(path) => path.clone(),
        None => {
            let root = retrieve_project_root()?;
            let local_config = root.join("config/local.toml");
            if local_config.exists() {
                local_config
            } else {
                root.join("config/default.toml")
            }
        }
    };
    info!("using configuration: {}", config_file.display());

    let config = Config::builder()
        .add_source(File::from(config_file.as_path()).required(true))
        .add_source(Environment::with_prefix("filmstack"))
        .build()
        .context("Error loading configuration")?;

    let mut settings: Settings = config
        .try_deserialize()
        .context("Error deserializing configuration")?;

    apply_cli(&mut settings, args)?;
    validate_config(&settings)?;

    println!("{}", settings);

    Ok(settings)
}

/// Applies command-line overrides on top of the loaded settings.
///
/// `--ri` replaces the configured problems with a single problem named `cli`;
/// `--wavelength` and `--angle` otherwise override every configured problem.
pub fn apply_cli(settings: &mut Settings, args: CliArgs) -> Result<()> {
    if let Some(convention) = args.convention {
        settings.convention = convention;
    }
    if let Some(dir) = args.dir {
        settings.directory = dir;
    }
    if args.json {
        settings.json = true;
    }

    if let Some(indices) = args.ri {
        let fallback = settings.problems.first();
        let wavelength = args
            .wavelength
            .or(fallback.map(|p| p.wavelength))
            .ok_or_else(|| {
                anyhow!("--ri requires a wavelength (-w) when no problem is configured")
            })?;
        let angle = args.angle.or(fallback.map(|p| p.angle)).unwrap_or(0.0);

        let thicknesses = args.thickness.unwrap_or_default();
        Stack::from_indices(&indices, &thicknesses)
            .context("Invalid --ri/--thickness stack")?;

        settings.problems = vec![cli_problem(&indices, &thicknesses, wavelength, angle)];
    } else {
        for problem in settings.problems.iter_mut() {
            if let Some(wavelength) = args.wavelength {
                problem.wavelength = wavelength;
            }
            if let Some(angle) = args.angle {
                problem.angle = angle;
            }
        }
    }

    Ok(())
}

/// Builds the command-line problem from index and thickness lists already
/// checked by [`Stack::from_indices`].
fn cli_problem(
    indices: &[Complex64],
    thicknesses: &[f64],
    wavelength: f64,
    angle: f64,
) -> ProblemSettings {
    let last = indices.len() - 1;
    let layers = indices
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            if i == 0 || i == last {
                LayerSettings::semi_infinite(n)
            } else {
                LayerSettings::film(n, thicknesses[i - 1])
            }
        })
        .collect();

    ProblemSettings {
        name: "cli".to_string(),
        wavelength,
        angle,
        layers,
    }
}

/// Retrieve the project root directory.
///
/// Tried in order: the `CARGO_MANIFEST_DIR` environment variable (set when
/// running through cargo), `FILMSTACK_ROOT_DIR`, then the nearest ancestor of
/// the executable that contains a `config` subdirectory.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("FILMSTACK_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Could not find project root directory"))
}

fn validate_config(settings: &Settings) -> Result<()> {
    if settings.problems.is_empty() {
        return Err(anyhow!("No problems configured"));
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "filmstack - reflection coefficients of planar thin-film stacks")]
pub struct CliArgs {
    /// Configuration file. Defaults to config/local.toml or config/default.toml
    /// under the project root.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Free-space wavelength, in the same units as the film thicknesses.
    #[arg(short, long)]
    wavelength: Option<f64>,

    /// Angle of incidence in the cover medium, in degrees.
    #[arg(short, long)]
    angle: Option<f64>,

    /// Refractive indices from cover to substrate, separated by spaces, e.g. "1.0 3.8+0.01i 1.45".
    /// Replaces the configured problems with a single stack.
    #[arg(short, long, value_parser, num_args = 1.., value_delimiter = ' ')]
    ri: Option<Vec<Complex64>>,

    /// Film thicknesses from the cover side, one per interior layer.
    #[arg(short, long, requires = "ri", num_args = 1.., value_delimiter = ' ')]
    thickness: Option<Vec<f64>>,

    /// Sign convention for p-polarized reflection.
    #[arg(long, value_enum)]
    convention: Option<ParallelConvention>,

    /// Output directory.
    #[arg(short, long)]
    dir: Option<String>,

    /// Also write results as JSON.
    #[arg(long)]
    json: bool,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settings:")?;
        writeln!(f, "  - Convention: {}", self.convention)?;
        writeln!(f, "  - Output Directory: {}", self.directory)?;
        writeln!(f, "  - Problems:")?;
        for problem in &self.problems {
            writeln!(
                f,
                "    - {}: wavelength {:.6}, angle {:.6} deg, {} layers",
                problem.name,
                problem.wavelength,
                problem.angle,
                problem.layers.len()
            )?;
        }
        Ok(())
    }
}
