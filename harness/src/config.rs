//! Run configuration: which world to search, and how.
//!
//! Configs are plain JSON documents deserialized with serde and checked by
//! [`RunConfigV1::validate`] before anything is built. Example:
//!
//! ```json
//! {
//!   "world": { "kind": "grid_maze", "width": 10, "height": 30, "wall_probability": 0.3, "seed": 7 },
//!   "strategy": "a_star",
//!   "path_playback": "stepwise"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stepwise_kernel::proof::canon::{canonical_json_bytes, CanonError};
use stepwise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use stepwise_search::policy::{ParseStrategyError, PathPlaybackV1, SearchPolicyV1, StrategyV1};

use crate::contract::MazeWorldV1;
use crate::worlds::corridor_maze::CorridorMaze;
use crate::worlds::grid_maze::GridMaze;
use crate::worlds::line_world::LineWorld;

/// Domain for run config digests.
pub const DOMAIN_RUN_CONFIG: HashDomain = HashDomain::RunConfig;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid dimensions must be positive (width {width}, height {height})")]
    ZeroDimension { width: usize, height: usize },
    #[error("grid must have at least two cells, got {cells}")]
    TooFewCells { cells: usize },
    #[error("grid {width}x{height} exceeds {max} cells", max = MAX_GRID_CELLS)]
    GridTooLarge { width: usize, height: usize },
    #[error("wall probability {value} outside [0, 1)")]
    WallProbabilityOutOfRange { value: f64 },
    #[error("grid has {open} open cells; start and goal need two")]
    TooFewOpenCells { open: usize },
    #[error("invalid grid row {row}: {detail}")]
    InvalidGrid { row: usize, detail: String },
    #[error(transparent)]
    UnknownStrategy(#[from] ParseStrategyError),
    #[error("unknown path playback {name:?} (expected \"stepwise\" or \"terminal_only\")")]
    UnknownPathPlayback { name: String },
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
}

/// Upper bound on `width * height` for generated grids.
pub const MAX_GRID_CELLS: usize = 1 << 20;

fn default_wall_probability() -> f64 {
    0.3
}

/// Random wall grid parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMazeConfigV1 {
    pub width: usize,
    pub height: usize,
    /// Chance that any one cell is a wall.
    #[serde(default = "default_wall_probability")]
    pub wall_probability: f64,
    #[serde(default)]
    pub seed: u64,
}

impl GridMazeConfigV1 {
    /// Check dimensions and wall probability; returns the cell count.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let cells = self
            .width
            .checked_mul(self.height)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            })?;
        if cells < 2 {
            return Err(ConfigError::TooFewCells { cells });
        }
        if !(0.0..1.0).contains(&self.wall_probability) {
            return Err(ConfigError::WallProbabilityOutOfRange {
                value: self.wall_probability,
            });
        }
        Ok(cells)
    }

    fn to_json(&self) -> serde_json::Value {
        // Canonical JSON carries integers only.
        serde_json::json!({
            "height": self.height,
            "seed": self.seed,
            "wall_probability": self.wall_probability.to_string(),
            "width": self.width,
        })
    }
}

impl Default for GridMazeConfigV1 {
    fn default() -> Self {
        Self {
            width: 10,
            height: 30,
            wall_probability: default_wall_probability(),
            seed: 0,
        }
    }
}

/// Which world a run searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldConfigV1 {
    CorridorMaze,
    LineWorld,
    GridMaze(GridMazeConfigV1),
}

impl WorldConfigV1 {
    /// Build the configured world.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if grid parameters are invalid or the
    /// generated grid has fewer than two open cells.
    pub fn build(&self) -> Result<Box<dyn MazeWorldV1>, ConfigError> {
        Ok(match self {
            Self::CorridorMaze => Box::new(CorridorMaze),
            Self::LineWorld => Box::new(LineWorld),
            Self::GridMaze(grid) => Box::new(GridMaze::generate(grid)?),
        })
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::CorridorMaze => serde_json::json!({"kind": "corridor_maze"}),
            Self::LineWorld => serde_json::json!({"kind": "line_world"}),
            Self::GridMaze(grid) => serde_json::json!({"grid": grid.to_json(), "kind": "grid_maze"}),
        }
    }
}

fn default_strategy() -> String {
    StrategyV1::AStar.as_str().to_string()
}

fn default_path_playback() -> String {
    PathPlaybackV1::Stepwise.as_str().to_string()
}

/// A complete run description.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfigV1 {
    pub world: WorldConfigV1,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_path_playback")]
    pub path_playback: String,
}

impl RunConfigV1 {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let WorldConfigV1::GridMaze(grid) = &self.world {
            grid.validate()?;
        }
        self.policy().map(|_| ())
    }

    /// The search policy named by `strategy` and `path_playback`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStrategy`] or
    /// [`ConfigError::UnknownPathPlayback`].
    pub fn policy(&self) -> Result<SearchPolicyV1, ConfigError> {
        let strategy: StrategyV1 = self.strategy.parse()?;
        let path_playback = match self.path_playback.as_str() {
            "stepwise" => PathPlaybackV1::Stepwise,
            "terminal_only" => PathPlaybackV1::TerminalOnly,
            other => {
                return Err(ConfigError::UnknownPathPlayback {
                    name: other.to_string(),
                })
            }
        };
        Ok(SearchPolicyV1 {
            strategy,
            path_playback,
        })
    }

    /// Domain-separated digest of the normalized config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config is invalid.
    pub fn digest(&self) -> Result<ContentHash, ConfigError> {
        let policy = self.policy()?;
        let value = serde_json::json!({
            "policy": policy.to_json(),
            "world": self.world.to_json(),
        });
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(DOMAIN_RUN_CONFIG, &bytes))
    }
}
