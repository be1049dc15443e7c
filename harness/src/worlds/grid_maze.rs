//! `GridMaze`: a random wall grid with 4-neighborhood movement.
//!
//! Every cell is a wall with probability `wall_probability`. Open cells
//! become graph nodes in row-major order; each is linked to its open
//! neighbors in the order right, down, left, up (`+x`, `+y`, `-x`, `-y`
//! with `y` growing downward). Start and goal are two distinct open cells
//! drawn from the same seeded RNG, so a config always yields the same maze.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stepwise_kernel::carrier::graph::{GraphBuildError, GraphStore};
use stepwise_kernel::carrier::position::Position;

use crate::config::{ConfigError, GridMazeConfigV1};
use crate::contract::MazeWorldV1;

const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    width: usize,
    height: usize,
    /// Row-major; `true` is a wall.
    walls: Vec<bool>,
    start: Position,
    goal: Position,
}

impl GridMaze {
    /// Generate a maze from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid or fewer than two
    /// cells are open.
    pub fn generate(config: &GridMazeConfigV1) -> Result<Self, ConfigError> {
        let cells = config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let walls: Vec<bool> = (0..cells)
            .map(|_| rng.random::<f64>() < config.wall_probability)
            .collect();

        let open: Vec<usize> = (0..walls.len()).filter(|&i| !walls[i]).collect();
        if open.len() < 2 {
            return Err(ConfigError::TooFewOpenCells { open: open.len() });
        }
        let s = rng.random_range(0..open.len());
        let mut g = rng.random_range(0..open.len() - 1);
        if g >= s {
            g += 1;
        }

        let width = config.width;
        let maze = Self {
            width,
            height: config.height,
            walls,
            start: cell_position(open[s], width),
            goal: cell_position(open[g], width),
        };
        tracing::debug!(
            width,
            height = maze.height,
            open = open.len(),
            start = %maze.start,
            goal = %maze.goal,
            "generated grid maze"
        );
        Ok(maze)
    }

    /// Parse a maze drawn with `#` walls, `.` open cells, and one `S` and
    /// one `G` marking start and goal. Rows must have equal length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] on ragged rows, unknown
    /// characters, or a missing or repeated `S`/`G`.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(ConfigError::InvalidGrid {
                row: 0,
                detail: "empty grid".into(),
            });
        }

        let mut walls = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ConfigError::InvalidGrid {
                    row: y,
                    detail: format!("expected {width} cells"),
                });
            }
            for (x, c) in row.chars().enumerate() {
                let position = cell_position(y * width + x, width);
                let marker = match c {
                    '#' => {
                        walls.push(true);
                        continue;
                    }
                    '.' => None,
                    'S' => Some(&mut start),
                    'G' => Some(&mut goal),
                    other => {
                        return Err(ConfigError::InvalidGrid {
                            row: y,
                            detail: format!("unexpected character {other:?}"),
                        })
                    }
                };
                if let Some(slot) = marker {
                    if slot.replace(position).is_some() {
                        return Err(ConfigError::InvalidGrid {
                            row: y,
                            detail: format!("repeated marker {c:?}"),
                        });
                    }
                }
                walls.push(false);
            }
        }

        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(ConfigError::InvalidGrid {
                row: height,
                detail: "grid needs one S and one G".into(),
            });
        };
        Ok(Self {
            width,
            height,
            walls,
            start,
            goal,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `position` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|i| !self.walls[i])
    }

    /// Number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.walls.iter().filter(|&&w| !w).count()
    }

    /// Render the grid one row per line, cells separated by spaces:
    /// `S` start, `G` goal, `*` path, `#` wall, `.` open.
    #[must_use]
    pub fn render_ascii(&self, path: Option<&[Position]>) -> String {
        let path = path.unwrap_or_default();
        let mut out = String::with_capacity(self.height * (self.width * 2 + 1));
        for y in 0..self.height {
            let row: Vec<&str> = (0..self.width)
                .map(|x| {
                    let position = cell_position(y * self.width + x, self.width);
                    if position == self.start {
                        "S"
                    } else if position == self.goal {
                        "G"
                    } else if path.contains(&position) {
                        "*"
                    } else if self.walls[y * self.width + x] {
                        "#"
                    } else {
                        "."
                    }
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }

    fn cell(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn cell_position(cell: usize, width: usize) -> Position {
    Position::new((cell % width) as i64, (cell / width) as i64)
}

impl MazeWorldV1 for GridMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid_maze"
    }

    fn build_graph(&self) -> Result<GraphStore, GraphBuildError> {
        let mut positions = Vec::new();
        let mut index_of = BTreeMap::new();
        for cell in (0..self.walls.len()).filter(|&i| !self.walls[i]) {
            let position = cell_position(cell, self.width);
            index_of.insert(position, positions.len());
            positions.push(position);
        }

        let adjacency: BTreeMap<usize, Vec<usize>> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let neighbors = DIRECTIONS
                    .iter()
                    .filter_map(|(dx, dy)| index_of.get(&Position::new(p.x + dx, p.y + dy)).copied())
                    .collect();
                (i, neighbors)
            })
            .collect();
        GraphStore::new(positions, &adjacency)
    }

    fn start(&self) -> Position {
        self.start
    }

    fn goal(&self) -> Position {
        self.goal
    }
}
