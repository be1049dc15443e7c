//! Search policy types.

/// Search strategy.
///
/// Both strategies share one step-recording skeleton; they differ only in
/// the frontier shape and in when a node joins the explored set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrategyV1 {
    /// Best-first on `f = g + h` with the Manhattan heuristic.
    AStar,
    /// FIFO breadth-first; explores in non-decreasing hop count.
    Bfs,
}

impl StrategyV1 {
    /// Stable machine name (`"a_star"`, `"bfs"`), used in canonical JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "a_star",
            Self::Bfs => "bfs",
        }
    }

    /// Human-readable name used in step log lines.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AStar => "A*",
            Self::Bfs => "BFS",
        }
    }
}

impl std::fmt::Display for StrategyV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`StrategyV1`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {name:?} (expected \"a_star\" or \"bfs\")")]
pub struct ParseStrategyError {
    pub name: String,
}

impl std::str::FromStr for StrategyV1 {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a_star" | "astar" => Ok(Self::AStar),
            "bfs" => Ok(Self::Bfs),
            other => Err(ParseStrategyError {
                name: other.to_string(),
            }),
        }
    }
}

/// How a found path is played back in the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathPlaybackV1 {
    /// One `PathUnwind` step per path prefix, then the terminal step.
    Stepwise,
    /// Only the terminal step.
    TerminalOnly,
}

impl PathPlaybackV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stepwise => "stepwise",
            Self::TerminalOnly => "terminal_only",
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchPolicyV1 {
    pub strategy: StrategyV1,
    pub path_playback: PathPlaybackV1,
}

impl SearchPolicyV1 {
    /// Policy for `strategy` with default playback.
    #[must_use]
    pub fn for_strategy(strategy: StrategyV1) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path_playback": self.path_playback.as_str(),
            "strategy": self.strategy.as_str(),
        })
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            strategy: StrategyV1::AStar,
            path_playback: PathPlaybackV1::Stepwise,
        }
    }
}
