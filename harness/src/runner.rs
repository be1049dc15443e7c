//! Harness runner: world in, trace and bundle out.
//!
//! # Pipeline
//!
//! ```text
//! world.build_graph() → fingerprint → search_with_policy()
//!   → trace canonical bytes → digest → summary.json → build_bundle()
//! ```
//!
//! The runner implements no search or hashing logic of its own; it only
//! sequences kernel and engine calls.

use stepwise_kernel::carrier::graph::{GraphBuildError, GraphStore};
use stepwise_kernel::proof::canon::{canonical_json_bytes, CanonError};
use stepwise_kernel::proof::hash::ContentHash;
use stepwise_search::error::SearchError;
use stepwise_search::policy::SearchPolicyV1;
use stepwise_search::search::search_with_policy;
use stepwise_search::trace::TraceV1;

use crate::bundle::{build_bundle, BundleError, TraceBundleV1, SUMMARY_ARTIFACT, TRACE_ARTIFACT};
use crate::config::{ConfigError, RunConfigV1};
use crate::contract::MazeWorldV1;

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("world graph is invalid: {0}")]
    Graph(#[from] GraphBuildError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
    #[error("bundle assembly failed: {0}")]
    Bundle(#[from] BundleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything one harness run produced.
#[derive(Debug)]
pub struct SearchRunV1 {
    pub world_id: String,
    pub policy: SearchPolicyV1,
    pub graph: GraphStore,
    pub graph_fingerprint: ContentHash,
    pub trace: TraceV1,
    pub trace_digest: ContentHash,
    pub bundle: TraceBundleV1,
}

/// Search `world` under `policy` and package the result.
///
/// # Errors
///
/// Returns [`RunError`] if the graph cannot be built, the search fails, or
/// serialization fails. A search that finds no path is a successful run.
pub fn run_search(world: &dyn MazeWorldV1, policy: &SearchPolicyV1) -> Result<SearchRunV1, RunError> {
    run_search_with_config(world, policy, None)
}

/// Build the world named by `config` and run it. The summary records the
/// config digest.
///
/// # Errors
///
/// Returns [`RunError::Config`] for an invalid config, otherwise as
/// [`run_search`].
pub fn run_config(config: &RunConfigV1) -> Result<SearchRunV1, RunError> {
    config.validate()?;
    let policy = config.policy()?;
    let config_digest = config.digest()?;
    let world = config.world.build()?;
    run_search_with_config(world.as_ref(), &policy, Some(&config_digest))
}

fn run_search_with_config(
    world: &dyn MazeWorldV1,
    policy: &SearchPolicyV1,
    config_digest: Option<&ContentHash>,
) -> Result<SearchRunV1, RunError> {
    let world_id = world.world_id().to_string();
    let span = tracing::info_span!("run_search", world = %world_id, strategy = %policy.strategy);
    let _guard = span.enter();

    let graph = world.build_graph()?;
    let asymmetric = graph.asymmetric_edges();
    if !asymmetric.is_empty() {
        tracing::warn!(
            count = asymmetric.len(),
            first = ?asymmetric.first(),
            "graph has one-way edges"
        );
    }
    let graph_fingerprint = graph.fingerprint()?;

    let trace = search_with_policy(&graph, policy, world.start(), world.goal())?;
    let trace_bytes = trace.to_canonical_json_bytes()?;
    let trace_digest = trace.digest()?;

    let summary = serde_json::json!({
        "config_digest": config_digest.map(ContentHash::as_str),
        "graph_fingerprint": graph_fingerprint.as_str(),
        "metadata": trace.metadata().to_json(),
        "path": trace.final_path().map(|path| {
            path.iter().map(|p| serde_json::json!([p.x, p.y])).collect::<Vec<_>>()
        }),
        "policy": policy.to_json(),
        "schema_version": "summary.v1",
        "step_count": trace.len(),
        "trace_digest": trace_digest.as_str(),
        "world_id": world_id,
    });
    let summary_bytes = canonical_json_bytes(&summary)?;

    let bundle = build_bundle(vec![
        (TRACE_ARTIFACT.to_string(), trace_bytes, true),
        (SUMMARY_ARTIFACT.to_string(), summary_bytes, true),
    ])?;

    tracing::info!(
        steps = trace.len(),
        goal_reached = trace.is_goal_reached(),
        trace_digest = %trace_digest,
        bundle_digest = %bundle.digest,
        "run complete"
    );

    Ok(SearchRunV1 {
        world_id,
        policy: *policy,
        graph,
        graph_fingerprint,
        trace,
        trace_digest,
        bundle,
    })
}
