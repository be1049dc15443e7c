//! In-memory artifact bundle: the packaged output of a harness run.
//!
//! No file I/O in this module. Each artifact is tagged `normative`
//! (participates in the bundle digest) or observational (listed in the
//! manifest only). The bundle digest is computed over the **digest basis**:
//! a canonical JSON projection of normative artifact hashes.

use std::collections::BTreeMap;
use std::path::Path;

use stepwise_kernel::proof::canon::{canonical_json_bytes, CanonError};
use stepwise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain for bundle artifact content hashing.
pub const DOMAIN_BUNDLE_ARTIFACT: HashDomain = HashDomain::BundleArtifact;

/// Domain for the bundle digest.
pub const DOMAIN_BUNDLE_DIGEST: HashDomain = HashDomain::BundleDigest;

/// Canonical trace bytes.
pub const TRACE_ARTIFACT: &str = "trace.json";

/// Run summary: world, policy, digests, outcome.
pub const SUMMARY_ARTIFACT: &str = "summary.json";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    /// Logical filename (e.g., `"trace.json"`).
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    pub normative: bool,
}

/// The complete artifact bundle from a harness run.
#[derive(Debug, Clone)]
pub struct TraceBundleV1 {
    /// Artifacts by logical name, sorted.
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

/// Bundle assembly or verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
    #[error("artifact {artifact} content hash mismatch: stored {expected}, recomputed {actual}")]
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    #[error("manifest does not match artifacts")]
    ManifestMismatch,
    #[error("digest basis does not match normative artifacts")]
    DigestBasisMismatch,
    #[error("bundle digest mismatch: stored {expected}, recomputed {actual}")]
    DigestMismatch { expected: String, actual: String },
    #[error("normative artifact {artifact} is not canonical JSON")]
    ArtifactNotCanonical { artifact: String },
    #[error("required artifact {name} is missing")]
    MissingArtifact { name: &'static str },
    #[error("summary.json is malformed: {detail}")]
    SummaryMalformed { detail: String },
    #[error("summary declares trace digest {declared}, trace.json hashes to {recomputed}")]
    TraceDigestMismatch { declared: String, recomputed: String },
}

/// Build a bundle from `(name, content, normative)` triples.
///
/// Later entries with the same name replace earlier ones.
///
/// # Errors
///
/// Returns [`BundleError::Canon`] if the manifest cannot be serialized.
pub fn build_bundle(artifacts: Vec<(String, Vec<u8>, bool)>) -> Result<TraceBundleV1, BundleError> {
    let mut map = BTreeMap::new();
    for (name, content, normative) in artifacts {
        let content_hash = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &content);
        map.insert(
            name.clone(),
            BundleArtifact {
                name,
                content,
                content_hash,
                normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&map)?;
    let digest_basis = compute_digest_basis_bytes(&map)?;
    let digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis);
    Ok(TraceBundleV1 {
        artifacts: map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Verify the internal consistency of a bundle.
///
/// Checks, in order:
///
/// 1. Each artifact's `content_hash` matches its content.
/// 2. `manifest` and `digest_basis` match projections recomputed from the artifacts.
/// 3. `digest` matches the hash of `digest_basis`.
/// 4. Normative `.json` artifacts are in canonical form.
/// 5. `summary.json` declares the trace digest that `trace.json` actually hashes to.
///
/// # Errors
///
/// Returns the first [`BundleError`] encountered.
pub fn verify_bundle(bundle: &TraceBundleV1) -> Result<(), BundleError> {
    for artifact in bundle.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(BundleError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.to_string(),
                actual: recomputed.to_string(),
            });
        }
    }

    if compute_manifest_bytes(&bundle.artifacts)? != bundle.manifest {
        return Err(BundleError::ManifestMismatch);
    }
    if compute_digest_basis_bytes(&bundle.artifacts)? != bundle.digest_basis {
        return Err(BundleError::DigestBasisMismatch);
    }
    let recomputed = canonical_hash(DOMAIN_BUNDLE_DIGEST, &bundle.digest_basis);
    if recomputed != bundle.digest {
        return Err(BundleError::DigestMismatch {
            expected: bundle.digest.to_string(),
            actual: recomputed.to_string(),
        });
    }

    for artifact in bundle.artifacts.values() {
        if artifact.normative
            && Path::new(&artifact.name).extension().is_some_and(|e| e == "json")
            && !is_canonical_json(&artifact.content)
        {
            return Err(BundleError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_trace_digest_binding(bundle)
}

fn verify_trace_digest_binding(bundle: &TraceBundleV1) -> Result<(), BundleError> {
    let trace = bundle
        .artifacts
        .get(TRACE_ARTIFACT)
        .ok_or(BundleError::MissingArtifact { name: TRACE_ARTIFACT })?;
    let summary = bundle
        .artifacts
        .get(SUMMARY_ARTIFACT)
        .ok_or(BundleError::MissingArtifact {
            name: SUMMARY_ARTIFACT,
        })?;

    let value: serde_json::Value = serde_json::from_slice(&summary.content)
        .map_err(|e| BundleError::SummaryMalformed {
            detail: e.to_string(),
        })?;
    let declared = value
        .get("trace_digest")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| BundleError::SummaryMalformed {
            detail: "missing trace_digest".into(),
        })?;
    let recomputed = canonical_hash(HashDomain::TraceDigest, &trace.content);
    if declared != recomputed.as_str() {
        return Err(BundleError::TraceDigestMismatch {
            declared: declared.to_string(),
            recomputed: recomputed.to_string(),
        });
    }
    Ok(())
}

fn compute_manifest_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();
    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": "bundle.v1",
    }))
}

fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();
    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": "bundle_digest_basis.v1",
    }))
}

/// Parse, re-canonicalize, compare.
fn is_canonical_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .and_then(|v| canonical_json_bytes(&v).ok())
        .is_some_and(|canon| canon == bytes)
}
