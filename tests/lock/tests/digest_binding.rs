//! Digest binding lock tests: every hash domain has exactly one producer in
//! the pipeline, and each published digest is reproducible from the bytes
//! it claims to cover.
//!
//! The match in [`recompute`] is exhaustive over [`HashDomain`], so adding a
//! domain without wiring a producer here fails to compile.

use std::collections::BTreeSet;

use stepwise_harness::bundle::{verify_bundle, SUMMARY_ARTIFACT, TRACE_ARTIFACT};
use stepwise_harness::config::RunConfigV1;
use stepwise_harness::runner::{run_config, SearchRunV1};
use stepwise_kernel::proof::canon::canonical_json_bytes;
use stepwise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

const CONFIG: &str = r#"{"world": {"kind": "line_world"}, "strategy": "a_star"}"#;

struct Fixture {
    config: RunConfigV1,
    run: SearchRunV1,
}

fn fixture() -> Fixture {
    let config = RunConfigV1::from_json_str(CONFIG).unwrap();
    let run = run_config(&config).unwrap();
    Fixture { config, run }
}

fn summary(run: &SearchRunV1) -> serde_json::Value {
    serde_json::from_slice(&run.bundle.artifacts[SUMMARY_ARTIFACT].content).unwrap()
}

fn run_bytes() -> Vec<u8> {
    fixture().run.bundle.artifacts[TRACE_ARTIFACT].content.clone()
}

/// `(published, recomputed)` for the digest `domain` protects.
fn recompute(domain: HashDomain, f: &Fixture) -> (ContentHash, ContentHash) {
    let run = &f.run;
    match domain {
        HashDomain::TraceDigest => {
            let bytes = run.trace.to_canonical_json_bytes().unwrap();
            (run.trace_digest.clone(), canonical_hash(domain, &bytes))
        }
        HashDomain::TraceStep => {
            let last = run.trace.last().unwrap();
            let bytes = canonical_json_bytes(&last.to_json()).unwrap();
            let published = run.trace.step_digests().unwrap().pop().unwrap();
            (published, canonical_hash(domain, &bytes))
        }
        HashDomain::GraphStore => {
            let bytes = canonical_json_bytes(&run.graph.to_json()).unwrap();
            (run.graph_fingerprint.clone(), canonical_hash(domain, &bytes))
        }
        HashDomain::BundleArtifact => {
            let artifact = &run.bundle.artifacts[TRACE_ARTIFACT];
            (artifact.content_hash.clone(), canonical_hash(domain, &artifact.content))
        }
        HashDomain::BundleDigest => (
            run.bundle.digest.clone(),
            canonical_hash(domain, &run.bundle.digest_basis),
        ),
        HashDomain::RunConfig => {
            let projection = serde_json::json!({
                "policy": f.config.policy().unwrap().to_json(),
                "world": {"kind": "line_world"},
            });
            let bytes = canonical_json_bytes(&projection).unwrap();
            let published = summary(run)["config_digest"].as_str().map(ContentHash::parse);
            (
                published.flatten().unwrap(),
                canonical_hash(domain, &bytes),
            )
        }
    }
}

#[test]
fn every_domain_digest_is_reproducible() {
    let f = fixture();
    for &domain in HashDomain::ALL {
        let (published, recomputed) = recompute(domain, &f);
        assert_eq!(published, recomputed, "{domain}: published digest does not match its bytes");
    }
}

#[test]
fn published_digests_are_pairwise_distinct() {
    let f = fixture();
    let digests: BTreeSet<ContentHash> = HashDomain::ALL
        .iter()
        .map(|&domain| recompute(domain, &f).0)
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}

#[test]
fn same_bytes_hash_differently_per_domain() {
    let bytes = run_bytes();
    let digests: BTreeSet<ContentHash> = HashDomain::ALL
        .iter()
        .map(|&domain| canonical_hash(domain, &bytes))
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}

#[test]
fn summary_declares_the_published_digests() {
    let f = fixture();
    verify_bundle(&f.run.bundle).unwrap();
    let summary = summary(&f.run);
    assert_eq!(summary["trace_digest"], f.run.trace_digest.as_str());
    assert_eq!(summary["graph_fingerprint"], f.run.graph_fingerprint.as_str());
    assert_eq!(summary["config_digest"], f.config.digest().unwrap().as_str());
}

#[test]
fn unknown_config_fields_do_not_change_config_digest() {
    let plain = RunConfigV1::from_json_str(CONFIG).unwrap();
    let extended = RunConfigV1::from_json_str(
        r#"{"world": {"kind": "line_world"}, "strategy": "a_star", "note": "ignored"}"#,
    )
    .unwrap();
    assert_eq!(plain.digest().unwrap(), extended.digest().unwrap());
}
