//! Cross-process determinism: spawns the `search_fixture` binary under
//! several environment variants and asserts all produce identical stdout.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(
        baseline.contains("corridor_maze.a_star.trace_digest=sha256:"),
        "baseline output missing corridor trace digest"
    );
    assert!(
        baseline.contains("corridor_maze.bfs.bundle_digest=sha256:"),
        "baseline output missing corridor bundle digest"
    );
    assert!(
        baseline.contains("line_world.a_star.step_count=8"),
        "baseline output missing line world step count"
    );
    assert!(
        baseline.contains("corridor_maze.a_star.total_expansions=39"),
        "baseline output missing corridor expansion count"
    );
    assert!(
        baseline.contains("goal_reached=true"),
        "baseline output missing goal_reached=true"
    );

    let alt_cwd = tempfile::tempdir().expect("create temp dir");
    let alt_cwd = alt_cwd.path().to_string_lossy().to_string();
    let variant_cwd = run_variant(&alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        &root,
        &[
            ("STEPWISE_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");

    // Logging goes to stderr only.
    let variant_logging = run_variant(&root, &[("RUST_LOG", "trace")]);
    assert_eq!(baseline, variant_logging, "output differs with RUST_LOG=trace");
}
