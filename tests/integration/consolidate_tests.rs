use dupmerge::duplicates::{Action, ConsolidateConfig, Consolidator, RemovalReason};
use dupmerge::scanner::HashAlgorithm;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_identical_same_prefix_files_collapse_to_first() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x_1.txt"), b"line1\n").unwrap();
    fs::write(dir.path().join("x_2.txt"), b"line1\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(names(dir.path()), vec!["x_1.txt"]);
    assert_eq!(fs::read(dir.path().join("x_1.txt")).unwrap(), b"line1\n");
    assert_eq!(report.exact_groups, 1);
    // Only one file is left for prefix "x", so the prefix pass has nothing to do.
    assert_eq!(report.prefix_groups, 0);
    assert!(report.all_succeeded());
}

#[test]
fn test_exact_pass_records_merge_remove_dedup() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha.txt"), b"same\n").unwrap();
    fs::write(dir.path().join("beta.txt"), b"same\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(report.actions.len(), 3);
    assert!(matches!(
        &report.actions[0],
        Action::Merged { bytes: 5, source, .. } if source.ends_with("beta.txt")
    ));
    assert!(matches!(
        &report.actions[1],
        Action::Removed { reason: RemovalReason::ExactDuplicate, path } if path.ends_with("beta.txt")
    ));
    assert!(matches!(
        &report.actions[2],
        Action::Deduplicated { lines_kept: 1, lines_dropped: 1, .. }
    ));
    assert_eq!(report.bytes_merged(), 5);
}

#[test]
fn test_full_run_mixes_both_passes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes_a.txt"), b"apple\nbanana\n").unwrap();
    fs::write(dir.path().join("notes_b.txt"), b"banana\ncherry\n").unwrap();
    fs::write(dir.path().join("notes_c.txt"), b"apple\nbanana\n").unwrap();
    fs::write(dir.path().join("solo.txt"), b"x\nx\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(names(dir.path()), vec!["notes_a.txt", "solo.txt"]);
    assert_eq!(
        fs::read(dir.path().join("notes_a.txt")).unwrap(),
        b"apple\nbanana\ncherry\n"
    );
    // solo.txt is in no group, so its repeated line stays.
    assert_eq!(fs::read(dir.path().join("solo.txt")).unwrap(), b"x\nx\n");
    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.exact_groups, 1);
    assert_eq!(report.prefix_groups, 1);
}

#[test]
fn test_rerun_is_a_no_op() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("log_1.txt"), b"a\nb\n").unwrap();
    fs::write(dir.path().join("log_2.txt"), b"b\nc\n").unwrap();
    fs::write(dir.path().join("copy.txt"), b"a\nb\n").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();
    let after_first = names(dir.path());
    let content = fs::read(dir.path().join("copy.txt")).unwrap();

    let second = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert!(second.actions.is_empty());
    assert_eq!(names(dir.path()), after_first);
    assert_eq!(fs::read(dir.path().join("copy.txt")).unwrap(), content);
}

#[test]
fn test_sha256_algorithm_gives_same_outcome() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"1\n2\n").unwrap();
    fs::write(dir.path().join("b.txt"), b"1\n2\n").unwrap();

    let config = ConsolidateConfig::default().with_algorithm(HashAlgorithm::Sha256);
    let report = Consolidator::new(config).run(dir.path()).unwrap();

    assert_eq!(names(dir.path()), vec!["a.txt"]);
    assert_eq!(report.exact_groups, 1);
}

#[test]
fn test_crlf_lines_normalized_on_dedup() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("w_1.txt"), b"one\r\ntwo\r\n").unwrap();
    fs::write(dir.path().join("w_2.txt"), b"two\nthree").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(
        fs::read(dir.path().join("w_1.txt")).unwrap(),
        b"one\ntwo\nthree\n"
    );
}

#[test]
fn test_no_temp_files_left_after_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("k_1.txt"), b"a\n").unwrap();
    fs::write(dir.path().join("k_2.txt"), b"b\n").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();

    assert!(names(dir.path()).iter().all(|n| !n.ends_with(".tmp")));
}

#[test]
fn test_json_report_shape() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"z\n").unwrap();
    fs::write(dir.path().join("b.txt"), b"z\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["files_scanned"], 2);
    assert_eq!(json["actions"][0]["action"], "merged");
    assert_eq!(json["actions"][1]["reason"], "exact_duplicate");
    assert_eq!(json["actions"][2]["action"], "deduplicated");
    assert!(json["failures"].as_array().unwrap().is_empty());
}
