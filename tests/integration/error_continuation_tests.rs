use dupmerge::duplicates::{Action, ConsolidateConfig, Consolidator, Step};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_line_too_long_skips_dedup_but_run_completes() {
    let dir = tempdir().unwrap();
    let long = format!("{}\n", "x".repeat(64));
    fs::write(dir.path().join("a_1.txt"), long.as_bytes()).unwrap();
    fs::write(dir.path().join("a_2.txt"), long.as_bytes()).unwrap();
    fs::write(dir.path().join("b_1.txt"), b"short\n").unwrap();
    fs::write(dir.path().join("b_2.txt"), b"other\n").unwrap();

    let config = ConsolidateConfig::default().with_max_line_length(16);
    let report = Consolidator::new(config).run(dir.path()).unwrap();

    // Merge and removal of a_2 happened; the dedup of a_1 was skipped.
    assert!(!dir.path().join("a_2.txt").exists());
    assert_eq!(
        fs::read(dir.path().join("a_1.txt")).unwrap(),
        format!("{long}{long}").as_bytes()
    );
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures[0].step, Step::Dedup);
    assert!(!dir.path().join("a_1.txt.tmp").exists());

    // The b group was still processed afterwards.
    assert_eq!(fs::read(dir.path().join("b_1.txt")).unwrap(), b"short\nother\n");
    assert!(!dir.path().join("b_2.txt").exists());
    assert!(!report.all_succeeded());
    assert!(report.summary().contains("1 step(s) failed"));
}

#[test]
fn test_failures_do_not_stop_later_groups() {
    let dir = tempdir().unwrap();
    let long = "y".repeat(32);
    fs::write(dir.path().join("p_1"), format!("{long}\n")).unwrap();
    fs::write(dir.path().join("p_2"), b"tiny\n").unwrap();
    fs::write(dir.path().join("q_1"), b"1\n").unwrap();
    fs::write(dir.path().join("q_2"), b"2\n").unwrap();
    fs::write(dir.path().join("q_3"), b"1\n2\n").unwrap();

    let config = ConsolidateConfig::default().with_max_line_length(8);
    let report = Consolidator::new(config).run(dir.path()).unwrap();

    assert_eq!(report.prefix_groups, 2);
    assert_eq!(fs::read(dir.path().join("q_1")).unwrap(), b"1\n2\n");
    assert!(!dir.path().join("q_2").exists());
    assert!(!dir.path().join("q_3").exists());
    let dedups = report
        .actions
        .iter()
        .filter(|a| matches!(a, Action::Deduplicated { .. }))
        .count();
    assert_eq!(dedups, 1);
}
