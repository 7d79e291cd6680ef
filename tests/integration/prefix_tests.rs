use dupmerge::duplicates::{group_by_prefix, ConsolidateConfig, Consolidator, RemovalReason};
use dupmerge::duplicates::{Action, DEFAULT_PREFIX_SEPARATOR};
use dupmerge::scanner::FileEntry;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_prefix_grouping_example() {
    let files = ["a_1.txt", "a_2.txt", "b_1.txt"]
        .iter()
        .map(|n| FileEntry::new(PathBuf::from("/d").join(n)))
        .collect::<Vec<_>>();

    let groups = group_by_prefix(files, DEFAULT_PREFIX_SEPARATOR);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups.get("a").unwrap().names(), vec!["a_1.txt", "a_2.txt"]);
    assert_eq!(groups.get("b").unwrap().names(), vec!["b_1.txt"]);
    assert_eq!(groups.mergeable().count(), 1);
}

#[test]
fn test_single_member_group_untouched() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_1.txt"), b"one\n").unwrap();
    fs::write(dir.path().join("a_2.txt"), b"two\n").unwrap();
    fs::write(dir.path().join("b_1.txt"), b"dup\ndup\n").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("a_1.txt")).unwrap(), b"one\ntwo\n");
    assert!(!dir.path().join("a_2.txt").exists());
    assert_eq!(fs::read(dir.path().join("b_1.txt")).unwrap(), b"dup\ndup\n");
}

#[test]
fn test_merge_correctness_bar_foo() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("m_a.txt"), b"bar\n").unwrap();
    fs::write(dir.path().join("m_b.txt"), b"foo\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("m_a.txt")).unwrap(), b"bar\nfoo\n");
    assert!(report.actions.contains(&Action::Removed {
        path: dir.path().join("m_b.txt"),
        reason: RemovalReason::MergedIntoRepresentative,
    }));
}

#[test]
fn test_names_without_separator_group_by_whole_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("readme"), b"r\n").unwrap();
    fs::write(dir.path().join("readme_old"), b"o\n").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("readme")).unwrap(), b"r\no\n");
    assert!(!dir.path().join("readme_old").exists());
}

#[test]
fn test_empty_prefix_groups_leading_separator_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("_a"), b"1\n").unwrap();
    fs::write(dir.path().join("_b"), b"2\n").unwrap();

    Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("_a")).unwrap(), b"1\n2\n");
    assert!(!dir.path().join("_b").exists());
}

#[test]
fn test_custom_separator_from_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("day-1.log"), b"a\n").unwrap();
    fs::write(dir.path().join("day-2.log"), b"b\n").unwrap();
    fs::write(dir.path().join("day_3.log"), b"c\n").unwrap();

    let config = ConsolidateConfig::default().with_prefix_separator('-');
    Consolidator::new(config).run(dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("day-1.log")).unwrap(), b"a\nb\n");
    assert!(!dir.path().join("day-2.log").exists());
    assert!(dir.path().join("day_3.log").exists());
}
