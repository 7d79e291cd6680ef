use dupmerge::duplicates::{ConsolidateConfig, Consolidator};
use dupmerge::scanner::{Lister, ListerConfig, ScanError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_listing_is_flat_and_sorted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("c.txt"), b"c").unwrap();
    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    fs::create_dir(dir.path().join("b_dir")).unwrap();
    fs::write(dir.path().join("b_dir").join("inner.txt"), b"i").unwrap();

    let files = Lister::new(dir.path(), ListerConfig::default())
        .list()
        .unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["a.txt", "c.txt"]);
}

#[test]
fn test_subdirectory_contents_never_touched() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("top.txt"), b"same\n").unwrap();
    fs::write(sub.join("top.txt"), b"same\n").unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(fs::read(sub.join("top.txt")).unwrap(), b"same\n");
}

#[test]
fn test_unsorted_listing_still_processes_everything() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("p_1"), b"x\n").unwrap();
    fs::write(dir.path().join("p_2"), b"x\n").unwrap();

    let config = ConsolidateConfig::default().with_sort_entries(false);
    let report = Consolidator::new(config).run(dir.path()).unwrap();

    // Which copy survives depends on enumeration order; exactly one does.
    let left = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(left, 1);
    assert_eq!(report.exact_groups, 1);
}

#[test]
fn test_file_as_target_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, b"x").unwrap();

    let result = Consolidator::with_defaults().run(&file);

    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    assert_eq!(fs::read(&file).unwrap(), b"x");
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(report.files_scanned, 0);
    assert!(report.actions.is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), b"data\n").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("real_link.txt"))
        .unwrap();

    let report = Consolidator::with_defaults().run(dir.path()).unwrap();

    assert_eq!(report.files_scanned, 1);
    assert!(dir.path().join("real_link.txt").exists());
}
