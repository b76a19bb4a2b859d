//! Unit tests for the source tree scanner.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let root = dir.path();
    fs::write(root.join("a.txt"), b"hello").expect("write");
    fs::write(root.join(".hidden"), b"secret").expect("write");
    fs::create_dir_all(root.join("x/deeper")).expect("mkdir");
    fs::write(root.join("x/one.bin"), b"1").expect("write");
    fs::write(root.join("x/deeper/two.bin"), b"2").expect("write");
    fs::create_dir(root.join("y")).expect("mkdir");
    fs::write(root.join("y/three.bin"), b"3").expect("write");
    fs::create_dir(root.join("empty")).expect("mkdir");
    dir
}

fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir")
}

fn relative_names(root: &Utf8Path, files: &[Utf8PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            file.strip_prefix(root)
                .expect("file under root")
                .as_str()
                .to_owned()
        })
        .collect()
}

#[rstest]
fn scan_finds_every_file_including_hidden(tree: TempDir) {
    let root = utf8_root(&tree);
    let report = scan(&root).expect("scan succeeds");

    let mut names = relative_names(&root, &report.files);
    names.sort();
    assert_eq!(
        names,
        [".hidden", "a.txt", "x/deeper/two.bin", "x/one.bin", "y/three.bin"]
    );
    assert!(report.skipped.is_empty());
}

#[rstest]
fn scan_pops_the_last_pushed_folder_first(tree: TempDir) {
    let root = utf8_root(&tree);
    let report = scan(&root).expect("scan succeeds");

    // Root files come first; subfolders are pushed in name order, so `y`
    // is expanded before `x`, and `x/deeper` after `x`'s own files.
    assert_eq!(
        relative_names(&root, &report.files),
        [".hidden", "a.txt", "y/three.bin", "x/one.bin", "x/deeper/two.bin"]
    );
}

#[rstest]
fn scan_order_is_stable_across_runs(tree: TempDir) {
    let root = utf8_root(&tree);
    let first = scan(&root).expect("scan succeeds");
    let second = scan(&root).expect("scan succeeds");
    assert_eq!(first, second);
}

#[test]
fn unreadable_folder_is_skipped_and_siblings_are_kept() {
    let mut lister = MockDirectoryLister::new();
    lister.expect_list().returning(|dir| match dir.as_str() {
        "/src" => Ok(DirectoryListing {
            files: vec![Utf8PathBuf::from("/src/top.txt")],
            directories: vec![Utf8PathBuf::from("/src/good"), Utf8PathBuf::from("/src/bad")],
        }),
        "/src/good" => Ok(DirectoryListing {
            files: vec![Utf8PathBuf::from("/src/good/kept.txt")],
            directories: Vec::new(),
        }),
        other => Err(ScanError::Unreadable {
            dir: Utf8PathBuf::from(other),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }),
    });

    let report = scan_with(Utf8Path::new("/src"), &lister).expect("scan succeeds");

    assert_eq!(
        report.files,
        [
            Utf8PathBuf::from("/src/top.txt"),
            Utf8PathBuf::from("/src/good/kept.txt")
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(
        report.skipped.first().map(|s| s.path.as_str()),
        Some("/src/bad")
    );
}

#[test]
fn unreadable_root_yields_an_empty_report() {
    let mut lister = MockDirectoryLister::new();
    lister.expect_list().times(1).returning(|dir| {
        Err(ScanError::Unreadable {
            dir: dir.to_owned(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    });

    let report = scan_with(Utf8Path::new("/gone"), &lister).expect("scan succeeds");
    assert!(report.files.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn non_utf8_name_stops_the_scan() {
    let mut lister = MockDirectoryLister::new();
    lister
        .expect_list()
        .returning(|_| Err(ScanError::NonUtf8Path(PathBuf::from("/src/bad"))));

    let err = scan_with(Utf8Path::new("/src"), &lister).expect_err("scan fails");
    assert!(matches!(err, ScanError::NonUtf8Path(_)));
}

#[cfg(unix)]
#[rstest]
#[case::newline("a\nb.txt")]
#[case::carriage_return("a\r\nb.txt")]
fn line_break_in_a_name_stops_the_scan(tree: TempDir, #[case] name: &str) {
    let root = utf8_root(&tree);
    fs::write(root.join("y").join(name), b"x").expect("write");

    let offending = root.join("y").join(name);
    let err = scan(&root).expect_err("scan fails");

    assert!(matches!(err, ScanError::LineBreakInName(ref path) if *path == offending));
}

#[cfg(unix)]
#[rstest]
fn permission_revoked_folder_is_skipped(tree: TempDir) {
    use std::os::unix::fs::PermissionsExt;

    let root = utf8_root(&tree);
    let locked = root.join("x");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    // Privileged users can list the folder anyway; nothing to observe then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
        return;
    }

    let report = scan(&root).expect("scan succeeds");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

    assert_eq!(
        relative_names(&root, &report.files),
        [".hidden", "a.txt", "y/three.bin"]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped.first().map(|s| &s.path), Some(&locked));
}

#[cfg(unix)]
#[rstest]
fn links_to_files_are_kept_and_links_to_folders_are_not_followed(tree: TempDir) {
    use std::os::unix::fs::symlink;

    let root = utf8_root(&tree);
    symlink(root.join("a.txt"), root.join("link.txt")).expect("file link");
    symlink(root.join("x"), root.join("loop")).expect("folder link");
    symlink(root.join("missing"), root.join("dangling")).expect("dangling link");

    let report = scan(&root).expect("scan succeeds");
    let names = relative_names(&root, &report.files);

    assert!(names.contains(&"link.txt".to_owned()));
    assert!(!names.iter().any(|name| name.starts_with("loop")));
    assert!(!names.contains(&"dangling".to_owned()));
}
