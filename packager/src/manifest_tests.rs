//! Unit tests for manifest rendering and parsing.

use super::*;
use rstest::{fixture, rstest};

const HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const WORLD: &str = "486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7";

fn record(relative: &str, digest: &str) -> FileRecord {
    FileRecord::new(
        Utf8Path::new("/src").join(relative),
        Utf8PathBuf::from(relative),
        Sha256Digest::try_from(digest).expect("valid digest"),
    )
}

#[fixture]
fn two_files() -> Vec<FileRecord> {
    vec![record("a.txt", HELLO), record("sub/b.txt", WORLD)]
}

#[rstest]
fn render_writes_one_crlf_line_per_record(two_files: Vec<FileRecord>) {
    let manifest = Manifest::from_records(&two_files);
    assert_eq!(
        manifest.render(),
        format!("{HELLO}\ta.txt\r\n{WORLD}\tsub/b.txt\r\n")
    );
}

#[rstest]
fn render_keeps_record_order(two_files: Vec<FileRecord>) {
    let reversed: Vec<FileRecord> = two_files.into_iter().rev().collect();
    let manifest = Manifest::from_records(&reversed);
    let paths: Vec<&str> = manifest
        .entries()
        .iter()
        .map(|entry| entry.relative_path.as_str())
        .collect();
    assert_eq!(paths, ["sub/b.txt", "a.txt"]);
}

#[test]
fn empty_manifest_renders_nothing() {
    let manifest = Manifest::from_records(&[]);
    assert!(manifest.is_empty());
    assert_eq!(manifest.render(), "");
}

#[rstest]
fn every_line_has_digest_tab_path_shape(two_files: Vec<FileRecord>) {
    let text = Manifest::from_records(&two_files).render();
    for line in text.split_terminator(LINE_ENDING) {
        let (digest, path) = line.split_once('\t').expect("tab separator");
        assert_eq!(digest.len(), 64);
        assert!(
            digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert!(!path.is_empty());
    }
}

#[rstest]
fn bytes_decode_back_to_the_same_manifest(two_files: Vec<FileRecord>) {
    let manifest = Manifest::from_records(&two_files);
    let parsed = Manifest::from_bytes(&manifest.to_bytes()).expect("parses");
    assert_eq!(parsed, manifest);
    assert_eq!(parsed.len(), 2);
}

#[test]
fn unicode_paths_survive_encoding() {
    let manifest = Manifest::from_records(&[record("d\u{e9}j\u{e0}/\u{65e5}\u{672c}.txt", HELLO)]);
    let parsed = Manifest::from_bytes(&manifest.to_bytes()).expect("parses");
    assert_eq!(
        parsed.entries().first().map(|e| e.relative_path.as_str()),
        Some("d\u{e9}j\u{e0}/\u{65e5}\u{672c}.txt")
    );
}

#[rstest]
#[case::blank_line(format!("{HELLO}\ta.txt\r\n\r\n"), 2)]
#[case::no_separator(format!("{HELLO} a.txt\r\n"), 1)]
#[case::no_path(format!("{HELLO}\t\r\n"), 1)]
fn parse_rejects_malformed_lines(#[case] text: String, #[case] bad_line: usize) {
    let err = Manifest::parse(&text).expect_err("malformed");
    assert!(
        matches!(err, ManifestError::MalformedLine { line, .. } if line == bad_line),
        "unexpected error: {err}"
    );
}

#[test]
fn parse_rejects_bad_digest() {
    let err = Manifest::parse("XYZ\ta.txt\r\n").expect_err("bad digest");
    assert!(matches!(err, ManifestError::InvalidDigest { line: 1, .. }));
}

#[rstest]
#[case::nested("/src", "/src/sub/b.txt", Some("sub/b.txt"))]
#[case::top_level("/src", "/src/a.txt", Some("a.txt"))]
#[case::outside("/src", "/other/a.txt", None)]
#[case::root_itself("/src", "/src", None)]
#[case::sibling_prefix("/src", "/srcx/a.txt", None)]
fn relative_path_strips_the_root(
    #[case] root: &str,
    #[case] path: &str,
    #[case] expected: Option<&str>,
) {
    let rel = relative_path(Utf8Path::new(root), Utf8Path::new(path));
    assert_eq!(rel.as_deref().map(Utf8Path::as_str), expected);
}
