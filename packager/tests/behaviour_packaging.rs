//! Behaviour-driven tests for patch distribution packaging.
//!
//! These scenarios drive the `pipeline` module end to end against a real
//! temporary folder pair, using the rstest-bdd v0.5.0 mutable world pattern.

use camino::{Utf8Path, Utf8PathBuf};
use patch_packager::encoding::decode_utf16le;
use patch_packager::error::ValidationError;
use patch_packager::layout::PackageLayout;
use patch_packager::manifest::Manifest;
use patch_packager::pipeline::{PackageRequest, PackageSummary, package};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

struct PackagingWorld {
    _temp_dir: TempDir,
    source: Utf8PathBuf,
    output: Utf8PathBuf,
    summary: Option<PackageSummary>,
    rejection: Option<ValidationError>,
}

#[fixture]
fn world() -> PackagingWorld {
    let temp_dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("UTF-8 temp dir");
    let source = root.join("source");
    let output = root.join("output");
    fs::create_dir(&source).expect("mkdir source");
    fs::create_dir(&output).expect("mkdir output");
    PackagingWorld {
        _temp_dir: temp_dir,
        source,
        output,
        summary: None,
        rejection: None,
    }
}

fn manifest(world: &PackagingWorld) -> Manifest {
    let path = PackageLayout::standard().manifest_path(&world.output);
    let bytes = fs::read(path).expect("read manifest");
    Manifest::from_bytes(&bytes).expect("parse manifest")
}

fn extract(world: &PackagingWorld, relative: &str) -> String {
    let path = PackageLayout::standard().archive_path(&world.output, Utf8Path::new(relative));
    let file = fs::File::open(path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    assert_eq!(archive.len(), 1, "archive must hold exactly one entry");
    let mut entry = archive.by_name(relative).expect("entry named after the file");
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("read entry");
    content
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a source file \"{name}\" containing \"{content}\"")]
fn given_source_file(world: &mut PackagingWorld, name: String, content: String) {
    let path = world.source.join(&name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir parent");
    }
    fs::write(path, content).expect("write source file");
}

#[when("the distribution is packaged as version \"{version}\"")]
fn when_packaged(world: &mut PackagingWorld, version: String) {
    let request =
        PackageRequest::validate(&world.source, &world.output, &version).expect("valid request");
    world.summary = Some(package(&request).expect("package succeeds"));
}

#[when("packaging is attempted as version \"{version}\"")]
fn when_packaging_attempted(world: &mut PackagingWorld, version: String) {
    match PackageRequest::validate(&world.source, &world.output, &version) {
        Ok(request) => world.summary = Some(package(&request).expect("package succeeds")),
        Err(err) => world.rejection = Some(err),
    }
}

#[then("the version marker reads \"{version}\"")]
fn then_version_marker(world: &mut PackagingWorld, version: String) {
    let path = PackageLayout::standard().version_path(&world.output);
    let bytes = fs::read(path).expect("read version marker");
    assert_eq!(decode_utf16le(&bytes).expect("UTF-16 text"), version);
}

#[then("the manifest lists \"{path}\" with digest \"{digest}\"")]
fn then_manifest_lists(world: &mut PackagingWorld, path: String, digest: String) {
    let manifest = manifest(world);
    let line = manifest
        .entries()
        .iter()
        .find(|line| line.relative_path == path)
        .expect("manifest line for the file");
    assert_eq!(line.digest.as_str(), digest);
}

#[then("the archive for \"{path}\" extracts to \"{content}\"")]
fn then_archive_extracts(world: &mut PackagingWorld, path: String, content: String) {
    assert_eq!(extract(world, &path), content);
}

#[then("every manifest line has one archive")]
fn then_every_line_has_archive(world: &mut PackagingWorld) {
    let summary = world.summary.as_ref().expect("summary set");
    let manifest = manifest(world);
    assert_eq!(manifest.len(), summary.file_count);
    for line in manifest.entries() {
        let archive =
            PackageLayout::standard().archive_path(&world.output, &line.relative_path);
        assert!(archive.is_file(), "missing archive for {}", line.relative_path);
    }
}

#[then("packaging fails because the source is empty")]
fn then_source_empty(world: &mut PackagingWorld) {
    assert!(matches!(
        world.rejection,
        Some(ValidationError::EmptySource { .. })
    ));
}

#[then("packaging fails because the version is invalid")]
fn then_version_invalid(world: &mut PackagingWorld) {
    assert!(matches!(
        world.rejection,
        Some(ValidationError::InvalidVersion { .. })
    ));
}

#[then("packaging fails because the output is not empty")]
fn then_output_not_empty(world: &mut PackagingWorld) {
    assert!(matches!(
        world.rejection,
        Some(ValidationError::OutputNotEmpty { .. })
    ));
}

#[then("the output folder is still empty")]
fn then_output_empty(world: &mut PackagingWorld) {
    let mut entries = fs::read_dir(&world.output).expect("list output");
    assert!(entries.next().is_none(), "output folder must stay empty");
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Package two files into per-file archives"
)]
fn scenario_two_files(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Archived files extract to their original bytes"
)]
fn scenario_round_trip(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Packaging rejects an empty source folder"
)]
fn scenario_empty_source(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Packaging rejects a non-numeric version"
)]
fn scenario_bad_version(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "A second run into the same output folder is rejected"
)]
fn scenario_second_run(world: PackagingWorld) {
    let _ = world;
}
