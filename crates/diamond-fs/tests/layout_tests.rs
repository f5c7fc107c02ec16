use diamond_fs::{Error, ProjectLayout};
use rstest::rstest;
use std::path::PathBuf;

#[test]
fn test_lock_document_location() {
    let layout = ProjectLayout::new("/project");
    assert_eq!(
        layout.lock_document(),
        PathBuf::from("/project/diamond/.internal/packages.lock")
    );
    assert_eq!(
        layout.lock_sidecar(),
        PathBuf::from("/project/diamond/.internal/packages.lock.lock")
    );
}

#[test]
fn test_package_dir_under_packages_root() {
    let layout = ProjectLayout::new("/project");
    let dir = layout.package_dir("widgets").unwrap();
    assert_eq!(dir, PathBuf::from("/project/diamond/packages/widgets"));
}

#[test]
fn test_compiled_css_location() {
    let package = PathBuf::from("/project/diamond/packages/widgets");
    assert_eq!(
        ProjectLayout::compiled_css(&package),
        PathBuf::from("/project/diamond/packages/widgets/diamond/dist/main.css")
    );
    assert_eq!(
        ProjectLayout::nested_packages(&package),
        PathBuf::from("/project/diamond/packages/widgets/diamond/packages")
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("/etc")]
#[case("../escape")]
#[case("widgets/../../escape")]
#[case(".")]
fn test_package_dir_rejects_invalid_paths(#[case] input: &str) {
    let layout = ProjectLayout::new("/project");
    let result = layout.package_dir(input);
    assert!(
        matches!(result, Err(Error::InvalidPackagePath { .. })),
        "'{}' should be rejected, got {:?}",
        input,
        result
    );
}
