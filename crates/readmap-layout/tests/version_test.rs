#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(readmap_layout::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!readmap_layout::VERSION.is_empty());
}
