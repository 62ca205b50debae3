use std::path::PathBuf;

/// Resolves a fixture under `cli/tests/resources/`.
pub fn resource_path(name: &'static str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/resources");
    path.push(name);
    path
}
