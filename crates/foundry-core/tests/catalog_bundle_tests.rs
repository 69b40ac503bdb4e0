//! The catalog bundle shipped at the workspace root must load cleanly

use std::path::PathBuf;

use foundry_core::{CatalogProvider, ContentType, DirectoryCatalog, Selection};
use pretty_assertions::assert_eq;

fn bundle() -> DirectoryCatalog {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalog");
    DirectoryCatalog::new(root)
}

#[test]
fn test_bundle_categories() {
    assert_eq!(
        bundle().categories().unwrap(),
        vec!["development".to_string(), "testing".to_string()]
    );
}

#[test]
fn test_bundle_resolves_every_item() {
    let files = Selection::All.resolve(&bundle()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| (f.category.as_str(), f.kind, f.filename.as_str()))
        .collect();

    assert_eq!(
        names,
        vec![
            ("development", ContentType::Commands, "deploy.md"),
            ("development", ContentType::Skills, "makefile-guide.md"),
            ("testing", ContentType::Agents, "test-runner.md"),
        ]
    );
}

#[test]
fn test_bundle_content_is_opaque() {
    let file = bundle()
        .get_file("testing", ContentType::Agents, "test-runner.md")
        .unwrap();
    assert!(file.content.starts_with(b"---\n"));
}
