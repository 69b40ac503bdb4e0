//! Tests for plan classification against real files

use foundry_core::{
    CatalogFile, ChangeAction, ContentType, InstallationRecord, PlanBuilder, PlanCounts,
    SkipReason, State,
};
use foundry_fs::NormalizedPath;
use foundry_test_utils::TestEnv;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn command(content: &str) -> CatalogFile {
    CatalogFile::new("sample", ContentType::Commands, "a.md", content)
}

/// State holding one record for `command(recorded)` under `root`
fn state_with_record(root: &NormalizedPath, recorded: &str) -> (State, NormalizedPath) {
    let path = root.join("commands").join("ccf-sample-a.md");
    let mut state = State::new();
    state.add(InstallationRecord::new(&command(recorded), &path));
    (state, path)
}

#[test]
fn test_same_hash_is_skipped_as_unchanged() {
    let env = TestEnv::new();
    let root = env.user_root();
    let (state, _) = state_with_record(&root, "X");

    let plan = PlanBuilder::new(root).build(&[command("X")], &state).unwrap();

    let change = &plan.changes()[0];
    assert_eq!(change.action, ChangeAction::Skip);
    assert_eq!(change.skip_reason, Some(SkipReason::Unchanged));
    assert!(plan.is_noop());
}

#[test]
fn test_new_catalog_content_is_update_when_file_untouched() {
    let env = TestEnv::new();
    let root = env.user_root();
    let (state, path) = state_with_record(&root, "X");
    env.write(&path.to_native(), "X");

    let plan = PlanBuilder::new(root).build(&[command("X2")], &state).unwrap();

    assert_eq!(plan.changes()[0].action, ChangeAction::Update);
    assert_eq!(plan.changes()[0].hash, foundry_fs::content_hash(b"X2"));
}

#[test]
fn test_missing_installed_file_is_update() {
    let env = TestEnv::new();
    let root = env.user_root();
    let (state, _) = state_with_record(&root, "X");

    let plan = PlanBuilder::new(root).build(&[command("X2")], &state).unwrap();

    assert_eq!(plan.changes()[0].action, ChangeAction::Update);
}

#[rstest]
#[case(false, ChangeAction::Skip, Some(SkipReason::LocallyModified))]
#[case(true, ChangeAction::Update, None)]
fn test_locally_modified_file_respects_force(
    #[case] force: bool,
    #[case] action: ChangeAction,
    #[case] reason: Option<SkipReason>,
) {
    let env = TestEnv::new();
    let root = env.user_root();
    let (state, path) = state_with_record(&root, "X");
    env.write(&path.to_native(), "edited by hand");

    let plan = PlanBuilder::new(root)
        .force(force)
        .build(&[command("X2")], &state)
        .unwrap();

    assert_eq!(plan.changes()[0].action, action);
    assert_eq!(plan.changes()[0].skip_reason, reason);
    assert_eq!(plan.preserved().count(), usize::from(!force));
}

#[test]
fn test_records_for_other_roots_do_not_match() {
    let env = TestEnv::new();
    let (state, _) = state_with_record(&env.user_root(), "X");

    let plan = PlanBuilder::new(env.project_root())
        .build(&[command("X")], &state)
        .unwrap();

    assert_eq!(
        plan.counts(),
        PlanCounts {
            install: 1,
            update: 0,
            skip: 0
        }
    );
    assert!(plan.changes()[0].path.starts_with(env.project_root().as_str()));
}

#[test]
fn test_plan_building_writes_nothing() {
    let env = TestEnv::new();
    let root = env.user_root();

    let plan = PlanBuilder::new(root.clone())
        .build(&[command("X")], &State::new())
        .unwrap();

    assert_eq!(plan.counts().install, 1);
    env.assert_not_exists(&root.to_native());
}

#[test]
fn test_unsafe_catalog_name_is_rejected() {
    let env = TestEnv::new();
    let bad = CatalogFile::new("../escape", ContentType::Agents, "x.md", "x");

    let err = PlanBuilder::new(env.user_root())
        .build(&[bad], &State::new())
        .unwrap_err();

    assert!(matches!(err, foundry_core::Error::InvalidEntry { .. }));
}
