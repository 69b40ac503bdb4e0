//! Tests for applying plans and removing installations

use foundry_core::{
    CatalogFile, ContentType, Error, InstallOptions, InstallationRecord, Installer, MemoryCatalog,
    PlanCounts, RecordFilter, RemoveMode, Selection, State,
};
use foundry_fs::{NormalizedPath, content_hash};
use foundry_test_utils::{TestEnv, sample_catalog};
use pretty_assertions::assert_eq;

fn counts(install: usize, update: usize, skip: usize) -> PlanCounts {
    PlanCounts {
        install,
        update,
        skip,
    }
}

fn command_path(root: &NormalizedPath, stem: &str) -> NormalizedPath {
    root.join("commands").join(&format!("ccf-{}.md", stem))
}

mod install {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_install_writes_content_verbatim_and_records_hashes() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();

        let (plan, report) = Installer::new(&store)
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        assert_eq!(plan.counts(), counts(2, 0, 0));
        assert_eq!(report.installed.len(), 2);

        let flat = command_path(&root, "sample-a");
        let skill = root.join("skills/ccf-sample-b/SKILL.md");
        assert_eq!(env.read(&flat.to_native()), "X");
        assert_eq!(env.read(&skill.to_native()), "Y");

        let state = store.load().unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.find_by_path(&flat).unwrap().hash, content_hash(b"X"));
        assert_eq!(state.find_by_path(&skill).unwrap().hash, content_hash(b"Y"));
        assert_eq!(state.find_by_path(&skill).unwrap().filename, "b.md");
    }

    #[test]
    fn test_second_install_writes_nothing() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();
        let installer = Installer::new(&store);

        installer
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        // Re-encode compactly; a rewrite would come back pretty-printed.
        let compact = serde_json::to_vec(&store.load().unwrap()).unwrap();
        std::fs::write(store.path().to_native(), &compact).unwrap();

        let (plan, report) = installer
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        assert_eq!(plan.counts(), counts(0, 0, 2));
        assert_eq!(report.written(), 0);
        assert_eq!(std::fs::read(store.path().to_native()).unwrap(), compact);
    }

    #[test]
    fn test_changed_catalog_content_updates_file_and_hash() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();
        let installer = Installer::new(&store);

        installer
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        let newer = sample_catalog().with_file("sample", ContentType::Commands, "a.md", "X2");
        let (plan, report) = installer
            .install(&newer, &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        assert_eq!(plan.counts(), counts(0, 1, 1));
        assert_eq!(report.updated.len(), 1);

        let flat = command_path(&root, "sample-a");
        assert_eq!(env.read(&flat.to_native()), "X2");
        let state = store.load().unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.find_by_path(&flat).unwrap().hash, content_hash(b"X2"));
    }

    #[test]
    fn test_local_edits_are_preserved_unless_forced() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();
        let installer = Installer::new(&store);
        let flat = command_path(&root, "sample-a");

        installer
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap();
        env.write(&flat.to_native(), "my edits");

        let newer = sample_catalog().with_file("sample", ContentType::Commands, "a.md", "X2");
        let (_, report) = installer
            .install(&newer, &Selection::All, &root, &InstallOptions::default())
            .unwrap();

        assert_eq!(report.preserved, vec![flat.as_str().to_string()]);
        assert_eq!(env.read(&flat.to_native()), "my edits");
        assert_eq!(
            store.load().unwrap().find_by_path(&flat).unwrap().hash,
            content_hash(b"X")
        );

        let (_, report) = installer
            .install(&newer, &Selection::All, &root, &InstallOptions { force: true })
            .unwrap();

        assert_eq!(report.updated, vec![flat.as_str().to_string()]);
        assert_eq!(env.read(&flat.to_native()), "X2");
    }

    #[test]
    fn test_unknown_category_touches_nothing() {
        let env = TestEnv::new();
        let store = env.store();

        let err = Installer::new(&store)
            .install(
                &sample_catalog(),
                &Selection::Category("nope".into()),
                &env.user_root(),
                &InstallOptions::default(),
            )
            .unwrap_err();

        assert!(err.is_not_found());
        env.assert_not_exists(&store.path().to_native());
        env.assert_not_exists(&env.user_root().to_native());
    }

    #[test]
    fn test_missing_type_in_category_is_not_found() {
        let env = TestEnv::new();
        let store = env.store();

        let err = Installer::new(&store)
            .install(
                &sample_catalog(),
                &Selection::CategoryType("sample".into(), ContentType::Agents),
                &env.user_root(),
                &InstallOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(err, Error::TypeNotFound { .. }));
    }

    #[test]
    fn test_failed_write_keeps_records_of_earlier_writes() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();

        // A regular file where the skills directory should be
        env.write(&root.join("skills").to_native(), "blocker");

        let err = Installer::new(&store)
            .install(&sample_catalog(), &Selection::All, &root, &InstallOptions::default())
            .unwrap_err();

        match err {
            Error::InstallFailed { category, kind, .. } => {
                assert_eq!(category, "sample");
                assert_eq!(kind, ContentType::Skills);
            }
            other => panic!("expected InstallFailed, got {:?}", other),
        }

        let state = store.load().unwrap();
        assert_eq!(state.len(), 1);
        assert!(state.is_tracked(&command_path(&root, "sample-a")));
    }

    #[test]
    fn test_preview_does_not_write() {
        let env = TestEnv::new();
        let store = env.store();

        let plan = Installer::new(&store)
            .preview(
                &sample_catalog(),
                &Selection::All,
                &env.user_root(),
                &InstallOptions::default(),
            )
            .unwrap();

        assert_eq!(plan.counts(), counts(2, 0, 0));
        env.assert_not_exists(&env.user_root().to_native());
        env.assert_not_exists(&store.path().to_native());
    }

    #[test]
    fn test_colliding_names_fail_before_any_write() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();
        let catalog = MemoryCatalog::new()
            .with_file("a-b", ContentType::Commands, "c.md", "FIRST")
            .with_file("a", ContentType::Commands, "b-c.md", "SECOND");

        let err = Installer::new(&store)
            .install(&catalog, &Selection::All, &root, &InstallOptions::default())
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEntry { .. }));
        let message = err.to_string();
        assert!(message.contains("a-b/c.md"));
        assert!(message.contains("a/b-c.md"));
        env.assert_not_exists(&command_path(&root, "a-b-c").to_native());
        assert!(store.load().unwrap().is_empty());
    }
}

mod remove {
    use super::*;
    use pretty_assertions::assert_eq;

    fn installed_env() -> TestEnv {
        let env = TestEnv::new();
        let store = env.store();
        Installer::new(&store)
            .install(
                &sample_catalog(),
                &Selection::All,
                &env.user_root(),
                &InstallOptions::default(),
            )
            .unwrap();
        env
    }

    #[test]
    fn test_remove_category_deletes_files_and_skill_directories() {
        let env = installed_env();
        let store = env.store();
        let root = env.user_root();

        let filter = RecordFilter {
            category: Some("sample".into()),
            ..Default::default()
        };
        let report = Installer::new(&store)
            .remove_matching(&filter, RemoveMode::FailFast)
            .unwrap();

        assert_eq!(report.removed.len(), 2);
        env.assert_not_exists(&command_path(&root, "sample-a").to_native());
        env.assert_not_exists(&root.join("skills/ccf-sample-b").to_native());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_remove_flat_skill_record_keeps_skills_directory() {
        let env = TestEnv::new();
        let store = env.store();
        let root = env.user_root();

        let user_skill = root.join("skills/my-skill/SKILL.md").to_native();
        env.write(&user_skill, "mine");
        let legacy = root.join("skills/ccf-dev-x.md");
        env.write(&legacy.to_native(), "old layout");

        let mut state = State::new();
        state.add(InstallationRecord::new(
            &CatalogFile::new("dev", ContentType::Skills, "x.md", "old layout"),
            &legacy,
        ));
        store.save(&state).unwrap();

        let filter = RecordFilter {
            category: Some("dev".into()),
            ..Default::default()
        };
        let report = Installer::new(&store)
            .remove_matching(&filter, RemoveMode::FailFast)
            .unwrap();

        assert_eq!(report.removed.len(), 1);
        env.assert_not_exists(&legacy.to_native());
        env.assert_exists(&user_skill);
        assert_eq!(env.read(&user_skill), "mine");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_remove_by_type_leaves_other_types() {
        let env = installed_env();
        let store = env.store();

        let filter = RecordFilter {
            category: Some("sample".into()),
            kind: Some(ContentType::Skills),
            ..Default::default()
        };
        Installer::new(&store)
            .remove_matching(&filter, RemoveMode::FailFast)
            .unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.installations()[0].kind, ContentType::Commands);
    }

    #[test]
    fn test_already_deleted_file_still_deregisters() {
        let env = installed_env();
        let store = env.store();
        std::fs::remove_file(command_path(&env.user_root(), "sample-a").to_native()).unwrap();

        let report = Installer::new(&store)
            .remove_matching(&RecordFilter::default(), RemoveMode::FailFast)
            .unwrap();

        assert_eq!(report.already_absent.len(), 1);
        assert_eq!(report.removed.len(), 1);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_removing_nothing_is_a_no_op() {
        let env = TestEnv::new();
        let store = env.store();

        let report = Installer::new(&store)
            .remove_matching(&RecordFilter::default(), RemoveMode::FailFast)
            .unwrap();

        assert_eq!(report.deregistered(), 0);
        env.assert_not_exists(&store.path().to_native());
    }

    #[test]
    fn test_remove_is_scoped_to_root() {
        let env = installed_env();
        let store = env.store();

        let filter = RecordFilter {
            root: Some(env.project_root()),
            ..Default::default()
        };
        let report = Installer::new(&store)
            .remove_matching(&filter, RemoveMode::FailFast)
            .unwrap();

        assert_eq!(report.deregistered(), 0);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    /// Three flat records where the middle one points at a non-empty
    /// directory, so deleting it as a file fails.
    fn state_with_undeletable_record(env: &TestEnv) -> (State, Vec<InstallationRecord>) {
        let root = env.user_root();
        let mut state = State::new();
        for stem in ["one", "two", "three"] {
            let file = CatalogFile::new("c", ContentType::Commands, format!("{}.md", stem), stem);
            let path = command_path(&root, &format!("c-{}", stem));
            if stem == "two" {
                env.write(&path.join("inner.txt").to_native(), "x");
            } else {
                env.write(&path.to_native(), stem);
            }
            state.add(InstallationRecord::new(&file, &path));
        }
        env.store().save(&state).unwrap();
        let records = state.installations().to_vec();
        (state, records)
    }

    #[test]
    fn test_fail_fast_persists_progress_before_the_failure() {
        let env = TestEnv::new();
        let store = env.store();
        let (mut state, records) = state_with_undeletable_record(&env);

        let err = Installer::new(&store)
            .remove(&records, &mut state, RemoveMode::FailFast)
            .unwrap_err();

        assert!(matches!(err, Error::RemoveFailed { .. }), "got {:?}", err);
        let saved = store.load().unwrap();
        let remaining: Vec<_> = saved
            .installations()
            .iter()
            .map(|r| r.filename.as_str())
            .collect();
        assert_eq!(remaining, vec!["two.md", "three.md"]);
    }

    #[test]
    fn test_best_effort_deregisters_everything() {
        let env = TestEnv::new();
        let store = env.store();
        let (mut state, records) = state_with_undeletable_record(&env);

        let report = Installer::new(&store)
            .remove(&records, &mut state, RemoveMode::BestEffort)
            .unwrap();

        assert_eq!(report.removed.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("ccf-c-two.md"));
        assert!(store.load().unwrap().is_empty());
    }
}

#[test]
fn test_categories_install_independently() {
    let env = TestEnv::new();
    let store = env.store();
    let root = env.user_root();
    let catalog = MemoryCatalog::new()
        .with_file("alpha", ContentType::Commands, "same.md", "alpha")
        .with_file("beta", ContentType::Commands, "same.md", "beta");

    Installer::new(&store)
        .install(&catalog, &Selection::All, &root, &InstallOptions::default())
        .unwrap();

    assert_eq!(env.read(&command_path(&root, "alpha-same").to_native()), "alpha");
    assert_eq!(env.read(&command_path(&root, "beta-same").to_native()), "beta");
    assert_eq!(store.load().unwrap().categories(), vec!["alpha", "beta"]);
}
