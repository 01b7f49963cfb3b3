use modcompat::state::{SqliteStore, StateStore, VersionBounds};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SqliteStore {
    SqliteStore::new(&dir.path().join("state.db")).unwrap()
}

#[test]
fn record_version_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.record_version("skyrimse", Some("1.5.97.0")).unwrap();

    assert_eq!(
        store.previous_version("skyrimse").unwrap().as_deref(),
        Some("1.5.97.0")
    );
}

#[test]
fn record_version_overwrites_the_previous_observation() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.record_version("skyrimse", Some("1.5.97.0")).unwrap();
    store.record_version("skyrimse", Some("1.6.640.0")).unwrap();

    assert_eq!(
        store.previous_version("skyrimse").unwrap().as_deref(),
        Some("1.6.640.0")
    );
}

#[test]
fn record_version_none_clears_the_record() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.record_version("skyrimse", Some("1.5.97.0")).unwrap();
    store.record_version("skyrimse", None).unwrap();

    assert!(store.previous_version("skyrimse").unwrap().is_none());
}

#[test]
fn unknown_game_has_no_previous_version() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    assert!(store.previous_version("morrowind").unwrap().is_none());
}

#[test]
fn versions_are_tracked_per_game() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.record_version("skyrimse", Some("1.6.640.0")).unwrap();
    store.record_version("fallout4", Some("1.10.163.0")).unwrap();
    store.record_version("fallout4", None).unwrap();

    assert_eq!(
        store.previous_version("skyrimse").unwrap().as_deref(),
        Some("1.6.640.0")
    );
    assert!(store.previous_version("fallout4").unwrap().is_none());
}

#[test]
fn managed_mods_preserves_installation_order() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    for mod_id in ["zeta", "alpha", "mid"] {
        store
            .add_mod("skyrimse", mod_id, &VersionBounds::default())
            .unwrap();
    }

    let mods = store.managed_mods("skyrimse").unwrap();
    let ids: Vec<&str> = mods.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn add_mod_replaces_bounds_for_an_existing_entry() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store
        .add_mod(
            "skyrimse",
            "skyui",
            &VersionBounds {
                min_version: Some("1.5.0".to_string()),
                max_version: None,
            },
        )
        .unwrap();
    store
        .add_mod(
            "skyrimse",
            "skyui",
            &VersionBounds {
                min_version: Some("1.6.0".to_string()),
                max_version: Some("1.6.1170.0".to_string()),
            },
        )
        .unwrap();

    let mods = store.managed_mods("skyrimse").unwrap();
    assert_eq!(mods.len(), 1);
    assert_eq!(mods["skyui"].min_version.as_deref(), Some("1.6.0"));
    assert_eq!(mods["skyui"].max_version.as_deref(), Some("1.6.1170.0"));
}

#[test]
fn managed_mods_is_scoped_to_the_game() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store
        .add_mod("skyrimse", "skyui", &VersionBounds::default())
        .unwrap();
    store
        .add_mod("fallout4", "sim-settlements", &VersionBounds::default())
        .unwrap();

    let mods = store.managed_mods("skyrimse").unwrap();
    assert_eq!(mods.len(), 1);
    assert!(mods.contains_key("skyui"));
}

#[test]
fn state_survives_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("state.db");

    {
        let store = SqliteStore::new(&db_path).unwrap();
        store.record_version("skyrimse", Some("1.6.640.0")).unwrap();
        store
            .add_mod("skyrimse", "skyui", &VersionBounds::default())
            .unwrap();
    }

    let store = SqliteStore::new(&db_path).unwrap();
    assert_eq!(
        store.previous_version("skyrimse").unwrap().as_deref(),
        Some("1.6.640.0")
    );
    assert!(store.managed_mods("skyrimse").unwrap().contains_key("skyui"));
}
