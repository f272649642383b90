use std::collections::HashSet;
use std::path::PathBuf;

use boxupdater::{
    default_repositories, Disambiguate, FileStorage, IdentityStrategy, MemoryStorage,
    NewRepository, Registry, Repository, Storage,
};
use tempfile::TempDir;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_storage(name: &str) -> MemoryStorage {
    let bytes = std::fs::read(fixtures_root().join(name)).unwrap();
    MemoryStorage::with_document(bytes)
}

fn load(storage: &MemoryStorage) -> Registry {
    Registry::load(Box::new(storage.clone()), Box::new(Disambiguate)).unwrap()
}

fn stored(storage: &MemoryStorage) -> Vec<Repository> {
    serde_json::from_slice(&storage.document().unwrap()).unwrap()
}

#[test]
fn legacy_document_is_migrated_and_rewritten() {
    let storage = fixture_storage("legacy-repositories.json");

    let registry = load(&storage);

    let labels: Vec<_> = registry
        .repositories()
        .iter()
        .map(|r| r.display_name.as_str())
        .collect();
    assert_eq!(labels, ["HayBox", "Pico Rectangle", "GP2040-CE"]);
    assert_eq!(registry.repositories()[2].asset_filter, "");
    assert_eq!(storage.save_count(), 1);
    assert_eq!(stored(&storage), registry.repositories());
}

#[test]
fn legacy_names_shared_by_several_records_are_disambiguated() {
    let storage = fixture_storage("legacy-colliding-repositories.json");

    let mut registry = load(&storage);

    let labels: Vec<_> = registry
        .repositories()
        .iter()
        .map(|r| r.display_name.as_str())
        .collect();
    assert_eq!(labels, ["HayBox (JonnyHaystack)", "HayBox (GRAMCTRL)", "GP2040-CE"]);
    assert_eq!(stored(&storage), registry.repositories());

    // Both members reachable by label, and the set collapses like any other.
    assert_eq!(registry.find("HayBox (GRAMCTRL)").unwrap().owner, "GRAMCTRL");
    registry.remove("HayBox (JonnyHaystack)").unwrap().unwrap();
    assert_eq!(registry.find("HayBox").unwrap().owner, "GRAMCTRL");

    assert_eq!(load(&storage).repositories(), registry.repositories());
}

#[test]
fn migration_is_idempotent() {
    let storage = fixture_storage("migrated-repositories.json");
    let before: Vec<Repository> = stored(&storage);

    let registry = load(&storage);

    assert_eq!(registry.repositories(), before.as_slice());
    assert_eq!(storage.save_count(), 0);

    let again = load(&storage);
    assert_eq!(again.repositories(), before.as_slice());
}

#[test]
fn migrated_collision_set_collapses_on_remove() {
    let storage = fixture_storage("migrated-repositories.json");
    let mut registry = load(&storage);

    let removed = registry.remove("HayBox (someone)").unwrap().unwrap();

    assert_eq!(removed.owner, "someone");
    assert_eq!(registry.find("HayBox").unwrap().owner, "JonnyHaystack");
    assert_eq!(stored(&storage), registry.repositories());
}

#[test]
fn defaults_survive_process_restart_on_disk() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    let first = Registry::load(Box::new(storage.clone()), Box::new(Disambiguate)).unwrap();
    assert_eq!(first.repositories(), default_repositories().as_slice());
    assert!(storage.load().unwrap().is_some());

    let second = Registry::load(Box::new(storage), Box::new(Disambiguate)).unwrap();
    assert_eq!(second.repositories(), first.repositories());
}

#[test]
fn changes_survive_process_restart_on_disk() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    {
        let mut registry =
            Registry::load(Box::new(storage.clone()), IdentityStrategy::default().policy())
                .unwrap();
        registry
            .add(
                NewRepository::new("someone", "GP2040-CE")
                    .with_description("Fork")
                    .with_asset_filter(r"\.uf2$"),
            )
            .unwrap();
        registry.remove("HayBox").unwrap();
    }

    let registry = Registry::load(Box::new(storage), Box::new(Disambiguate)).unwrap();
    let labels: Vec<_> = registry
        .repositories()
        .iter()
        .map(|r| r.display_name.as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "GP2040-CE (OpenStickCommunity)",
            "pico-rectangle",
            "HayBox-GRAM",
            "GP2040-CE (someone)"
        ]
    );
}

#[test]
fn uniqueness_holds_over_a_long_operation_sequence() {
    let storage = MemoryStorage::new();
    let mut registry = load(&storage);

    let owners = ["a", "b", "c", "d"];
    let names = ["HayBox", "GP2040-CE", "fresh"];

    for (step, owner) in owners.iter().enumerate() {
        for name in names {
            registry.add(NewRepository::new(*owner, name)).unwrap();
            assert_labels_unique(&registry);
        }

        // Remove a label picked from the current state every round.
        let victim = registry.repositories()[step].display_name.clone();
        assert!(registry.remove(&victim).unwrap().is_some());
        assert_labels_unique(&registry);
    }

    while let Some(first) = registry.repositories().first().map(|r| r.display_name.clone()) {
        registry.remove(&first).unwrap();
        assert_labels_unique(&registry);
        assert_single_members_are_bare(&registry);
    }
}

fn assert_labels_unique(registry: &Registry) {
    let mut seen = HashSet::new();
    for repo in registry.repositories() {
        assert!(
            seen.insert(repo.display_name.as_str()),
            "duplicate label '{}'",
            repo.display_name
        );
    }
}

fn assert_single_members_are_bare(registry: &Registry) {
    for repo in registry.repositories() {
        let same_name = registry
            .repositories()
            .iter()
            .filter(|r| r.name == repo.name)
            .count();
        if same_name == 1 {
            assert_eq!(repo.display_name, repo.name);
        } else {
            assert!(repo.is_disambiguated());
        }
    }
}
