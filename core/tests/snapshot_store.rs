//! Shared snapshot store: round-trips, defaults and malformed data.

mod common;

use common::{remove_db, temp_db_path};
use pixelpet_core::{
    attribute::Attribute,
    error::PetError,
    snapshot::{PetSnapshot, KEY_ENERGY, KEY_HUNGER, KEY_VARIANT},
    store::SnapshotStore,
    variant::PetVariant,
};
use rusqlite::types::Value;

const SUITE: &str = "test.pixelpet.shared";

fn sample() -> PetSnapshot {
    PetSnapshot {
        pet_name: "Mochi".into(),
        variant: PetVariant::Dragon,
        hunger: Attribute::new(0.15),
        happiness: Attribute::new(0.42),
        energy: Attribute::new(0.99),
    }
}

#[test]
fn write_then_read_round_trips() {
    let store = SnapshotStore::in_memory(SUITE).unwrap();
    let snap = sample();
    assert!(store.write(&snap));
    assert_eq!(store.read(), snap);

    // Last write wins.
    let mut next = snap.clone();
    next.variant = PetVariant::Ghost;
    next.hunger = Attribute::FULL;
    store.write(&next);
    assert_eq!(store.read(), next);
}

#[test]
fn empty_store_reads_the_documented_default() {
    let store = SnapshotStore::in_memory(SUITE).unwrap();
    assert_eq!(store.try_read().unwrap(), None);

    let snap = store.read();
    assert_eq!(snap.variant, PetVariant::ALL[0]);
    assert_eq!(snap.hunger.value(), 0.7);
    assert_eq!(snap.happiness.value(), 0.8);
    assert_eq!(snap.energy.value(), 0.6);
    assert_eq!(snap.pet_name, "Pixel");
    assert_eq!(snap, PetSnapshot::default());
}

#[test]
fn unknown_variant_tag_falls_back_to_default_variant() {
    let store = SnapshotStore::in_memory(SUITE).unwrap();
    store.write(&sample());
    store.write_key(KEY_VARIANT, Value::Text("unicorn".into())).unwrap();

    let snap = store.read();
    assert_eq!(snap.variant, PetVariant::Dog);
    assert_eq!(snap.hunger, sample().hunger, "other fields survive");
}

#[test]
fn malformed_numbers_are_clamped_or_defaulted() {
    let store = SnapshotStore::in_memory(SUITE).unwrap();
    store.write_key(KEY_HUNGER, Value::Real(7.0)).unwrap();
    store.write_key(KEY_ENERGY, Value::Text("not a number".into())).unwrap();

    let snap = store.read();
    assert_eq!(snap.hunger, Attribute::FULL);
    assert_eq!(snap.energy.value(), 0.6, "unparseable value keeps its default");
    assert_eq!(snap.happiness.value(), 0.8, "missing key keeps its default");
    assert_eq!(snap.variant, PetVariant::Dog);
}

#[test]
fn detached_store_drops_writes_and_reads_default() {
    let store = SnapshotStore::detached(SUITE);
    assert!(!store.is_attached());
    assert!(!store.write(&sample()));
    assert!(matches!(
        store.try_write(&sample()),
        Err(PetError::StoreDetached { .. })
    ));
    assert_eq!(store.read(), PetSnapshot::default());
    assert!(store.read_existing().is_none());
}

#[test]
fn unreachable_path_degrades_to_detached() {
    let store = SnapshotStore::open_or_detached("/nonexistent-pixelpet-dir/sub/shared.db", SUITE);
    assert!(!store.is_attached());
    assert_eq!(store.read(), PetSnapshot::default());
}

#[test]
fn a_second_connection_observes_the_latest_write() {
    let path = temp_db_path("xproc");
    let path_str = path.to_string_lossy().to_string();

    let writer = SnapshotStore::open(&path_str, SUITE).unwrap();
    let reader = SnapshotStore::open(&path_str, SUITE).unwrap();
    assert_eq!(reader.try_read().unwrap(), None);

    writer.write(&sample());
    assert_eq!(reader.read(), sample());

    let reopened = writer.reopen().unwrap();
    assert_eq!(reopened.read(), sample());

    drop((writer, reader, reopened));
    remove_db(&path);
}

#[test]
fn suites_in_one_database_are_isolated() {
    let path = temp_db_path("suites");
    let path_str = path.to_string_lossy().to_string();

    let a = SnapshotStore::open(&path_str, "suite.a").unwrap();
    let b = SnapshotStore::open(&path_str, "suite.b").unwrap();
    a.write(&sample());
    assert_eq!(b.try_read().unwrap(), None);

    a.clear().unwrap();
    assert_eq!(a.try_read().unwrap(), None);

    drop((a, b));
    remove_db(&path);
}
