//! The interactive engine and a widget reader sharing one database.

mod common;

use chrono::Utc;
use pixelpet_core::{
    command::PetCommand,
    config::PetConfig,
    engine::PetEngine,
    overlay::NoOverlayHost,
    store::SnapshotStore,
    timeline::{RenderSource, TimelinePresenter},
    variant::PetVariant,
};

#[test]
fn widget_timeline_follows_the_engine_writes() {
    let path = common::temp_db_path("widget");
    let path_str = path.to_string_lossy().to_string();
    let config = PetConfig::default_test();

    let app_store = SnapshotStore::open(&path_str, &config.store.suite).unwrap();
    let widget_store = SnapshotStore::open(&path_str, &config.store.suite).unwrap();
    let presenter = TimelinePresenter::new(config.timeline.clone());

    // Before the app ever runs, the widget shows defaults.
    let before = presenter.timeline(&widget_store, Utc::now());
    assert_eq!(before.entries[0].source, RenderSource::Default);

    let mut engine = PetEngine::build(&config, app_store, NoOverlayHost);
    engine.apply(PetCommand::ChangeVariant { variant: PetVariant::Slime }).unwrap();
    engine.apply(PetCommand::Feed).unwrap();

    let after = presenter.timeline(&widget_store, Utc::now());
    let entry = &after.entries[0];
    assert_eq!(entry.source, RenderSource::Snapshot);
    assert_eq!(entry.variant, PetVariant::Slime);
    assert_eq!(entry.hunger, engine.state().hunger.value());

    // The widget never writes back into the engine.
    let frame_before = engine.state().frame_index;
    presenter.timeline(&widget_store, Utc::now());
    assert_eq!(engine.state().frame_index, frame_before);

    drop(engine);
    common::remove_db(&path);
}
