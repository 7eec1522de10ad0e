//! End-to-end selection flow over a manually driven discovery channel:
//! select → highlight + focus + lookup, batch arrival → populated pool,
//! positional pick resolution, clear → everything back to rest.

use bevy::prelude::*;
use crossbeam_channel::{unbounded, Receiver, Sender};

use heritage_map::data::villages::village_by_id;
use heritage_map::picking::{resolve_pick, Pick};
use heritage_map::scene::{
    apply_selection, ingest_discoveries, setup_scene, BusinessSlot, InstancePool, MarkerRegistry,
    PoolCapacity, SelectionState,
};
use heritage_map::{
    Business, BusinessPicked, CameraTarget, DiscoveryBatch, DiscoveryChannel, DiscoveryRequest,
    Highlight, LocationPicked, SelectRequest,
};

fn business(name: &str) -> Business {
    Business {
        name: name.to_string(),
        category: "Retail".to_string(),
        detail: "Local trade".to_string(),
        source_url: None,
    }
}

/// Headless engine: the full scene graph from `setup_scene`, the selection
/// systems, and a discovery channel whose far ends the test holds.
fn engine() -> (App, Sender<DiscoveryBatch>, Receiver<DiscoveryRequest>) {
    let (req_tx, req_rx) = unbounded();
    let (res_tx, res_rx) = unbounded();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()));
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();
    app.init_resource::<SelectionState>();
    app.init_resource::<CameraTarget>();
    app.add_event::<SelectRequest>();
    app.add_event::<LocationPicked>();
    app.add_event::<BusinessPicked>();
    app.insert_resource(PoolCapacity(32));
    app.insert_resource(DiscoveryChannel {
        requests: req_tx,
        results: res_rx,
    });
    app.add_systems(Startup, setup_scene);
    app.add_systems(Update, (apply_selection, ingest_discoveries).chain());

    app.update();
    (app, res_tx, req_rx)
}

fn select(app: &mut App, id: Option<&'static str>) {
    app.world_mut().send_event(SelectRequest(id));
    app.update();
}

#[test]
fn full_selection_lifecycle() {
    let (mut app, res_tx, req_rx) = engine();

    // Selecting the capital highlights exactly its marker, clears the pool,
    // engages the camera, and issues a tagged lookup.
    select(&mut app, Some("phokeng"));

    let registry = app.world().resource::<MarkerRegistry>();
    assert_eq!(registry.selected_count(), 1);
    assert_eq!(
        registry.get("phokeng").unwrap().highlight,
        Highlight::Selected
    );
    assert_eq!(app.world().resource::<InstancePool>().active_count(), 0);
    assert_eq!(
        app.world().resource::<CameraTarget>().destination(),
        Some(village_by_id("phokeng").unwrap().coordinates)
    );
    let request = req_rx.try_recv().expect("lookup issued on selection");
    assert_eq!(request.village_id, "phokeng");

    // The lookup resolves with three records: slots 0..2 go live and
    // resolve positionally.
    let batch = vec![business("school"), business("clinic"), business("mine")];
    res_tx
        .send(DiscoveryBatch {
            village_id: "phokeng",
            businesses: batch.clone(),
        })
        .unwrap();
    app.update();

    let pool = app.world().resource::<InstancePool>();
    assert_eq!(pool.active_count(), 3);
    for (i, expected) in batch.iter().enumerate() {
        assert_eq!(pool.resolve(i), Some(expected));
    }
    assert_eq!(pool.resolve(3), None);

    // A ray that reaches slot 1 with no marker in the way resolves into the
    // batch at position 1 — the BusinessPicked payload.
    let pick = resolve_pick(None, Some((1, 8.0)));
    assert_eq!(pick, Some(Pick::Slot(1)));
    let picked = app
        .world()
        .resource::<InstancePool>()
        .resolve(1)
        .cloned()
        .expect("slot 1 resolvable");
    assert_eq!(picked, batch[1]);

    // Active slots are visible, the trailing capacity stays hidden.
    let world = app.world_mut();
    let mut slots = world.query::<(&BusinessSlot, &Visibility)>();
    for (slot, visibility) in slots.iter(world) {
        let expected = if slot.index < 3 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        assert_eq!(*visibility, expected, "slot {}", slot.index);
    }

    // Clearing the selection reverts the marker and empties the pool.
    select(&mut app, None);
    let registry = app.world().resource::<MarkerRegistry>();
    assert_eq!(registry.selected_count(), 0);
    assert_eq!(
        registry.get("phokeng").unwrap().highlight,
        Highlight::Normal
    );
    assert_eq!(app.world().resource::<InstancePool>().active_count(), 0);
    assert!(app
        .world()
        .resource::<CameraTarget>()
        .destination()
        .is_none());
}

#[test]
fn switching_selection_supersedes_the_inflight_lookup() {
    let (mut app, res_tx, req_rx) = engine();

    select(&mut app, Some("phokeng"));
    select(&mut app, Some("luka"));
    assert_eq!(req_rx.try_iter().count(), 2, "one lookup per transition");

    // Phokeng's result lands after the switch: discarded, pool untouched.
    res_tx
        .send(DiscoveryBatch {
            village_id: "phokeng",
            businesses: vec![business("stale")],
        })
        .unwrap();
    app.update();
    assert_eq!(app.world().resource::<InstancePool>().active_count(), 0);

    let registry = app.world().resource::<MarkerRegistry>();
    assert_eq!(registry.get("luka").unwrap().highlight, Highlight::Selected);
    assert_eq!(
        registry.get("phokeng").unwrap().highlight,
        Highlight::Normal
    );

    // Luka's batch is the live one and lands around Luka.
    res_tx
        .send(DiscoveryBatch {
            village_id: "luka",
            businesses: vec![business("fresh")],
        })
        .unwrap();
    app.update();

    let pool = app.world().resource::<InstancePool>();
    assert_eq!(pool.active_count(), 1);
    assert_eq!(pool.resolve(0).unwrap().name, "fresh");

    let luka = village_by_id("luka").unwrap().coordinates;
    let world = app.world_mut();
    let mut slots = world.query::<(&BusinessSlot, &Transform)>();
    let (_, transform) = slots
        .iter(world)
        .find(|(slot, _)| slot.index == 0)
        .expect("slot 0 exists");
    let planar = (transform.translation - luka)
        * Vec3::new(1.0, 0.0, 1.0);
    assert!(
        (3.5..8.5).contains(&planar.length()),
        "slot 0 should ring Luka, offset {planar}"
    );
}

#[test]
fn marker_priority_holds_through_the_pool() {
    let (mut app, res_tx, _req_rx) = engine();
    select(&mut app, Some("phokeng"));
    res_tx
        .send(DiscoveryBatch {
            village_id: "phokeng",
            businesses: vec![business("near")],
        })
        .unwrap();
    app.update();

    // Even with an active slot closer along the ray, the marker wins.
    assert_eq!(
        resolve_pick(Some(("phokeng", 40.0)), Some((0, 5.0))),
        Some(Pick::Village("phokeng"))
    );
}
