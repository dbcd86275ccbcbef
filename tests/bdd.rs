use std::fmt;

use anyhow::Context;
use atlas::{
    analytics::summarize,
    config::AppConfig,
    error::AppError,
    geo::LngLat,
    map::overlays::trip_id_of,
    models::{trip::Trip, PendingRoute, TripForm},
    state::AppState,
};
use cucumber::{given, then, when, World as _};
use tempfile::TempDir;

#[derive(Debug, cucumber::World, Default)]
struct AtlasWorld {
    state: Option<TestState>,
    pending: Option<PendingRoute>,
    last_save: Option<Result<Trip, String>>,
    last_import: Option<Result<usize, String>>,
    exported: Option<Vec<u8>>,
}

impl AtlasWorld {
    fn app_state(&self) -> &AppState {
        self.state
            .as_ref()
            .expect("state must be initialised first")
            .app()
    }
}

struct TestState {
    app: AppState,
    root: TempDir,
}

impl fmt::Debug for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestState").finish()
    }
}

impl TestState {
    async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for bdd world")?;
        let app = Self::boot(&root).await?;
        Ok(Self { app, root })
    }

    async fn boot(root: &TempDir) -> anyhow::Result<AppState> {
        let config = AppConfig::local(root.path().join("data"));
        Ok(AppState::bootstrap(config).await?)
    }

    async fn restart(&mut self) -> anyhow::Result<()> {
        self.app = Self::boot(&self.root).await?;
        Ok(())
    }

    fn app(&self) -> &AppState {
        &self.app
    }
}

fn form(mode: &str, date: &str, notes: &str) -> TripForm {
    TripForm {
        mode: mode.to_string(),
        date: date.to_string(),
        notes: notes.to_string(),
    }
}

async fn click(world: &mut AtlasWorld, lng: f64, lat: f64) {
    let pending = world
        .app_state()
        .map
        .lock()
        .await
        .click(LngLat::new(lng, lat));
    world.pending = pending;
}

async fn save(world: &mut AtlasWorld, mode: &str, date: &str, notes: &str) {
    let outcome = world
        .app_state()
        .save_trip(form(mode, date, notes))
        .await
        .map_err(|err| err.to_string());
    world.last_save = Some(outcome);
}

async fn log_trip(world: &mut AtlasWorld, mode: String, from: (f64, f64), to: (f64, f64), date: String) {
    click(world, from.0, from.1).await;
    click(world, to.0, to.1).await;
    save(world, &mode, &date, "").await;
    assert!(
        matches!(world.last_save, Some(Ok(_))),
        "saving failed: {:?}",
        world.last_save
    );
}

async fn stored_trips(world: &AtlasWorld) -> Vec<Trip> {
    world.app_state().trips.lock().await.trips().to_vec()
}

#[given("a fresh atlas")]
async fn given_fresh_atlas(world: &mut AtlasWorld) {
    world.state = Some(TestState::new().await.expect("state"));
    world.pending = None;
    world.last_save = None;
    world.last_import = None;
    world.exported = None;
}

#[given(
    regex = r#"^a logged "([^"]+)" trip from (-?[\d.]+), (-?[\d.]+) to (-?[\d.]+), (-?[\d.]+) on "([^"]+)"$"#
)]
async fn given_logged_trip(
    world: &mut AtlasWorld,
    mode: String,
    from_lng: f64,
    from_lat: f64,
    to_lng: f64,
    to_lat: f64,
    date: String,
) {
    log_trip(world, mode, (from_lng, from_lat), (to_lng, to_lat), date).await;
}

#[when(
    regex = r#"^I log a "([^"]+)" trip from (-?[\d.]+), (-?[\d.]+) to (-?[\d.]+), (-?[\d.]+) on "([^"]+)"$"#
)]
async fn when_log_trip(
    world: &mut AtlasWorld,
    mode: String,
    from_lng: f64,
    from_lat: f64,
    to_lng: f64,
    to_lat: f64,
    date: String,
) {
    log_trip(world, mode, (from_lng, from_lat), (to_lng, to_lat), date).await;
}

#[when(regex = r"^I click the map at (-?[\d.]+), (-?[\d.]+)$")]
async fn when_click(world: &mut AtlasWorld, lng: f64, lat: f64) {
    click(world, lng, lat).await;
}

#[when(regex = r#"^I save the pending route as "([^"]*)" on "([^"]*)" with notes "([^"]*)"$"#)]
async fn when_save(world: &mut AtlasWorld, mode: String, date: String, notes: String) {
    save(world, &mode, &date, &notes).await;
}

#[when("the app restarts")]
async fn when_restart(world: &mut AtlasWorld) {
    world
        .state
        .as_mut()
        .expect("state must be initialised first")
        .restart()
        .await
        .expect("restart");
}

#[when(regex = r#"^I import the text "(.*)"$"#)]
async fn when_import_text(world: &mut AtlasWorld, text: String) {
    let outcome = world
        .app_state()
        .import_trips(text.as_bytes())
        .await
        .map_err(|err| err.to_string());
    world.last_import = Some(outcome);
}

#[when("I export the trips")]
async fn when_export(world: &mut AtlasWorld) {
    let doc = world
        .app_state()
        .trips
        .lock()
        .await
        .export_all()
        .expect("export");
    world.exported = Some(doc);
}

#[when("I import the exported document")]
async fn when_import_exported(world: &mut AtlasWorld) {
    let doc = world.exported.clone().expect("export first");
    let outcome = world
        .app_state()
        .import_trips(&doc)
        .await
        .map_err(|err| err.to_string());
    world.last_import = Some(outcome);
}

#[then(regex = r"^a pending route from (-?[\d.]+), (-?[\d.]+) to (-?[\d.]+), (-?[\d.]+) is offered$")]
async fn then_pending_route(
    world: &mut AtlasWorld,
    from_lng: f64,
    from_lat: f64,
    to_lng: f64,
    to_lat: f64,
) {
    let expected = PendingRoute::new(LngLat::new(from_lng, from_lat), LngLat::new(to_lng, to_lat));
    assert_eq!(world.pending, Some(expected));
    assert_eq!(world.app_state().map.lock().await.pending(), Some(expected));
}

#[then(regex = r"^the store holds (\d+) trips$")]
async fn then_store_holds(world: &mut AtlasWorld, expected: usize) {
    assert_eq!(stored_trips(world).await.len(), expected);
}

#[then(regex = r#"^the latest trip has mode "([^"]+)" and a distance of about (\d+) km$"#)]
async fn then_latest_trip(world: &mut AtlasWorld, mode: String, km: f64) {
    let trips = stored_trips(world).await;
    let latest = trips.last().expect("at least one trip expected");
    assert_eq!(latest.mode.as_str(), mode);
    assert!(
        (latest.distance - km).abs() < 1.0,
        "distance {} not close to {km}",
        latest.distance
    );
}

#[then(regex = r#"^saving as "([^"]*)" on "([^"]*)" is refused$"#)]
async fn then_save_refused(world: &mut AtlasWorld, mode: String, date: String) {
    let result = world.app_state().save_trip(form(&mode, &date, "")).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))), "{result:?}");
}

#[then("the map shows no selection markers")]
async fn then_no_markers(world: &mut AtlasWorld) {
    let map = world.app_state().map.lock().await;
    assert_eq!(map.surface().marker_count(), 0);
    assert!(map.pending().is_none());
}

#[then(regex = r"^the map shows (\d+) trip overlays$")]
async fn then_trip_overlays(world: &mut AtlasWorld, expected: usize) {
    let scene = world.app_state().map.lock().await.scene();
    let count = scene
        .lines
        .iter()
        .filter(|line| trip_id_of(&line.id).is_some())
        .count();
    assert_eq!(count, expected);
}

#[then(regex = r"^analytics report (\d+) km over (\d+) trips$")]
async fn then_analytics(world: &mut AtlasWorld, km: i64, count: usize) {
    let summary = summarize(&stored_trips(world).await);
    assert_eq!(summary.total_rounded(), km);
    assert_eq!(summary.trip_count, count);
}

#[then("the import is rejected")]
async fn then_import_rejected(world: &mut AtlasWorld) {
    assert!(
        matches!(world.last_import, Some(Err(_))),
        "import outcome: {:?}",
        world.last_import
    );
}

#[then("the store matches the exported document")]
async fn then_matches_export(world: &mut AtlasWorld) {
    let doc = world.exported.as_ref().expect("export first");
    let expected: Vec<Trip> = serde_json::from_slice(doc).expect("exported json");
    assert_eq!(stored_trips(world).await, expected);
    assert_eq!(world.last_import, Some(Ok(expected.len())));
}

#[tokio::main]
async fn main() {
    AtlasWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
