use bixi_dashboard::config::AppConfig;
use bixi_dashboard::db::create_database_pool;
use bixi_dashboard::domain::{Basemap, Language};
use bixi_dashboard::marker::{derive_markers, Marker};
use bixi_dashboard::selection::{Reconciliation, Selection};
use bixi_dashboard::settings::{
    load_settings, save_settings, MemorySettingsStore, SettingsError, SettingsStore,
    Settings, SqliteSettingsStore,
};
use bixi_dashboard::source::{FeedMessage, FeedUpdate, PollerHandle, StationFeed};
use bixi_dashboard::station::StationRecord;
use bixi_dashboard::viewport::{
    adjust_camera, hit_test, Camera, CameraAnimation, CameraMove, LngLat, PointerGesture,
    PointerTracker, ScreenOffset, ScreenPoint, ViewportSize, CAMERA_TRANSITION,
    CLICK_TOLERANCE_PX, STATION_PANEL,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::layout::Rect;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

/// Virtual pixels per terminal cell. Pixel-based layout rules are evaluated
/// on this grid.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

const SEARCH_RESULT_LIMIT: usize = 8;
const ZOOM_STEP: f64 = 1.0;
/// Keyboard pans move the map by this share of the viewport.
const PAN_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Settings,
    About,
    Help,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Where preferences are persisted for this session.
#[derive(Debug)]
pub enum Preferences {
    Sqlite(SqliteSettingsStore),
    Memory(MemorySettingsStore),
}

impl SettingsStore for Preferences {
    async fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match self {
            Self::Sqlite(store) => store.read(key).await,
            Self::Memory(store) => store.read(key).await,
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        match self {
            Self::Sqlite(store) => store.write(key, value).await,
            Self::Memory(store) => store.write(key, value).await,
        }
    }
}

/// Transient footer note, rendered in the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusNote {
    BasemapChanged(Basemap),
    FeedNotRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub station_id: String,
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub index: usize,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub api_base: String,
    pub feed: StationFeed,
    pub selection: Selection,
    pub markers: Vec<Marker>,
    pub camera: Camera,
    pub camera_animation: Option<CameraAnimation>,
    pub pointer: PointerTracker,
    pub map_area: Rect,
    pub viewport: ViewportSize,
    pub settings: Settings,
    pub preferences: Preferences,
    pub language: Language,
    pub overlay: Overlay,
    pub settings_index: usize,
    pub search: SearchState,
    pub throbber: ThrobberState,
    pub status: Option<StatusNote>,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub poller: Option<PollerHandle>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            api_base: config.api_base.clone(),
            feed: StationFeed::new(config.stale_after),
            selection: Selection::default(),
            markers: Vec::new(),
            camera: Camera::default(),
            camera_animation: None,
            pointer: PointerTracker::default(),
            map_area: Rect::default(),
            viewport: ViewportSize::new(0.0, 0.0),
            settings: Settings::default(),
            preferences: Preferences::Memory(MemorySettingsStore::default()),
            language: config.language,
            overlay: Overlay::None,
            settings_index: 0,
            search: SearchState::default(),
            throbber: ThrobberState::default(),
            status: None,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            poller: None,
        }
    }

    /// Opens the preference database and restores saved settings. When the
    /// database is unusable the session quietly keeps in-memory settings.
    pub async fn initialize_preferences(&mut self, database_url: &str) {
        match create_database_pool(database_url).await {
            Ok(pool) => {
                self.preferences = Preferences::Sqlite(SqliteSettingsStore::new(pool));
            }
            Err(e) => {
                warn!(error = %e, "preference database unavailable, settings will not persist");
            }
        }

        self.settings = load_settings(&self.preferences).await;
        self.settings_index = basemap_index(self.settings.basemap);
        info!(basemap = self.settings.basemap.as_str(), "settings loaded");
    }

    pub fn attach_poller(&mut self, poller: PollerHandle) {
        self.poller = Some(poller);
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.feed.is_fetching() {
            self.throbber.calc_next();
        }

        self.step_camera(now);
    }

    pub fn step_camera(&mut self, now: Instant) {
        if let Some(animation) = self.camera_animation {
            let (center, finished) = animation.sample(now);
            self.camera.center = center;
            if finished {
                self.camera_animation = None;
            }
        }
    }

    pub fn handle_feed_message(&mut self, message: FeedMessage, now: Instant) {
        match message {
            FeedMessage::Started => self.feed.begin_fetch(),
            FeedMessage::Finished(Ok(collection)) => {
                // Selection is settled against the incoming snapshot before it
                // becomes visible to any render.
                if let Reconciliation::Retired(id) =
                    self.selection.reconcile(self.feed.snapshot(), &collection)
                {
                    debug!(station_id = %id, "selected station left the feed");
                }

                if self.feed.apply(Ok(collection), now) == FeedUpdate::Accepted {
                    self.markers = self
                        .feed
                        .snapshot()
                        .map(derive_markers)
                        .unwrap_or_default();
                    self.refresh_search();
                }
            }
            FeedMessage::Finished(result @ Err(_)) => {
                self.feed.apply(result, now);
            }
        }
    }

    pub fn request_refresh(&mut self) {
        if let Some(poller) = &self.poller {
            poller.refresh_now();
            self.status = None;
        } else {
            self.status = Some(StatusNote::FeedNotRunning);
        }
    }

    pub fn selected_station(&self) -> Option<&StationRecord> {
        self.selection.resolve(self.feed.snapshot()?)
    }

    /// Recomputes the map viewport from the cell area the map occupies.
    pub fn resize_map(&mut self, area: Rect) {
        if area == self.map_area {
            return;
        }
        self.map_area = area;
        self.viewport = ViewportSize::new(
            f64::from(area.width) * CELL_WIDTH_PX,
            f64::from(area.height) * CELL_HEIGHT_PX,
        );
    }

    /// Center of the terminal cell at (`column`, `row`) in map pixels, or
    /// `None` outside the map.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<ScreenPoint> {
        let area = self.map_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| {
            ScreenPoint::new(
                (f64::from(column - area.x) + 0.5) * CELL_WIDTH_PX,
                (f64::from(row - area.y) + 0.5) * CELL_HEIGHT_PX,
            )
        })
    }

    /// Screen anchor of the open panel's station.
    pub fn panel_anchor(&self) -> Option<ScreenPoint> {
        let station = self.selected_station()?;
        Some(self.camera.project(station.position.into(), self.viewport))
    }

    /// Opens the detail panel for a station, moving the camera if the panel
    /// would be clipped at the current anchor.
    pub fn select_station(&mut self, station_id: &str) {
        self.selection.select(station_id);
        let Some(anchor) = self.panel_anchor() else {
            return;
        };

        if let Some(movement) = adjust_camera(self.camera, anchor, self.viewport) {
            debug!(station_id, "moving camera to fit station panel");
            self.camera_animation = Some(CameraAnimation::new(
                self.camera.center,
                movement,
                Instant::now(),
            ));
        }
    }

    /// Flies to a station that may be off screen, then opens its panel.
    pub fn focus_station(&mut self, station_id: &str) {
        let Some(position) = self
            .feed
            .snapshot()
            .and_then(|snapshot| snapshot.find(station_id))
            .map(|station| LngLat::from(station.position))
        else {
            return;
        };

        let centered = Camera {
            center: position,
            zoom: self.camera.zoom,
        };
        let anchor = centered.project(position, self.viewport);
        let target = adjust_camera(centered, anchor, self.viewport)
            .map_or(position, |movement| movement.center);

        self.selection.select(station_id);
        self.camera_animation = Some(CameraAnimation::new(
            self.camera.center,
            CameraMove {
                center: target,
                duration: CAMERA_TRANSITION,
            },
            Instant::now(),
        ));
    }

    pub fn close_panel(&mut self) {
        self.selection.clear();
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let step_x = self.viewport.width * PAN_FRACTION;
        let step_y = self.viewport.height * PAN_FRACTION;
        let offset = match direction {
            PanDirection::Left => ScreenOffset { dx: step_x, dy: 0.0 },
            PanDirection::Right => ScreenOffset { dx: -step_x, dy: 0.0 },
            PanDirection::Up => ScreenOffset { dx: 0.0, dy: step_y },
            PanDirection::Down => ScreenOffset { dx: 0.0, dy: -step_y },
        };
        self.drag_map(offset);
    }

    fn drag_map(&mut self, offset: ScreenOffset) {
        self.camera_animation = None;
        self.camera = self.camera.panned(offset, self.viewport);
    }

    pub fn zoom_in(&mut self) {
        self.camera_animation = None;
        self.camera = self.camera.zoomed(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.camera_animation = None;
        self.camera = self.camera.zoomed(-ZOOM_STEP);
    }

    pub fn pointer_down(&mut self, point: ScreenPoint) {
        self.pointer.press(point);
    }

    /// Forgets a press whose release landed outside the map.
    pub fn pointer_cancel(&mut self) {
        self.pointer.cancel();
    }

    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        if let Some(offset) = self.pointer.moved(point) {
            self.drag_map(offset);
        }
    }

    /// Clicks select the marker underneath or close the panel on empty map.
    /// Drags never change the selection.
    pub fn pointer_up(&mut self, point: ScreenPoint) {
        if self.pointer.release(point) != Some(PointerGesture::Click) {
            return;
        }

        if let Some(anchor) = self.panel_anchor() {
            if STATION_PANEL.contains(anchor, point) {
                return;
            }
        }

        let hit = hit_test(
            &self.markers,
            self.camera,
            self.viewport,
            point,
            CLICK_TOLERANCE_PX,
        )
        .map(|marker| marker.station_id.clone());

        match hit {
            Some(station_id) => self.select_station(&station_id),
            None => self.close_panel(),
        }
    }

    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = if self.overlay == overlay {
            Overlay::None
        } else {
            overlay
        };
        if self.overlay == Overlay::Settings {
            self.settings_index = basemap_index(self.settings.basemap);
        }
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        info!(language = self.language.as_str(), "language changed");
    }

    /// Applies a basemap choice immediately and persists it best-effort.
    /// Storage failures are only logged.
    pub async fn set_basemap(&mut self, basemap: Basemap) {
        if self.settings.basemap == basemap {
            return;
        }
        self.settings.basemap = basemap;
        self.settings_index = basemap_index(basemap);
        save_settings(&self.preferences, self.settings).await;
        self.status = Some(StatusNote::BasemapChanged(basemap));
    }

    pub fn open_search(&mut self) {
        self.search = SearchState::default();
        self.overlay = Overlay::Search;
        self.refresh_search();
    }

    pub fn search_push(&mut self, ch: char) {
        self.search.query.push(ch);
        self.refresh_search();
    }

    pub fn search_pop(&mut self) {
        self.search.query.pop();
        self.refresh_search();
    }

    pub fn refresh_search(&mut self) {
        let query = self.search.query.trim();
        self.search.results = match self.feed.snapshot() {
            Some(snapshot) if !query.is_empty() => {
                let matcher = SkimMatcherV2::default();
                let mut hits: Vec<SearchHit> = snapshot
                    .stations
                    .iter()
                    .filter_map(|station| {
                        let haystack = format!("{} {}", station.name, station.short_name);
                        matcher
                            .fuzzy_match(&haystack, query)
                            .map(|score| SearchHit {
                                station_id: station.station_id.clone(),
                                name: station.name.clone(),
                                score,
                            })
                    })
                    .collect();
                hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
                hits.truncate(SEARCH_RESULT_LIMIT);
                hits
            }
            _ => Vec::new(),
        };
        self.search.index = self
            .search
            .index
            .min(self.search.results.len().saturating_sub(1));
    }

    pub fn confirm_search(&mut self) {
        let Some(hit) = self.search.results.get(self.search.index).cloned() else {
            return;
        };
        self.overlay = Overlay::None;
        self.focus_station(&hit.station_id);
    }
}

pub fn basemap_index(basemap: Basemap) -> usize {
    Basemap::ALL
        .iter()
        .position(|candidate| *candidate == basemap)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bixi_dashboard::source::FetchError;
    use bixi_dashboard::station::StationCollection;
    use reqwest::StatusCode;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config() -> AppConfig {
        AppConfig {
            api_base: "http://localhost:8000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            language: Language::En,
            log_file: PathBuf::from("test.log"),
            debug: false,
            poll_interval: Duration::from_secs(180),
            stale_after: Duration::from_secs(60),
        }
    }

    fn snapshot(stations: &[(&str, &str, f64, f64, u32)]) -> StationCollection {
        let features: Vec<serde_json::Value> = stations
            .iter()
            .map(|(id, name, longitude, latitude, bikes)| {
                serde_json::json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [longitude, latitude] },
                    "properties": {
                        "station_id": id,
                        "name": name,
                        "capacity": 30,
                        "bikes_available": bikes,
                        "ebikes_available": 0,
                        "docks_available": 30 - bikes,
                        "is_installed": 1,
                        "is_renting": 1,
                        "is_returning": 1,
                        "availability_status": "high",
                        "marker_color": "#22c55e",
                    }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "type": "FeatureCollection",
            "features": features,
        }))
        .unwrap()
    }

    fn app_with_map() -> App {
        let mut app = App::new(&config());
        app.resize_map(Rect::new(0, 0, 120, 50));
        app
    }

    fn deliver(app: &mut App, collection: StationCollection) {
        let now = Instant::now();
        app.handle_feed_message(FeedMessage::Started, now);
        app.handle_feed_message(FeedMessage::Finished(Ok(collection)), now);
    }

    #[test]
    fn accepted_snapshot_derives_markers() {
        let mut app = app_with_map();
        deliver(&mut app, snapshot(&[("1", "Berri", -73.56, 45.51, 12)]));

        assert_eq!(app.markers.len(), 1);
        assert!(!app.feed.is_fetching());
        assert!(!app.feed.is_loading());
    }

    #[test]
    fn refresh_retires_vanished_selection() {
        let mut app = app_with_map();
        deliver(&mut app, snapshot(&[("1", "Berri", -73.56, 45.51, 12)]));
        app.selection.select("1");

        deliver(&mut app, snapshot(&[("2", "Atwater", -73.58, 45.49, 3)]));
        assert!(app.selected_station().is_none());
        assert!(!app.selection.is_active());
    }

    #[test]
    fn failed_fetch_keeps_selection_and_markers() {
        let mut app = app_with_map();
        deliver(&mut app, snapshot(&[("1", "Berri", -73.56, 45.51, 12)]));
        app.selection.select("1");

        let now = Instant::now();
        app.handle_feed_message(FeedMessage::Started, now);
        app.handle_feed_message(
            FeedMessage::Finished(Err(FetchError::Status(StatusCode::BAD_GATEWAY))),
            now,
        );

        assert!(app.feed.has_error());
        assert_eq!(app.markers.len(), 1);
        assert_eq!(app.selected_station().map(|s| s.bikes_available), Some(12));
    }

    #[test]
    fn click_on_marker_selects_and_empty_click_closes() {
        let mut app = app_with_map();
        let center = app.camera.center;
        deliver(
            &mut app,
            snapshot(&[("1", "Berri", center.longitude, center.latitude, 12)]),
        );

        let marker_point = app.viewport.center();
        app.pointer_down(marker_point);
        app.pointer_up(marker_point);
        assert_eq!(app.selection.station_id(), Some("1"));

        let empty = ScreenPoint::new(app.viewport.width - 10.0, app.viewport.height - 10.0);
        app.pointer_down(empty);
        app.pointer_up(empty);
        assert!(!app.selection.is_active());
    }

    #[test]
    fn drag_pans_without_touching_selection() {
        let mut app = app_with_map();
        deliver(&mut app, snapshot(&[("1", "Berri", -73.56, 45.51, 12)]));
        app.selection.select("1");
        let before = app.camera.center;

        app.pointer_down(ScreenPoint::new(100.0, 100.0));
        app.pointer_moved(ScreenPoint::new(180.0, 100.0));
        app.pointer_up(ScreenPoint::new(180.0, 100.0));

        assert!(app.camera.center.longitude < before.longitude);
        assert_eq!(app.selection.station_id(), Some("1"));
    }

    #[test]
    fn selecting_near_top_edge_starts_camera_move() {
        let mut app = app_with_map();
        let near_top = app
            .camera
            .unproject(ScreenPoint::new(app.viewport.width / 2.0, 40.0), app.viewport);
        deliver(
            &mut app,
            snapshot(&[("1", "Berri", near_top.longitude, near_top.latitude, 12)]),
        );

        app.select_station("1");
        let animation = app.camera_animation.expect("camera should move");
        assert!(animation.target().latitude > app.camera.center.latitude);

        app.step_camera(Instant::now() + Duration::from_secs(1));
        assert!(app.camera_animation.is_none());
        assert_eq!(app.camera.center, animation.target());
    }

    #[test]
    fn cells_map_to_virtual_pixels() {
        let mut app = App::new(&config());
        app.resize_map(Rect::new(2, 3, 10, 5));
        assert_eq!(app.viewport, ViewportSize::new(80.0, 80.0));
        assert_eq!(app.cell_to_point(2, 3), Some(ScreenPoint::new(4.0, 8.0)));
        assert_eq!(app.cell_to_point(1, 3), None);
        assert_eq!(app.cell_to_point(12, 3), None);
    }

    #[test]
    fn search_ranks_matching_station_names() {
        let mut app = app_with_map();
        deliver(
            &mut app,
            snapshot(&[
                ("1", "Berri / de Maisonneuve", -73.56, 45.51, 12),
                ("2", "Atwater / Sainte-Catherine", -73.58, 45.49, 3),
            ]),
        );

        app.open_search();
        for ch in "atwater".chars() {
            app.search_push(ch);
        }
        assert_eq!(app.search.results.first().map(|hit| hit.station_id.as_str()), Some("2"));

        app.confirm_search();
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.selection.station_id(), Some("2"));
        assert!(app.camera_animation.is_some());
    }

    #[tokio::test]
    async fn basemap_choice_persists_to_store() {
        let mut app = app_with_map();
        app.set_basemap(Basemap::OpenStreetMap).await;

        assert_eq!(app.settings.basemap, Basemap::OpenStreetMap);
        assert_eq!(load_settings(&app.preferences).await.basemap, Basemap::OpenStreetMap);
    }

    #[tokio::test]
    async fn unusable_database_falls_back_to_memory() {
        let mut app = App::new(&config());
        app.initialize_preferences("not-a-database-url").await;

        assert!(matches!(app.preferences, Preferences::Memory(_)));
        assert_eq!(app.settings, Settings::default());
        assert_eq!(app.status, None);
    }

    #[tokio::test]
    async fn failed_save_still_applies_basemap_quietly() {
        let mut app = app_with_map();
        app.preferences = Preferences::Memory(MemorySettingsStore::failing());

        app.set_basemap(Basemap::OpenStreetMap).await;

        assert_eq!(app.settings.basemap, Basemap::OpenStreetMap);
        assert_eq!(app.status, Some(StatusNote::BasemapChanged(Basemap::OpenStreetMap)));
    }

    #[test]
    fn refresh_never_moves_the_camera() {
        let mut app = app_with_map();
        let near_top = app
            .camera
            .unproject(ScreenPoint::new(app.viewport.width / 2.0, 40.0), app.viewport);
        deliver(
            &mut app,
            snapshot(&[("1", "Berri", near_top.longitude, near_top.latitude, 12)]),
        );

        app.select_station("1");
        assert!(app.camera_animation.is_some());
        app.step_camera(Instant::now() + Duration::from_secs(1));
        let settled = app.camera.center;

        // Station drifts back toward the top edge and its counts change.
        let drifted = app
            .camera
            .unproject(ScreenPoint::new(app.viewport.width / 2.0, 40.0), app.viewport);
        deliver(
            &mut app,
            snapshot(&[("1", "Berri", drifted.longitude, drifted.latitude, 2)]),
        );

        assert!(app.camera_animation.is_none());
        assert_eq!(app.camera.center, settled);
        assert_eq!(app.selected_station().map(|s| s.bikes_available), Some(2));
    }

    #[test]
    fn release_outside_map_forgets_the_press() {
        let mut app = app_with_map();
        let before = app.camera.center;

        app.pointer_down(ScreenPoint::new(100.0, 100.0));
        app.pointer_moved(ScreenPoint::new(180.0, 100.0));
        app.pointer_cancel();
        let panned = app.camera.center;
        assert!(panned.longitude < before.longitude);

        // A drag with no fresh press inside the map must not pan.
        app.pointer_moved(ScreenPoint::new(400.0, 300.0));
        assert_eq!(app.camera.center, panned);
    }
}
