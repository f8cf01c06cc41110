//! Camera math for the station map.
//!
//! Positions are projected with Web Mercator onto a pixel plane of
//! `256 * 2^zoom` pixels. The detail panel policy works purely in screen
//! pixels; moving the camera goes through project -> offset -> unproject.

use crate::marker::Marker;
use crate::station::Position;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 10.0;
pub const MAX_ZOOM: f64 = 18.0;
pub const CAMERA_TRANSITION: Duration = Duration::from_millis(300);
/// Pointer travel (per axis, inclusive) still treated as a click.
pub const CLICK_TOLERANCE_PX: f64 = 5.0;

pub const MONTREAL: LngLat = LngLat {
    longitude: -73.5673,
    latitude: 45.5017,
};
pub const INITIAL_ZOOM: f64 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<Position> for LngLat {
    fn from(position: Position) -> Self {
        Self {
            longitude: position.longitude,
            latitude: position.latitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_to(self, other: Self) -> ScreenOffset {
        ScreenOffset {
            dx: other.x - self.x,
            dy: other.y - self.y,
        }
    }
}

/// Pixel translation. Positive `dx` moves content right, positive `dy` down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenOffset {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(self, point: ScreenPoint) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LngLat,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: MONTREAL,
            zoom: INITIAL_ZOOM,
        }
    }
}

impl Camera {
    fn world_size(self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    fn to_world(self, point: LngLat) -> (f64, f64) {
        let size = self.world_size();
        let x = (point.longitude + 180.0) / 360.0 * size;
        let lat = point.latitude.to_radians();
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_world(self, x: f64, y: f64) -> LngLat {
        let size = self.world_size();
        let longitude = x / size * 360.0 - 180.0;
        let latitude = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
        LngLat {
            longitude,
            latitude,
        }
    }

    pub fn project(self, point: LngLat, viewport: ViewportSize) -> ScreenPoint {
        let (px, py) = self.to_world(point);
        let (cx, cy) = self.to_world(self.center);
        let middle = viewport.center();
        ScreenPoint::new(px - cx + middle.x, py - cy + middle.y)
    }

    pub fn unproject(self, point: ScreenPoint, viewport: ViewportSize) -> LngLat {
        let (cx, cy) = self.to_world(self.center);
        let middle = viewport.center();
        self.from_world(point.x - middle.x + cx, point.y - middle.y + cy)
    }

    /// Moves the map content by `offset` pixels, as a drag would.
    pub fn panned(self, offset: ScreenOffset, viewport: ViewportSize) -> Self {
        let middle = viewport.center();
        let target = ScreenPoint::new(middle.x - offset.dx, middle.y - offset.dy);
        Self {
            center: self.unproject(target, viewport),
            zoom: self.zoom,
        }
    }

    pub fn zoomed(self, delta: f64) -> Self {
        Self {
            center: self.center,
            zoom: (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }
}

/// Footprint of the station detail panel, anchored above the marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub height: f64,
    pub width: f64,
    pub offset: f64,
    pub padding: f64,
}

pub const STATION_PANEL: PanelGeometry = PanelGeometry {
    height: 340.0,
    width: 300.0,
    offset: 15.0,
    padding: 30.0,
};

impl PanelGeometry {
    pub fn clearance_above(self) -> f64 {
        self.height + self.offset + self.padding
    }

    /// Whether `point` falls on the panel drawn for `anchor`.
    pub fn contains(self, anchor: ScreenPoint, point: ScreenPoint) -> bool {
        let bottom = anchor.y - self.offset;
        let half_width = self.width / 2.0;
        (anchor.x - half_width..=anchor.x + half_width).contains(&point.x)
            && (bottom - self.height..=bottom).contains(&point.y)
    }

    pub fn clearance_side(self) -> f64 {
        self.width / 2.0 + self.padding
    }

    /// Offset that brings the panel fully on screen, `None` when it already fits.
    ///
    /// Horizontal checks run left then right; when the panel is wider than the
    /// viewport the right-hand correction wins.
    pub fn correction(self, anchor: ScreenPoint, viewport: ViewportSize) -> Option<ScreenOffset> {
        let mut dx = 0.0;
        let mut dy = 0.0;

        let above = self.clearance_above();
        if anchor.y < above {
            dy = above - anchor.y;
        }

        let side = self.clearance_side();
        if anchor.x < side {
            dx = side - anchor.x;
        }
        let right_space = viewport.width - anchor.x;
        if right_space < side {
            dx = -(side - right_space);
        }

        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(ScreenOffset { dx, dy })
        }
    }
}

pub fn panel_correction(anchor: ScreenPoint, viewport: ViewportSize) -> Option<ScreenOffset> {
    STATION_PANEL.correction(anchor, viewport)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub center: LngLat,
    pub duration: Duration,
}

/// Camera command issued when a station is selected, if the panel would clip.
pub fn adjust_camera(
    camera: Camera,
    anchor: ScreenPoint,
    viewport: ViewportSize,
) -> Option<CameraMove> {
    let offset = panel_correction(anchor, viewport)?;
    let current = camera.project(camera.center, viewport);
    let shifted = ScreenPoint::new(current.x - offset.dx, current.y - offset.dy);

    Some(CameraMove {
        center: camera.unproject(shifted, viewport),
        duration: CAMERA_TRANSITION,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    from: LngLat,
    to: LngLat,
    started: Instant,
    duration: Duration,
}

impl CameraAnimation {
    pub const fn new(from: LngLat, movement: CameraMove, started: Instant) -> Self {
        Self {
            from,
            to: movement.center,
            started,
            duration: movement.duration,
        }
    }

    pub const fn target(&self) -> LngLat {
        self.to
    }

    /// Center at `now` and whether the transition has finished.
    pub fn sample(&self, now: Instant) -> (LngLat, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        let center = LngLat {
            longitude: (self.to.longitude - self.from.longitude).mul_add(eased, self.from.longitude),
            latitude: (self.to.latitude - self.from.latitude).mul_add(eased, self.from.latitude),
        };
        (center, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture {
    Click,
    Drag,
}

pub fn classify_pointer(down: ScreenPoint, up: ScreenPoint) -> PointerGesture {
    let travel = down.offset_to(up);
    if travel.dx.abs() <= CLICK_TOLERANCE_PX && travel.dy.abs() <= CLICK_TOLERANCE_PX {
        PointerGesture::Click
    } else {
        PointerGesture::Drag
    }
}

/// Follows one pointer-down / move / pointer-up sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerTracker {
    down: Option<ScreenPoint>,
    last: Option<ScreenPoint>,
    dragging: bool,
}

impl PointerTracker {
    pub fn press(&mut self, point: ScreenPoint) {
        self.down = Some(point);
        self.last = Some(point);
        self.dragging = false;
    }

    /// Pan delta for this move, once the pointer has left the click tolerance.
    pub fn moved(&mut self, point: ScreenPoint) -> Option<ScreenOffset> {
        let down = self.down?;
        if !self.dragging && classify_pointer(down, point) == PointerGesture::Click {
            return None;
        }
        self.dragging = true;
        let last = self.last.replace(point)?;
        Some(last.offset_to(point))
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn release(&mut self, point: ScreenPoint) -> Option<PointerGesture> {
        let down = self.down.take()?;
        let gesture = if self.dragging {
            PointerGesture::Drag
        } else {
            classify_pointer(down, point)
        };
        self.last = None;
        self.dragging = false;
        Some(gesture)
    }
}

/// Marker under `point`, nearest first.
pub fn hit_test<'a>(
    markers: &'a [Marker],
    camera: Camera,
    viewport: ViewportSize,
    point: ScreenPoint,
    tolerance_px: f64,
) -> Option<&'a Marker> {
    markers
        .iter()
        .map(|marker| {
            let screen = camera.project(marker.position.into(), viewport);
            let offset = screen.offset_to(point);
            (marker, offset.dx.hypot(offset.dy))
        })
        .filter(|(marker, distance)| *distance <= marker.tier.diameter_px() / 2.0 + tolerance_px)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(marker, _)| marker)
}
