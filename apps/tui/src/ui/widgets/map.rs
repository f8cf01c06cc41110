use crate::app::state::CELL_WIDTH_PX;
use crate::app::App;
use bixi_dashboard::domain::Basemap;
use bixi_dashboard::viewport::{Camera, LngLat, ScreenPoint, ViewportSize};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker as CanvasMarker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::Frame;

/// Markers this far outside the viewport (in pixels) are still drawn so
/// they don't pop at the edges.
const CULL_MARGIN_PX: f64 = 24.0;
const MAX_GRID_LINES: f64 = 80.0;

const fn grid_color(basemap: Basemap) -> Color {
    match basemap {
        Basemap::CycleOsm => Color::Rgb(38, 64, 48),
        Basemap::OpenStreetMap => Color::Rgb(52, 52, 64),
    }
}

/// Graticule spacing in degrees: 0.01° at the initial zoom, halving per level.
fn grid_step(zoom: f64) -> f64 {
    0.01 * (13.0 - zoom).exp2()
}

pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let viewport = app.viewport;
    if area.width == 0 || area.height == 0 || viewport.width <= 0.0 {
        return;
    }

    let camera = app.camera;
    let selected = app.selection.station_id();

    f.render_widget(
        Canvas::default()
            .x_bounds([0.0, viewport.width])
            .y_bounds([0.0, viewport.height])
            .marker(CanvasMarker::Braille)
            .paint(|ctx| {
                draw_grid(ctx, camera, viewport, grid_color(app.settings.basemap));

                ctx.layer();

                for marker in &app.markers {
                    let point = camera.project(marker.position.into(), viewport);
                    if !is_near_viewport(point, viewport) {
                        continue;
                    }
                    let (x, y) = to_canvas(point, viewport);
                    let radius = marker.tier.diameter_px() / 2.0;

                    ctx.draw(&Circle {
                        x,
                        y,
                        radius,
                        color: marker.color,
                    });
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: radius / 2.0,
                        color: marker.color,
                    });

                    if selected == Some(marker.station_id.as_str()) {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: radius + 6.0,
                            color: Color::White,
                        });
                    }
                }

                ctx.layer();

                for marker in &app.markers {
                    let Some(label) = marker.label.as_deref() else {
                        continue;
                    };
                    let point = camera.project(marker.position.into(), viewport);
                    if !viewport.contains(point) {
                        continue;
                    }
                    let (x, y) = to_canvas(point, viewport);
                    let half_width = label.len() as f64 * CELL_WIDTH_PX / 2.0;
                    ctx.print(
                        (x - half_width).max(0.0),
                        y,
                        Span::styled(
                            label.to_string(),
                            Style::default()
                                .fg(Color::Black)
                                .bg(marker.color)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            }),
        area,
    );
}

fn draw_grid(ctx: &mut Context<'_>, camera: Camera, viewport: ViewportSize, color: Color) {
    let step = grid_step(camera.zoom);
    let top_left = camera.unproject(ScreenPoint::new(0.0, 0.0), viewport);
    let bottom_right = camera.unproject(ScreenPoint::new(viewport.width, viewport.height), viewport);

    let columns = (bottom_right.longitude - top_left.longitude) / step;
    let rows = (top_left.latitude - bottom_right.latitude) / step;
    if columns > MAX_GRID_LINES || rows > MAX_GRID_LINES {
        return;
    }

    let mut longitude = (top_left.longitude / step).ceil() * step;
    while longitude <= bottom_right.longitude {
        let point = camera.project(
            LngLat {
                longitude,
                latitude: camera.center.latitude,
            },
            viewport,
        );
        ctx.draw(&CanvasLine {
            x1: point.x,
            y1: 0.0,
            x2: point.x,
            y2: viewport.height,
            color,
        });
        longitude += step;
    }

    let mut latitude = (bottom_right.latitude / step).ceil() * step;
    while latitude <= top_left.latitude {
        let point = camera.project(
            LngLat {
                longitude: camera.center.longitude,
                latitude,
            },
            viewport,
        );
        let (_, y) = to_canvas(point, viewport);
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: y,
            x2: viewport.width,
            y2: y,
            color,
        });
        latitude += step;
    }
}

/// Screen pixels grow downward; canvas coordinates grow upward.
fn to_canvas(point: ScreenPoint, viewport: ViewportSize) -> (f64, f64) {
    (point.x, viewport.height - point.y)
}

fn is_near_viewport(point: ScreenPoint, viewport: ViewportSize) -> bool {
    point.x >= -CULL_MARGIN_PX
        && point.y >= -CULL_MARGIN_PX
        && point.x <= viewport.width + CULL_MARGIN_PX
        && point.y <= viewport.height + CULL_MARGIN_PX
}
