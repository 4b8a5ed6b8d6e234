//! SVG presentation of a finished [`Rendering`].
//!
//! Model coordinates are mapped onto the plot area with a y axis pointing up. When the
//! scene locks its aspect ratio both axes share one pixels-per-metre factor, so members
//! keep their true proportions. The legend is drawn as a column right of the plot area.

use std::path::Path;

use log::debug;
use svg::node::element::{Circle, Element, Group, Line, Polygon, Rectangle};
use svg::node::Text as TextNode;
use svg::{Document, Node};

use crate::errors::ExportError;
use crate::geometry::{Bounds, Point};
use crate::options::RenderOptions;
use crate::render::Rendering;
use crate::scene::{AxisStyle, Badge, Drawable, LegendEntry, LegendSymbol, Primitive, Scene};
use crate::style::{Color, MarkerSymbol, Stroke};

/// Room for tick labels and the axis title left of and below the plot area, in pixels.
const AXIS_GUTTER: f64 = 44.0;

/// Legend row height in pixels.
const LEGEND_ROW: f64 = 22.0;

/// Target number of grid intervals along the longer axis.
const GRID_INTERVALS: f64 = 8.0;

/// Pixel rectangle the model is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PlotArea {
    /// Plot area of a canvas, leaving room for margins, axis gutter and the legend column.
    #[must_use]
    pub fn of_canvas(scene: &Scene, width: f64, height: f64, legend_width: f64) -> Self {
        let margins = scene.margins;
        let left = margins.left + AXIS_GUTTER;
        let top = margins.top;
        Self {
            left,
            top,
            width: (width - legend_width - margins.right - left).max(1.0),
            height: (height - margins.bottom - AXIS_GUTTER - top).max(1.0),
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// World-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Plot area in pixels.
    pub area: PlotArea,
    /// Model point shown at the centre of the plot area.
    pub centre: Point,
    /// Pixels per metre horizontally.
    pub scale_x: f64,
    /// Pixels per metre vertically.
    pub scale_y: f64,
}

impl Viewport {
    /// Fit `world` into `area`, sharing one scale on both axes when `aspect_lock` is set.
    #[must_use]
    pub fn fit(world: Bounds, area: PlotArea, aspect_lock: Option<f64>) -> Self {
        let width = world.width().max(f64::EPSILON);
        let height = world.height().max(f64::EPSILON);
        let fit_x = area.width / width;
        let fit_y = area.height / height;
        let (scale_x, scale_y) = match aspect_lock {
            Some(ratio) => {
                let scale = fit_x.min(fit_y / ratio);
                (scale, scale * ratio)
            }
            None => (fit_x, fit_y),
        };
        Self {
            area,
            centre: world.min.midpoint(world.max),
            scale_x,
            scale_y,
        }
    }

    /// Pixel position of a model point.
    #[must_use]
    pub fn to_pixels(&self, p: Point) -> (f64, f64) {
        (
            self.area.left + self.area.width / 2.0 + (p.x - self.centre.x) * self.scale_x,
            self.area.top + self.area.height / 2.0 - (p.y - self.centre.y) * self.scale_y,
        )
    }

    /// Model extent visible in the plot area.
    #[must_use]
    pub fn visible(&self) -> Bounds {
        let half_x = self.area.width / 2.0 / self.scale_x;
        let half_y = self.area.height / 2.0 / self.scale_y;
        Bounds {
            min: Point::new(self.centre.x - half_x, self.centre.y - half_y),
            max: Point::new(self.centre.x + half_x, self.centre.y + half_y),
        }
    }
}

/// Model extent to show for `rendering`, padded so glyphs near the edge stay visible.
fn world_bounds(rendering: &Rendering) -> Bounds {
    let bounds = rendering.scene.bounds().unwrap_or(Bounds {
        min: Point::new(0.0, 0.0),
        max: Point::new(10.0, 5.0),
    });
    let padding = (bounds.width().max(bounds.height()) * 0.08)
        .max(2.0 * rendering.metrics.visual_scale)
        .max(0.5);
    bounds.inflate(padding)
}

/// Build the SVG document of `rendering`.
#[must_use]
pub fn to_document(rendering: &Rendering, options: &RenderOptions) -> Document {
    let options = options.sanitized();
    let scene = &rendering.scene;
    let width = f64::from(options.canvas_width);
    let height = f64::from(rendering.recommended_height);
    let area = PlotArea::of_canvas(scene, width, height, f64::from(options.legend_width));
    let viewport = Viewport::fit(world_bounds(rendering), area, scene.aspect_lock);
    debug!(
        "svg canvas {width}x{height}, {:.2} px/m, {} drawables",
        viewport.scale_x,
        scene.drawables.len()
    );

    let mut document = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height)
        .set("font-family", "sans-serif");
    if !scene.background.is_transparent() {
        document = document.add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", scene.background.to_string()),
        );
    }

    document = document.add(axes(&scene.axes, &viewport));
    let mut plot = Group::new().set("class", "plot");
    for drawable in &scene.drawables {
        plot = plot.add(drawable_node(drawable, &viewport));
    }
    document = document.add(plot);
    let legend_left = width - f64::from(options.legend_width);
    document.add(legend(&scene.legend, &scene.axes, legend_left, area.top))
}

/// Write the SVG document of `rendering` to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the file cannot be written.
pub fn save<P: AsRef<Path>>(
    rendering: &Rendering,
    options: &RenderOptions,
    path: P,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    svg::save(path, &to_document(rendering, options)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Grid step of about `span / GRID_INTERVALS`, rounded to 1, 2 or 5 times a power of ten.
#[must_use]
pub fn grid_step(span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / GRID_INTERVALS;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Grid values of one axis inside `[min, max]`.
fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Text element with content.
fn text(content: &str, x: f64, y: f64, size: f64, color: Color) -> Element {
    let mut element = Element::new("text");
    element.assign("x", x);
    element.assign("y", y);
    element.assign("font-size", size);
    element.assign("fill", color.to_string());
    element.append(TextNode::new(content));
    element
}

/// Hover description element.
fn title(content: &str) -> Element {
    let mut element = Element::new("title");
    element.append(TextNode::new(content));
    element
}

/// Grid, frame, tick labels and titles.
fn axes(style: &AxisStyle, viewport: &Viewport) -> Group {
    let area = viewport.area;
    let visible = viewport.visible();
    let step = grid_step(visible.width().max(visible.height()));
    let mut group = Group::new().set("class", "axes");

    for x in ticks(visible.min.x, visible.max.x, step) {
        let (px, _) = viewport.to_pixels(Point::new(x, 0.0));
        if style.show_grid || (style.show_zero_line && x == 0.0) {
            group = group.add(grid_line((px, area.top), (px, area.bottom()), style.grid));
        }
        let mut label = text(
            &format_tick(x),
            px,
            area.bottom() + 16.0,
            style.tick_font_size,
            style.color,
        );
        label.assign("text-anchor", "middle");
        group = group.add(label);
    }
    for y in ticks(visible.min.y, visible.max.y, step) {
        let (_, py) = viewport.to_pixels(Point::new(0.0, y));
        if style.show_grid || (style.show_zero_line && y == 0.0) {
            group = group.add(grid_line((area.left, py), (area.right(), py), style.grid));
        }
        let mut label = text(
            &format_tick(y),
            area.left - 6.0,
            py + 4.0,
            style.tick_font_size,
            style.color,
        );
        label.assign("text-anchor", "end");
        group = group.add(label);
    }

    group = group.add(
        Rectangle::new()
            .set("x", area.left)
            .set("y", area.top)
            .set("width", area.width)
            .set("height", area.height)
            .set("fill", "none")
            .set("stroke", style.color.to_string()),
    );

    let mut x_title = text(
        &style.x_title,
        area.left + area.width / 2.0,
        area.bottom() + AXIS_GUTTER - 6.0,
        style.tick_font_size,
        style.color,
    );
    x_title.assign("text-anchor", "middle");
    let y_x = area.left - AXIS_GUTTER + 6.0;
    let y_y = area.top + area.height / 2.0;
    let mut y_title = text(&style.y_title, y_x, y_y, style.tick_font_size, style.color);
    y_title.assign("text-anchor", "middle");
    y_title.assign("transform", format!("rotate(-90 {y_x} {y_y})"));
    group.add(x_title).add(y_title)
}

/// Thin grid line.
fn grid_line(from: (f64, f64), to: (f64, f64), color: Color) -> Line {
    Line::new()
        .set("x1", from.0)
        .set("y1", from.1)
        .set("x2", to.0)
        .set("y2", to.1)
        .set("stroke", color.to_string())
        .set("stroke-width", 1)
}

/// Tick label without trailing zeros.
fn format_tick(value: f64) -> String {
    let rounded = (value * 1.0e6).round() / 1.0e6;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

/// Line from pixel to pixel with a stroke style.
fn styled_line(from: (f64, f64), to: (f64, f64), stroke: Stroke) -> Line {
    Line::new()
        .set("x1", from.0)
        .set("y1", from.1)
        .set("x2", to.0)
        .set("y2", to.1)
        .set("stroke", stroke.color.to_string())
        .set("stroke-width", stroke.width)
        .set("stroke-linecap", "round")
}

/// Polygon through pixel vertices.
fn styled_polygon(vertices: &[(f64, f64)], fill: Color, stroke: Stroke) -> Polygon {
    let points: Vec<String> = vertices.iter().map(|(x, y)| format!("{x},{y}")).collect();
    Polygon::new()
        .set("points", points.join(" "))
        .set("fill", fill.to_string())
        .set("stroke", stroke.color.to_string())
        .set("stroke-width", stroke.width)
        .set("stroke-linejoin", "round")
}

/// Marker of `size` pixels centred on a pixel position.
fn marker(
    centre: (f64, f64),
    symbol: MarkerSymbol,
    size: f64,
    fill: Color,
    outline: Stroke,
) -> Group {
    let (cx, cy) = centre;
    let half = size / 2.0;
    let body = match symbol {
        MarkerSymbol::Circle => Group::new().add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", half)
                .set("fill", fill.to_string())
                .set("stroke", outline.color.to_string())
                .set("stroke-width", outline.width),
        ),
        MarkerSymbol::TriangleUpDot => Group::new().add(styled_polygon(
            &[(cx, cy - half), (cx + half, cy + half), (cx - half, cy + half)],
            fill,
            outline,
        )),
        MarkerSymbol::SquareDot => Group::new().add(
            Rectangle::new()
                .set("x", cx - half)
                .set("y", cy - half)
                .set("width", size)
                .set("height", size)
                .set("fill", fill.to_string())
                .set("stroke", outline.color.to_string())
                .set("stroke-width", outline.width),
        ),
    };
    match symbol {
        MarkerSymbol::Circle => body,
        MarkerSymbol::TriangleUpDot | MarkerSymbol::SquareDot => body.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", (size * 0.1).max(1.5))
                .set("fill", Color::WHITE.to_string()),
        ),
    }
}

/// Text on a filled rectangle centred on a pixel position.
fn badge(centre: (f64, f64), badge: &Badge) -> Group {
    let (cx, cy) = (centre.0, centre.1 - badge.shift_y);
    let text_width = badge.text.chars().count() as f64 * badge.font_size * 0.6;
    let box_width = text_width + 2.0 * badge.padding;
    let box_height = badge.font_size + 2.0 * badge.padding;

    let mut label = text(&badge.text, cx, cy, badge.font_size, badge.color);
    label.assign("text-anchor", "middle");
    label.assign("dominant-baseline", "central");
    if badge.bold {
        label.assign("font-weight", "bold");
    }
    Group::new()
        .set("opacity", badge.opacity)
        .add(
            Rectangle::new()
                .set("x", cx - box_width / 2.0)
                .set("y", cy - box_height / 2.0)
                .set("width", box_width)
                .set("height", box_height)
                .set("rx", 2)
                .set("fill", badge.background.to_string())
                .set("stroke", badge.border.color.to_string())
                .set("stroke-width", badge.border.width),
        )
        .add(label)
}

/// SVG node of one drawable, with its hover text as a title.
fn drawable_node(drawable: &Drawable, viewport: &Viewport) -> Group {
    let mut group = match &drawable.primitive {
        Primitive::Line { from, to, stroke } => Group::new().add(styled_line(
            viewport.to_pixels(*from),
            viewport.to_pixels(*to),
            *stroke,
        )),
        Primitive::Polygon {
            vertices,
            fill,
            stroke,
        } => {
            let pixels: Vec<(f64, f64)> =
                vertices.iter().map(|p| viewport.to_pixels(*p)).collect();
            Group::new().add(styled_polygon(&pixels, *fill, *stroke))
        }
        Primitive::Marker {
            at,
            symbol,
            size,
            fill,
            outline,
        } => marker(viewport.to_pixels(*at), *symbol, *size, *fill, *outline),
        Primitive::Text(label) => badge(viewport.to_pixels(label.at), label),
    };
    if let Some(group_name) = &drawable.group {
        group = group.set("data-group", group_name.as_str());
    }
    if let Some(hover) = &drawable.hover {
        group = group.add(title(hover));
    }
    group
}

/// Legend column starting at pixel `left`, `top`.
fn legend(entries: &[LegendEntry], style: &AxisStyle, left: f64, top: f64) -> Group {
    let mut group = Group::new().set("class", "legend");
    let sample_x = left + 12.0;
    for (row, entry) in entries.iter().enumerate() {
        let y = top + LEGEND_ROW * (row as f64 + 0.5);
        let sample = match entry.symbol {
            LegendSymbol::Line(stroke) => {
                Group::new().add(styled_line((sample_x, y), (sample_x + 24.0, y), stroke))
            }
            LegendSymbol::Marker(symbol, color) => marker(
                (sample_x + 12.0, y),
                symbol,
                12.0,
                color,
                Stroke::new(color, 1.0),
            ),
            LegendSymbol::Arrow(color) => {
                let shaft = Stroke::new(color, 3.0);
                let head = [
                    (sample_x + 24.0, y),
                    (sample_x + 15.0, y - 5.0),
                    (sample_x + 15.0, y + 5.0),
                ];
                Group::new()
                    .add(styled_line((sample_x, y), (sample_x + 16.0, y), shaft))
                    .add(styled_polygon(&head, color, Stroke::new(color, 1.0)))
            }
        };
        let label = text(
            &entry.label,
            sample_x + 32.0,
            y + 4.0,
            style.tick_font_size,
            style.color,
        );
        group = group.add(sample).add(label);
    }
    group
}
