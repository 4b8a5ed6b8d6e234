//! Positioned, styled primitives and the builder layers append them to.

use std::collections::HashSet;

use crate::geometry::{Bounds, Point};
use crate::style::{Color, MarkerSymbol, Stroke};

/// Drawing layer; later layers are painted on top of earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Member lines.
    Members,
    /// Support glyphs.
    Supports,
    /// Internal-force, load and reaction arrows.
    Forces,
    /// Joint markers.
    Joints,
    /// Id and magnitude badges.
    Labels,
}

/// Text on a filled badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    /// Anchor of the badge centre in model coordinates.
    pub at: Point,
    /// Text content.
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    /// Whether the text is bold.
    pub bold: bool,
    /// Text color.
    pub color: Color,
    /// Badge fill.
    pub background: Color,
    /// Badge border.
    pub border: Stroke,
    /// Padding between text and border in pixels.
    pub padding: f64,
    /// Overall opacity.
    pub opacity: f64,
    /// Upward screen-space shift in pixels.
    pub shift_y: f64,
}

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line style.
        stroke: Stroke,
    },
    /// Closed filled polygon.
    Polygon {
        /// Vertices in drawing order.
        vertices: Vec<Point>,
        /// Fill color.
        fill: Color,
        /// Outline.
        stroke: Stroke,
    },
    /// Point marker sized in screen pixels.
    Marker {
        /// Marker centre.
        at: Point,
        /// Marker shape.
        symbol: MarkerSymbol,
        /// Diameter in pixels.
        size: f64,
        /// Fill color.
        fill: Color,
        /// Outline.
        outline: Stroke,
    },
    /// Text badge.
    Text(Badge),
}

impl Primitive {
    /// Model-space points that define the primitive.
    #[must_use]
    pub fn anchor_points(&self) -> Vec<Point> {
        match self {
            Primitive::Line { from, to, .. } => vec![*from, *to],
            Primitive::Polygon { vertices, .. } => vertices.clone(),
            Primitive::Marker { at, .. } => vec![*at],
            Primitive::Text(badge) => vec![badge.at],
        }
    }
}

/// A primitive placed on a layer, with optional grouping and hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Layer the primitive is painted on.
    pub layer: Layer,
    /// The shape itself.
    pub primitive: Primitive,
    /// Legend group the primitive belongs to.
    pub group: Option<String>,
    /// Hover description.
    pub hover: Option<String>,
}

impl Drawable {
    /// Place `primitive` on `layer`.
    #[must_use]
    pub fn new(layer: Layer, primitive: Primitive) -> Self {
        Self {
            layer,
            primitive,
            group: None,
            hover: None,
        }
    }

    /// Attach the primitive to a legend group.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attach hover text.
    #[must_use]
    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }
}

/// How a legend entry is illustrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendSymbol {
    /// A line sample.
    Line(Stroke),
    /// A marker sample.
    Marker(MarkerSymbol, Color),
    /// An arrow sample.
    Arrow(Color),
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Category label.
    pub label: String,
    /// Sample drawn next to the label.
    pub symbol: LegendSymbol,
}

/// Legend categories emitted so far in one render.
///
/// # Examples
/// ```
/// use trussviz::scene::{LegendRegistry, LegendSymbol};
/// use trussviz::style::palette;
///
/// let mut legend = LegendRegistry::new();
/// assert!(legend.register("Load Force", LegendSymbol::Arrow(palette::LOAD)));
/// assert!(!legend.register("Load Force", LegendSymbol::Arrow(palette::LOAD)));
/// assert_eq!(legend.entries().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LegendRegistry {
    /// Labels already registered.
    seen: HashSet<String>,
    /// Entries in registration order.
    entries: Vec<LegendEntry>,
}

impl LegendRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category. Returns `true` only the first time `label` is seen.
    pub fn register(&mut self, label: &str, symbol: LegendSymbol) -> bool {
        if self.seen.contains(label) {
            return false;
        }
        self.seen.insert(label.to_owned());
        self.entries.push(LegendEntry {
            label: label.to_owned(),
            symbol,
        });
        true
    }

    /// Whether `label` has been registered.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.seen.contains(label)
    }

    /// Registered entries in order.
    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Consume the registry, yielding its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<LegendEntry> {
        self.entries
    }
}

/// Accumulates drawables from every layer of one render.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    /// Drawables in emission order.
    drawables: Vec<Drawable>,
    /// Legend categories of this render.
    legend: LegendRegistry,
}

impl SceneBuilder {
    /// Create an empty builder with a fresh legend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable.
    pub fn push(&mut self, drawable: Drawable) {
        self.drawables.push(drawable);
    }

    /// The legend of this render.
    pub fn legend_mut(&mut self) -> &mut LegendRegistry {
        &mut self.legend
    }

    /// Number of drawables so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether nothing has been drawn yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Drawables ordered by layer, keeping emission order within a layer, plus the legend.
    #[must_use]
    pub fn finish(self) -> (Vec<Drawable>, Vec<LegendEntry>) {
        let mut drawables = self.drawables;
        drawables.sort_by_key(|drawable| drawable.layer);
        (drawables, self.legend.into_entries())
    }
}

/// Axis styling of the finished canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    /// Tick and title color.
    pub color: Color,
    /// Grid and zero-line color.
    pub grid: Color,
    /// Whether grid lines are shown.
    pub show_grid: bool,
    /// Whether the zero line is shown.
    pub show_zero_line: bool,
    /// Tick font size in points.
    pub tick_font_size: f64,
    /// Horizontal axis title.
    pub x_title: String,
    /// Vertical axis title.
    pub y_title: String,
}

/// Where the legend sits relative to the plot area, in plot-area fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendPlacement {
    /// Horizontal anchor; values above 1 are outside to the right.
    pub x: f64,
    /// Vertical anchor of the legend's top edge.
    pub y: f64,
}

impl LegendPlacement {
    /// Whether the legend lies outside the plotting area.
    #[must_use]
    pub fn is_outside(&self) -> bool {
        !(0.0..=1.0).contains(&self.x) || !(0.0..=1.0).contains(&self.y)
    }
}

/// Margins around the plot area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
}

/// A finished diagram, independent of any presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Drawables in paint order.
    pub drawables: Vec<Drawable>,
    /// Legend rows in order of first appearance.
    pub legend: Vec<LegendEntry>,
    /// Axis styling.
    pub axes: AxisStyle,
    /// Legend position.
    pub legend_placement: LegendPlacement,
    /// Locked y-per-x scale ratio, if any.
    pub aspect_lock: Option<f64>,
    /// Page and plot background.
    pub background: Color,
    /// Margins around the plot area.
    pub margins: Margins,
}

impl Scene {
    /// Drawables on one layer.
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Drawable> + '_ {
        self.drawables
            .iter()
            .filter(move |drawable| drawable.layer == layer)
    }

    /// Drawables belonging to a legend group.
    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Drawable> + 'a {
        self.drawables
            .iter()
            .filter(move |drawable| drawable.group.as_deref() == Some(group))
    }

    /// Legend row with the given label.
    #[must_use]
    pub fn legend_entry(&self, label: &str) -> Option<&LegendEntry> {
        self.legend.iter().find(|entry| entry.label == label)
    }

    /// Model-space extent of every primitive.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(
            self.drawables
                .iter()
                .flat_map(|drawable| drawable.primitive.anchor_points()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use crate::style::palette;

    fn marker(layer: Layer, x: f64) -> Drawable {
        Drawable::new(
            layer,
            Primitive::Marker {
                at: point(x, 0.0),
                symbol: MarkerSymbol::Circle,
                size: 10.0,
                fill: palette::JOINT,
                outline: Stroke::new(Color::WHITE, 1.0),
            },
        )
    }

    #[test]
    fn finish_orders_by_layer_and_keeps_emission_order() {
        let mut builder = SceneBuilder::new();
        builder.push(marker(Layer::Joints, 1.0));
        builder.push(marker(Layer::Members, 2.0));
        builder.push(marker(Layer::Joints, 3.0));
        builder.push(marker(Layer::Forces, 4.0));
        let (drawables, _) = builder.finish();
        let xs: Vec<f64> = drawables
            .iter()
            .map(|d| d.primitive.anchor_points()[0].x)
            .collect();
        assert_eq!(xs, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn legend_keeps_first_registration() {
        let mut legend = LegendRegistry::new();
        let first = LegendSymbol::Line(Stroke::new(palette::SAFE, 6.0));
        assert!(legend.register("Beam (Safe)", first));
        assert!(!legend.register("Beam (Safe)", LegendSymbol::Arrow(palette::LOAD)));
        assert!(legend.contains("Beam (Safe)"));
        assert_eq!(legend.entries()[0].symbol, first);
    }

    #[test]
    fn outside_placement() {
        assert!(LegendPlacement { x: 1.02, y: 0.99 }.is_outside());
        assert!(!LegendPlacement { x: 0.5, y: 0.5 }.is_outside());
    }
}
