//! Directional force indicators.
//!
//! An arrow is a shaft and a triangular head, each painted three times at identical
//! geometry: a wide dark outline, a white glow and the narrow semantic color. The stack
//! keeps arrows legible on both light and dark hosts.

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::geometry::Point;
use crate::metrics::SceneMetrics;
use crate::policy;
use crate::scene::{Badge, Drawable, Layer, LegendSymbol, Primitive, SceneBuilder};
use crate::style::{palette, Color, Stroke};

/// Semantic category of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    /// Internal force in a member under tension.
    Tension,
    /// Internal force in a member under compression.
    Compression,
    /// External load applied at a joint.
    Load,
    /// Support reaction at a joint.
    Reaction,
}

/// Where an arrow's label is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Past the head, continuing along the shaft.
    BeyondHead,
    /// Behind the tail, opposite to the shaft.
    BehindTail,
}

impl ArrowKind {
    /// Semantic color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            ArrowKind::Tension => palette::TENSION,
            ArrowKind::Compression => palette::COMPRESSION,
            ArrowKind::Load => palette::LOAD,
            ArrowKind::Reaction => palette::REACTION,
        }
    }

    /// Legend label and group name.
    #[must_use]
    pub const fn legend_label(self) -> &'static str {
        match self {
            ArrowKind::Tension => "Tension Force",
            ArrowKind::Compression => "Compression Force",
            ArrowKind::Load => "Load Force",
            ArrowKind::Reaction => "Reaction Force",
        }
    }

    /// Label anchoring policy: reactions are labelled at their tail, away from the joint.
    #[must_use]
    pub const fn label_anchor(self) -> LabelAnchor {
        match self {
            ArrowKind::Reaction => LabelAnchor::BehindTail,
            _ => LabelAnchor::BeyondHead,
        }
    }
}

/// Computed arrow outline in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    /// Unit vector from tail to head.
    pub direction: Vector2<f64>,
    /// Start of the visible shaft.
    pub shaft_start: Point,
    /// End of the visible shaft, short of the head.
    pub shaft_end: Point,
    /// Apex followed by the two base vertices of the head.
    pub head: [Point; 3],
}

/// Builds arrows sized for one render.
#[derive(Debug, Clone, Copy)]
pub struct ArrowBuilder {
    /// Visual scale of the render.
    visual_scale: f64,
    /// Complexity factor of the render.
    complexity_factor: f64,
    /// Label offset per unit of visual scale.
    text_offset: f64,
    /// Label font size.
    font_size: f64,
}

impl ArrowBuilder {
    /// Create a builder for the given metrics and label offset.
    #[must_use]
    pub fn new(metrics: &SceneMetrics, text_offset: f64) -> Self {
        Self {
            visual_scale: metrics.visual_scale,
            complexity_factor: metrics.complexity_factor,
            text_offset,
            font_size: metrics.arrow_font_size(),
        }
    }

    /// Head size in model units.
    #[must_use]
    pub fn head_size(&self) -> f64 {
        policy::HEAD_SIZE * self.visual_scale
    }

    /// Outline of an arrow from `tail` to `head`.
    #[must_use]
    pub fn geometry(&self, tail: Point, head: Point) -> ArrowGeometry {
        let head_size = self.head_size();
        let angle = (head.y - tail.y).atan2(head.x - tail.x);
        let direction = unit_at(angle);
        let inset = policy::SHAFT_INSET * head_size;
        let shaft_end = head.offset(direction, -policy::SHAFT_PULLBACK * head_size);
        let spread = policy::HEAD_SPREAD * PI;

        ArrowGeometry {
            direction,
            shaft_start: tail.offset(direction, inset),
            shaft_end: shaft_end.offset(direction, -inset),
            head: [
                head,
                head.offset(unit_at(angle + spread), head_size),
                head.offset(unit_at(angle - spread), head_size),
            ],
        }
    }

    /// Where a label for an arrow of `kind` from `tail` to `head` is anchored.
    #[must_use]
    pub fn label_position(&self, tail: Point, head: Point, kind: ArrowKind) -> Point {
        let direction = self.geometry(tail, head).direction;
        let offset = self.text_offset * self.visual_scale;
        match kind.label_anchor() {
            LabelAnchor::BeyondHead => head.offset(direction, offset),
            LabelAnchor::BehindTail => tail.offset(direction, -offset),
        }
    }

    /// Append an arrow, and its optional label, to `scene`.
    pub fn draw(
        &self,
        scene: &mut SceneBuilder,
        tail: Point,
        head: Point,
        kind: ArrowKind,
        label: Option<String>,
    ) {
        let geometry = self.geometry(tail, head);
        let group = kind.legend_label();
        let cf = self.complexity_factor;
        let passes = [
            (palette::OUTLINE, (8.0 * cf).max(6.0), 2.5),
            (palette::GLOW, (6.0 * cf).max(4.0), 1.5),
            (kind.color(), (4.0 * cf).max(2.0), 0.8),
        ];

        for (color, shaft_width, head_outline) in passes {
            scene.push(
                Drawable::new(
                    Layer::Forces,
                    Primitive::Line {
                        from: geometry.shaft_start,
                        to: geometry.shaft_end,
                        stroke: Stroke::new(color, shaft_width),
                    },
                )
                .in_group(group),
            );
            scene.push(
                Drawable::new(
                    Layer::Forces,
                    Primitive::Polygon {
                        vertices: geometry.head.to_vec(),
                        fill: color,
                        stroke: Stroke::new(color, head_outline),
                    },
                )
                .in_group(group),
            );
        }
        scene
            .legend_mut()
            .register(group, LegendSymbol::Arrow(kind.color()));

        if let Some(text) = label {
            scene.push(
                Drawable::new(
                    Layer::Labels,
                    Primitive::Text(Badge {
                        at: self.label_position(tail, head, kind),
                        text,
                        font_size: self.font_size,
                        bold: true,
                        color: Color::WHITE,
                        background: kind.color(),
                        border: Stroke::new(palette::OUTLINE, 1.5),
                        padding: 3.0,
                        opacity: 0.98,
                        shift_y: 0.0,
                    }),
                )
                .in_group(group),
            );
        }
    }
}

/// Unit vector at `angle` radians.
fn unit_at(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;
    use crate::scene::Layer;

    fn builder(visual_scale: f64) -> ArrowBuilder {
        ArrowBuilder {
            visual_scale,
            complexity_factor: 1.0,
            text_offset: policy::TEXT_OFFSET,
            font_size: 10.0,
        }
    }

    #[test]
    fn shaft_stops_short_of_the_head() {
        let arrows = builder(1.0);
        let geometry = arrows.geometry(point(0.0, 0.0), point(2.0, 0.0));
        let h = 0.48;
        assert_relative_eq!(geometry.shaft_start.x, 0.08 * h, epsilon = 1.0e-12);
        assert_relative_eq!(geometry.shaft_end.x, 2.0 - 0.7 * h - 0.08 * h, epsilon = 1.0e-12);
        assert_relative_eq!(geometry.shaft_end.y, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn head_is_isosceles_and_points_forward() {
        let arrows = builder(0.5);
        let tip = point(1.0, 1.0);
        let geometry = arrows.geometry(point(1.0, 4.0), tip);
        let [apex, left, right] = geometry.head;
        assert_eq!(apex, tip);
        assert_relative_eq!(apex.distance(left), arrows.head_size(), epsilon = 1.0e-12);
        assert_relative_eq!(apex.distance(right), arrows.head_size(), epsilon = 1.0e-12);
        // Pointing down: both base vertices sit above the apex, mirrored about the shaft.
        assert!(left.y > apex.y && right.y > apex.y);
        assert_relative_eq!(left.x - apex.x, apex.x - right.x, epsilon = 1.0e-12);
    }

    #[test]
    fn head_base_spreads_at_1_11_pi() {
        let arrows = builder(1.0);
        let geometry = arrows.geometry(point(0.0, 0.0), point(2.0, 0.0));
        let [apex, left, right] = geometry.head;
        let h = 0.48;
        let spread = 1.11 * PI;
        assert_relative_eq!(left.x, apex.x + h * spread.cos(), epsilon = 1.0e-12);
        assert_relative_eq!(left.y, apex.y + h * spread.sin(), epsilon = 1.0e-12);
        assert_relative_eq!(right.x, apex.x + h * (-spread).cos(), epsilon = 1.0e-12);
        assert_relative_eq!(right.y, apex.y + h * (-spread).sin(), epsilon = 1.0e-12);
    }

    #[test]
    fn draws_three_passes_and_registers_legend_once() {
        let arrows = builder(0.45);
        let mut scene = SceneBuilder::new();
        arrows.draw(&mut scene, point(0.0, 0.0), point(1.0, 0.0), ArrowKind::Tension, None);
        arrows.draw(&mut scene, point(0.0, 1.0), point(1.0, 1.0), ArrowKind::Tension, None);
        let (drawables, legend) = scene.finish();
        assert_eq!(drawables.len(), 12);
        assert!(drawables.iter().all(|d| d.layer == Layer::Forces));
        assert_eq!(legend.len(), 1);
        assert_eq!(legend[0].label, "Tension Force");
    }

    #[test]
    fn pass_order_is_outline_glow_color() {
        let arrows = builder(0.45);
        let mut scene = SceneBuilder::new();
        arrows.draw(&mut scene, point(0.0, 0.0), point(1.0, 0.0), ArrowKind::Load, None);
        let (drawables, _) = scene.finish();
        let shaft_colors: Vec<Color> = drawables
            .iter()
            .filter_map(|d| match &d.primitive {
                Primitive::Line { stroke, .. } => Some(stroke.color),
                _ => None,
            })
            .collect();
        assert_eq!(shaft_colors, vec![palette::OUTLINE, palette::GLOW, palette::LOAD]);
    }

    #[test]
    fn labels_follow_the_anchor_policy() {
        let arrows = builder(1.0);
        let tail = point(0.0, 0.0);
        let head = point(2.0, 0.0);
        let beyond = arrows.label_position(tail, head, ArrowKind::Load);
        assert_relative_eq!(beyond.x, 2.45, epsilon = 1.0e-12);
        let behind = arrows.label_position(tail, head, ArrowKind::Reaction);
        assert_relative_eq!(behind.x, -0.45, epsilon = 1.0e-12);
    }
}
