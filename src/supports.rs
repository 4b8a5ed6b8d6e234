//! Support glyphs and joint markers.

use crate::geometry::{point, Point};
use crate::policy;
use crate::render::RenderContext;
use crate::scene::{Drawable, Layer, LegendSymbol, Primitive, SceneBuilder};
use crate::style::{palette, Color, MarkerSymbol, Stroke};
use crate::truss::{Joint, SupportType, Truss};

/// Marker shape of a support, or `None` for a free joint.
#[must_use]
pub const fn glyph(support: SupportType) -> Option<MarkerSymbol> {
    match support {
        SupportType::Free => None,
        SupportType::Pinned => Some(MarkerSymbol::TriangleUpDot),
        SupportType::Roller => Some(MarkerSymbol::Circle),
        SupportType::Fixed => Some(MarkerSymbol::SquareDot),
    }
}

/// Centre of the support glyph below `joint`.
#[must_use]
pub fn glyph_position(joint: &Joint, visual_scale: f64) -> Point {
    point(
        joint.position.x,
        joint.position.y - policy::SUPPORT_DROP * visual_scale,
    )
}

/// Support glyph size in pixels.
#[must_use]
pub fn glyph_size(visual_scale: f64) -> f64 {
    (policy::SUPPORT_SIZE * visual_scale).max(policy::SUPPORT_MIN_SIZE)
}

/// Joint marker size in pixels.
#[must_use]
pub fn joint_marker_size(visual_scale: f64, scale_multiplier: f64) -> f64 {
    (policy::JOINT_SIZE * visual_scale / scale_multiplier).max(policy::JOINT_MIN_SIZE)
}

/// Draw the support glyph of `joint`, if it has one.
pub fn draw_support(ctx: &RenderContext, joint: &Joint, scene: &mut SceneBuilder) {
    let Some(symbol) = glyph(joint.support) else {
        return;
    };
    let scale = ctx.visual_scale();
    let label = joint.support.label();

    scene.push(
        Drawable::new(
            Layer::Supports,
            Primitive::Marker {
                at: glyph_position(joint, scale),
                symbol,
                size: glyph_size(scale),
                fill: palette::SUPPORT,
                outline: Stroke::new(palette::SUPPORT, 2.0),
            },
        )
        .in_group(label)
        .with_hover(label),
    );
    scene
        .legend_mut()
        .register(label, LegendSymbol::Marker(symbol, palette::SUPPORT));
}

/// Draw a uniform marker at every joint.
pub fn draw_joints(ctx: &RenderContext, truss: &Truss, scene: &mut SceneBuilder) {
    let size = joint_marker_size(
        ctx.visual_scale(),
        ctx.options.visualization_scale_multiplier,
    );
    for joint in truss.joints() {
        scene.push(
            Drawable::new(
                Layer::Joints,
                Primitive::Marker {
                    at: joint.position,
                    symbol: MarkerSymbol::Circle,
                    size,
                    fill: palette::JOINT,
                    outline: Stroke::new(Color::WHITE, 1.0),
                },
            )
            .with_hover(format!("Joint {}", joint.id)),
        );
    }
}
