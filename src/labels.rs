//! Id badges for joints and members.

use crate::geometry::Point;
use crate::members::SafetyClass;
use crate::policy;
use crate::render::RenderContext;
use crate::results::AnalysisResults;
use crate::scene::{Badge, Drawable, Layer, Primitive, SceneBuilder};
use crate::style::{palette, Color, Stroke};
use crate::truss::Truss;

/// Badge naming a joint, lifted above its marker.
#[must_use]
pub fn joint_badge(id: i64, at: Point, font_size: f64, complexity_factor: f64) -> Badge {
    Badge {
        at,
        text: id.to_string(),
        font_size,
        bold: true,
        color: Color::WHITE,
        background: palette::JOINT,
        border: Stroke::new(Color::WHITE, 1.0),
        padding: 2.0,
        opacity: 0.9,
        shift_y: policy::JOINT_BADGE_SHIFT * complexity_factor,
    }
}

/// Badge naming a member, filled with its safety color.
#[must_use]
pub fn member_badge(id: i64, at: Point, font_size: f64, class: SafetyClass) -> Badge {
    Badge {
        at,
        text: format!("#{id}"),
        font_size,
        bold: false,
        color: Color::WHITE,
        background: class.color(),
        border: Stroke::new(Color::WHITE, 1.0),
        padding: 1.0,
        opacity: 0.9,
        shift_y: 0.0,
    }
}

/// Label every joint and every drawable member.
pub fn draw(
    ctx: &RenderContext,
    truss: &Truss,
    results: Option<&AnalysisResults>,
    scene: &mut SceneBuilder,
) {
    let font_size = ctx.metrics.badge_font_size();
    let complexity_factor = ctx.metrics.complexity_factor;

    for joint in truss.joints() {
        let badge = joint_badge(joint.id, joint.position, font_size, complexity_factor);
        scene.push(Drawable::new(Layer::Labels, Primitive::Text(badge)));
    }
    for span in truss.members() {
        let class = SafetyClass::classify(results.and_then(|r| r.member(span.member.id)));
        let badge = member_badge(span.member.id, span.midpoint(), font_size, class);
        scene.push(Drawable::new(Layer::Labels, Primitive::Text(badge)));
    }
}
