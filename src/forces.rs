//! Internal-force, applied-load and reaction arrows.

use crate::arrow::ArrowKind;
use crate::geometry::Point;
use crate::metrics::SceneMetrics;
use crate::policy;
use crate::render::RenderContext;
use crate::results::JointResult;
use crate::scene::SceneBuilder;
use crate::truss::{Joint, MemberSpan};

/// Tail and head of one arrow.
pub type ArrowSpan = (Point, Point);

/// Kind of internal-force arrow for a signed member force.
#[must_use]
pub fn internal_force_kind(force: f64) -> ArrowKind {
    if force <= 0.0 {
        ArrowKind::Compression
    } else {
        ArrowKind::Tension
    }
}

/// The two arrows straddling a member's midpoint.
///
/// Compression arrows run from the outer gap to the inner gap, so the pair points at the
/// midpoint; tension arrows run the other way. Returns `None` for a zero-length member.
#[must_use]
pub fn internal_force_arrows(
    metrics: &SceneMetrics,
    span: &MemberSpan<'_>,
    force: f64,
) -> Option<[ArrowSpan; 2]> {
    let direction = span.direction()?;
    let length = span.length();
    let midpoint = span.midpoint();
    let scale = metrics.visual_scale;

    let arrow_length =
        (policy::FORCE_ARROW_LENGTH * scale).min(policy::FORCE_ARROW_LENGTH_RATIO * length);
    let inner_gap = (policy::FORCE_INNER_GAP * scale).min(policy::FORCE_INNER_GAP_RATIO * length);
    let outer_gap = inner_gap + arrow_length;
    let (tail_gap, tip_gap) = match internal_force_kind(force) {
        ArrowKind::Compression => (outer_gap, inner_gap),
        _ => (inner_gap, outer_gap),
    };

    let arrow = |sign: f64| {
        (
            midpoint.offset(direction, sign * tail_gap),
            midpoint.offset(direction, sign * tip_gap),
        )
    };
    Some([arrow(1.0), arrow(-1.0)])
}

/// Draw the internal-force pair of an analysed member.
pub fn draw_internal_force(
    ctx: &RenderContext,
    span: &MemberSpan<'_>,
    force: f64,
    scene: &mut SceneBuilder,
) {
    let Some(arrows) = internal_force_arrows(&ctx.metrics, span, force) else {
        return;
    };
    let kind = internal_force_kind(force);
    for (tail, head) in arrows {
        ctx.arrows.draw(scene, tail, head, kind, None);
    }
}

/// Load arrow of a joint, pointing along the load away from the joint.
#[must_use]
pub fn load_arrow(metrics: &SceneMetrics, joint: &Joint) -> Option<ArrowSpan> {
    if joint.load.kilonewtons() <= policy::LOAD_EPSILON_KN {
        return None;
    }
    let direction = joint.load.to_vector().normalize();
    let scale = metrics.visual_scale;
    Some((
        joint.position.offset(direction, policy::LOAD_TAIL * scale),
        joint.position.offset(direction, policy::LOAD_HEAD * scale),
    ))
}

/// Draw the applied load of a joint, labelled with its magnitude in kN.
pub fn draw_load(ctx: &RenderContext, joint: &Joint, scene: &mut SceneBuilder) {
    if let Some((tail, head)) = load_arrow(&ctx.metrics, joint) {
        let label = format!("{:.1} kN", joint.load.kilonewtons());
        ctx.arrows.draw(scene, tail, head, ArrowKind::Load, Some(label));
    }
}

/// Reaction arrow of a joint.
///
/// The arrow sits on the side opposite the reaction vector and runs along it, ending a
/// small gap short of the joint, so it pushes into the support.
#[must_use]
pub fn reaction_arrow(
    metrics: &SceneMetrics,
    joint: &Joint,
    reaction: &JointResult,
) -> Option<ArrowSpan> {
    let force = reaction.reaction();
    if force.kilonewtons() <= policy::LOAD_EPSILON_KN {
        return None;
    }
    let direction = force.to_vector().normalize();
    let scale = metrics.visual_scale;
    let gap = policy::REACTION_GAP * scale;
    let length = policy::REACTION_LENGTH * scale;
    Some((
        joint.position.offset(direction, -(length + gap)),
        joint.position.offset(direction, -gap),
    ))
}

/// Draw the reaction at a joint, labelled with its magnitude in kN.
pub fn draw_reaction(
    ctx: &RenderContext,
    joint: &Joint,
    reaction: &JointResult,
    scene: &mut SceneBuilder,
) {
    if let Some((tail, head)) = reaction_arrow(&ctx.metrics, joint, reaction) {
        let label = format!("R: {:.1}", reaction.reaction().kilonewtons());
        ctx.arrows
            .draw(scene, tail, head, ArrowKind::Reaction, Some(label));
    }
}
