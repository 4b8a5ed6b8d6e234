//! Global sizing derived once per render from the model geometry.

use crate::geometry::Bounds;
use crate::policy;
use crate::truss::Truss;

/// Sizing constants shared by every layer of a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneMetrics {
    /// Number of drawable members.
    pub member_count: usize,
    /// Shrinks icon and line weights as the structure gets denser.
    pub complexity_factor: f64,
    /// Height over width of the joint bounding box.
    pub aspect_ratio: f64,
    /// Suggested canvas height in pixels, within `[500, 900]`.
    pub recommended_height: u32,
    /// Shortest positive member length in metres.
    pub min_member_length: f64,
    /// Additional shrink applied by member-count band.
    pub density_multiplier: f64,
    /// Unit, in model metres, that all icons, arrows and offsets are proportional to.
    pub visual_scale: f64,
}

impl SceneMetrics {
    /// Derive the metrics of `truss`.
    ///
    /// # Examples
    /// ```
    /// use trussviz::{point, Joint, Member, SceneMetrics, Truss};
    ///
    /// let mut truss = Truss::new();
    /// truss.add_joint(Joint::new(1, point(0.0, 0.0)));
    /// truss.add_joint(Joint::new(2, point(4.0, 0.0)));
    /// truss.add_member(Member::new(1, 1, 2));
    ///
    /// let metrics = SceneMetrics::analyze(&truss);
    /// assert_eq!(metrics.recommended_height, 500);
    /// assert!((metrics.visual_scale - 0.45).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn analyze(truss: &Truss) -> Self {
        let member_count = truss.member_count();
        let complexity_factor = complexity_factor(member_count);
        let aspect_ratio = aspect_ratio(truss);
        let min_member_length = truss
            .members()
            .map(|span| span.length())
            .filter(|length| *length > 0.0)
            .reduce(f64::min)
            .unwrap_or(policy::DEFAULT_MIN_MEMBER_LENGTH);
        let density_multiplier = density_multiplier(member_count);
        let base = (min_member_length * policy::LENGTH_TO_SCALE)
            .min(policy::SCALE_CEILING)
            .max(policy::SCALE_FLOOR);

        Self {
            member_count,
            complexity_factor,
            aspect_ratio,
            recommended_height: recommended_height(aspect_ratio),
            min_member_length,
            density_multiplier,
            visual_scale: base * complexity_factor * density_multiplier,
        }
    }

    /// Font size of arrow magnitude labels.
    #[must_use]
    pub fn arrow_font_size(&self) -> f64 {
        (policy::BASE_FONT_SIZE + policy::ARROW_FONT_GROWTH * self.complexity_factor)
            .min(policy::MAX_FONT_SIZE)
    }

    /// Font size of joint and member id badges.
    #[must_use]
    pub fn badge_font_size(&self) -> f64 {
        (policy::BASE_FONT_SIZE + policy::BADGE_FONT_GROWTH * self.complexity_factor)
            .min(policy::MAX_FONT_SIZE)
    }
}

/// `max(0.35, sqrt(12 / max(12, n)))`.
#[must_use]
pub fn complexity_factor(member_count: usize) -> f64 {
    let reference = policy::COMPLEXITY_REFERENCE_MEMBERS;
    (reference / reference.max(member_count as f64))
        .sqrt()
        .max(policy::COMPLEXITY_FLOOR)
}

/// Member-count band multiplier.
#[must_use]
pub fn density_multiplier(member_count: usize) -> f64 {
    if member_count > policy::DENSE_ABOVE {
        policy::DENSE_MULTIPLIER
    } else if member_count < policy::SPARSE_BELOW {
        policy::SPARSE_MULTIPLIER
    } else {
        policy::MEDIUM_MULTIPLIER
    }
}

/// Canvas height for a given aspect ratio, clamped to the supported range.
#[must_use]
pub fn recommended_height(aspect_ratio: f64) -> u32 {
    let grown = (aspect_ratio * policy::HEIGHT_PER_ASPECT).round();
    let height = if grown.is_finite() {
        // Capped before the cast so huge ratios cannot overflow.
        policy::BASE_HEIGHT + grown.min(policy::MAX_HEIGHT as f64) as i64
    } else {
        policy::MAX_HEIGHT
    };
    height.clamp(policy::MIN_HEIGHT, policy::MAX_HEIGHT) as u32
}

/// Height over width of the joint bounding box, with the degenerate fallbacks applied.
fn aspect_ratio(truss: &Truss) -> f64 {
    let (span_x, span_y) = Bounds::enclosing(truss.joints().map(|joint| joint.position))
        .map_or(policy::DEFAULT_SPAN, |bounds| (bounds.width(), bounds.height()));
    if span_x > 0.0 {
        span_y / span_x
    } else {
        policy::DEGENERATE_ASPECT_RATIO
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;
    use crate::truss::{Joint, Member};

    /// A horizontal chain of `members` members of length `spacing`.
    fn chain(members: usize, spacing: f64) -> Truss {
        let mut truss = Truss::new();
        for id in 0..=members as i64 {
            truss.add_joint(Joint::new(id, point(id as f64 * spacing, 0.0)));
        }
        for id in 0..members as i64 {
            truss.add_member(Member::new(id, id, id + 1));
        }
        truss
    }

    #[test]
    fn complexity_factor_bands() {
        assert_relative_eq!(complexity_factor(0), 1.0);
        assert_relative_eq!(complexity_factor(12), 1.0);
        assert_relative_eq!(complexity_factor(48), 0.5);
        assert_relative_eq!(complexity_factor(10_000), 0.35);
    }

    #[test]
    fn density_multiplier_bands() {
        assert_relative_eq!(density_multiplier(7), 0.75);
        assert_relative_eq!(density_multiplier(8), 0.65);
        assert_relative_eq!(density_multiplier(20), 0.65);
        assert_relative_eq!(density_multiplier(21), 0.55);
    }

    #[test]
    fn recommended_height_is_clamped() {
        assert_eq!(recommended_height(0.0), 500);
        assert_eq!(recommended_height(0.5), 650);
        assert_eq!(recommended_height(0.0017), 501);
        assert_eq!(recommended_height(5.0), 900);
        assert_eq!(recommended_height(f64::INFINITY), 900);
        assert_eq!(recommended_height(-1.0), 500);
    }

    #[test]
    fn empty_model_uses_defaults() {
        let metrics = SceneMetrics::analyze(&Truss::new());
        assert_eq!(metrics.member_count, 0);
        assert_relative_eq!(metrics.aspect_ratio, 0.5);
        assert_eq!(metrics.recommended_height, 650);
        assert_relative_eq!(metrics.min_member_length, 2.0);
        assert_relative_eq!(metrics.visual_scale, 0.6 * 1.0 * 0.75);
    }

    #[test]
    fn vertical_only_model_has_unit_aspect() {
        let mut truss = Truss::new();
        truss.add_joint(Joint::new(1, point(0.0, 0.0)));
        truss.add_joint(Joint::new(2, point(0.0, 3.0)));
        truss.add_member(Member::new(1, 1, 2));
        let metrics = SceneMetrics::analyze(&truss);
        assert_relative_eq!(metrics.aspect_ratio, 1.0);
        assert_eq!(metrics.recommended_height, 800);
    }

    #[test]
    fn short_members_hit_the_scale_floor() {
        let metrics = SceneMetrics::analyze(&chain(3, 0.01));
        assert_relative_eq!(metrics.visual_scale, 0.1 * 1.0 * 0.75);
    }

    #[test]
    fn visual_scale_shrinks_with_density() {
        let sparse = SceneMetrics::analyze(&chain(4, 2.0));
        let dense = SceneMetrics::analyze(&chain(300, 2.0));
        assert!(dense.visual_scale < sparse.visual_scale);
        assert_relative_eq!(dense.visual_scale, 0.6 * 0.35 * 0.55);
    }

    #[test]
    fn scale_and_height_hold_for_all_sizes() {
        for members in [0, 1, 2, 7, 8, 12, 20, 21, 50, 300] {
            let metrics = SceneMetrics::analyze(&chain(members, 1.5));
            assert!(metrics.visual_scale > 0.0);
            assert!((500..=900).contains(&metrics.recommended_height));
        }
    }

    #[test]
    fn dangling_members_are_not_counted() {
        let mut truss = chain(2, 4.0);
        truss.add_member(Member::new(99, 0, 42));
        let metrics = SceneMetrics::analyze(&truss);
        assert_eq!(metrics.member_count, 2);
    }

    #[test]
    fn font_sizes_are_capped() {
        let metrics = SceneMetrics::analyze(&chain(1, 4.0));
        assert_relative_eq!(metrics.arrow_font_size(), 10.0);
        assert_relative_eq!(metrics.badge_font_size(), 10.0);
        let dense = SceneMetrics::analyze(&chain(300, 4.0));
        assert_relative_eq!(dense.badge_font_size(), 8.7, epsilon = 1.0e-12);
    }
}
