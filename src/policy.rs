//! Fixed sizing and threshold policy.
//!
//! Every constant that drives auto-scaling, arrow geometry or overlay filtering lives here
//! so the heuristics can be exercised directly by tests. Values are part of the output
//! contract: changing any of them changes the rendered diagram.

/// Floor applied to the complexity factor.
pub const COMPLEXITY_FLOOR: f64 = 0.35;
/// Member count up to which the complexity factor stays at 1.
pub const COMPLEXITY_REFERENCE_MEMBERS: f64 = 12.0;

/// Span used for each axis when the model has no joints.
pub const DEFAULT_SPAN: (f64, f64) = (10.0, 5.0);
/// Aspect ratio used when the horizontal span is zero.
pub const DEGENERATE_ASPECT_RATIO: f64 = 1.0;
/// Canvas height for a flat structure, in pixels.
pub const BASE_HEIGHT: i64 = 500;
/// Extra pixels per unit of aspect ratio.
pub const HEIGHT_PER_ASPECT: f64 = 300.0;
/// Smallest recommended canvas height, in pixels.
pub const MIN_HEIGHT: i64 = 500;
/// Largest recommended canvas height, in pixels.
pub const MAX_HEIGHT: i64 = 900;

/// Minimum member length assumed when no member has positive length.
pub const DEFAULT_MIN_MEMBER_LENGTH: f64 = 2.0;
/// Fraction of the shortest member used as the base visual scale.
pub const LENGTH_TO_SCALE: f64 = 0.3;
/// Upper bound of the base visual scale.
pub const SCALE_CEILING: f64 = 0.6;
/// Lower bound of the base visual scale.
pub const SCALE_FLOOR: f64 = 0.1;

/// Density multiplier for sparse structures (fewer than [`SPARSE_BELOW`] members).
pub const SPARSE_MULTIPLIER: f64 = 0.75;
/// Density multiplier for mid-size structures.
pub const MEDIUM_MULTIPLIER: f64 = 0.65;
/// Density multiplier for dense structures (more than [`DENSE_ABOVE`] members).
pub const DENSE_MULTIPLIER: f64 = 0.55;
/// Member count below which a structure is sparse.
pub const SPARSE_BELOW: usize = 8;
/// Member count above which a structure is dense.
pub const DENSE_ABOVE: usize = 20;

/// Arrowhead size per unit of visual scale.
pub const HEAD_SIZE: f64 = 0.48;
/// Shaft shortening per unit of head size.
pub const SHAFT_PULLBACK: f64 = 0.7;
/// Shaft inset at both ends per unit of head size.
pub const SHAFT_INSET: f64 = 0.08;
/// Angle of each arrowhead base vertex relative to the shaft, in half-turns.
pub const HEAD_SPREAD: f64 = 1.11;
/// Default label offset per unit of visual scale.
pub const TEXT_OFFSET: f64 = 0.45;

/// Internal-force arrow length per unit of visual scale.
pub const FORCE_ARROW_LENGTH: f64 = 1.5;
/// Internal-force arrow length cap as a fraction of member length.
pub const FORCE_ARROW_LENGTH_RATIO: f64 = 0.35;
/// Gap between the midpoint and the inner arrow end per unit of visual scale.
pub const FORCE_INNER_GAP: f64 = 0.6;
/// Inner gap cap as a fraction of member length.
pub const FORCE_INNER_GAP_RATIO: f64 = 0.1;

/// Distance from the joint to a load arrow's tail per unit of visual scale.
pub const LOAD_TAIL: f64 = 0.15;
/// Distance from the joint to a load arrow's head per unit of visual scale.
pub const LOAD_HEAD: f64 = 1.6;
/// Reaction arrow length per unit of visual scale.
pub const REACTION_LENGTH: f64 = 1.6;
/// Gap between a reaction arrow's head and its joint per unit of visual scale.
pub const REACTION_GAP: f64 = 0.25;

/// Support glyph drop below the joint per unit of visual scale.
pub const SUPPORT_DROP: f64 = 0.12;
/// Support glyph size per unit of visual scale, in pixels.
pub const SUPPORT_SIZE: f64 = 55.0;
/// Smallest support glyph, in pixels.
pub const SUPPORT_MIN_SIZE: f64 = 22.0;
/// Joint marker size per unit of visual scale relative to the visualisation multiplier.
pub const JOINT_SIZE: f64 = 12.0;
/// Smallest joint marker, in pixels.
pub const JOINT_MIN_SIZE: f64 = 10.0;
/// Upward pixel shift of joint badges per unit of complexity factor.
pub const JOINT_BADGE_SHIFT: f64 = 10.0;

/// Largest label font size, in points.
pub const MAX_FONT_SIZE: f64 = 10.0;
/// Label font size before complexity scaling.
pub const BASE_FONT_SIZE: f64 = 8.0;
/// Arrow label font growth per unit of complexity factor.
pub const ARROW_FONT_GROWTH: f64 = 2.5;
/// Badge font growth per unit of complexity factor.
pub const BADGE_FONT_GROWTH: f64 = 2.0;

/// Member force (raw solver units) at or below which no force arrows are drawn.
pub const FORCE_EPSILON: f64 = 0.1;
/// Load or reaction magnitude, in kilonewtons, at or below which no arrow is drawn.
pub const LOAD_EPSILON_KN: f64 = 0.001;

/// Safety factor below which a member is unsafe.
pub const UNSAFE_BELOW: f64 = 1.0;
/// Safety factor below which a member needs caution.
pub const CAUTION_BELOW: f64 = 2.0;
