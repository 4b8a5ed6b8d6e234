//! Member lines colored by safety classification.

use crate::forces;
use crate::policy;
use crate::render::RenderContext;
use crate::results::{AnalysisResults, MemberResult};
use crate::scene::{Drawable, Layer, LegendSymbol, Primitive, SceneBuilder};
use crate::style::{palette, Color, Stroke};
use crate::truss::Truss;

/// Safety band of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyClass {
    /// Not analysed yet.
    Draft,
    /// Safety factor below 1.
    Unsafe,
    /// Safety factor in `[1, 2)`.
    Caution,
    /// Safety factor of 2 or more.
    Safe,
}

impl SafetyClass {
    /// Classify a member by its result; no result means draft.
    #[must_use]
    pub fn classify(result: Option<&MemberResult>) -> Self {
        result.map_or(SafetyClass::Draft, |result| {
            SafetyClass::from_safety_factor(result.safety_factor)
        })
    }

    /// Band of an analysed member. A NaN safety factor is treated as unsafe.
    ///
    /// # Examples
    /// ```
    /// use trussviz::SafetyClass;
    ///
    /// assert_eq!(SafetyClass::from_safety_factor(0.999), SafetyClass::Unsafe);
    /// assert_eq!(SafetyClass::from_safety_factor(1.0), SafetyClass::Caution);
    /// assert_eq!(SafetyClass::from_safety_factor(2.0), SafetyClass::Safe);
    /// ```
    #[must_use]
    pub fn from_safety_factor(safety_factor: f64) -> Self {
        if safety_factor.is_nan() || safety_factor < policy::UNSAFE_BELOW {
            SafetyClass::Unsafe
        } else if safety_factor < policy::CAUTION_BELOW {
            SafetyClass::Caution
        } else {
            SafetyClass::Safe
        }
    }

    /// Line and badge color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            SafetyClass::Draft => palette::DRAFT,
            SafetyClass::Unsafe => palette::UNSAFE,
            SafetyClass::Caution => palette::CAUTION,
            SafetyClass::Safe => palette::SAFE,
        }
    }

    /// Line width in pixels.
    #[must_use]
    pub const fn width(self) -> f64 {
        match self {
            SafetyClass::Draft => 4.0,
            SafetyClass::Caution => 5.0,
            SafetyClass::Unsafe | SafetyClass::Safe => 6.0,
        }
    }

    /// Line style of the band.
    #[must_use]
    pub const fn stroke(self) -> Stroke {
        Stroke::new(self.color(), self.width())
    }

    /// Legend label and group name.
    #[must_use]
    pub const fn legend_label(self) -> &'static str {
        match self {
            SafetyClass::Draft => "Beam (Draft)",
            SafetyClass::Unsafe => "Beam (Unsafe)",
            SafetyClass::Caution => "Beam (Caution)",
            SafetyClass::Safe => "Beam (Safe)",
        }
    }
}

/// Hover text of a member: its id, plus force in kN and safety factor when analysed.
#[must_use]
pub fn hover_text(id: i64, result: Option<&MemberResult>) -> String {
    let mut text = format!("Beam #{id}");
    if let Some(result) = result {
        text.push_str(&format!(
            "\nForce: {:.2} kN\nSafety: {:.2}",
            result.force / 1000.0,
            result.safety_factor
        ));
    }
    text
}

/// Draw every member, and the internal-force arrows of loaded analysed members.
pub fn draw(
    ctx: &RenderContext,
    truss: &Truss,
    results: Option<&AnalysisResults>,
    scene: &mut SceneBuilder,
) {
    for span in truss.members() {
        let result = results.and_then(|results| results.member(span.member.id));
        let class = SafetyClass::classify(result);
        let group = class.legend_label();

        scene.push(
            Drawable::new(
                Layer::Members,
                Primitive::Line {
                    from: span.start.position,
                    to: span.end.position,
                    stroke: class.stroke(),
                },
            )
            .in_group(group)
            .with_hover(hover_text(span.member.id, result)),
        );
        scene
            .legend_mut()
            .register(group, LegendSymbol::Line(class.stroke()));

        if let Some(result) = result {
            if result.force.abs() > policy::FORCE_EPSILON {
                forces::draw_internal_force(ctx, &span, result.force, scene);
            }
        }
    }
}
