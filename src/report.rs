//! Plain-text analysis summary.

use std::fmt;

use crate::results::AnalysisResults;
use crate::truss::Truss;

/// Reactions below this magnitude, in newtons, are only listed for supports.
const SIGNIFICANT_REACTION: f64 = 10.0;

/// Forces within this band, in kilonewtons, count as neutral.
const NEUTRAL_BAND_KN: f64 = 0.01;

/// Sign of a member force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceType {
    /// Pulled apart.
    Tension,
    /// Pushed together.
    Compression,
    /// Effectively unloaded.
    Neutral,
}

impl ForceType {
    /// Classify a force given in kilonewtons.
    #[must_use]
    pub fn of_kilonewtons(force: f64) -> Self {
        if force > NEUTRAL_BAND_KN {
            ForceType::Tension
        } else if force < -NEUTRAL_BAND_KN {
            ForceType::Compression
        } else {
            ForceType::Neutral
        }
    }
}

impl fmt::Display for ForceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForceType::Tension => "Tension",
            ForceType::Compression => "Compression",
            ForceType::Neutral => "Neutral",
        })
    }
}

/// One row of the support reaction table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRow {
    /// Joint id.
    pub joint: i64,
    /// Horizontal reaction in kN.
    pub rx_kn: f64,
    /// Vertical reaction in kN.
    pub ry_kn: f64,
    /// Direction of the reaction in degrees from +x.
    pub angle_deg: f64,
}

/// One row of the member table.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    /// Member id.
    pub member: i64,
    /// Axial force in kN.
    pub force_kn: f64,
    /// Sign of the force.
    pub force_type: ForceType,
    /// Safety factor.
    pub safety_factor: f64,
}

/// Headline figures of an analysed model.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Sum of applied load magnitudes in kN.
    pub total_load_kn: f64,
    /// Member volume in dm³, when every member has a cross-section area.
    pub material_dm3: Option<f64>,
    /// Largest absolute stress in MPa.
    pub max_stress_mpa: f64,
    /// Smallest safety factor, or 0 without member results.
    pub min_safety_factor: f64,
    /// Support reactions worth listing.
    pub reactions: Vec<ReactionRow>,
    /// Per-member forces.
    pub members: Vec<MemberRow>,
}

impl Summary {
    /// Whether every member keeps a safety factor above one.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.min_safety_factor > 1.0
    }
}

/// Analysis report of a model: either a summary or an instability warning.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    /// The solver could not find an equilibrium.
    Unstable,
    /// The solver succeeded.
    Solved(Summary),
}

impl AnalysisReport {
    /// Build the report of `truss` under `results`.
    #[must_use]
    pub fn new(truss: &Truss, results: &AnalysisResults) -> Self {
        // An unstable solve carries no forces, so there is nothing to summarise.
        if results.is_unstable() {
            return AnalysisReport::Unstable;
        }

        // Headline figures. Material volume is only known when every member has an area.
        let total_load_kn = truss.joints().map(|joint| joint.load.kilonewtons()).sum();
        let material_dm3 = truss
            .members()
            .map(|span| span.member.area.map(|area| span.length() * area))
            .sum::<Option<f64>>()
            .map(|volume| volume * 1000.0);
        let max_stress_mpa = results
            .members()
            .map(|(_, result)| result.stress.abs() / 1.0e6)
            .fold(0.0, f64::max);
        let min_safety_factor = results
            .members()
            .map(|(_, result)| result.safety_factor)
            .reduce(f64::min)
            .unwrap_or(0.0);

        // List reactions at supports and any other joint carrying a noticeable force.
        let reactions = results
            .joints()
            .filter(|(id, result)| {
                result.reaction_x.abs() > SIGNIFICANT_REACTION
                    || result.reaction_y.abs() > SIGNIFICANT_REACTION
                    || truss
                        .joint(*id)
                        .is_some_and(|joint| joint.support.is_support())
            })
            .map(|(id, result)| ReactionRow {
                joint: id,
                rx_kn: result.reaction_x / 1000.0,
                ry_kn: result.reaction_y / 1000.0,
                angle_deg: result.reaction_y.atan2(result.reaction_x).to_degrees(),
            })
            .collect();
        // Member rows keep the solver's order and report forces in kN.
        let members = results
            .members()
            .map(|(id, result)| {
                let force_kn = result.force / 1000.0;
                MemberRow {
                    member: id,
                    force_kn,
                    force_type: ForceType::of_kilonewtons(force_kn),
                    safety_factor: result.safety_factor,
                }
            })
            .collect();

        AnalysisReport::Solved(Summary {
            total_load_kn,
            material_dm3,
            max_stress_mpa,
            min_safety_factor,
            reactions,
            members,
        })
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = match self {
            AnalysisReport::Unstable => {
                return writeln!(
                    f,
                    "SYSTEM UNSTABLE: the geometry is incomplete or missing necessary supports \
                     (Pinned/Roller)."
                );
            }
            AnalysisReport::Solved(summary) => summary,
        };

        // Headline block, ending with the safe/failing verdict.
        writeln!(f, "Total load: {:.1} kN", summary.total_load_kn)?;
        match summary.material_dm3 {
            Some(volume) => writeln!(f, "Material usage: {volume:.2} dm³")?,
            None => writeln!(f, "Material usage: n/a (missing cross-section areas)")?,
        }
        writeln!(f, "Max stress: {:.1} MPa", summary.max_stress_mpa)?;
        let verdict = if summary.is_safe() { "SAFE" } else { "FAILING" };
        writeln!(
            f,
            "System is {verdict} (min safety factor {:.2})",
            summary.min_safety_factor
        )?;

        // Reaction table: joint, components and direction measured from +x.
        writeln!(f)?;
        writeln!(f, "Support reactions")?;
        if summary.reactions.is_empty() {
            writeln!(f, "  No significant reaction forces.")?;
        } else {
            writeln!(f, "  {:>6} {:>10} {:>10} {:>9}", "Joint", "Rx (kN)", "Ry (kN)", "Angle")?;
            for row in &summary.reactions {
                writeln!(
                    f,
                    "  {:>6} {:>10.2} {:>10.2} {:>8.1}°",
                    row.joint, row.rx_kn, row.ry_kn, row.angle_deg
                )?;
            }
        }

        // Member table: force, its sign and the safety factor.
        writeln!(f)?;
        writeln!(f, "Beam report")?;
        writeln!(f, "  {:>6} {:>11} {:<12} {:>6}", "Beam", "Force (kN)", "Type", "FS")?;
        for row in &summary.members {
            writeln!(
                f,
                "  {:>6} {:>11.2} {:<12} {:>6.2}",
                format!("#{}", row.member),
                row.force_kn,
                row.force_type.to_string(),
                row.safety_factor
            )?;
        }
        Ok(())
    }
}

/// Render the textual analysis summary of `truss` under `results`.
///
/// # Examples
/// ```
/// use trussviz::report::render_summary;
/// use trussviz::{AnalysisResults, Truss};
///
/// let results = AnalysisResults::from_json(r#"{"status": "unstable"}"#).unwrap();
/// assert!(render_summary(&Truss::new(), &results).contains("UNSTABLE"));
/// ```
#[must_use]
pub fn render_summary(truss: &Truss, results: &AnalysisResults) -> String {
    AnalysisReport::new(truss, results).to_string()
}
