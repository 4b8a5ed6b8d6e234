//! Analysis results produced by the external solver.

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::errors::{read_json, LoadError};
use crate::geometry::Force;

/// Axial response of one member.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct MemberResult {
    /// Axial force in newtons; negative is compression.
    pub force: f64,
    /// Axial stress in pascals.
    #[serde(default)]
    pub stress: f64,
    /// Factor of safety against yielding.
    #[serde(rename = "safety")]
    pub safety_factor: f64,
}

impl MemberResult {
    /// Create a result from its three components.
    #[must_use]
    pub const fn new(force: f64, stress: f64, safety_factor: f64) -> Self {
        Self {
            force,
            stress,
            safety_factor,
        }
    }
}

/// Support reaction at one joint.
#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
pub struct JointResult {
    /// Horizontal reaction in newtons.
    #[serde(rename = "rx", default)]
    pub reaction_x: f64,
    /// Vertical reaction in newtons.
    #[serde(rename = "ry", default)]
    pub reaction_y: f64,
}

impl JointResult {
    /// Create a reaction from its components.
    #[must_use]
    pub const fn new(reaction_x: f64, reaction_y: f64) -> Self {
        Self {
            reaction_x,
            reaction_y,
        }
    }

    /// The reaction as a force vector.
    #[must_use]
    pub fn reaction(&self) -> Force {
        Force::new(self.reaction_x, self.reaction_y)
    }
}

/// Outcome reported by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// The system was solved.
    #[default]
    Success,
    /// The stiffness matrix was singular; no forces are available.
    Unstable,
}

/// Member entry of the result file.
#[derive(Clone, Debug, Deserialize)]
struct ElementRecord {
    /// Member id.
    id: i64,
    /// Member response.
    #[serde(flatten)]
    result: MemberResult,
}

/// Node entry of the result file.
#[derive(Clone, Debug, Deserialize)]
struct NodeRecord {
    /// Joint id.
    id: i64,
    /// Joint reaction.
    #[serde(flatten)]
    result: JointResult,
}

/// Top-level shape of the result file.
#[derive(Clone, Debug, Default, Deserialize)]
struct ResultsRecord {
    /// Solver outcome.
    #[serde(default)]
    status: SolveStatus,
    /// Member responses.
    #[serde(default)]
    elements: Vec<ElementRecord>,
    /// Joint reactions.
    #[serde(default)]
    nodes: Vec<NodeRecord>,
}

/// Per-member and per-joint analysis results keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResults {
    /// Solver outcome.
    status: SolveStatus,
    /// Member responses keyed by member id.
    members: HashMap<i64, MemberResult>,
    /// Joint reactions keyed by joint id.
    joints: HashMap<i64, JointResult>,
    /// Member ids in the order the solver listed them.
    member_order: Vec<i64>,
    /// Joint ids in the order the solver listed them.
    joint_order: Vec<i64>,
}

impl AnalysisResults {
    /// Create an empty, successful result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a member response; a repeated id replaces the earlier entry.
    pub fn insert_member(&mut self, id: i64, result: MemberResult) {
        if self.members.insert(id, result).is_none() {
            self.member_order.push(id);
        }
    }

    /// Record a joint reaction; a repeated id replaces the earlier entry.
    pub fn insert_joint(&mut self, id: i64, result: JointResult) {
        if self.joints.insert(id, result).is_none() {
            self.joint_order.push(id);
        }
    }

    /// Builder-style variant of [`AnalysisResults::insert_member`].
    #[must_use]
    pub fn with_member(mut self, id: i64, result: MemberResult) -> Self {
        self.insert_member(id, result);
        self
    }

    /// Builder-style variant of [`AnalysisResults::insert_joint`].
    #[must_use]
    pub fn with_joint(mut self, id: i64, result: JointResult) -> Self {
        self.insert_joint(id, result);
        self
    }

    /// Solver outcome.
    #[must_use]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Whether the solver reported an unstable structure.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.status == SolveStatus::Unstable
    }

    /// Response of a member, if analysed.
    #[must_use]
    pub fn member(&self, id: i64) -> Option<&MemberResult> {
        self.members.get(&id)
    }

    /// Reaction at a joint, if computed.
    #[must_use]
    pub fn joint(&self, id: i64) -> Option<&JointResult> {
        self.joints.get(&id)
    }

    /// Member responses in solver order.
    pub fn members(&self) -> impl Iterator<Item = (i64, &MemberResult)> + '_ {
        self.member_order
            .iter()
            .filter_map(move |id| self.members.get(id).map(|result| (*id, result)))
    }

    /// Joint reactions in solver order.
    pub fn joints(&self) -> impl Iterator<Item = (i64, &JointResult)> + '_ {
        self.joint_order
            .iter()
            .filter_map(move |id| self.joints.get(id).map(|result| (*id, result)))
    }

    /// Parse results from their JSON text.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when `text` is not a result document.
    ///
    /// # Examples
    /// ```
    /// use trussviz::AnalysisResults;
    ///
    /// let results = AnalysisResults::from_json(
    ///     r#"{"status": "success",
    ///         "elements": [{"id": 1, "force": -10.0, "stress": -6.7e3, "safety": 3.2}],
    ///         "nodes": [{"id": 1, "ux": 0.0, "uy": 0.0, "rx": 0.0, "ry": 25000.0}]}"#,
    /// )
    /// .expect("valid results");
    /// assert_eq!(results.member(1).map(|m| m.force), Some(-10.0));
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let record: ResultsRecord = serde_json::from_str(text)?;
        Ok(Self::from_record(record))
    }

    /// Read a result file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file is missing, unreadable or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let record: ResultsRecord = read_json(path.as_ref())?;
        Ok(Self::from_record(record))
    }

    /// Read a result file, logging a warning and returning `None` when it cannot be used.
    ///
    /// Callers render the model as a draft in that case.
    #[must_use]
    pub fn load_or_warn<P: AsRef<Path>>(path: P) -> Option<Self> {
        match Self::load(path) {
            Ok(results) => Some(results),
            Err(error) => {
                warn!("rendering without analysis results: {error}");
                None
            }
        }
    }

    /// Index decoded records by id.
    fn from_record(record: ResultsRecord) -> Self {
        let mut results = AnalysisResults {
            status: record.status,
            ..AnalysisResults::default()
        };
        for element in record.elements {
            results.insert_member(element.id, element.result);
        }
        for node in record.nodes {
            results.insert_joint(node.id, node.result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstable_result_carries_no_data() {
        let results =
            AnalysisResults::from_json(r#"{"status":"unstable"}"#).expect("status only parses");
        assert!(results.is_unstable());
        assert_eq!(results.members().count(), 0);
        assert_eq!(results.joints().count(), 0);
    }

    #[test]
    fn results_keep_solver_order() {
        let results = AnalysisResults::from_json(
            r#"{"elements": [
                    {"id": 3, "force": 1.0, "stress": 2.0, "safety": 5.0},
                    {"id": 1, "force": -1.0, "stress": -2.0, "safety": 0.5}
                ],
                "nodes": [{"id": 2, "rx": 10.0}]}"#,
        )
        .expect("results parse");
        let ids: Vec<i64> = results.members().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(results.status(), SolveStatus::Success);
        assert_eq!(results.joint(2), Some(&JointResult::new(10.0, 0.0)));
    }

    #[test]
    fn repeated_ids_replace_earlier_entries() {
        let results = AnalysisResults::new()
            .with_member(1, MemberResult::new(1.0, 1.0, 1.0))
            .with_member(1, MemberResult::new(2.0, 2.0, 2.0));
        assert_eq!(results.members().count(), 1);
        assert_eq!(results.member(1).map(|m| m.force), Some(2.0));
    }

    #[test]
    fn unusable_result_file_yields_none() {
        use std::io::Write;

        assert_eq!(AnalysisResults::load_or_warn("does/not/exist.json"), None);
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[1, 2, 3]").expect("write results");
        assert_eq!(AnalysisResults::load_or_warn(file.path()), None);

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"status": "unstable"}}"#).expect("write results");
        let results = AnalysisResults::load_or_warn(file.path()).expect("status only loads");
        assert!(results.is_unstable());
    }

    #[test]
    fn element_without_safety_is_malformed() {
        assert!(AnalysisResults::from_json(r#"{"elements": [{"id": 1, "force": 2.0}]}"#).is_err());
    }
}
