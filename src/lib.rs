#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod arrow;
pub mod canvas;
pub mod errors;
pub mod forces;
pub mod geometry;
pub mod labels;
pub mod members;
pub mod metrics;
pub mod options;
pub mod policy;
pub mod render;
pub mod report;
pub mod results;
pub mod scene;
pub mod style;
pub mod supports;
pub mod svg_export;
pub mod truss;

pub use arrow::ArrowKind;
pub use errors::{ExportError, LoadError};
pub use geometry::{point, Force, Point};
pub use members::SafetyClass;
pub use metrics::SceneMetrics;
pub use options::RenderOptions;
pub use render::{render, render_files, Rendering};
pub use results::{AnalysisResults, JointResult, MemberResult, SolveStatus};
pub use truss::{Joint, Member, MemberSpan, SupportType, Truss};
