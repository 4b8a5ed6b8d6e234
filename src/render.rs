//! Render entry points.

use std::path::Path;

use log::{debug, warn};

use crate::arrow::ArrowBuilder;
use crate::metrics::SceneMetrics;
use crate::options::RenderOptions;
use crate::results::AnalysisResults;
use crate::scene::{Scene, SceneBuilder};
use crate::truss::Truss;
use crate::{canvas, forces, labels, members, supports};

/// Shared, read-only state of one render.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Metrics derived from the model.
    pub metrics: SceneMetrics,
    /// Presentation options.
    pub options: RenderOptions,
    /// Arrow builder sized for this render.
    pub arrows: ArrowBuilder,
}

impl RenderContext {
    /// Derive the context for rendering `truss`.
    #[must_use]
    pub fn new(truss: &Truss, options: &RenderOptions) -> Self {
        let metrics = SceneMetrics::analyze(truss);
        let options = options.sanitized();
        Self {
            metrics,
            arrows: ArrowBuilder::new(&metrics, options.text_offset),
            options,
        }
    }

    /// Visual scale of this render.
    #[must_use]
    pub fn visual_scale(&self) -> f64 {
        self.metrics.visual_scale
    }
}

/// A finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// The diagram.
    pub scene: Scene,
    /// Suggested canvas height in pixels, within `[500, 900]`.
    pub recommended_height: u32,
    /// Metrics the diagram was sized with.
    pub metrics: SceneMetrics,
}

/// Render `truss` and, when available, its analysis `results`.
///
/// Members without a result are drawn in draft state; passing `None` renders the whole
/// model as a draft. The function is pure: identical inputs give identical output.
///
/// # Examples
/// ```
/// use trussviz::{point, render, Joint, Member, RenderOptions, Truss};
///
/// let mut truss = Truss::new();
/// truss.add_joint(Joint::new(1, point(0.0, 0.0)));
/// truss.add_joint(Joint::new(2, point(4.0, 0.0)));
/// truss.add_member(Member::new(1, 1, 2));
///
/// let rendering = render(&truss, None, &RenderOptions::default());
/// assert_eq!(rendering.recommended_height, 500);
/// assert!(rendering.scene.legend_entry("Beam (Draft)").is_some());
/// ```
#[must_use]
pub fn render(
    truss: &Truss,
    results: Option<&AnalysisResults>,
    options: &RenderOptions,
) -> Rendering {
    let ctx = RenderContext::new(truss, options);
    debug!(
        "rendering {} joints / {} members: visual scale {:.4}, complexity {:.3}, height {}",
        truss.joint_count(),
        truss.member_count(),
        ctx.metrics.visual_scale,
        ctx.metrics.complexity_factor,
        ctx.metrics.recommended_height
    );

    let mut scene = SceneBuilder::new();
    members::draw(&ctx, truss, results, &mut scene);
    for joint in truss.joints() {
        supports::draw_support(&ctx, joint, &mut scene);
        forces::draw_load(&ctx, joint, &mut scene);
        if let Some(reaction) = results.and_then(|results| results.joint(joint.id)) {
            forces::draw_reaction(&ctx, joint, reaction, &mut scene);
        }
    }
    supports::draw_joints(&ctx, truss, &mut scene);
    labels::draw(&ctx, truss, results, &mut scene);
    debug!("scene holds {} drawables", scene.len());

    Rendering {
        scene: canvas::assemble(scene),
        recommended_height: ctx.metrics.recommended_height,
        metrics: ctx.metrics,
    }
}

/// Render straight from a model file and an optional result file.
///
/// Returns `None` when the model cannot be read. An unreadable or malformed result file
/// is logged and the model is rendered as a draft.
pub fn render_files(
    model_path: impl AsRef<Path>,
    results_path: Option<&Path>,
    options: &RenderOptions,
) -> Option<Rendering> {
    let truss = match Truss::load(model_path) {
        Ok(truss) => truss,
        Err(error) => {
            warn!("nothing to render: {error}");
            return None;
        }
    };
    let results = results_path.and_then(AnalysisResults::load_or_warn);
    Some(render(&truss, results.as_ref(), options))
}
