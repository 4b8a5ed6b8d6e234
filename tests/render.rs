#![warn(clippy::pedantic)]

use std::io::Write;

use approx::assert_relative_eq;
use trussviz::geometry::Point;
use trussviz::scene::{Drawable, Layer, Primitive};
use trussviz::style::palette;
use trussviz::{
    point, render, render_files, AnalysisResults, Force, Joint, JointResult, Member,
    MemberResult, RenderOptions, SupportType, Truss,
};

/// A simply supported triangle with a load at the apex.
fn bridge() -> Truss {
    let mut truss = Truss::new();
    truss.add_joint(Joint::new(1, point(0.0, 0.0)).with_support(SupportType::Pinned));
    truss.add_joint(Joint::new(2, point(4.0, 0.0)).with_support(SupportType::Roller));
    truss.add_joint(Joint::new(3, point(2.0, 2.0)).with_load(Force::new(0.0, -50_000.0)));
    truss.add_member(Member::new(1, 1, 2));
    truss.add_member(Member::new(2, 2, 3));
    truss.add_member(Member::new(3, 1, 3));
    truss
}

fn bridge_results() -> AnalysisResults {
    AnalysisResults::new()
        .with_member(1, MemberResult::new(25_000.0, 25.0e6, 10.0))
        .with_member(2, MemberResult::new(-35_355.0, -35.4e6, 1.4))
        .with_member(3, MemberResult::new(-35_355.0, -35.4e6, 0.8))
        .with_joint(1, JointResult::new(0.0, 25_000.0))
        .with_joint(2, JointResult::new(0.0, 25_000.0))
}

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn polygons_filled(drawables: &[Drawable], fill: trussviz::style::Color) -> Vec<&[Point]> {
    drawables
        .iter()
        .filter_map(|d| match &d.primitive {
            Primitive::Polygon {
                vertices,
                fill: color,
                ..
            } if *color == fill => Some(vertices.as_slice()),
            _ => None,
        })
        .collect()
}

#[test]
fn compressed_member_gets_inward_orange_arrows() {
    let mut truss = Truss::new();
    truss.add_joint(Joint::new(1, point(0.0, 0.0)));
    truss.add_joint(Joint::new(2, point(4.0, 0.0)));
    truss.add_member(Member::new(1, 1, 2));
    let results = AnalysisResults::new().with_member(1, MemberResult::new(-10.0, -1.0e4, 5.0));

    let rendering = render(&truss, Some(&results), &RenderOptions::default());
    let drawables = &rendering.scene.drawables;
    let midpoint = point(2.0, 0.0);

    let heads = polygons_filled(drawables, palette::COMPRESSION);
    assert_eq!(heads.len(), 2);
    let shafts: Vec<(Point, Point)> = drawables
        .iter()
        .filter_map(|d| match &d.primitive {
            Primitive::Line { from, to, stroke } if stroke.color == palette::COMPRESSION => {
                Some((*from, *to))
            }
            _ => None,
        })
        .collect();
    assert_eq!(shafts.len(), 2);
    for (from, to) in shafts {
        assert_relative_eq!(from.y, 0.0);
        assert_relative_eq!(to.y, 0.0);
        assert!(from.distance(midpoint) > to.distance(midpoint));
    }
    assert!(rendering.scene.legend_entry("Compression Force").is_some());
    assert!(rendering.scene.legend_entry("Tension Force").is_none());
}

#[test]
fn applied_load_is_one_labelled_rose_arrow() {
    let rendering = render(&bridge(), None, &RenderOptions::default());
    let drawables = &rendering.scene.drawables;

    let heads = polygons_filled(drawables, palette::LOAD);
    assert_eq!(heads.len(), 1);
    let apex = heads[0][0];
    assert_relative_eq!(apex.x, 2.0, epsilon = 1.0e-12);
    assert!(apex.y < 2.0);

    let labels: Vec<&str> = rendering
        .scene
        .in_group("Load Force")
        .filter_map(|d| match &d.primitive {
            Primitive::Text(badge) => Some(badge.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["50.0 kN"]);
}

#[test]
fn unanalysed_model_is_all_draft() {
    let rendering = render(&bridge(), None, &RenderOptions::default());
    for drawable in rendering.scene.on_layer(Layer::Members) {
        let Primitive::Line { stroke, .. } = &drawable.primitive else {
            panic!("members are lines");
        };
        assert_eq!(stroke.color, palette::DRAFT);
    }
    let beams: Vec<&str> = rendering
        .scene
        .legend
        .iter()
        .map(|entry| entry.label.as_str())
        .filter(|label| label.starts_with("Beam"))
        .collect();
    assert_eq!(beams, vec!["Beam (Draft)"]);
    assert!(rendering.scene.on_layer(Layer::Forces).all(|d| {
        d.group.as_deref() == Some("Load Force")
    }));
}

#[test]
fn analysed_model_shows_bands_and_reactions() {
    let rendering = render(&bridge(), Some(&bridge_results()), &RenderOptions::default());
    let scene = &rendering.scene;
    for label in [
        "Beam (Safe)",
        "Beam (Caution)",
        "Beam (Unsafe)",
        "Tension Force",
        "Compression Force",
        "Reaction Force",
        "Pinned Support",
        "Roller Support",
    ] {
        assert!(scene.legend_entry(label).is_some(), "missing legend entry {label}");
    }
    assert!(scene.legend_entry("Beam (Draft)").is_none());

    let reaction_labels: Vec<&str> = scene
        .in_group("Reaction Force")
        .filter_map(|d| match &d.primitive {
            Primitive::Text(badge) => Some(badge.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(reaction_labels, vec!["R: 25.0", "R: 25.0"]);

    // Upward reactions sit below their joint and point up into it.
    for apex in polygons_filled(&scene.drawables, palette::REACTION)
        .iter()
        .map(|vertices| vertices[0])
    {
        assert!(apex.y < 0.0);
    }
}

#[test]
fn legend_categories_appear_once() {
    let rendering = render(&bridge(), Some(&bridge_results()), &RenderOptions::default());
    let mut labels: Vec<&str> = rendering
        .scene
        .legend
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    let total = labels.len();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), total);
}

#[test]
fn layers_paint_joints_and_labels_last() {
    let rendering = render(&bridge(), Some(&bridge_results()), &RenderOptions::default());
    let layers: Vec<Layer> = rendering.scene.drawables.iter().map(|d| d.layer).collect();
    assert!(layers.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(layers.last(), Some(&Layer::Labels));
    assert_eq!(rendering.scene.on_layer(Layer::Joints).count(), 3);
    // Three joint badges and three member badges, plus load and reaction labels.
    assert_eq!(rendering.scene.on_layer(Layer::Labels).count(), 9);
}

#[test]
fn rendering_is_deterministic() {
    let options = RenderOptions::default();
    let first = render(&bridge(), Some(&bridge_results()), &options);
    let second = render(&bridge(), Some(&bridge_results()), &options);
    assert_eq!(first, second);
}

#[test]
fn mirrored_model_keeps_its_sizing() {
    let original = bridge();
    let mut mirrored = Truss::new();
    for joint in original.joints() {
        let mut copy = joint.clone();
        copy.position = point(-joint.position.x, joint.position.y);
        mirrored.add_joint(copy);
    }
    for span in original.members() {
        mirrored.add_member(span.member.clone());
    }

    let options = RenderOptions::default();
    let a = render(&original, None, &options).metrics;
    let b = render(&mirrored, None, &options).metrics;
    assert_eq!(a.recommended_height, b.recommended_height);
    assert_relative_eq!(a.visual_scale, b.visual_scale, epsilon = 1.0e-12);
    assert_relative_eq!(a.complexity_factor, b.complexity_factor);
}

#[test]
fn dangling_members_are_dropped() {
    let truss = Truss::from_json(
        r#"{"nodes": [{"id": 1, "x": 0, "y": 0}, {"id": 2, "x": 3, "y": 0}],
            "elements": [{"id": 1, "start": 1, "end": 2},
                         {"id": 2, "start": 2, "end": 99},
                         {"id": 3, "start": 1, "end": 1}]}"#,
    )
    .expect("valid model");
    let rendering = render(&truss, None, &RenderOptions::default());
    assert_eq!(rendering.metrics.member_count, 1);
    assert_eq!(rendering.scene.on_layer(Layer::Members).count(), 1);
    let member_badges = rendering
        .scene
        .on_layer(Layer::Labels)
        .filter(|d| matches!(&d.primitive, Primitive::Text(badge) if badge.text.starts_with('#')))
        .count();
    assert_eq!(member_badges, 1);
}

#[test]
fn empty_model_still_renders() {
    let rendering = render(&Truss::new(), None, &RenderOptions::default());
    assert!(rendering.scene.drawables.is_empty());
    assert!(rendering.scene.legend.is_empty());
    assert_eq!(rendering.recommended_height, 650);
    assert!(rendering.metrics.visual_scale > 0.0);
}

#[test]
fn render_files_degrades_gracefully() {
    let options = RenderOptions::default();
    let model = write_temp(
        r#"{"nodes": [{"id": 1, "x": 0, "y": 0, "type": "Pinned Support"},
                      {"id": 2, "x": 4, "y": 0, "type": "Roller Support"}],
            "elements": [{"id": 7, "start": 1, "end": 2, "E": 2.0e11, "A": 0.01, "yield": 2.5e8}]}"#,
    );

    assert!(render_files("does/not/exist.json", None, &options).is_none());
    let broken_model = write_temp("{ not json");
    assert!(render_files(broken_model.path(), None, &options).is_none());

    let broken_results = write_temp("[1, 2, 3]");
    let draft = render_files(model.path(), Some(broken_results.path()), &options)
        .expect("model renders without results");
    assert!(draft.scene.legend_entry("Beam (Draft)").is_some());

    let results = write_temp(
        r#"{"status": "success",
            "elements": [{"id": 7, "force": 0.0, "stress": 0.0, "safety": 1000.0}],
            "nodes": [{"id": 1, "rx": 0.0, "ry": 0.0}]}"#,
    );
    let analysed =
        render_files(model.path(), Some(results.path()), &options).expect("model renders");
    assert!(analysed.scene.legend_entry("Beam (Safe)").is_some());
    assert!(analysed.scene.legend_entry("Reaction Force").is_none());
}

#[test]
fn unstable_results_render_as_draft() {
    let results = AnalysisResults::from_json(r#"{"status": "unstable"}"#).expect("valid");
    assert!(results.is_unstable());
    let rendering = render(&bridge(), Some(&results), &RenderOptions::default());
    assert!(rendering.scene.legend_entry("Beam (Draft)").is_some());
    assert!(rendering.scene.legend_entry("Reaction Force").is_none());
}
