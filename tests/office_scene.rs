#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use holecut::command::SkipReason;
use holecut::host::{ConduitKind, ModelRepository};
use holecut::math::Point3;
use holecut::model::scene::Scene;
use holecut::{AddHoles, HoleSettings};

const OFFICE: &str = include_str!("../demos/office.json");

#[test]
fn office_scene_gets_one_hole_per_wall_crossing() {
    let mut app = Scene::from_json_str(OFFICE).unwrap().build().unwrap();
    let report = AddHoles::new(HoleSettings::default())
        .execute(&mut app)
        .unwrap();

    assert!(report.activated_symbol);
    assert_eq!(report.duct_holes.len(), 3);
    assert_eq!(report.pipe_holes.len(), 3);

    let reasons: Vec<_> = report.skipped.iter().map(|s| (s.kind, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (ConduitKind::Duct, SkipReason::NoDiameter),
            (ConduitKind::Duct, SkipReason::Curved),
        ]
    );

    let doc = app.document(app.active_document()).unwrap();
    let positions: Vec<Point3> = report
        .holes()
        .map(|id| doc.family_instance(id).unwrap().position)
        .collect();
    let expected = [
        Point3::new(3.875, 0.0, 2.8),
        Point3::new(8.85, 0.0, 2.8),
        Point3::new(3.875, -2.0, 6.2),
        Point3::new(6.0, 2.9, 0.6),
        Point3::new(4.125, -1.0, 1.0),
        Point3::new(9.15, -1.0, 1.0),
    ];
    assert_eq!(positions.len(), expected.len());
    // Hits come back in wall order, not sorted along the run.
    for (actual, expected) in positions.iter().zip(&expected) {
        assert_relative_eq!(*actual, *expected, epsilon = 1e-9);
    }
}

#[test]
fn office_holes_are_sized_and_hosted() {
    let mut app = Scene::from_json_str(OFFICE).unwrap().build().unwrap();
    let report = AddHoles::default().execute(&mut app).unwrap();

    let doc = app.document(app.active_document()).unwrap();
    let upper_duct_hole = doc.family_instance(report.duct_holes[2]).unwrap();
    assert_relative_eq!(upper_duct_hole.parameters["Ширина"], 0.25);
    assert_relative_eq!(upper_duct_hole.parameters["Высота"], 0.25);
    assert_relative_eq!(upper_duct_hole.parameters["Глубина"], 0.0);

    let host = doc.wall(upper_duct_hole.host).unwrap();
    assert_eq!(host.level, upper_duct_hole.level);
    assert_eq!(doc.level(host.level).unwrap().name, "Level 2");

    let pipe_hole = doc.family_instance(report.pipe_holes[0]).unwrap();
    assert_relative_eq!(pipe_hole.parameters["Ширина"], 0.05);
    assert_eq!(doc.committed_transactions().len(), 2);
}
