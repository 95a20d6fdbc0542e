//! The hole placement command.
//!
//! Collects straight ducts and pipes from the source document, locates where
//! they pass through walls of the active document, and places one hole
//! family instance per penetration, sized to the conduit diameter.

mod report;
mod settings;

pub use report::{HoleReport, SkipReason, SkippedRun};
pub use settings::HoleSettings;

use tracing::{debug, info, warn};

use crate::error::{PreconditionError, Result};
use crate::host::{ConduitKind, ModelRepository, PlacementHost};
use crate::locate::locate;
use crate::model::{DocumentId, ElementId};
use crate::placement::PlacementCommand;

/// Name of the transaction that activates the hole family symbol.
pub const ACTIVATE_TRANSACTION: &str = "Activate hole family";

/// Name of the transaction that places the holes.
pub const PLACE_TRANSACTION: &str = "Place holes";

/// Elements resolved by the precondition checks.
#[derive(Debug, Clone, Copy)]
struct Targets {
    source: DocumentId,
    active: DocumentId,
    symbol: ElementId,
    view: ElementId,
}

/// Placement commands for one run of the command, plus the runs left out.
#[derive(Debug, Default)]
struct Plan {
    commands: Vec<(ConduitKind, PlacementCommand)>,
    skipped: Vec<SkippedRun>,
}

/// Places openings where ducts and pipes pass through walls.
#[derive(Debug, Clone, Default)]
pub struct AddHoles {
    settings: HoleSettings,
}

impl AddHoles {
    /// Creates the command.
    #[must_use]
    pub fn new(settings: HoleSettings) -> Self {
        Self { settings }
    }

    /// Runs the command against `host`.
    ///
    /// The symbol activation and the hole placement run in two separate
    /// transactions. If placement fails, no hole is kept; the activation
    /// stays committed.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] before any transaction is opened if
    /// the source document, the hole family or a 3D view is missing. Any
    /// host error during placement is returned after the placement
    /// transaction has been rolled back.
    pub fn execute<H>(&self, host: &mut H) -> Result<HoleReport>
    where
        H: ModelRepository + PlacementHost,
    {
        let targets = self.check_preconditions(host)?;
        let active = targets.active;

        let activated_symbol = host.transaction(active, ACTIVATE_TRANSACTION, |h| {
            h.activate_family_symbol(active, targets.symbol)
        })?;
        if activated_symbol {
            info!(family = %self.settings.family_name, "activated hole family symbol");
        }

        let mut report = host.transaction(active, PLACE_TRANSACTION, |h| {
            let plan = self.plan(&*h, targets)?;
            let mut report = HoleReport {
                skipped: plan.skipped,
                ..HoleReport::default()
            };
            for (kind, command) in &plan.commands {
                let hole = h.place(active, command)?;
                match kind {
                    ConduitKind::Duct => report.duct_holes.push(hole),
                    ConduitKind::Pipe => report.pipe_holes.push(hole),
                }
            }
            Ok(report)
        })?;
        report.activated_symbol = activated_symbol;

        info!("{report}");
        Ok(report)
    }

    fn check_preconditions<H: ModelRepository>(&self, host: &H) -> Result<Targets> {
        let active = host.active_document();
        let marker = &self.settings.source_title_marker;
        let source = host.find_document_by_title_substring(marker).ok_or_else(|| {
            PreconditionError::MissingSourceDocument {
                marker: marker.clone(),
            }
        })?;
        let symbol = host
            .find_family_symbol(active, &self.settings.family_name)
            .ok_or_else(|| PreconditionError::MissingFamily {
                name: self.settings.family_name.clone(),
            })?;
        let view = host
            .find_first_non_template_view(active)
            .ok_or(PreconditionError::MissingView)?;
        Ok(Targets {
            source,
            active,
            symbol,
            view,
        })
    }

    /// Locates every penetration and turns it into a placement command.
    fn plan<H: ModelRepository>(&self, host: &H, targets: Targets) -> Result<Plan> {
        let caster = host.surface_caster(targets.active, targets.view)?;
        let mut plan = Plan::default();

        for kind in [ConduitKind::Duct, ConduitKind::Pipe] {
            for run in host.segments_of_kind(targets.source, kind)? {
                let Some(segment) = run.segment() else {
                    let reason = if run.location.as_line().is_none() {
                        SkipReason::Curved
                    } else {
                        SkipReason::NoDiameter
                    };
                    warn!(
                        element = ?run.element,
                        ?kind,
                        location = %crate::model::describe(&run.location),
                        %reason,
                        "skipping conduit run"
                    );
                    plan.skipped.push(SkippedRun {
                        element: run.element,
                        kind,
                        reason,
                    });
                    continue;
                };

                let requests = locate(&segment, &caster);
                debug!(element = ?run.element, ?kind, hits = requests.len(), "located penetrations");

                for request in requests {
                    let level = host.host_level(targets.active, request.surface_id)?;
                    debug!(
                        wall = ?request.surface_id,
                        x = request.position.x,
                        y = request.position.y,
                        z = request.position.z,
                        diameter = request.diameter,
                        "hole"
                    );
                    plan.commands.push((
                        kind,
                        PlacementCommand::hole(
                            targets.symbol,
                            &request,
                            level,
                            &self.settings.width_parameter,
                            &self.settings.height_parameter,
                        ),
                    ));
                }
            }
        }
        Ok(plan)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{HolecutError, ModelError};
    use crate::geometry::{Arc, LineSegment, LocationCurve};
    use crate::math::{Point3, Vector3};
    use crate::model::{
        Application, Document, Duct, DuctProfile, FamilySymbol, Level, Pipe, View3D, Wall,
    };
    use approx::assert_relative_eq;

    struct Fixture {
        app: Application,
        level: ElementId,
        walls: Vec<ElementId>,
        symbol: ElementId,
    }

    struct Options {
        source_title: &'static str,
        family_name: &'static str,
        parameters: Vec<&'static str>,
        symbol_active: bool,
        usable_view: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                source_title: "Tower_OV",
                family_name: "Hole",
                parameters: vec!["Width", "Height"],
                symbol_active: false,
                usable_view: true,
            }
        }
    }

    fn line(a: [f64; 3], b: [f64; 3]) -> LocationCurve {
        LocationCurve::Line(
            LineSegment::from_points(Point3::new(a[0], a[1], a[2]), Point3::new(b[0], b[1], b[2]))
                .unwrap(),
        )
    }

    fn fixture(options: &Options) -> Fixture {
        let mut ar = Document::new("Tower_AR");
        let level = ar.add(Level {
            name: "L1".into(),
            elevation: 0.0,
        });
        let walls = [3.0, 7.0, 12.0]
            .into_iter()
            .map(|x| {
                ar.add(Wall {
                    location: LineSegment::from_points(
                        Point3::new(x, -5.0, 0.0),
                        Point3::new(x, 5.0, 0.0),
                    )
                    .unwrap(),
                    thickness: 0.2,
                    height: 3.0,
                    level,
                })
            })
            .collect();
        ar.add(View3D {
            name: "Template".into(),
            is_template: true,
            ..View3D::default()
        });
        if options.usable_view {
            ar.add(View3D::new("{3D}"));
        }
        let symbol = ar.add(FamilySymbol {
            family_name: options.family_name.into(),
            name: "Round".into(),
            is_active: options.symbol_active,
            parameters: options.parameters.iter().map(|p| (*p).to_owned()).collect(),
        });

        let mut ov = Document::new(options.source_title);
        ov.add(Duct {
            location: line([0.0, 0.0, 1.0], [10.0, 0.0, 1.0]),
            profile: DuctProfile::Round { diameter: 0.25 },
        });
        ov.add(Duct {
            location: LocationCurve::Arc(
                Arc::new(Point3::new(0.0, 0.0, 2.0), 4.0, Vector3::z(), Vector3::x(), 0.0, 1.0)
                    .unwrap(),
            ),
            profile: DuctProfile::Round { diameter: 0.3 },
        });
        ov.add(Duct {
            location: line([0.0, 2.0, 1.0], [10.0, 2.0, 1.0]),
            profile: DuctProfile::Rectangular {
                width: 0.4,
                height: 0.2,
            },
        });
        ov.add(Pipe {
            location: line([0.0, 1.0, 1.5], [10.0, 1.0, 1.5]),
            diameter: 0.05,
        });

        let mut app = Application::new(ar);
        app.open(ov);
        Fixture {
            app,
            level,
            walls,
            symbol,
        }
    }

    fn settings() -> HoleSettings {
        HoleSettings {
            source_title_marker: "OV".into(),
            family_name: "Hole".into(),
            width_parameter: "Width".into(),
            height_parameter: "Height".into(),
        }
    }

    fn active_doc(app: &Application) -> &Document {
        app.document(app.active_document()).unwrap()
    }

    #[test]
    fn places_one_hole_per_wall_crossed() {
        let mut f = fixture(&Options::default());

        let report = AddHoles::new(settings()).execute(&mut f.app).unwrap();

        assert!(report.activated_symbol);
        assert_eq!(report.duct_holes.len(), 2);
        assert_eq!(report.pipe_holes.len(), 2);

        let doc = active_doc(&f.app);
        let duct_holes: Vec<_> = report
            .duct_holes
            .iter()
            .map(|id| doc.family_instance(*id).unwrap())
            .collect();
        assert_eq!(duct_holes[0].host, f.walls[0]);
        assert_eq!(duct_holes[1].host, f.walls[1]);
        assert_relative_eq!(duct_holes[0].position, Point3::new(2.9, 0.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(duct_holes[1].position, Point3::new(6.9, 0.0, 1.0), epsilon = 1e-9);
        for hole in &duct_holes {
            assert_eq!(hole.level, f.level);
            assert_eq!(hole.symbol, f.symbol);
            assert_eq!(hole.parameters.get("Width"), Some(&0.25));
            assert_eq!(hole.parameters.get("Height"), Some(&0.25));
        }

        let pipe_hole = doc.family_instance(report.pipe_holes[0]).unwrap();
        assert_eq!(pipe_hole.parameters.get("Width"), Some(&0.05));
        assert_relative_eq!(pipe_hole.position.z, 1.5);
    }

    #[test]
    fn uses_two_committed_transactions() {
        let mut f = fixture(&Options::default());
        AddHoles::new(settings()).execute(&mut f.app).unwrap();

        let doc = active_doc(&f.app);
        assert_eq!(
            doc.committed_transactions(),
            [ACTIVATE_TRANSACTION.to_owned(), PLACE_TRANSACTION.to_owned()]
        );
        assert!(doc.family_symbol(f.symbol).unwrap().is_active);
    }

    #[test]
    fn curved_and_rectangular_runs_are_skipped() {
        let mut f = fixture(&Options::default());
        let report = AddHoles::new(settings()).execute(&mut f.app).unwrap();

        let reasons: Vec<_> = report.skipped.iter().map(|s| (s.kind, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (ConduitKind::Duct, SkipReason::Curved),
                (ConduitKind::Duct, SkipReason::NoDiameter),
            ]
        );
    }

    #[test]
    fn runs_without_positive_diameter_are_skipped() {
        let mut f = fixture(&Options::default());
        let ov = f.app.find_document_by_title_substring("OV").unwrap();
        let source = f.app.document_mut(ov).unwrap();
        let flat = source.add(Pipe {
            location: line([0.0, -1.0, 1.5], [10.0, -1.0, 1.5]),
            diameter: 0.0,
        });
        let inverted = source.add(Pipe {
            location: line([0.0, -2.0, 1.5], [10.0, -2.0, 1.5]),
            diameter: -0.1,
        });

        let report = AddHoles::new(settings()).execute(&mut f.app).unwrap();

        assert_eq!(report.pipe_holes.len(), 2);
        let skipped_pipes: Vec<_> = report
            .skipped
            .iter()
            .filter(|s| s.kind == ConduitKind::Pipe)
            .map(|s| (s.element, s.reason))
            .collect();
        assert_eq!(
            skipped_pipes,
            vec![
                (flat, SkipReason::NoDiameter),
                (inverted, SkipReason::NoDiameter),
            ]
        );
        let doc = active_doc(&f.app);
        assert!(doc
            .family_instances()
            .all(|(_, hole)| hole.parameters.values().all(|v| *v > 0.0)));
    }

    #[test]
    fn missing_source_document_stops_before_any_transaction() {
        let mut f = fixture(&Options {
            source_title: "Tower_KR",
            ..Options::default()
        });

        let err = AddHoles::new(settings()).execute(&mut f.app).unwrap_err();

        assert!(matches!(
            err,
            HolecutError::Precondition(PreconditionError::MissingSourceDocument { marker }) if marker == "OV"
        ));
        let doc = active_doc(&f.app);
        assert!(doc.committed_transactions().is_empty());
        assert!(!doc.family_symbol(f.symbol).unwrap().is_active);
    }

    #[test]
    fn missing_family_is_a_precondition_failure() {
        let mut f = fixture(&Options {
            family_name: "Niche",
            ..Options::default()
        });
        let err = AddHoles::new(settings()).execute(&mut f.app).unwrap_err();
        assert!(matches!(
            err,
            HolecutError::Precondition(PreconditionError::MissingFamily { name }) if name == "Hole"
        ));
        assert!(active_doc(&f.app).committed_transactions().is_empty());
    }

    #[test]
    fn template_views_do_not_count() {
        let mut f = fixture(&Options {
            usable_view: false,
            ..Options::default()
        });
        let err = AddHoles::new(settings()).execute(&mut f.app).unwrap_err();
        assert!(matches!(
            err,
            HolecutError::Precondition(PreconditionError::MissingView)
        ));
    }

    #[test]
    fn failed_placement_keeps_no_holes() {
        let mut f = fixture(&Options {
            parameters: vec!["Width"],
            ..Options::default()
        });

        let err = AddHoles::new(settings()).execute(&mut f.app).unwrap_err();

        assert!(matches!(
            err,
            HolecutError::Model(ModelError::ParameterNotFound { name }) if name == "Height"
        ));
        let doc = active_doc(&f.app);
        assert_eq!(doc.family_instances().count(), 0);
        assert_eq!(doc.committed_transactions(), [ACTIVATE_TRANSACTION.to_owned()]);
        assert!(doc.family_symbol(f.symbol).unwrap().is_active);
    }

    #[test]
    fn active_symbol_is_not_reported_as_activated() {
        let mut f = fixture(&Options {
            symbol_active: true,
            ..Options::default()
        });
        let report = AddHoles::new(settings()).execute(&mut f.app).unwrap();
        assert!(!report.activated_symbol);
        assert_eq!(report.placed(), 4);
    }

    #[test]
    fn default_settings_match_localized_names() {
        let mut f = fixture(&Options {
            source_title: "Башня_ОВ",
            family_name: "Отверстие",
            parameters: vec!["Ширина", "Высота"],
            ..Options::default()
        });
        let report = AddHoles::default().execute(&mut f.app).unwrap();

        let doc = active_doc(&f.app);
        let hole = doc.family_instance(report.duct_holes[0]).unwrap();
        assert_eq!(hole.parameters.get("Ширина"), Some(&0.25));
        assert_eq!(hole.parameters.get("Высота"), Some(&0.25));
    }
}
