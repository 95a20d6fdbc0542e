//! Places wall openings for every duct and pipe in a JSON scene.
//!
//! Usage:
//! ```text
//! add-holes <scene.json> [--settings <settings.json>]
//! ```
//!
//! Logging defaults to WARN, INFO for holecut; override with `RUST_LOG`.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use holecut::host::ModelRepository;
use holecut::model::scene::Scene;
use holecut::{AddHoles, HoleSettings, HolecutError};

fn print_usage() {
    eprintln!("Usage: add-holes <scene.json> [--settings <settings.json>]");
}

fn run(scene_path: &Path, settings_path: Option<&Path>) -> Result<(), HolecutError> {
    let settings = match settings_path {
        Some(path) => HoleSettings::load(path)?,
        None => HoleSettings::default(),
    };
    let mut app = Scene::load(scene_path)?.build()?;

    let report = AddHoles::new(settings).execute(&mut app)?;

    let doc = app.document(app.active_document())?;
    for id in report.holes() {
        let hole = doc.family_instance(id)?;
        let sizes: Vec<String> = hole
            .parameters
            .iter()
            .map(|(name, value)| format!("{name}={value:.3}"))
            .collect();
        println!(
            "hole at ({:.3}, {:.3}, {:.3}) {}",
            hole.position.x,
            hole.position.y,
            hole.position.z,
            sizes.join(" ")
        );
    }
    for skipped in &report.skipped {
        println!("skipped {:?} {:?}: {}", skipped.kind, skipped.element, skipped.reason);
    }
    println!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for holecut.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("holecut=info".parse().unwrap_or_default())
        .add_directive("add_holes=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return ExitCode::FAILURE;
    }

    let scene_path = PathBuf::from(&args[1]);
    let mut settings_path = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--settings" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    print_usage();
                    return ExitCode::FAILURE;
                };
                settings_path = Some(PathBuf::from(path));
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    match run(&scene_path, settings_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
