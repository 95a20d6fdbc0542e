//! JSON description of a set of open documents, used to seed an
//! [`Application`].
//!
//! ```json
//! {
//!   "documents": [
//!     {
//!       "title": "Office_AR",
//!       "levels": [{ "name": "L1", "elevation": 0.0 }],
//!       "walls": [{ "level": "L1", "start": [5, -5, 0], "end": [5, 5, 0],
//!                   "thickness": 0.3, "height": 3.0 }],
//!       "views": [{ "name": "{3D}" }],
//!       "families": [{ "family_name": "Hole", "name": "Round",
//!                      "parameters": ["Width", "Height"] }]
//!     },
//!     {
//!       "title": "Office_OV",
//!       "ducts": [{ "curve": { "type": "line", "start": [0, 0, 1], "end": [10, 0, 1] },
//!                   "profile": { "shape": "round", "diameter": 0.25 } }]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelError, Result, SceneError};
use crate::geometry::{Arc, LineSegment, LocationCurve};
use crate::host::ModelRepository;
use crate::math::{Point3, Vector3};

use super::{
    Application, Document, Duct, DuctProfile, ElementId, FamilySymbol, Level, Pipe, View3D, Wall,
};

/// A set of documents to open.
#[derive(Debug, Deserialize)]
pub struct Scene {
    /// Title of the active document; the first document when absent.
    #[serde(default)]
    pub active: Option<String>,
    pub documents: Vec<DocumentScene>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentScene {
    pub title: String,
    #[serde(default)]
    pub levels: Vec<LevelScene>,
    #[serde(default)]
    pub walls: Vec<WallScene>,
    #[serde(default)]
    pub ducts: Vec<DuctScene>,
    #[serde(default)]
    pub pipes: Vec<PipeScene>,
    #[serde(default)]
    pub views: Vec<ViewScene>,
    #[serde(default)]
    pub families: Vec<FamilyScene>,
}

#[derive(Debug, Deserialize)]
pub struct LevelScene {
    pub name: String,
    #[serde(default)]
    pub elevation: f64,
}

#[derive(Debug, Deserialize)]
pub struct WallScene {
    /// Name of the base level.
    pub level: String,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub thickness: f64,
    pub height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveScene {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        normal: [f64; 3],
        ref_dir: [f64; 3],
        start_angle: f64,
        end_angle: f64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ProfileScene {
    Round { diameter: f64 },
    Rectangular { width: f64, height: f64 },
}

#[derive(Debug, Deserialize)]
pub struct DuctScene {
    pub curve: CurveScene,
    pub profile: ProfileScene,
}

#[derive(Debug, Deserialize)]
pub struct PipeScene {
    pub curve: CurveScene,
    pub diameter: f64,
}

#[derive(Debug, Deserialize)]
pub struct ViewScene {
    pub name: String,
    #[serde(default)]
    pub is_template: bool,
}

#[derive(Debug, Deserialize)]
pub struct FamilyScene {
    pub family_name: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub parameters: Vec<String>,
}

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

impl CurveScene {
    fn build(&self) -> Result<LocationCurve> {
        Ok(match *self {
            Self::Line { start, end } => {
                LocationCurve::Line(LineSegment::from_points(point(start), point(end))?)
            }
            Self::Arc {
                center,
                radius,
                normal,
                ref_dir,
                start_angle,
                end_angle,
            } => LocationCurve::Arc(Arc::new(
                point(center),
                radius,
                vector(normal),
                vector(ref_dir),
                start_angle,
                end_angle,
            )?),
        })
    }
}

impl DocumentScene {
    fn build(&self) -> Result<Document> {
        let mut doc = Document::new(self.title.clone());

        let mut levels: HashMap<&str, ElementId> = HashMap::new();
        for level in &self.levels {
            let id = doc.add(Level {
                name: level.name.clone(),
                elevation: level.elevation,
            });
            levels.insert(level.name.as_str(), id);
        }

        for wall in &self.walls {
            let level = *levels
                .get(wall.level.as_str())
                .ok_or_else(|| ModelError::UnknownLevel {
                    name: wall.level.clone(),
                })?;
            doc.add(Wall {
                location: LineSegment::from_points(point(wall.start), point(wall.end))?,
                thickness: wall.thickness,
                height: wall.height,
                level,
            });
        }

        for duct in &self.ducts {
            let profile = match duct.profile {
                ProfileScene::Round { diameter } => DuctProfile::Round { diameter },
                ProfileScene::Rectangular { width, height } => {
                    DuctProfile::Rectangular { width, height }
                }
            };
            doc.add(Duct {
                location: duct.curve.build()?,
                profile,
            });
        }

        for pipe in &self.pipes {
            doc.add(Pipe {
                location: pipe.curve.build()?,
                diameter: pipe.diameter,
            });
        }

        for view in &self.views {
            doc.add(View3D {
                name: view.name.clone(),
                is_template: view.is_template,
                ..View3D::default()
            });
        }

        for family in &self.families {
            doc.add(FamilySymbol {
                family_name: family.family_name.clone(),
                name: family.name.clone(),
                is_active: family.active,
                parameters: family.parameters.clone(),
            });
        }

        Ok(doc)
    }
}

impl Scene {
    /// Parses a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scene.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text).map_err(SceneError::from)?)
    }

    /// Reads a scene from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Opens every document of the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene has no documents, names an unknown
    /// active document or level, or contains degenerate geometry.
    pub fn build(&self) -> Result<Application> {
        let (first, rest) = self
            .documents
            .split_first()
            .ok_or_else(|| ModelError::EntityNotFound("document".into()))?;

        let mut app = Application::new(first.build()?);
        let mut titles = vec![(app.active_document(), first.title.as_str())];
        for scene in rest {
            titles.push((app.open(scene.build()?), scene.title.as_str()));
        }

        if let Some(title) = &self.active {
            let (id, _) = titles
                .iter()
                .find(|(_, t)| *t == title.as_str())
                .ok_or_else(|| ModelError::EntityNotFound(format!("document {title:?}")))?;
            app.set_active(*id)?;
        }
        Ok(app)
    }
}
