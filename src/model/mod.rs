//! In-memory building model acting as the modeling host.

mod document;
mod element;
mod intersector;
pub mod scene;

pub use document::Document;
pub use element::{
    Duct, DuctProfile, Element, FamilyInstance, FamilySymbol, Level, Pipe, View3D, Wall,
};
pub use intersector::WallIntersector;

pub(crate) use element::describe;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::host::{ConduitKind, ConduitRun, ModelRepository, PlacementHost, RayCaster};
use crate::placement::PlacementCommand;

slotmap::new_key_type! {
    /// Unique identifier for an open document.
    pub struct DocumentId;
}

slotmap::new_key_type! {
    /// Unique identifier for an element within its document.
    pub struct ElementId;
}

/// The set of open documents, one of which is active.
#[derive(Debug)]
pub struct Application {
    documents: SlotMap<DocumentId, Document>,
    active: DocumentId,
}

impl Application {
    /// Creates an application with `active` as the active document.
    #[must_use]
    pub fn new(active: Document) -> Self {
        let mut documents = SlotMap::with_key();
        let active = documents.insert(active);
        Self { documents, active }
    }

    /// Opens another document.
    pub fn open(&mut self, document: Document) -> DocumentId {
        self.documents.insert(document)
    }

    /// Makes an open document the active one.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not open.
    pub fn set_active(&mut self, id: DocumentId) -> Result<()> {
        self.document(id)?;
        self.active = id;
        Ok(())
    }

    /// Returns the document with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not open.
    pub fn document(&self, id: DocumentId) -> std::result::Result<&Document, ModelError> {
        self.documents
            .get(id)
            .ok_or_else(|| ModelError::EntityNotFound("document".into()))
    }

    /// Returns a mutable reference to the document with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not open.
    pub fn document_mut(
        &mut self,
        id: DocumentId,
    ) -> std::result::Result<&mut Document, ModelError> {
        self.documents
            .get_mut(id)
            .ok_or_else(|| ModelError::EntityNotFound("document".into()))
    }
}

impl ModelRepository for Application {
    fn active_document(&self) -> DocumentId {
        self.active
    }

    fn find_document_by_title_substring(&self, marker: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.title().contains(marker))
            .map(|(id, _)| id)
    }

    fn find_family_symbol(&self, doc: DocumentId, family_name: &str) -> Option<ElementId> {
        self.documents
            .get(doc)?
            .family_symbols()
            .find(|(_, symbol)| symbol.family_name == family_name)
            .map(|(id, _)| id)
    }

    fn find_first_non_template_view(&self, doc: DocumentId) -> Option<ElementId> {
        self.documents
            .get(doc)?
            .views()
            .find(|(_, view)| !view.is_template)
            .map(|(id, _)| id)
    }

    fn segments_of_kind(&self, doc: DocumentId, kind: ConduitKind) -> Result<Vec<ConduitRun>> {
        let doc = self.document(doc)?;
        let runs = match kind {
            ConduitKind::Duct => doc
                .ducts()
                .map(|(element, duct)| ConduitRun {
                    element,
                    kind,
                    location: duct.location.clone(),
                    diameter: duct.diameter(),
                })
                .collect(),
            ConduitKind::Pipe => doc
                .pipes()
                .map(|(element, pipe)| ConduitRun {
                    element,
                    kind,
                    location: pipe.location.clone(),
                    diameter: Some(pipe.diameter),
                })
                .collect(),
        };
        Ok(runs)
    }

    fn surface_caster(&self, doc: DocumentId, view: ElementId) -> Result<impl RayCaster + '_> {
        WallIntersector::new(self.document(doc)?, view)
    }

    fn host_level(&self, doc: DocumentId, surface: ElementId) -> Result<ElementId> {
        Ok(self.document(doc)?.wall(surface)?.level)
    }
}

impl PlacementHost for Application {
    fn transaction<T, F>(&mut self, doc: DocumentId, name: &str, work: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.document_mut(doc)?.begin_transaction(name)?;
        let outcome = work(self);
        let document = self.document_mut(doc)?;
        match outcome {
            Ok(value) => {
                document.commit()?;
                Ok(value)
            }
            Err(err) => {
                debug!(transaction = name, error = %err, "rolling back");
                document.rollback();
                Err(err)
            }
        }
    }

    fn activate_family_symbol(&mut self, doc: DocumentId, symbol: ElementId) -> Result<bool> {
        Ok(self.document_mut(doc)?.activate_symbol(symbol)?)
    }

    fn place(&mut self, doc: DocumentId, command: &PlacementCommand) -> Result<ElementId> {
        Ok(self.document_mut(doc)?.place_instance(command)?)
    }
}
