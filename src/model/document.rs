use std::collections::BTreeMap;

use slotmap::SlotMap;
use tracing::{debug, info};

use crate::error::ModelError;
use crate::placement::PlacementCommand;

use super::element::{Duct, Element, FamilyInstance, FamilySymbol, Level, Pipe, View3D, Wall};
use super::ElementId;

/// A transaction in progress, with the element state to restore on rollback.
#[derive(Debug)]
struct OpenTransaction {
    name: String,
    snapshot: SlotMap<ElementId, Element>,
}

/// One open model file.
///
/// Elements reference each other via [`ElementId`]s scoped to this document.
/// Setup code adds elements with [`Document::add`]; everything the hole
/// placement changes goes through a transaction.
#[derive(Debug)]
pub struct Document {
    title: String,
    elements: SlotMap<ElementId, Element>,
    open: Option<OpenTransaction>,
    history: Vec<String>,
}

macro_rules! typed_access {
    ($get:ident, $iter:ident, $variant:ident, $ty:ty, $expected:literal) => {
        #[doc = concat!("Returns the ", $expected, " with the given id.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the element does not exist or has another kind.
        pub fn $get(&self, id: ElementId) -> Result<&$ty, ModelError> {
            match self.element(id)? {
                Element::$variant(value) => Ok(value),
                other => Err(ModelError::WrongKind {
                    expected: $expected,
                    found: other.kind(),
                }),
            }
        }

        #[doc = concat!("Iterates over every ", $expected, " in insertion order.")]
        pub fn $iter(&self) -> impl Iterator<Item = (ElementId, &$ty)> + '_ {
            self.elements.iter().filter_map(|(id, element)| match element {
                Element::$variant(value) => Some((id, value)),
                _ => None,
            })
        }
    };
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: SlotMap::with_key(),
            open: None,
            history: Vec::new(),
        }
    }

    /// Returns the document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Adds an element while building the model.
    pub fn add(&mut self, element: impl Into<Element>) -> ElementId {
        self.elements.insert(element.into())
    }

    /// Returns the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.elements
            .get(id)
            .ok_or_else(|| ModelError::EntityNotFound("element".into()))
    }

    typed_access!(level, levels, Level, Level, "level");
    typed_access!(wall, walls, Wall, Wall, "wall");
    typed_access!(duct, ducts, Duct, Duct, "duct");
    typed_access!(pipe, pipes, Pipe, Pipe, "pipe");
    typed_access!(view, views, View3D, View3D, "3D view");
    typed_access!(family_symbol, family_symbols, FamilySymbol, FamilySymbol, "family symbol");
    typed_access!(
        family_instance,
        family_instances,
        FamilyInstance,
        FamilyInstance,
        "family instance"
    );

    // --- Transactions ---

    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if another transaction is already open.
    pub fn begin_transaction(&mut self, name: &str) -> Result<(), ModelError> {
        if let Some(open) = &self.open {
            return Err(ModelError::TransactionAlreadyOpen(open.name.clone()));
        }
        debug!(document = %self.title, transaction = name, "transaction started");
        self.open = Some(OpenTransaction {
            name: name.to_owned(),
            snapshot: self.elements.clone(),
        });
        Ok(())
    }

    /// Commits the open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open.
    pub fn commit(&mut self) -> Result<(), ModelError> {
        let open = self.open.take().ok_or(ModelError::NoOpenTransaction)?;
        info!(document = %self.title, transaction = %open.name, "transaction committed");
        self.history.push(open.name);
        Ok(())
    }

    /// Rolls back the open transaction, restoring every element to the state
    /// it had when the transaction started. Returns `false` if no transaction
    /// was open.
    pub fn rollback(&mut self) -> bool {
        match self.open.take() {
            Some(open) => {
                info!(document = %self.title, transaction = %open.name, "transaction rolled back");
                self.elements = open.snapshot;
                true
            }
            None => false,
        }
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.open.is_some()
    }

    /// Names of the committed transactions, oldest first.
    #[must_use]
    pub fn committed_transactions(&self) -> &[String] {
        &self.history
    }

    // --- Mutations ---

    fn ensure_transaction(&self) -> Result<(), ModelError> {
        if self.open.is_some() {
            Ok(())
        } else {
            Err(ModelError::NoOpenTransaction)
        }
    }

    /// Activates a family symbol. Returns `true` if it was inactive.
    ///
    /// # Errors
    ///
    /// Returns an error outside of a transaction or if `id` is not a family
    /// symbol.
    pub fn activate_symbol(&mut self, id: ElementId) -> Result<bool, ModelError> {
        self.ensure_transaction()?;
        match self.elements.get_mut(id) {
            Some(Element::FamilySymbol(symbol)) => {
                let was_inactive = !symbol.is_active;
                symbol.is_active = true;
                Ok(was_inactive)
            }
            Some(other) => Err(ModelError::WrongKind {
                expected: "family symbol",
                found: other.kind(),
            }),
            None => Err(ModelError::EntityNotFound("family symbol".into())),
        }
    }

    /// Creates a family instance hosted by a wall.
    ///
    /// Every parameter the family defines starts at zero; the command's
    /// parameter values are then applied.
    ///
    /// # Errors
    ///
    /// Returns an error outside of a transaction, if the symbol is inactive,
    /// if the host is not a wall or the level not a level, or if the command
    /// sets a parameter the family does not define.
    pub fn place_instance(&mut self, command: &PlacementCommand) -> Result<ElementId, ModelError> {
        self.ensure_transaction()?;

        let symbol = self.family_symbol(command.family_symbol)?;
        if !symbol.is_active {
            return Err(ModelError::SymbolNotActive);
        }
        self.wall(command.host_surface)?;
        self.level(command.level)?;

        let mut parameters: BTreeMap<String, f64> =
            symbol.parameters.iter().map(|p| (p.clone(), 0.0)).collect();
        for (name, value) in &command.parameters {
            let slot = parameters
                .get_mut(name)
                .ok_or_else(|| ModelError::ParameterNotFound { name: name.clone() })?;
            *slot = *value;
        }

        Ok(self.add(FamilyInstance {
            symbol: command.family_symbol,
            host: command.host_surface,
            level: command.level,
            position: command.position,
            structural_type: command.structural_type,
            parameters,
        }))
    }
}

macro_rules! into_element {
    ($($variant:ident),*) => {
        $(impl From<$variant> for Element {
            fn from(value: $variant) -> Self {
                Element::$variant(value)
            }
        })*
    };
}

into_element!(Level, Wall, Duct, Pipe, View3D, FamilySymbol, FamilyInstance);
