use thiserror::Error;

/// Top-level error type for hole placement.
#[derive(Debug, Error)]
pub enum HolecutError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A required document, family or view is missing.
///
/// Raised before any transaction is opened, so nothing has been mutated.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("no open document has {marker:?} in its title")]
    MissingSourceDocument { marker: String },

    #[error("hole family {name:?} is not loaded in the active document")]
    MissingFamily { name: String },

    #[error("the active document has no non-template 3D view")]
    MissingView,
}

/// Errors raised by the building model while reading or mutating elements.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("expected a {expected}, found a {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("modification outside of a transaction")]
    NoOpenTransaction,

    #[error("transaction {0:?} is already open")]
    TransactionAlreadyOpen(String),

    #[error("family symbol is not active")]
    SymbolNotActive,

    #[error("parameter {name:?} is not defined by the family")]
    ParameterNotFound { name: String },

    #[error("unknown level {name:?}")]
    UnknownLevel { name: String },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while loading a scene or settings file.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`HolecutError`].
pub type Result<T> = std::result::Result<T, HolecutError>;
