use thiserror::Error;

/// Coarse category of anything that can go wrong between a form submit and
/// the rendered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    ConnectionError,
    Unexpected,
    ValidationError,
}

/// Failure of an outbound call. `Display` is the message shown to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("⏳ Tiempo de espera agotado, intenta de nuevo.")]
    Timeout,

    #[error("❌ No se pudo conectar con el servidor, revisa tu conexión.")]
    Connection,

    #[error("Error inesperado: {0}")]
    Unexpected(String),
}

impl CallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallError::Timeout => ErrorKind::Timeout,
            CallError::Connection => ErrorKind::ConnectionError,
            CallError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Local form checks. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("⚠️ Por favor, introduce un texto para clasificar.")]
    EmptyUtterance,

    #[error("⚠️ Por favor, escribe una pregunta para realizar la consulta.")]
    EmptyQuestion,

    #[error("⚠️ Tipo de consulta desconocido: {0}")]
    UnknownDomain(String),
}

impl FormError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationError
    }
}

#[derive(Error, Debug)]
pub enum UiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, UiError>;
