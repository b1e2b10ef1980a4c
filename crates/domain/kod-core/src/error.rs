/// Why a catalog document could not be turned into data.
///
/// Both variants are terminal for a page view: there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("catalog request failed: {0}")]
    Network(String),
    #[error("catalog is malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    Network,
    Malformed,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Network(_) => LoadErrorKind::Network,
            LoadError::Malformed(_) => LoadErrorKind::Malformed,
        }
    }
}
