use super::types::RootId;

#[derive(Debug, PartialEq, Eq)]
pub enum BackendError {
    /// Another backend is already installed on this event-listening root.
    AlreadySetUp { root: RootId },
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySetUp { root } => write!(
                f,
                "cannot have two drag-and-drop backends on the same root at the same time ({root:?})"
            ),
        }
    }
}

impl std::error::Error for BackendError {}
