use thiserror::Error;

/// Caller misuse of the frame protocol.
///
/// Any of these aborts the current viewport's layout: the frame stack is
/// discarded and later cells in the same viewport come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("pop_frame called with no open frame")]
    FrameUnderflow,
    #[error("pop_id called with no pushed id scope")]
    IdScopeUnderflow,
    #[error("pop_layer called with no pushed layer")]
    LayerUnderflow,
    #[error("unindent called with no matching indent")]
    IndentUnderflow,
    #[error("viewport ended with {open} frame(s) still open")]
    UnbalancedFrames { open: usize },
    #[error("viewport ended with {open} id scope(s) still pushed")]
    UnbalancedIdScopes { open: usize },
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
