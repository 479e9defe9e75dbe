//! Mapping entity representing a shortened URL.

/// An immutable association between a short token and its target URL.
///
/// The target is stored verbatim, without normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub token: String,
    pub target: String,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(token: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            target: target.into(),
        }
    }
}
