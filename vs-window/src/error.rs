use thiserror::Error;

/// Setup-time configuration failures.
///
/// These prevent the engine from starting (or reject a runtime config change) instead of letting
/// it operate on undefined state. Steady-state recomputation never returns errors; it clamps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("collection source expression is empty")]
    EmptySourceExpression,

    #[error("expected `item in collection [track by expr]`, got {0:?}")]
    MalformedSourceExpression(String),

    #[error("scroll parent selector {0:?} did not match any element")]
    ScrollParentNotFound(String),

    #[error("element size must be finite and positive, got {0}")]
    InvalidElementSize(f64),

    #[error("items per row must be at least 1")]
    InvalidItemsPerRow,

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidOffset { name: &'static str, value: f64 },
}
