use thiserror::Error;

/// Out-of-range tuning values in a [`crate::CarouselConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("drag threshold must be finite and >= 0, got {0}")]
    InvalidThreshold(f32),
    #[error("elasticity must be within [0, 1], got {0}")]
    ElasticityOutOfRange(f32),
    #[error("page fraction must be within (0, 1], got {0}")]
    PageFractionOutOfRange(f32),
    #[error("fallback page step must be finite and > 0, got {0}")]
    InvalidFallbackStep(f32),
    #[error("edge epsilon must be finite and >= 0, got {0}")]
    InvalidEpsilon(f32),
    #[error("spring stiffness must be finite and > 0, got {0}")]
    NonPositiveStiffness(f32),
    #[error("spring damping must be finite and >= 0, got {0}")]
    NegativeDamping(f32),
    #[error("max fling velocity must be finite and > 0, got {0}")]
    InvalidFlingVelocity(f32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item at index {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate item id `{0}`")]
    DuplicateId(String),
}

/// An href that cannot be turned into a [`crate::LinkTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("link is empty")]
    Empty,
    #[error("mailto link has no address")]
    MissingAddress,
    #[error("unsupported link `{0}`")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Link(#[from] LinkError),
}
