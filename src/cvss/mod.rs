pub mod metrics;
pub mod score;

pub use metrics::{
    AttackComplexity, AttackVector, Impact, MetricSelection, PrivilegesRequired, Scope,
    UserInteraction,
};
pub use score::{base_score, severity_from_score};
