pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AnalyzeRequest, AnalysisResponse, ConditionProbability, Severity};
pub use router::novelty_routes;
