pub mod conflict;
pub mod leaves;
