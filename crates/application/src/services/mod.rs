mod status_evaluator;

pub use status_evaluator::StatusEvaluator;
