pub mod analyzer_service;
pub mod feedback_service;

pub use analyzer_service::AnalyzerService;
pub use feedback_service::FeedbackService;
