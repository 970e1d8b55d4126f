pub mod feedback;
pub mod visibility;

pub use feedback::{Feedback, FeedbackPriority, FeedbackStatus, Location, MediaFile};
pub use visibility::FeedbackScope;
