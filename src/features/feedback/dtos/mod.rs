pub mod feedback_dto;

pub use feedback_dto::{
    CreateFeedbackDto, FeedbackListQuery, FeedbackResponseDto, RateFeedbackDto, UpdateFeedbackDto,
};
