#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use sqlx::types::Json;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::auth::models::{User, UserRole};
#[cfg(test)]
use crate::features::feedback::models::{Feedback, FeedbackPriority, FeedbackStatus};

#[cfg(test)]
pub fn user_fixture(role: UserRole, department: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        password_hash: "$argon2id$test".to_string(),
        full_name: "Test User".to_string(),
        phone: None,
        role,
        department: department.map(String::from),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
pub fn feedback_fixture(user_id: Option<Uuid>, department: Option<&str>) -> Feedback {
    let now = Utc::now();
    Feedback {
        id: Uuid::new_v4(),
        title: "Streetlight out".to_string(),
        description: "The light on the corner has been dark for a week".to_string(),
        category_id: Uuid::new_v4(),
        status: FeedbackStatus::Pending,
        priority: FeedbackPriority::Medium,
        ai_urgency_score: Some(0.3),
        ai_sentiment: Some("neutral".to_string()),
        user_id,
        is_anonymous: user_id.is_none(),
        contact_info: None,
        location: None,
        media_files: Json(Vec::new()),
        assigned_to: None,
        assigned_at: None,
        department: department.map(String::from),
        created_at: now,
        updated_at: now,
        resolved_at: None,
        resolution_notes: None,
        resolution_media: Json(Vec::new()),
        citizen_rating: None,
        citizen_feedback_text: None,
    }
}
