use serde::Serialize;

pub const EVENT_NEW_FEEDBACK: &str = "new_feedback";
pub const EVENT_FEEDBACK_UPDATED: &str = "feedback_updated";

/// Envelope for lifecycle events pushed to connected dashboard sessions.
///
/// Serialized shape: `{"type": "...", "data": {...}}`.
#[derive(Debug, Serialize)]
pub struct LifecycleEvent<T: Serialize> {
    #[serde(rename = "type")]
    pub event: &'static str,
    pub data: T,
}

impl<T: Serialize> LifecycleEvent<T> {
    pub fn new(event: &'static str, data: T) -> Self {
        Self { event, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_shape() {
        let event = LifecycleEvent::new(EVENT_NEW_FEEDBACK, serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "new_feedback");
        assert_eq!(value["data"]["id"], 1);
    }
}
