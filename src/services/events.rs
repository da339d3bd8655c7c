use crate::models::RecommendationEvent;

/// Destination for learner interaction events
///
/// The engine never calls a sink itself; the HTTP layer forwards events the
/// client reports.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &RecommendationEvent);
}

/// Sink that emits events as structured tracing records
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: &RecommendationEvent) {
        tracing::info!(
            target: "matcha::events",
            event_id = %event.event_id,
            user_id = %event.user_id,
            item_id = %event.item_id,
            event_type = ?event.event_type,
            score = ?event.score,
            "Recommendation event recorded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationEventType;

    #[test]
    fn test_tracing_sink_accepts_events() {
        let sink: Box<dyn EventSink> = Box::new(TracingEventSink);
        sink.record(&RecommendationEvent {
            event_id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            item_id: "c1".to_string(),
            event_type: RecommendationEventType::Clicked,
            score: Some(0.82),
            created_at: chrono::Utc::now(),
        });
    }
}
