use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted after successful catalog mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CategoryCreated(Uuid),
    CategoryUpdated(Uuid),
    CategoryDeleted(Uuid),
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event; a full or closed channel is logged, never surfaced to
    /// the request that produced the event.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping event: {}", e);
        }
    }
}

/// Drains the event channel, logging each mutation for downstream visibility.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::CategoryCreated(id) => info!(category_id = %id, "category created"),
            Event::CategoryUpdated(id) => info!(category_id = %id, "category updated"),
            Event::CategoryDeleted(id) => info!(category_id = %id, "category deleted"),
            Event::ProductCreated(id) => info!(product_id = %id, "product created"),
            Event::ProductUpdated(id) => info!(product_id = %id, "product updated"),
            Event::ProductDeleted(id) => info!(product_id = %id, "product deleted"),
        }
    }

    info!("Event channel closed; stopping event processing loop");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_or_log_swallows_a_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let sender = EventSender::new(tx);
        // Must not panic or error out of the caller.
        sender.send_or_log(Event::ProductCreated(Uuid::new_v4())).await;
        assert!(sender.send(Event::ProductDeleted(Uuid::new_v4())).await.is_err());
    }

    #[tokio::test]
    async fn events_round_trip_through_the_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        let id = Uuid::new_v4();
        sender.send(Event::CategoryCreated(id)).await.unwrap();

        match rx.recv().await {
            Some(Event::CategoryCreated(received)) => assert_eq!(received, id),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
