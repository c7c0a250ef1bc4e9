use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::info;

use cdl_types::{EventKind, TransactionId};

use crate::event::AuditEvent;

/// Filter for subscribing to a subset of audit notifications.
#[derive(Clone, Debug, Default)]
pub struct AuditFilter {
    /// If set, only notifications for these transactions are delivered.
    pub transactions: Option<Vec<TransactionId>>,
    /// If set, only notifications of these event kinds are delivered.
    pub kinds: Option<Vec<EventKind>>,
}

impl AuditFilter {
    /// Returns `true` if the given notification matches this filter.
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(ref transactions) = self.transactions {
            if !transactions.contains(&event.transaction_id) {
                return false;
            }
        }
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        true
    }
}

/// A broadcast channel receiver for audit notifications.
pub type AuditStream = broadcast::Receiver<AuditEvent>;

/// Internal subscriber: a filter paired with a broadcast sender.
struct Subscriber {
    filter: AuditFilter,
    sender: broadcast::Sender<AuditEvent>,
}

/// Fan-out publisher for audit notifications.
///
/// Delivery is best-effort by construction: `publish` never blocks and
/// never returns an error. A subscriber whose channel is closed is
/// pruned; one whose channel is full loses the oldest notifications
/// (broadcast-lag semantics). Ledger correctness never depends on a
/// sink keeping up.
pub struct AuditPublisher {
    subscribers: RwLock<Vec<Subscriber>>,
    channel_capacity: usize,
}

impl AuditPublisher {
    /// Create a publisher whose per-subscriber channels hold `capacity`
    /// notifications.
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            channel_capacity: capacity.max(1),
        }
    }

    /// Register a new subscriber with the given filter.
    /// Returns a broadcast receiver for the matching notifications.
    pub fn subscribe(&self, filter: AuditFilter) -> AuditStream {
        let (tx, rx) = broadcast::channel(self.channel_capacity);
        let mut subs = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subs.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Publish a notification to all matching subscribers.
    /// Subscribers whose channels are closed are pruned.
    pub fn publish(&self, event: &AuditEvent) {
        info!(
            transaction = %event.transaction_id,
            document = %event.document_id,
            kind = %event.kind,
            actor = %event.actor,
            role = %event.role,
            hash_prefix = %event.hash_prefix,
            "ledger event recorded"
        );

        let mut subs = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subs.retain(|sub| {
            if sub.filter.matches(event) {
                // If send fails (no receivers), the subscriber is stale.
                sub.sender.send(event.clone()).is_ok()
            } else {
                // Keep non-matching subscribers; they may match future
                // notifications. Prune only closed channels.
                sub.sender.receiver_count() > 0
            }
        });
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Default for AuditPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use cdl_types::{ActorId, ActorRole, ContentHash, DocumentId, Timestamp};

    use super::*;

    fn audit_event(kind: EventKind, tx_seq: u64) -> AuditEvent {
        AuditEvent::new(
            kind,
            TransactionId::new(2024, tx_seq),
            DocumentId::mint(Timestamp::from_millis(1_700_000_000_000 + tx_seq)),
            ActorId::parse("clerk@county.example.gov").unwrap(),
            ActorRole::CountyClerk,
            &ContentHash::from_hash([5; 32]),
            Timestamp::from_millis(1_700_000_000_500),
        )
    }

    #[test]
    fn publish_with_no_subscribers_is_a_noop() {
        let publisher = AuditPublisher::default();
        publisher.publish(&audit_event(EventKind::Upload, 1));
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn matching_subscriber_receives_notification() {
        let publisher = AuditPublisher::default();
        let mut stream = publisher.subscribe(AuditFilter::default());

        let event = audit_event(EventKind::Recorded, 1);
        publisher.publish(&event);

        assert_eq!(stream.try_recv().unwrap(), event);
    }

    #[test]
    fn kind_filter_excludes_non_matching() {
        let publisher = AuditPublisher::default();
        let mut stream = publisher.subscribe(AuditFilter {
            kinds: Some(vec![EventKind::Recorded]),
            ..Default::default()
        });

        publisher.publish(&audit_event(EventKind::Upload, 1));
        assert!(stream.try_recv().is_err());

        let recorded = audit_event(EventKind::Recorded, 1);
        publisher.publish(&recorded);
        assert_eq!(stream.try_recv().unwrap(), recorded);
    }

    #[test]
    fn transaction_filter_excludes_other_transactions() {
        let publisher = AuditPublisher::default();
        let mut stream = publisher.subscribe(AuditFilter {
            transactions: Some(vec![TransactionId::new(2024, 1)]),
            ..Default::default()
        });

        publisher.publish(&audit_event(EventKind::Upload, 2));
        assert!(stream.try_recv().is_err());

        let matching = audit_event(EventKind::Upload, 1);
        publisher.publish(&matching);
        assert_eq!(stream.try_recv().unwrap(), matching);
    }

    #[test]
    fn dropped_subscriber_is_pruned_on_next_publish() {
        let publisher = AuditPublisher::default();
        let stream = publisher.subscribe(AuditFilter::default());
        assert_eq!(publisher.subscriber_count(), 1);

        drop(stream);
        publisher.publish(&audit_event(EventKind::View, 1));
        assert_eq!(publisher.subscriber_count(), 0);
    }
}
