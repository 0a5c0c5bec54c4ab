//! Ledger notifications and the sinks that deliver them
//!
//! The ledger announces every successful mutation by handing a
//! [`TokenEvent`] to an [`EventSink`] synchronously, after the state change
//! is applied. The ledger does not care where events go; this module ships a
//! few sinks:
//!
//! - [`EventLog`]: in-memory, sequenced and optionally bounded
//! - [`LogSink`]: writes through the `log` facade
//! - [`EventBroadcaster`]: fans out to async subscribers over a tokio channel
//! - `()`: discards everything

use crate::token::address::Address;
use crate::token::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::broadcast;

/// Maximum number of events to buffer per broadcast subscriber
pub const BROADCAST_CAPACITY: usize = 100;

/// Events a ledger's default [`EventLog`] retains
pub const HISTORY_CAPACITY: usize = 100;

/// Emitted once per successful `transfer` or `transfer_from`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: Amount,
}

/// Emitted once per successful `approve`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Transfer(Transfer),
    Approval(Approval),
}

impl TokenEvent {
    /// Event name as announced to observers
    pub fn name(&self) -> &'static str {
        match self {
            TokenEvent::Transfer(_) => "Transfer",
            TokenEvent::Approval(_) => "Approval",
        }
    }

    pub fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            TokenEvent::Transfer(t) => Some(t),
            TokenEvent::Approval(_) => None,
        }
    }

    pub fn as_approval(&self) -> Option<&Approval> {
        match self {
            TokenEvent::Approval(a) => Some(a),
            TokenEvent::Transfer(_) => None,
        }
    }
}

impl From<Transfer> for TokenEvent {
    fn from(event: Transfer) -> Self {
        TokenEvent::Transfer(event)
    }
}

impl From<Approval> for TokenEvent {
    fn from(event: Approval) -> Self {
        TokenEvent::Approval(event)
    }
}

/// Receives ledger notifications
pub trait EventSink {
    fn emit(&mut self, event: &TokenEvent);
}

impl EventSink for () {
    fn emit(&mut self, _event: &TokenEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &TokenEvent) {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &TokenEvent) {
        (**self).emit(event)
    }
}

/// Delivers each event to both sinks, left first
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &TokenEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

/// An event as recorded by [`EventLog`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the overall event stream, starting at 0
    pub sequence: u64,
    pub event: TokenEvent,
    pub recorded_at: DateTime<Utc>,
}

/// In-memory event history
///
/// Sequence numbers keep counting when a bounded log evicts old records.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: VecDeque<EventRecord>,
    capacity: Option<usize>,
    next_sequence: u64,
}

impl EventLog {
    /// Create an unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the last [`HISTORY_CAPACITY`] events
    pub fn recent() -> Self {
        Self::bounded(HISTORY_CAPACITY)
    }

    /// Create a log that keeps only the most recent `capacity` events
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &TokenEvent> {
        self.records.iter().map(|r| &r.event)
    }

    pub fn transfers(&self) -> impl Iterator<Item = &Transfer> {
        self.events().filter_map(TokenEvent::as_transfer)
    }

    pub fn approvals(&self) -> impl Iterator<Item = &Approval> {
        self.events().filter_map(TokenEvent::as_approval)
    }

    /// Most recent event
    pub fn last(&self) -> Option<&TokenEvent> {
        self.records.back().map(|r| &r.event)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of events ever recorded, including evicted ones
    pub fn total_recorded(&self) -> u64 {
        self.next_sequence
    }

    /// Drop all retained records. Sequence numbering continues.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &TokenEvent) {
        if self.capacity == Some(0) {
            self.next_sequence += 1;
            return;
        }

        self.records.push_back(EventRecord {
            sequence: self.next_sequence,
            event: event.clone(),
            recorded_at: Utc::now(),
        });
        self.next_sequence += 1;

        if let Some(capacity) = self.capacity {
            while self.records.len() > capacity {
                self.records.pop_front();
            }
        }
    }
}

/// Writes every event to the `log` facade at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &TokenEvent) {
        match event {
            TokenEvent::Transfer(t) => {
                log::info!("Transfer: {} -> {} ({})", t.from, t.to, t.value)
            }
            TokenEvent::Approval(a) => {
                log::info!("Approval: {} allows {} ({})", a.owner, a.spender, a.value)
            }
        }
    }
}

/// Broadcaster for ledger events
#[derive(Clone, Debug)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<TokenEvent>,
}

impl EventBroadcaster {
    /// Create a new broadcaster
    pub fn new() -> Self {
        Self::with_capacity(BROADCAST_CAPACITY)
    }

    /// A capacity of 0 is raised to 1, the smallest channel tokio allows
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<TokenEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBroadcaster {
    fn emit(&mut self, event: &TokenEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(value: Amount) -> TokenEvent {
        Transfer {
            from: Address::from_low_u8(1),
            to: Address::from_low_u8(2),
            value,
        }
        .into()
    }

    fn approval(value: Amount) -> TokenEvent {
        Approval {
            owner: Address::from_low_u8(1),
            spender: Address::from_low_u8(3),
            value,
        }
        .into()
    }

    #[test]
    fn test_event_log_sequences_and_filters() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.emit(&transfer(10));
        log.emit(&approval(20));
        log.emit(&transfer(30));

        assert_eq!(log.len(), 3);
        let sequences: Vec<u64> = log.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(log.transfers().map(|t| t.value).collect::<Vec<_>>(), vec![10, 30]);
        assert_eq!(log.approvals().count(), 1);
        assert_eq!(log.last(), Some(&transfer(30)));
    }

    #[test]
    fn test_bounded_log_evicts_oldest() {
        let mut log = EventLog::bounded(2);
        for value in 1..=5 {
            log.emit(&transfer(value));
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.total_recorded(), 5);
        let kept: Vec<(u64, Amount)> = log
            .records()
            .map(|r| (r.sequence, r.event.as_transfer().unwrap().value))
            .collect();
        assert_eq!(kept, vec![(3, 4), (4, 5)]);

        log.clear();
        assert!(log.is_empty());
        log.emit(&transfer(6));
        assert_eq!(log.records().next().unwrap().sequence, 5);
    }

    #[test]
    fn test_zero_capacity_log_counts_only() {
        let mut log = EventLog::bounded(0);
        log.emit(&transfer(1));
        assert!(log.is_empty());
        assert_eq!(log.total_recorded(), 1);
    }

    #[test]
    fn test_tuple_sink_fans_out() {
        let mut sink = (EventLog::new(), EventLog::new());
        sink.emit(&approval(5));
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.1.len(), 1);
    }

    #[test]
    fn test_event_serializes_under_its_name() {
        let json = serde_json::to_value(transfer(100)).unwrap();
        assert_eq!(json["Transfer"]["from"], "0x0000000000000000000000000000000000000001");
        assert_eq!(json["Transfer"]["to"], "0x0000000000000000000000000000000000000002");
        assert_eq!(json["Transfer"]["value"], 100);

        let text = serde_json::to_string(&approval(u128::MAX)).unwrap();
        let back: TokenEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, approval(u128::MAX));
        assert_eq!(transfer(1).name(), "Transfer");
        assert_eq!(approval(1).name(), "Approval");
    }

    #[tokio::test]
    async fn test_broadcaster_delivers_to_subscribers() {
        let mut broadcaster = EventBroadcaster::new();
        // No subscribers yet: must not fail
        broadcaster.emit(&transfer(1));

        let mut rx = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 1);

        broadcaster.emit(&approval(2));
        assert_eq!(rx.recv().await.unwrap(), approval(2));
    }

    #[tokio::test]
    async fn test_broadcaster_zero_capacity() {
        let mut broadcaster = EventBroadcaster::with_capacity(0);
        let mut rx = broadcaster.subscribe();

        broadcaster.emit(&transfer(7));
        assert_eq!(rx.recv().await.unwrap(), transfer(7));
    }
}
