// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Partitioned in-process event channel.
//!
//! Kafka-shaped semantics on tokio channels: records carry a partition key
//! and a JSON payload, all records with the same key land on the same
//! bounded partition and are delivered FIFO, and distinct keys may be
//! consumed concurrently. Publishing never blocks the producer; a full
//! partition rejects the record instead.
//!
//! Being in-process, there is no offset journal: a record handed to a
//! consumer is gone, and nothing is redelivered after a crash.

use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A single record on the bus: partition key plus JSON-serialized payload.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub key: String,
    pub payload: Vec<u8>,
}

/// Publish failures. Callers decide whether these are fatal; the bus itself
/// never retries.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("partition {0} queue is full")]
    QueueFull(usize),

    #[error("partition {0} has no consumer")]
    Closed(usize),

    #[error("event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Producer handle. Cheap to clone; all clones feed the same partitions.
#[derive(Clone)]
pub struct EventBus {
    partitions: Arc<Vec<mpsc::Sender<EventRecord>>>,
}

/// Consuming end of one partition. Exactly one exists per partition; the
/// owning consumer task processes its records sequentially, which is what
/// preserves per-key ordering.
pub struct PartitionStream {
    partition: usize,
    rx: mpsc::Receiver<EventRecord>,
}

impl EventBus {
    /// Create a bus with `partitions` bounded queues of `depth` records each.
    ///
    /// Returns the producer handle and one stream per partition.
    pub fn channel(partitions: usize, depth: usize) -> (Self, Vec<PartitionStream>) {
        assert!(partitions > 0, "event bus needs at least one partition");
        assert!(depth > 0, "event bus partitions need a nonzero depth");

        let mut senders = Vec::with_capacity(partitions);
        let mut streams = Vec::with_capacity(partitions);
        for partition in 0..partitions {
            let (tx, rx) = mpsc::channel(depth);
            senders.push(tx);
            streams.push(PartitionStream { partition, rx });
        }

        (
            Self {
                partitions: Arc::new(senders),
            },
            streams,
        )
    }

    /// Publish an event keyed by `key`, without blocking.
    ///
    /// The payload is serialized to JSON and enqueued on the key's
    /// partition. A full or closed partition fails immediately.
    pub fn publish<T: Serialize>(&self, key: &str, event: &T) -> Result<(), PublishError> {
        let partition = self.partition_for(key);
        let record = EventRecord {
            key: key.to_string(),
            payload: serde_json::to_vec(event)?,
        };

        self.partitions[partition]
            .try_send(record)
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => PublishError::QueueFull(partition),
                mpsc::error::TrySendError::Closed(_) => PublishError::Closed(partition),
            })
    }

    /// Number of partitions.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Stable key-to-partition mapping.
    pub fn partition_for(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.partitions.len() as u64) as usize
    }
}

impl PartitionStream {
    /// Receive the next record, or `None` once all producers are dropped.
    pub async fn recv(&mut self) -> Option<EventRecord> {
        self.rx.recv().await
    }

    /// Which partition this stream drains.
    pub fn partition(&self) -> usize {
        self.partition
    }
}
