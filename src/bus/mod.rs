// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process event bus decoupling ingestion from AI processing.

pub mod event_bus;

pub use event_bus::{EventBus, EventRecord, PartitionStream, PublishError};
