//! The annotation sink capability seam.
//!
//! An optional external store can receive a copy of every accepted
//! annotation. The sink is strictly best-effort: it is called after
//! the in-memory append succeeds, its failure never rolls back or
//! blocks the append, and the failure reason is surfaced to the user
//! as a non-fatal warning. The core never queries the sink.

use async_trait::async_trait;

use crate::annotation::Annotation;

/// Why a sink send failed. The reason string is shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("{0}")]
    Send(String),
}

/// Best-effort forward of one annotation to an external store.
#[async_trait]
pub trait AnnotationSink: Send + Sync {
    async fn send(&self, annotation: &Annotation) -> Result<(), SinkError>;
}

/// Deterministic sink doubles for tests.
pub mod doubles {
    use std::sync::Mutex;

    use super::*;

    /// Accepts every send and records it.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        received: Mutex<Vec<Annotation>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn received(&self) -> Vec<Annotation> {
            self.received.lock().expect("sink mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl AnnotationSink for RecordingSink {
        async fn send(&self, annotation: &Annotation) -> Result<(), SinkError> {
            self.received
                .lock()
                .expect("sink mutex poisoned")
                .push(annotation.clone());
            Ok(())
        }
    }

    /// Fails every send with a fixed reason.
    #[derive(Debug)]
    pub struct FailingSink {
        pub reason: String,
    }

    impl FailingSink {
        pub fn new(reason: impl Into<String>) -> Self {
            Self {
                reason: reason.into(),
            }
        }
    }

    #[async_trait]
    impl AnnotationSink for FailingSink {
        async fn send(&self, _annotation: &Annotation) -> Result<(), SinkError> {
            Err(SinkError::Send(self.reason.clone()))
        }
    }
}
