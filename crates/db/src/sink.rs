//! PostgreSQL implementation of the annotation sink capability.

use async_trait::async_trait;
use briq_core::annotation::Annotation;
use briq_core::sink::{AnnotationSink, SinkError};

use crate::repositories::AnnotationRepo;
use crate::DbPool;

/// Forwards each accepted annotation to `briquette_annotations`.
///
/// Failures are reported with the database reason string; the caller
/// treats them as a non-fatal warning.
pub struct PgAnnotationSink {
    pool: DbPool,
}

impl PgAnnotationSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnotationSink for PgAnnotationSink {
    async fn send(&self, annotation: &Annotation) -> Result<(), SinkError> {
        AnnotationRepo::insert(&self.pool, annotation)
            .await
            .map_err(|e| SinkError::Send(format!("database sink: {e}")))?;
        tracing::debug!(
            briquette_id = %annotation.briquette_id,
            "Annotation forwarded to database sink"
        );
        Ok(())
    }
}
