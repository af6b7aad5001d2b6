//! Repository for the `briquette_annotations` table.

use briq_core::annotation::Annotation;
use sqlx::PgPool;

/// Append-only access to the external annotation table.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert one annotation. The table is append-only; there are no
    /// update or delete paths.
    pub async fn insert(pool: &PgPool, annotation: &Annotation) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO briquette_annotations
                (briquette_id, briq_idx, signal, t_sec, value, note)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&annotation.briquette_id)
        .bind(annotation.briq_idx as i64)
        .bind(&annotation.signal)
        .bind(annotation.t_sec)
        .bind(annotation.value)
        .bind(&annotation.note)
        .execute(pool)
        .await
        .map(|_| ())
    }
}
