pub mod annotation_repo;

pub use annotation_repo::AnnotationRepo;
