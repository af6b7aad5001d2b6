pub mod annotation;
pub mod export;
pub mod session;
