// Repository modules
pub mod record_repository;
pub mod user_repository;

// Re-export repository types
pub use record_repository::RecordRepository;
pub use user_repository::UserRepository;
