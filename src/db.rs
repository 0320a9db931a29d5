pub mod user_repo;
pub use user_repo::UserRepository;
pub mod record_repo;
pub use record_repo::RecordRepository;
