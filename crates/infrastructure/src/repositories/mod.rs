pub mod tab_status_repository;

pub use tab_status_repository::SqliteTabStatusRepository;
