pub mod memory;
pub mod message_repository;
pub mod pool;
