pub mod log;
pub mod repo;

pub use repo::GitRepo;
