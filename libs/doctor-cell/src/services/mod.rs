pub mod store;
pub mod postgres;
pub mod memory;
pub mod doctor;
pub mod availability;

pub use store::DirectoryStore;
pub use postgres::PgDirectoryStore;
pub use memory::InMemoryDirectoryStore;
pub use doctor::DoctorService;
pub use availability::AvailabilityService;
