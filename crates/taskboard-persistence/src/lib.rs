pub mod gateway;
pub mod repository;
pub mod serialization;
pub mod store;
pub mod traits;

pub use gateway::StorageGateway;
pub use repository::TaskRepository;
pub use serialization::*;
pub use store::*;
pub use traits::*;
