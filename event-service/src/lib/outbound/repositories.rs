pub mod event;
pub mod memory;
pub mod user;

pub use event::PostgresEventRepository;
pub use memory::InMemoryEventRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
