//! 持久化实现

mod converters;
mod memory;
mod postgres;
mod rows;

pub use memory::InMemoryPosRepository;
pub use postgres::{PostgresPosRepository, migrations};
