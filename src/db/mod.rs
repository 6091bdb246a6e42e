//! Data-access layer: connection pool, transactional session scope and the
//! sensor repository built on top of them.

pub mod pool;
pub mod repository;
pub mod schema;
pub mod session;

pub use repository::{Record, SensorRepository};
pub use session::{SessionError, SessionScope};
