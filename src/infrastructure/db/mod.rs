pub mod connection;
pub mod interactions;
pub mod test_cases;

pub use connection::connect;
pub use interactions::{InteractionLog, InteractionRepository};
pub use test_cases::{TestCaseRepository, TestCaseStore};
