pub mod scheduler;
pub mod worker;

pub use scheduler::PollingController;
