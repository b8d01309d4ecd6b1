pub mod coordinator;
pub mod scheduler;

pub use coordinator::Coordinator;
pub use scheduler::Scheduler;
