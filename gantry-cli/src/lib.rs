pub mod console;
pub mod entry;
pub mod error;
pub mod supervisor;
pub mod terminal;

pub use console::Console;
pub use entry::LaunchPlan;
pub use error::SupervisorError;
pub use supervisor::{ChildHandle, ChildSlot, Command, Exit, Spawner, Supervisor, TokioSpawner};
