pub mod policy;
pub mod reports;
pub mod simulation;

pub use policy::GameplayStrategy;
pub use reports::{generate_console_report, generate_json_report, generate_markdown_report};
pub use simulation::{SimulationConfig, SimulationResult, run_simulation};
