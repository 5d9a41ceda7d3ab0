// Configuration structs (judgment timing, screen layout, key bindings)

pub mod config;
pub mod input_config;
pub mod judge_config;
pub mod layout_config;

pub use config::Config;
pub use input_config::InputConfig;
pub use judge_config::JudgeConfig;
pub use layout_config::LayoutConfig;
