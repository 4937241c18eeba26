mod config;
pub mod history;
pub mod logging;

pub use config::{
    AgentConfig, DEFAULT_CRITERION, DEFAULT_SNIFF_LEN, ENV_DEFAULT_CRITERION, ENV_RECURSIVE,
    ENV_SNIFF_LEN, PROGRAM_LOG_LEVEL, PROGRAM_NAME, state_dir,
};

pub use logging::init;
