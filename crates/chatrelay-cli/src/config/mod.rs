mod settings;

pub use settings::{ChatGptConfig, CliConfig};
