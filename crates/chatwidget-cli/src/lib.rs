// Library interface for chatwidget-cli so integration tests can reach the
// rendering helpers. main.rs declares the same file, hence the path attribute.

#[path = "commands.rs"]
pub mod commands;

pub use commands::{
    describe_outcome, describe_test_failure, render_json, render_models, render_providers,
};
