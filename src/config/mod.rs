mod loader;
pub use loader::{Config, ConfigureArgs, DialogSettings, configure, show_configuration};
