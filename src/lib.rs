//! Modal prompts for interactive installers, rendered by the `dialog`
//! program.
//!
//! ```ignore
//! use installer_dialog::{Dialog, MenuItem};
//!
//! let dialog = Dialog::new();
//! if dialog.yesno("Install", "Erase /dev/sda and install?")? {
//!     let password = dialog.password("Root Password", None, None)?;
//! }
//! ```

mod common;
pub mod config;
pub mod dialog;
pub mod i18n;
mod logging;

pub use common::{PROJECT_NAME, PROJECT_VERSION};
pub use config::{Config, ConfigureArgs, DialogSettings, configure, show_configuration};
pub use dialog::{
    BoxSize, Dialog, DialogError, ListItem, MenuItem, Outcome, ProcessRunner, PromptResult,
    Runner,
};
pub use logging::Logging;
