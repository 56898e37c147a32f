pub mod back;
pub mod confirm;
pub mod help;
pub mod quit;
pub mod version;

pub use back::*;
pub use confirm::*;
pub use help::*;
pub use quit::*;
pub use version::*;

use crate::core::command::CommandRef;
use std::rc::Rc;

/// Commands available in every interactive state
pub fn default_global_commands() -> Vec<CommandRef> {
    vec![
        Rc::new(HelpCommand),
        Rc::new(QuitCommand),
        Rc::new(VersionCommand),
    ]
}
