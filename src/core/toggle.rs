use crate::core::config::Config;
use crate::core::context::{AppContext, UiContext};
use crate::core::menu::MenuOption;
use crate::core::state::{State, Step};
use crate::core::templates::TemplateParams;
use std::rc::Rc;

/// Handle to one boolean setting inside [`Config`]
#[derive(Clone, Copy)]
pub struct ConfigFlag {
    read: fn(&Config) -> &bool,
    write: fn(&mut Config) -> &mut bool,
}

impl ConfigFlag {
    pub fn new(read: fn(&Config) -> &bool, write: fn(&mut Config) -> &mut bool) -> Self {
        Self { read, write }
    }

    pub fn get(&self, config: &Config) -> bool {
        *(self.read)(config)
    }

    /// Flip the flag and return the new value
    pub fn toggle(&self, config: &mut Config) -> bool {
        let flag = (self.write)(config);
        *flag = !*flag;
        *flag
    }
}

/// Transient state flipping one setting, then rewinding
pub struct ToggleState {
    option: String,
    flag: ConfigFlag,
    depth: usize,
}

impl ToggleState {
    pub fn new(option: impl Into<String>, flag: ConfigFlag) -> Self {
        Self {
            option: option.into(),
            flag,
            depth: 1,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl State for ToggleState {
    fn name(&self) -> &str {
        "toggle option"
    }

    fn requires_input(&self) -> bool {
        false
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, _input: &str) -> Step {
        let enabled = self.flag.toggle(&mut app.config);
        let status = if enabled { "enabled" } else { "disabled" };
        log::info!("{} {status}", self.option);
        ui.display(&format!("{} is {status}.\n", self.option));
        app.rewind(self.depth).into()
    }
}

/// Menu entry reading "enable {option}." or "disable {option}." and leading to a [`ToggleState`]
pub fn toggle_option(id: i64, option: &'static str, flag: ConfigFlag) -> MenuOption {
    MenuOption::new(id, "{action} {option}.", move |_, _| {
        Step::to(Rc::new(ToggleState::new(option, flag)))
    })
    .with_params(move |app| {
        let action = if flag.get(&app.config) { "disable" } else { "enable" };
        TemplateParams::new()
            .with("action", action)
            .with("option", option)
    })
}
