//! Numbered menus.
//!
//! A [`MenuState`] lists its options in ascending id order and hands the chosen
//! option's next-state provider control. Option descriptions are templates
//! rendered against live parameters on every display.

use crate::core::command::CommandRef;
use crate::core::context::{AppContext, UiContext};
use crate::core::input_parser::InputParser;
use crate::core::state::{State, Step};
use crate::core::templates::{render_template, TemplateParams};

pub const MENU_DESCRIPTION: &str =
    "You are in a menu. You need to enter the number of the menu item you wish to select.";

type ParamsProvider = Box<dyn Fn(&AppContext) -> TemplateParams>;
type NextProvider = Box<dyn Fn(&mut AppContext, &mut UiContext) -> Step>;

pub struct MenuOption {
    id: i64,
    description: String,
    params: Option<ParamsProvider>,
    next: NextProvider,
}

impl MenuOption {
    pub fn new(
        id: i64,
        description: impl Into<String>,
        next: impl Fn(&mut AppContext, &mut UiContext) -> Step + 'static,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            params: None,
            next: Box::new(next),
        }
    }

    /// "Back." option returning to the previous interactive state
    pub fn back(id: i64) -> Self {
        Self::new(id, "Back.", |app, _| app.previous_state().into())
    }

    /// Supply values for the description's placeholders, read at display time
    pub fn with_params(mut self, params: impl Fn(&AppContext) -> TemplateParams + 'static) -> Self {
        self.params = Some(Box::new(params));
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn render(&self, app: &AppContext) -> String {
        match &self.params {
            Some(params) => render_template(&self.description, &params(app)),
            None => self.description.clone(),
        }
    }

    pub fn select(&self, app: &mut AppContext, ui: &mut UiContext) -> Step {
        (self.next)(app, ui)
    }
}

pub struct MenuState {
    name: String,
    description: String,
    header: Option<String>,
    options: Vec<MenuOption>,
    commands: Vec<CommandRef>,
}

impl MenuState {
    /// Options are sorted by id; later duplicates of an id are dropped
    pub fn new(name: impl Into<String>, mut options: Vec<MenuOption>) -> Self {
        let name = name.into();
        options.sort_by_key(MenuOption::id);
        options.dedup_by(|later, kept| {
            let duplicate = later.id == kept.id;
            if duplicate {
                log::warn!("Menu '{name}' has a duplicate option {}", later.id);
            }
            duplicate
        });
        Self {
            name,
            description: MENU_DESCRIPTION.to_string(),
            header: None,
            options,
            commands: Vec::new(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_commands(mut self, commands: Vec<CommandRef>) -> Self {
        self.commands = commands;
        self
    }

    fn option(&self, id: i64) -> Option<&MenuOption> {
        self.options
            .binary_search_by_key(&id, MenuOption::id)
            .ok()
            .map(|index| &self.options[index])
    }
}

impl State for MenuState {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn local_commands(&self) -> Vec<CommandRef> {
        self.commands.clone()
    }

    fn display(&self, app: &AppContext, ui: &mut UiContext) {
        let mut text = String::new();
        if let Some(header) = &self.header {
            text.push_str(header);
            text.push('\n');
        }
        for option in &self.options {
            text.push_str(&format!("{}. {}\n", option.id, option.render(app)));
        }
        text.push_str("Make your choice.\n");
        ui.display(&text);
    }

    fn handle(&self, app: &mut AppContext, ui: &mut UiContext, input: &str) -> Step {
        let id = match InputParser::parse_int(input) {
            Ok(id) => id,
            Err(e) => return Step::rejected(e),
        };
        match self.option(id) {
            Some(option) => option.select(app, ui),
            None => {
                ui.display("There is no such item in the menu.\n");
                Step::stay()
            }
        }
    }
}
