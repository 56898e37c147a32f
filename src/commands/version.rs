use crate::core::command::Command;
use crate::core::context::{AppContext, UiContext};
use crate::core::state::Step;
use chrono::DateTime;

pub const APP_NAME: &str = "Toby Doom Launcher";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build time stamp, RFC 3339, set by the packaging script
const BUILD_TIME: Option<&str> = option_env!("TOBY_LAUNCHER_BUILD_TIME");

pub struct VersionCommand;

impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Displays the current version of the application."
    }

    fn execute(&self, _app: &mut AppContext, ui: &mut UiContext, _args: &[String]) -> Step {
        ui.display(&format!("{}\n", version_line(BUILD_TIME)));
        Step::stay()
    }
}

/// "{app} version: {version}, built: {time}."
pub fn version_line(build_time: Option<&str>) -> String {
    let built = match build_time {
        Some(stamp) => DateTime::parse_from_rfc3339(stamp)
            .map(|time| time.format("%d.%m.%Y %H:%M:%S").to_string())
            .unwrap_or_else(|_| stamp.to_string()),
        None => "unknown".to_string(),
    };
    format!("{APP_NAME} version: {VERSION}, built: {built}.")
}
