//! Routes console commands to the runtime and decides what to print.

use directory_core::{DirectoryRuntime, Intent};

use crate::{
    controller::events::{ConsoleCommand, HELP_TEXT},
    render::{render_options, render_view, Palette},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies `command` and returns the text to print along with whether the
/// loop should keep running.
pub fn dispatch_console_command(
    runtime: &mut DirectoryRuntime,
    command: ConsoleCommand,
    colors: bool,
) -> (Flow, String) {
    tracing::debug!(command = command.name(), "dispatching console command");

    let output = match command {
        ConsoleCommand::Quit => return (Flow::Quit, String::new()),
        ConsoleCommand::Help => format!("{HELP_TEXT}\n"),
        ConsoleCommand::Roles => {
            let state = runtime.state();
            render_options("All Roles", &state.store.role_options(), &state.criteria.role)
        }
        ConsoleCommand::Locations => {
            let state = runtime.state();
            render_options(
                "All Locations",
                &state.store.location_options(),
                &state.criteria.location,
            )
        }
        ConsoleCommand::Apply(Intent::ToggleDarkMode) => {
            runtime.dispatch(Intent::ToggleDarkMode);
            let mode = if runtime.state().dark_mode { "dark" } else { "light" };
            format!("theme: {mode}\n")
        }
        ConsoleCommand::Apply(intent) => {
            runtime.dispatch(intent);
            current_view(runtime, colors)
        }
        ConsoleCommand::Show => current_view(runtime, colors),
    };

    (Flow::Continue, output)
}

pub fn current_view(runtime: &DirectoryRuntime, colors: bool) -> String {
    let view = runtime.state().view();
    render_view(&view, Palette::select(view.dark_mode, colors))
}
