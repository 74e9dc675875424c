pub mod banner;
pub mod cli;
pub mod render;
pub mod tui;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once before starting the interactive menu.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
