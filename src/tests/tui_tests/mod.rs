// TUI Tests Module - Testing the public tui module
// Tests organized by TUI module structure:
// - app_tests: App flows against a mock backend
// - input_tests: Key dispatch
// - screens_tests: Screen state structs and the delete gate
// - types_tests: Screen, tab and info field enums
// - ui_tests: Rendering smoke tests on a TestBackend

mod helpers;
mod screens_tests;
mod ui_tests;
