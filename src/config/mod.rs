/// Main configuration module.
///
/// Re-exports submodules for grid layout and style-source configuration.
pub mod grid;
pub mod style;
