pub mod commands;
pub mod engine;
pub mod metrics;
pub mod models;
pub mod rules;
pub mod seed;
pub mod store;
pub mod validation;

/// ASCII art logo for cadence CLI
pub const LOGO: &str = "\
   ┌─┐┌─┐┌┬┐┌─┐┌┐┌┌─┐┌─┐
   │  ├─┤ ││├┤ ││││  ├┤
   └─┘┴ ┴─┴┘└─┘┘└┘└─┘└─┘";
