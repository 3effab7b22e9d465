pub mod render;

pub use render::{display_alerts, display_scenario, display_solution};
