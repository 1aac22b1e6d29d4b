//! **astarviz**: an interactive terminal visualizer for incremental A*
//! search.
//!
//! Paint and erase walls with the mouse, move the start and goal, and watch
//! the search expand one node per frame. The [`Visualizer`] model runs on
//! the [`astarviz_core::App`] loop with the crossterm driver.

pub mod animation;
pub mod config;
pub mod controller;
pub mod layout;
pub mod model;

pub use animation::AnimationDriver;
pub use config::VisualizerConfig;
pub use controller::{Brush, Edit, EditState, InteractionController, Placement};
pub use layout::Layout;
pub use model::Visualizer;

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields() {
        let cfg: VisualizerConfig = serde_json::from_str(r#"{"size": 20}"#).unwrap();
        assert_eq!(cfg.size, 20);
        assert_eq!(cfg.fps, VisualizerConfig::default().fps);

        let json = serde_json::to_string(&Brush::Erase).unwrap();
        assert_eq!(json, "\"Erase\"");
    }
}
