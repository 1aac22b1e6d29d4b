//! **astarviz-core** holds the foundational types shared by the astarviz crates:
//! geometry primitives, input messages, styled screen cells, the screen grid
//! with frame diffing, and the Elm-architecture application loop with frame
//! pacing.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, DEFAULT_FRAME_INTERVAL};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Frame, Grid};
pub use messages::*;
pub use style::{AttrMask, Color, Style};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_and_range_round_trip() {
        let r = Range::new(1, 2, 10, 20);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.min, Point::new(1, 2));
    }

    #[test]
    fn key_round_trip() {
        let k = Key::Char('r');
        let json = serde_json::to_string(&k).unwrap();
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
