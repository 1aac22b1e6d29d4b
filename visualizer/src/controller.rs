//! Pointer and toolbar interaction: wall painting, erasing and designator
//! placement.

use astarviz_core::Point;
use astarviz_search::GridGraph;

/// What a wall stroke does to the cells it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Brush {
    #[default]
    Paint,
    Erase,
}

impl Brush {
    #[inline]
    fn makes_wall(self) -> bool {
        self == Self::Paint
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Paint => "wall",
            Self::Erase => "eraser",
        }
    }
}

/// Which designator the next pointer press relocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    Start,
    Goal,
}

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    SettingStart,
    SettingGoal,
    Drawing(Brush),
}

/// A grid mutation accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Walls,
    Start,
    Goal,
}

/// Turns pointer presses, drags and releases in grid coordinates into grid
/// mutations.
///
/// Every method that may mutate the graph takes a `running` flag and does
/// nothing while an animation is in progress. Accepted mutations are
/// returned so the caller can reset its search session.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    brush: Brush,
    placement: Option<Placement>,
    drawing: Option<Brush>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        match (self.placement, self.drawing) {
            (Some(Placement::Start), _) => EditState::SettingStart,
            (Some(Placement::Goal), _) => EditState::SettingGoal,
            (None, Some(brush)) => EditState::Drawing(brush),
            (None, None) => EditState::Viewing,
        }
    }

    #[inline]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Select the brush used by later strokes. A stroke in progress keeps
    /// the brush it started with.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    #[inline]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Arm `which` for the next press, or disarm it if it is already
    /// armed. Arming one placement disarms the other.
    pub fn toggle_placement(&mut self, which: Placement) {
        self.placement = if self.placement == Some(which) {
            None
        } else {
            Some(which)
        };
        self.drawing = None;
    }

    /// Handle a press on grid cell `p`.
    ///
    /// With a placement armed the matching designator is moved to `p` and
    /// the placement is disarmed whether or not the move succeeded.
    /// Otherwise a press on a free or wall cell applies the brush and
    /// begins a stroke.
    pub fn pointer_down(&mut self, graph: &mut GridGraph, p: Point, running: bool) -> Option<Edit> {
        if running {
            return None;
        }
        match self.placement.take() {
            Some(Placement::Start) => return graph.move_start(p).then_some(Edit::Start),
            Some(Placement::Goal) => return graph.move_goal(p).then_some(Edit::Goal),
            None => {}
        }
        if !graph.contains(p) || graph.is_designator(p) {
            return None;
        }
        self.drawing = Some(self.brush);
        graph
            .set_wall(p, self.brush.makes_wall())
            .then_some(Edit::Walls)
    }

    /// Handle the pointer entering grid cell `p`. Extends a stroke in
    /// progress.
    pub fn pointer_move(&mut self, graph: &mut GridGraph, p: Point, running: bool) -> Option<Edit> {
        if running {
            return None;
        }
        let brush = self.drawing?;
        graph.set_wall(p, brush.makes_wall()).then_some(Edit::Walls)
    }

    /// End any stroke in progress. Also used when the pointer leaves the
    /// grid or the gesture is cancelled.
    pub fn pointer_up(&mut self) {
        self.drawing = None;
    }
}
