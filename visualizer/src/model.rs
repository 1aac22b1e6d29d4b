//! The [`Visualizer`] application model.

use astarviz_core::{
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
    style::{AttrMask, Color, Style},
    Cell, Point,
};
use astarviz_search::{
    cell_role, CellRole, GridGraph, SearchSession, SearchStatus, MAX_SIZE, MIN_SIZE, SIZE_STEP,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::animation::AnimationDriver;
use crate::config::VisualizerConfig;
use crate::controller::{Brush, Edit, EditState, InteractionController, Placement};
use crate::layout::{Layout, CELL_WIDTH};

// Colours
const COL_START: Color = Color::from_rgb(0x0f, 0xff, 0x33);
const COL_GOAL: Color = Color::from_rgb(0xff, 0xcb, 0x0f);
const COL_WALL: Color = Color::from_rgb(0x66, 0x66, 0x66);
const COL_EMPTY: Color = Color::from_rgb(0x1f, 0x1f, 0x1f);
const COL_OPEN: Color = Color::from_rgb(0x1f, 0x4a, 0x26);
const COL_CLOSED: Color = Color::from_rgb(0x4a, 0x1f, 0x1f);
const COL_PATH: Color = Color::from_rgb(0x54, 0x7c, 0xff);
const COL_PATH_FINAL: Color = Color::from_rgb(0xff, 0xcb, 0x0f);
const COL_MARK: Color = Color::from_rgb(0x10, 0x10, 0x10);
const COL_STATUS_FG: Color = Color::from_rgb(200, 200, 200);
const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);
const COL_ERROR: Color = Color::from_rgb(0xff, 0x55, 0x55);
const COL_HELP: Color = Color::from_rgb(130, 130, 150);

const HELP_TEXT: &str = "enter/space start  x stop  c clear  r random  b wall  e eraser  \
s start  g goal  +/- size  q quit";

/// Owns the grid graph, the search session, the interaction controller and
/// the animation driver, and wires them to application messages.
pub struct Visualizer {
    config: VisualizerConfig,
    graph: GridGraph,
    session: SearchSession,
    controller: InteractionController,
    animator: AnimationDriver,
    rng: StdRng,
    no_path: bool,
}

impl Visualizer {
    /// Create a visualizer with a wall-free grid of `config.size`, seeding
    /// its wall randomizer from the thread-local generator.
    pub fn new(config: VisualizerConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`new`](Self::new) with a reproducible wall randomizer.
    pub fn with_seed(config: VisualizerConfig, seed: u64) -> Self {
        let config = config.validated();
        let graph = GridGraph::new(config.size, config.size).unwrap_or_default();
        let session = SearchSession::new(&graph);
        Self {
            config,
            graph,
            session,
            controller: InteractionController::new(),
            animator: AnimationDriver::new(),
            rng: StdRng::seed_from_u64(seed),
            no_path: false,
        }
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn animator(&self) -> &AnimationDriver {
        &self.animator
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Whether the last run ended without reaching the goal.
    pub fn no_path(&self) -> bool {
        self.no_path
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.graph.cols(), self.graph.rows())
    }

    fn reset_session(&mut self) {
        self.session.reset(&self.graph);
        self.no_path = false;
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Start animating a fresh search.
    pub fn start(&mut self) -> Option<Effect> {
        let effect = self.animator.start(&mut self.session, &self.graph);
        if effect.is_some() {
            self.no_path = false;
        }
        effect
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Advance the animation for a delivered frame.
    pub fn frame(&mut self) -> Option<Effect> {
        let effect = self.animator.on_frame(&mut self.session, &self.graph);
        if self.animator.outcome() == Some(SearchStatus::Failed) {
            self.no_path = true;
        }
        effect
    }

    /// Remove all walls. Refused while animating.
    pub fn clear_walls(&mut self) -> bool {
        if self.animator.is_running() {
            log::debug!("clear ignored while running");
            return false;
        }
        self.graph.clear_walls();
        self.reset_session();
        true
    }

    /// Replace the walls with a random layout. Allowed mid-run, in which
    /// case the run continues from a fresh session on the new layout.
    pub fn randomize_walls(&mut self) {
        self.graph
            .randomize_walls(self.config.wall_probability, &mut self.rng);
        self.reset_session();
        self.animator.rewind();
        log::info!(
            "walls randomized: {} of {} cells",
            self.graph.wall_count(),
            self.graph.len()
        );
    }

    /// Rebuild the grid as `size × size`. Refused while animating or for
    /// sizes outside the accepted range; returns whether the grid changed.
    pub fn resize(&mut self, size: i32) -> bool {
        if self.animator.is_running() {
            log::debug!("resize ignored while running");
            return false;
        }
        if size == self.graph.cols() && size == self.graph.rows() {
            return false;
        }
        if !self.graph.resize(size, size) {
            return false;
        }
        self.controller.pointer_up();
        self.reset_session();
        true
    }

    /// Step the grid size by [`SIZE_STEP`] in the direction of `delta`,
    /// clamped to the accepted range.
    pub fn step_size(&mut self, delta: i32) -> bool {
        let size = (self.graph.cols() + delta.signum() * SIZE_STEP).clamp(MIN_SIZE, MAX_SIZE);
        self.resize(size)
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.controller.set_brush(brush);
    }

    pub fn toggle_placement(&mut self, which: Placement) {
        self.controller.toggle_placement(which);
    }

    /// Press on grid cell `p`.
    pub fn pointer_down(&mut self, p: Point) {
        let running = self.animator.is_running();
        let edit = self.controller.pointer_down(&mut self.graph, p, running);
        self.apply_edit(edit);
    }

    /// Pointer over grid cell `p`.
    pub fn pointer_move(&mut self, p: Point) {
        let running = self.animator.is_running();
        let edit = self.controller.pointer_move(&mut self.graph, p, running);
        self.apply_edit(edit);
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    fn apply_edit(&mut self, edit: Option<Edit>) {
        if let Some(edit) = edit {
            log::debug!("grid edited: {edit:?}");
            self.reset_session();
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Enter | Key::Space => return self.start(),
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Char('x') => self.stop(),
            Key::Char('c') => {
                self.clear_walls();
            }
            Key::Char('r') => self.randomize_walls(),
            Key::Char('b') => self.set_brush(Brush::Paint),
            Key::Char('e') => self.set_brush(Brush::Erase),
            Key::Char('s') => self.toggle_placement(Placement::Start),
            Key::Char('g') => self.toggle_placement(Placement::Goal),
            Key::Char('+') | Key::Char('=') => {
                self.step_size(1);
            }
            Key::Char('-') => {
                self.step_size(-1);
            }
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        let cell = self.layout().to_grid(pos);
        match (action, cell) {
            (MouseAction::Main, Some(p)) => self.pointer_down(p),
            (MouseAction::Move, Some(p)) => self.pointer_move(p),
            // Leaving the grid ends the stroke.
            (MouseAction::Move, None) | (MouseAction::Release, _) => self.pointer_up(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn role_style(&self, role: CellRole) -> (char, Style) {
        let bg = match role {
            CellRole::Start => COL_START,
            CellRole::Goal => COL_GOAL,
            CellRole::Wall => COL_WALL,
            CellRole::Path if self.session.status() == SearchStatus::Succeeded => COL_PATH_FINAL,
            CellRole::Path => COL_PATH,
            CellRole::Open => COL_OPEN,
            CellRole::Closed => COL_CLOSED,
            CellRole::Empty => COL_EMPTY,
        };
        let ch = match role {
            CellRole::Start => 'S',
            CellRole::Goal => 'G',
            _ => ' ',
        };
        let style = Style::default()
            .with_fg(COL_MARK)
            .with_bg(bg)
            .with_attrs(AttrMask::BOLD);
        (ch, style)
    }

    fn status_line(&self) -> String {
        let mode = match self.controller.state() {
            EditState::Viewing => "view",
            EditState::SettingStart => "set start",
            EditState::SettingGoal => "set goal",
            EditState::Drawing(Brush::Paint) => "painting",
            EditState::Drawing(Brush::Erase) => "erasing",
        };
        let run = if self.animator.is_running() {
            "running"
        } else {
            match self.session.status() {
                SearchStatus::Idle => "idle",
                SearchStatus::Running => "stopped",
                SearchStatus::Succeeded => "found",
                SearchStatus::Failed => "failed",
            }
        };
        format!(
            " {}x{}  brush: {}  mode: {}  {}  steps {}  open {}  closed {}  path {:.2}",
            self.graph.cols(),
            self.graph.rows(),
            self.controller.brush().label(),
            mode,
            run,
            self.session.steps(),
            self.session.open_len(),
            self.session.closed_len(),
            self.session.path_length(),
        )
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key, .. } => self.on_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Frame { .. } => self.frame(),
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        let layout = self.layout();

        let status = Style::default().with_fg(COL_STATUS_FG).with_bg(COL_STATUS_BG);
        let line: String = format!("{:<w$}", self.status_line(), w = grid.width().max(0) as usize);
        grid.text(Point::new(0, Layout::STATUS_ROW), &line, status);

        if self.no_path {
            let style = Style::default().with_fg(COL_ERROR).with_attrs(AttrMask::BOLD);
            grid.text(Point::new(1, Layout::MESSAGE_ROW), "No path possible.", style);
        }

        for p in self.graph.range().iter() {
            let (ch, style) = self.role_style(cell_role(&self.graph, &self.session, p));
            let s = layout.to_screen(p);
            grid.set(s, Cell::default().with_char(ch).with_style(style));
            for dx in 1..CELL_WIDTH {
                grid.set(s.shift(dx, 0), Cell::default().with_char(' ').with_style(style));
            }
        }

        grid.text(
            Point::new(1, layout.help_row()),
            HELP_TEXT,
            Style::default().with_fg(COL_HELP),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viz(size: i32) -> Visualizer {
        Visualizer::with_seed(
            VisualizerConfig {
                size,
                ..VisualizerConfig::default()
            },
            7,
        )
    }

    fn press(v: &mut Visualizer, key: Key) -> Option<Effect> {
        v.update(Msg::key(key))
    }

    /// Deliver frames until the animation stops asking for them.
    fn run_frames(v: &mut Visualizer) -> usize {
        let mut frames = 0;
        while v.update(Msg::frame()).is_some() {
            frames += 1;
            assert!(frames <= v.graph().len(), "animation did not terminate");
        }
        frames + 1
    }

    #[test]
    fn enter_animates_to_a_path() {
        let mut v = viz(5);
        assert!(matches!(press(&mut v, Key::Enter), Some(Effect::RequestFrame)));
        assert!(v.animator().is_running());
        // A second start while running is ignored.
        assert!(press(&mut v, Key::Space).is_none());

        let frames = run_frames(&mut v);
        assert_eq!(frames, v.session().steps());
        assert_eq!(v.session().status(), SearchStatus::Succeeded);
        assert_eq!(v.session().path().len(), 5);
        assert!(!v.no_path());
    }

    #[test]
    fn failed_run_shows_no_path_until_next_run() {
        let mut v = viz(5);
        for y in 0..5 {
            v.pointer_down(Point::new(2, y));
            v.pointer_up();
        }
        press(&mut v, Key::Enter);
        run_frames(&mut v);
        assert_eq!(v.session().status(), SearchStatus::Failed);
        assert!(v.no_path());

        let mut grid = Grid::new(60, 12);
        v.draw(&mut grid);
        assert_eq!(grid.at(Point::new(1, Layout::MESSAGE_ROW)).ch, 'N');

        press(&mut v, Key::Enter);
        assert!(!v.no_path());
    }

    #[test]
    fn edits_are_blocked_while_running() {
        let mut v = viz(10);
        press(&mut v, Key::Enter);
        v.update(Msg::frame());

        v.pointer_down(Point::new(5, 5));
        assert!(!v.graph().is_wall(Point::new(5, 5)));
        assert!(!v.clear_walls());
        assert!(!v.step_size(1));
        assert_eq!(v.graph().cols(), 10);

        // Toolbar state may still change.
        press(&mut v, Key::Char('e'));
        assert_eq!(v.controller().brush(), Brush::Erase);

        press(&mut v, Key::Char('x'));
        assert!(!v.animator().is_running());
        assert_eq!(v.session().steps(), 1);
        assert!(v.update(Msg::frame()).is_none());
        assert!(v.step_size(1));
        assert_eq!(v.graph().cols(), 15);
    }

    #[test]
    fn randomize_is_allowed_mid_run() {
        let mut v = viz(10);
        press(&mut v, Key::Enter);
        v.update(Msg::frame());
        v.update(Msg::frame());

        press(&mut v, Key::Char('r'));
        assert!(v.animator().is_running());
        assert_eq!(v.session().status(), SearchStatus::Idle);
        assert_eq!(v.animator().steps(), 0);
        assert!(!v.graph().is_wall(v.graph().start()));
        assert!(!v.graph().is_wall(v.graph().goal()));

        run_frames(&mut v);
        assert!(v.session().status().is_finished());
        assert_eq!(v.animator().steps(), v.session().steps());
    }

    #[test]
    fn size_keys_step_and_clamp() {
        let mut v = viz(10);
        press(&mut v, Key::Char('+'));
        assert_eq!((v.graph().cols(), v.graph().rows()), (15, 15));
        press(&mut v, Key::Char('-'));
        press(&mut v, Key::Char('-'));
        assert_eq!(v.graph().cols(), 5);
        assert!(!v.step_size(-1));
        assert_eq!(v.graph().cols(), 5);
        assert_eq!(v.graph().start(), Point::new(0, 0));
        assert_eq!(v.graph().goal(), Point::new(4, 4));
    }

    #[test]
    fn mouse_paints_through_layout() {
        let mut v = viz(5);
        let layout = v.layout();
        let s = layout.to_screen(Point::new(1, 1));
        v.update(Msg::mouse(MouseAction::Main, s));
        v.update(Msg::mouse(MouseAction::Move, layout.to_screen(Point::new(2, 1)).shift(1, 0)));
        assert!(v.graph().is_wall(Point::new(1, 1)));
        assert!(v.graph().is_wall(Point::new(2, 1)));

        // Leaving the grid ends the stroke.
        v.update(Msg::mouse(MouseAction::Move, Point::new(0, 0)));
        v.update(Msg::mouse(MouseAction::Move, layout.to_screen(Point::new(3, 1))));
        assert!(!v.graph().is_wall(Point::new(3, 1)));
        assert_eq!(v.controller().state(), EditState::Viewing);
    }

    #[test]
    fn placement_keys_move_designators() {
        let mut v = viz(5);
        press(&mut v, Key::Char('g'));
        assert_eq!(v.controller().state(), EditState::SettingGoal);
        v.pointer_down(Point::new(2, 0));
        assert_eq!(v.graph().goal(), Point::new(2, 0));

        press(&mut v, Key::Enter);
        run_frames(&mut v);
        assert_eq!(v.session().path().len(), 3);
    }

    #[test]
    fn clear_resets_walls_and_session() {
        let mut v = viz(5);
        v.pointer_down(Point::new(2, 2));
        v.pointer_up();
        press(&mut v, Key::Enter);
        run_frames(&mut v);

        press(&mut v, Key::Char('c'));
        assert_eq!(v.graph().wall_count(), 0);
        assert_eq!(v.session().status(), SearchStatus::Idle);
        assert_eq!(v.session().closed_len(), 0);
    }

    #[test]
    fn draw_uses_role_colours() {
        let mut v = viz(5);
        v.pointer_down(Point::new(1, 0));
        v.pointer_up();
        let mut grid = Grid::new(60, 12);
        v.draw(&mut grid);

        let layout = v.layout();
        let start = grid.at(layout.to_screen(Point::new(0, 0)));
        assert_eq!(start.ch, 'S');
        assert_eq!(start.style.bg, COL_START);
        let wall = layout.to_screen(Point::new(1, 0));
        assert_eq!(grid.at(wall).style.bg, COL_WALL);
        assert_eq!(grid.at(wall.shift(1, 0)).style.bg, COL_WALL);
        assert_eq!(grid.at(layout.to_screen(Point::new(4, 4))).ch, 'G');

        press(&mut v, Key::Enter);
        run_frames(&mut v);
        v.draw(&mut grid);
        assert_eq!(
            grid.at(layout.to_screen(Point::new(2, 2))).style.bg,
            COL_PATH_FINAL
        );
    }

    #[test]
    fn quit_keys_end() {
        let mut v = viz(5);
        assert!(matches!(press(&mut v, Key::Char('q')), Some(Effect::End)));
        assert!(matches!(v.update(Msg::Quit), Some(Effect::End)));
    }
}
