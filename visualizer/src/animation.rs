//! Frame-paced stepping of a search session.

use std::ops::ControlFlow;

use astarviz_core::Effect;
use astarviz_search::{GridGraph, SearchSession, SearchStatus};

/// Advances a [`SearchSession`] by one step per host frame.
///
/// The driver never owns the session; the host passes it in together with
/// the graph on every call and forwards the returned [`Effect`]s to the
/// application loop.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    running: bool,
    steps: usize,
    outcome: Option<SearchStatus>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Steps taken since the last [`start`](Self::start).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Terminal status of the last run that finished on its own, `None`
    /// while running, after [`stop`](Self::stop) or before any run.
    #[inline]
    pub fn outcome(&self) -> Option<SearchStatus> {
        self.outcome
    }

    /// Reset `session` and request the first frame. Does nothing while a run
    /// is in progress.
    pub fn start(&mut self, session: &mut SearchSession, graph: &GridGraph) -> Option<Effect> {
        if self.running {
            return None;
        }
        session.reset(graph);
        self.running = true;
        self.steps = 0;
        self.outcome = None;
        log::info!("run started: {} -> {}", graph.start(), graph.goal());
        Some(Effect::RequestFrame)
    }

    /// Perform one step for a delivered frame. Frames arriving after the run
    /// ended are ignored.
    pub fn on_frame(&mut self, session: &mut SearchSession, graph: &GridGraph) -> Option<Effect> {
        if !self.running {
            return None;
        }
        self.steps += 1;
        match session.step(graph) {
            ControlFlow::Continue(()) => Some(Effect::RequestFrame),
            ControlFlow::Break(status) => {
                self.running = false;
                self.outcome = Some(status);
                log::info!("run finished after {} steps: {status:?}", self.steps);
                None
            }
        }
    }

    /// Restart the step count after the host reseeded the session of a run
    /// in progress.
    pub fn rewind(&mut self) {
        if self.running {
            self.steps = 0;
        }
    }

    /// Halt without touching the session, leaving its frontier and path as
    /// they are. Safe to call when idle.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("run stopped after {} steps", self.steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astarviz_core::Point;

    fn requested(effect: &Option<Effect>) -> bool {
        matches!(effect, Some(Effect::RequestFrame))
    }

    #[test]
    fn runs_to_success_one_step_per_frame() {
        let g = GridGraph::new(5, 5).unwrap();
        let mut s = SearchSession::new(&g);
        let mut a = AnimationDriver::new();

        assert!(requested(&a.start(&mut s, &g)));
        assert!(a.is_running());
        let mut frames = 0;
        while requested(&a.on_frame(&mut s, &g)) {
            frames += 1;
            assert_eq!(s.steps(), frames);
        }
        assert!(!a.is_running());
        assert_eq!(a.outcome(), Some(SearchStatus::Succeeded));
        assert_eq!(a.steps(), s.steps());
        assert_eq!(s.path().len(), 5);
    }

    #[test]
    fn start_is_ignored_while_running() {
        let g = GridGraph::new(5, 5).unwrap();
        let mut s = SearchSession::new(&g);
        let mut a = AnimationDriver::new();
        a.start(&mut s, &g);
        a.on_frame(&mut s, &g);
        a.on_frame(&mut s, &g);

        assert!(a.start(&mut s, &g).is_none());
        assert_eq!(s.steps(), 2);
        assert_eq!(a.steps(), 2);
    }

    #[test]
    fn stop_keeps_session_state() {
        let g = GridGraph::new(5, 5).unwrap();
        let mut s = SearchSession::new(&g);
        let mut a = AnimationDriver::new();
        a.start(&mut s, &g);
        a.on_frame(&mut s, &g);
        a.on_frame(&mut s, &g);
        a.stop();

        assert!(!a.is_running());
        assert_eq!(a.outcome(), None);
        assert_eq!(s.status(), SearchStatus::Running);
        assert_eq!(s.current(), Some(Point::new(1, 1)));

        // A frame already in flight does nothing.
        assert!(a.on_frame(&mut s, &g).is_none());
        assert_eq!(s.steps(), 2);

        a.stop();
        assert!(!a.is_running());
    }

    #[test]
    fn rewind_follows_a_reseeded_session() {
        let g = GridGraph::new(5, 5).unwrap();
        let mut s = SearchSession::new(&g);
        let mut a = AnimationDriver::new();
        a.rewind();
        assert_eq!(a.steps(), 0);

        a.start(&mut s, &g);
        a.on_frame(&mut s, &g);
        a.on_frame(&mut s, &g);
        s.reset(&g);
        a.rewind();
        assert_eq!(a.steps(), 0);
        while a.on_frame(&mut s, &g).is_some() {}
        assert_eq!(a.steps(), s.steps());

        // A finished run keeps its count.
        let steps = a.steps();
        a.rewind();
        assert_eq!(a.steps(), steps);
    }

    #[test]
    fn restart_resets_the_session() {
        let mut g = GridGraph::new(5, 5).unwrap();
        for y in 0..5 {
            g.set_wall(Point::new(2, y), true);
        }
        let mut s = SearchSession::new(&g);
        let mut a = AnimationDriver::new();
        a.start(&mut s, &g);
        while a.on_frame(&mut s, &g).is_some() {}
        assert_eq!(a.outcome(), Some(SearchStatus::Failed));

        g.set_wall(Point::new(2, 4), false);
        assert!(requested(&a.start(&mut s, &g)));
        assert_eq!(s.status(), SearchStatus::Idle);
        assert_eq!(a.steps(), 0);
        assert_eq!(a.outcome(), None);
        while a.on_frame(&mut s, &g).is_some() {}
        assert_eq!(a.outcome(), Some(SearchStatus::Succeeded));
    }
}
