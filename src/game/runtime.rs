//! Game loop driver
//!
//! Owns the current state and the shared engines, and runs
//! process_events → update → draw → present → frame wait until a state asks
//! to quit or the process is interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use macroquad::prelude::{get_time, next_frame};
use tracing::info;

use super::{Engines, GameState, Splash, Transition};
use crate::error::GameError;

/// Frame rate limiter
pub struct FrameClock {
    /// Target frame time in seconds (None = unlimited)
    frame_time: Option<f64>,
    frame_start: f64,
    /// Seconds since some fixed start
    now: fn() -> f64,
}

impl FrameClock {
    /// Limit to `frame_time` seconds per frame (None = unlimited)
    pub fn new(frame_time: Option<f64>) -> Self {
        Self::with_time_source(frame_time, get_time)
    }

    pub fn with_time_source(frame_time: Option<f64>, now: fn() -> f64) -> Self {
        Self {
            frame_time,
            frame_start: now(),
            now,
        }
    }

    /// Block until the current frame has used its budget, then start the next
    pub fn wait(&mut self) {
        if let Some(target) = self.frame_time {
            // Native: use sleep for bulk, then spin-wait for precision
            #[cfg(not(target_arch = "wasm32"))]
            {
                let spin_margin = 0.002; // 2ms
                while (self.now)() - self.frame_start + spin_margin < target {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while (self.now)() - self.frame_start < target {
                    std::hint::spin_loop();
                }
            }
            // WASM: just spin-wait (no thread::sleep available)
            #[cfg(target_arch = "wasm32")]
            {
                while (self.now)() - self.frame_start < target {}
            }
        }
        self.frame_start = (self.now)();
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// A state asked to quit
    Quit,
    /// The interrupt flag was raised
    Interrupted,
}

pub struct GameEngine {
    done: bool,
    current_state: Box<dyn GameState>,
    engines: Engines,
    clock: FrameClock,
    interrupt: Arc<AtomicBool>,
}

impl GameEngine {
    /// Start on the splash screen
    pub async fn new(mut engines: Engines, clock: FrameClock) -> Result<Self, GameError> {
        let splash = Splash::enter(&mut engines.context()).await?;
        Ok(Self::with_state(engines, clock, Box::new(splash)))
    }

    pub fn with_state(engines: Engines, clock: FrameClock, state: Box<dyn GameState>) -> Self {
        info!("Starting in {}", state.name());
        Self {
            done: false,
            current_state: state,
            engines,
            clock,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop at the top of the next tick once set
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[cfg(test)]
    pub fn state_name(&self) -> &'static str {
        self.current_state.name()
    }

    /// One pass of events, update and draw
    ///
    /// A quit from `process_events` skips update and draw.
    pub async fn tick(&mut self) -> Result<(), GameError> {
        let transition = self.current_state.process_events(&mut self.engines.context()).await?;
        match transition {
            Transition::Stay => {}
            Transition::Switch(next) => {
                info!("State {} -> {}", self.current_state.name(), next.name());
                self.current_state = next;
            }
            Transition::Quit => {
                info!("Quit requested in {}", self.current_state.name());
                self.done = true;
                return Ok(());
            }
        }

        let mut ctx = self.engines.context();
        self.current_state.update(&mut ctx);
        self.current_state.draw(&mut ctx);
        Ok(())
    }

    /// Run one frame; returns why the loop ended if it did
    pub async fn step(&mut self) -> Result<Option<Shutdown>, GameError> {
        if self.interrupt.load(Ordering::SeqCst) {
            info!("Stopped by user.");
            self.done = true;
            return Ok(Some(Shutdown::Interrupted));
        }
        if self.done {
            return Ok(Some(Shutdown::Quit));
        }

        self.tick().await?;
        if self.done {
            return Ok(Some(Shutdown::Quit));
        }

        self.engines.scene.refresh();
        self.clock.wait();
        Ok(None)
    }

    /// Main loop, yields to the window between frames
    pub async fn run(mut self) -> Result<Shutdown, GameError> {
        loop {
            if let Some(shutdown) = self.step().await? {
                return Ok(shutdown);
            }
            next_frame().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameContext;
    use crate::input::InputEvent;
    use crate::testing::{fixture_data_dir, test_engines, ScreenCall, SlowMusic};
    use async_trait::async_trait;
    use macroquad::prelude::KeyCode;
    use pollster::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::OnceLock;
    use std::time::Instant;

    /// Wall clock for tests, macroquad's needs a window
    fn test_now() -> f64 {
        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_secs_f64()
    }

    fn unlimited() -> FrameClock {
        FrameClock::with_time_source(None, test_now)
    }

    /// Counts calls and quits on the Nth drain
    struct CountingState {
        log: Rc<RefCell<Vec<&'static str>>>,
        quit_on: usize,
        drains: usize,
    }

    #[async_trait(?Send)]
    impl GameState for CountingState {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn process_events(&mut self, _ctx: &mut GameContext<'_>) -> Result<Transition, GameError> {
            self.drains += 1;
            self.log.borrow_mut().push("events");
            Ok(if self.drains == self.quit_on { Transition::Quit } else { Transition::Stay })
        }

        fn update(&mut self, _ctx: &mut GameContext<'_>) {
            self.log.borrow_mut().push("update");
        }

        fn draw(&mut self, _ctx: &mut GameContext<'_>) {
            self.log.borrow_mut().push("draw");
        }
    }

    #[test]
    fn test_frame_clock_waits_for_budget() {
        let mut clock = FrameClock::with_time_source(Some(0.01), test_now);
        let start = test_now();
        clock.wait();
        assert!(test_now() - start >= 0.009);

        // The next frame is measured from the end of the wait
        let start = test_now();
        clock.wait();
        assert!(test_now() - start >= 0.009);
    }

    #[test]
    fn test_unlimited_clock_does_not_wait() {
        let mut clock = unlimited();
        let start = test_now();
        clock.wait();
        assert!(test_now() - start < 0.5);
    }

    #[test]
    fn test_loop_stops_right_after_quit() {
        let dir = fixture_data_dir();
        let (engines, _recorders) = test_engines(dir.path());
        let log = Rc::new(RefCell::new(Vec::new()));
        let state = CountingState { log: log.clone(), quit_on: 2, drains: 0 };
        let mut engine = GameEngine::with_state(engines, unlimited(), Box::new(state));

        assert_eq!(block_on(engine.step()).unwrap(), None);
        assert_eq!(block_on(engine.step()).unwrap(), Some(Shutdown::Quit));
        assert!(engine.is_done());
        // Nothing runs once done
        assert_eq!(block_on(engine.step()).unwrap(), Some(Shutdown::Quit));

        assert_eq!(*log.borrow(), vec!["events", "update", "draw", "events"]);
    }

    #[test]
    fn test_interrupt_checked_before_tick() {
        let dir = fixture_data_dir();
        let (engines, _recorders) = test_engines(dir.path());
        let log = Rc::new(RefCell::new(Vec::new()));
        let state = CountingState { log: log.clone(), quit_on: 0, drains: 0 };
        let mut engine = GameEngine::with_state(engines, unlimited(), Box::new(state));

        assert_eq!(block_on(engine.step()).unwrap(), None);
        engine.interrupt_flag().store(true, Ordering::SeqCst);
        assert_eq!(block_on(engine.step()).unwrap(), Some(Shutdown::Interrupted));
        assert!(engine.is_done());
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_splash_to_playing_to_quit() {
        let dir = fixture_data_dir();
        let (engines, recorders) = test_engines(dir.path());
        let mut engine = block_on(GameEngine::new(engines, unlimited())).unwrap();
        assert_eq!(engine.state_name(), "splash");
        recorders.screen.clear();

        // Idle frame only re-presents the screen
        assert_eq!(block_on(engine.step()).unwrap(), None);
        assert_eq!(recorders.screen.calls(), vec![ScreenCall::Present]);

        recorders.events.push(vec![InputEvent::KeyDown(KeyCode::Enter)]);
        assert_eq!(block_on(engine.step()).unwrap(), None);
        assert_eq!(engine.state_name(), "playing");
        assert_eq!(recorders.music.tracks(), vec!["intro.ogg", "world-1.ogg"]);

        recorders.events.push(vec![InputEvent::KeyDown(KeyCode::Space)]);
        assert_eq!(block_on(engine.step()).unwrap(), None);
        assert_eq!(engine.state_name(), "playing");

        recorders.events.push(vec![InputEvent::KeyDown(KeyCode::Q)]);
        assert_eq!(block_on(engine.step()).unwrap(), Some(Shutdown::Quit));
    }

    #[test]
    fn test_switch_waits_for_slow_music_loader() {
        let dir = fixture_data_dir();
        let (mut engines, recorders) = test_engines(dir.path());
        engines.music = Box::new(SlowMusic::new(recorders.music.clone()));
        let mut engine = block_on(GameEngine::new(engines, unlimited())).unwrap();

        recorders.events.push(vec![InputEvent::KeyDown(KeyCode::Enter)]);
        assert_eq!(block_on(engine.step()).unwrap(), None);
        assert_eq!(engine.state_name(), "playing");
        assert_eq!(recorders.music.tracks(), vec!["intro.ogg", "world-1.ogg"]);
    }

    #[test]
    fn test_missing_splash_level_fails_startup() {
        let dir = fixture_data_dir();
        std::fs::remove_file(dir.path().join("level/splash.json")).unwrap();
        let (engines, recorders) = test_engines(dir.path());

        assert!(matches!(
            block_on(GameEngine::new(engines, unlimited())),
            Err(GameError::Level(_))
        ));
        assert!(recorders.screen.calls().is_empty());
    }
}
