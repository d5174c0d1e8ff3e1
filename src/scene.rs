//! Start menu and scene transitions

/// Host-side scene control
pub trait SceneLoader {
    /// Load the scene after the current one
    fn load_next(&mut self);
    /// Leave the application
    fn quit(&mut self);
}

/// Start menu: "Play" waits a short delay, then loads the game scene
#[derive(Debug, Clone)]
pub struct MenuFlow {
    delay: f32,
    countdown: Option<f32>,
    loaded: bool,
}

impl MenuFlow {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            countdown: None,
            loaded: false,
        }
    }

    /// Play pressed. Pressing again while waiting does not restart the wait.
    pub fn play(&mut self) {
        if self.countdown.is_none() && !self.loaded {
            log::info!("Play pressed, loading in {:.1}s", self.delay);
            self.countdown = Some(self.delay);
        }
    }

    /// Quit pressed
    pub fn quit(&mut self, loader: &mut dyn SceneLoader) {
        log::info!("Quit...");
        self.countdown = None;
        loader.quit();
    }

    /// Advance the wait; returns true on the tick the next scene is loaded
    pub fn tick(&mut self, dt: f32, loader: &mut dyn SceneLoader) -> bool {
        let Some(remaining) = self.countdown.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }
        self.countdown = None;
        self.loaded = true;
        loader.load_next();
        true
    }

    pub fn is_waiting(&self) -> bool {
        self.countdown.is_some()
    }
}
