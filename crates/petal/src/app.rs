use crate::actions;
use crate::config;
use crate::events::{AppEvent, TouchPhase};
use crate::menu::{MenuState, PetalMenu};
use sepal::{Timeline, TimelineError};
use std::time::Instant;

/// Owns the timeline and the menu, and applies app events serially. All
/// state transitions happen on the thread running [`AppModel::run`].
pub struct AppModel {
    timeline: Timeline,
    menu: PetalMenu,
    started: Instant,
    last_state: MenuState,
}

impl AppModel {
    pub fn new(timeline: Timeline, menu: PetalMenu) -> Self {
        let last_state = menu.state();
        Self {
            timeline,
            menu,
            started: Instant::now(),
            last_state,
        }
    }

    pub fn run(mut self, rx: async_channel::Receiver<AppEvent>) {
        while let Ok(event) = rx.recv_blocking() {
            if !self.update(event) {
                break;
            }
        }
    }

    /// Applies one event; returns `false` when the app should exit.
    pub fn update(&mut self, event: AppEvent) -> bool {
        let now = self.started.elapsed();

        let result = match event {
            AppEvent::Tick => self.tick(now),
            AppEvent::Touch(phase) => {
                log::debug!("touch {}", phase);
                match phase {
                    TouchPhase::Began => self.menu.touch_began(&mut self.timeline, now),
                    TouchPhase::Ended => self.menu.touch_ended(&mut self.timeline, now),
                    TouchPhase::Cancelled => self.menu.touch_cancelled(&mut self.timeline, now),
                }
            }
            AppEvent::Tap(index) => {
                self.tap(index);
                Ok(())
            }
            AppEvent::ConfigReload => self.reload_config(),
            AppEvent::Quit => return false,
        };

        if let Err(e) = result {
            log::error!("Timeline error: {}", e);
        }

        if self.menu.state() != self.last_state {
            log::info!("menu {} -> {}", self.last_state, self.menu.state());
            self.last_state = self.menu.state();
        }
        true
    }

    fn tick(&mut self, now: std::time::Duration) -> Result<(), TimelineError> {
        for event in self.timeline.advance(now) {
            self.menu.handle_animation_event(&mut self.timeline, &event)?;
        }
        Ok(())
    }

    fn tap(&mut self, index: usize) {
        let Some(action) = self.menu.petal(index).and_then(|p| p.action().cloned()) else {
            log::debug!("tap on petal {} with no action", index);
            return;
        };

        if action.as_str() == "PETAL_SETUP" {
            if let Ok(path) = config::write_default_config() {
                let _ = std::process::Command::new("xdg-open").arg(&path).spawn();
            }
        } else if let Err(e) = actions::spawn(&action) {
            log::error!("Failed to run action for petal {}: {}", index, e);
        }
    }

    fn reload_config(&mut self) -> Result<(), TimelineError> {
        match config::load_config() {
            Ok(new_config) => {
                crate::assets::refresh_cache();
                let petals = PetalMenu::init_petals(&new_config);
                self.menu.set_petals(&mut self.timeline, petals)?;
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
        Ok(())
    }
}
