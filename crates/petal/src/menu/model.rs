use super::{
    CONTAINER_INSET, OPEN_DURATION, PETAL_RADIUS, PETAL_SIZE, REVERSE_ROTATE_KEY, ROTATE_KEY,
    ROTATION_ARC, SCALE_FACTOR, ZOOM_IN_KEY, ZOOM_OUT_KEY, animation, layout,
};
use crate::actions::TapCommand;
use crate::assets::{self, IconAsset};
use crate::config::PetalConfig;
use sepal::{AnimationEvent, AnimationEventKind, Layer, LayerId, Size, Timeline, TimelineError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum MenuState {
    #[default]
    Normal,
    Animating,
    Zoomed,
}

/// Image and tap action for one petal, resolved by the host.
#[derive(Debug, Clone, Default)]
pub struct PetalInit {
    pub icon: Option<PathBuf>,
    pub action: Option<TapCommand>,
}

impl PetalInit {
    pub fn resolve(icon: Option<&IconAsset>, action: Option<TapCommand>) -> Self {
        let icon = icon.and_then(|name| {
            let path = assets::find_icon_path(name);
            if path.is_none() {
                // Tolerated: the petal is simply created without an image.
                log::debug!("no icon found for '{}'", name);
            }
            path
        });
        Self { icon, action }
    }
}

/// One child button on the petal ring. Tap handling belongs to the host; the
/// button only carries the image and the action it hands back.
#[derive(Debug, Clone)]
pub struct PetalButton {
    layer: LayerId,
    icon: Option<PathBuf>,
    action: Option<TapCommand>,
}

impl PetalButton {
    fn new(layer: LayerId, init: PetalInit) -> Self {
        Self {
            layer,
            icon: init.icon,
            action: init.action,
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<PathBuf>) {
        self.icon = icon;
    }

    pub fn action(&self) -> Option<&TapCommand> {
        self.action.as_ref()
    }
}

/// The petal menu control: a scalable root layer holding a rotating petal
/// container. Touch begin/end/cancel drive the state machine; animation
/// lifecycle events delivered back through [`handle_animation_event`]
/// finalize the visual state.
///
/// [`handle_animation_event`]: PetalMenu::handle_animation_event
pub struct PetalMenu {
    control: LayerId,
    container: LayerId,
    petals: Vec<PetalButton>,
    state: MenuState,
    touch_started_at: Option<Duration>,
}

impl PetalMenu {
    pub fn new(
        timeline: &mut Timeline,
        bounds: Size,
        petals: Vec<PetalInit>,
    ) -> Result<Self, TimelineError> {
        let control = timeline.add_layer(Layer::new(bounds));

        let mut container = Layer::new(bounds.inset(CONTAINER_INSET));
        container.position = bounds.center();
        container.opacity = 0.0;
        let container = timeline.add_layer(container);

        let mut menu = Self {
            control,
            container,
            petals: Vec::new(),
            state: MenuState::Normal,
            touch_started_at: None,
        };
        menu.set_petals(timeline, petals)?;
        Ok(menu)
    }

    pub fn from_config(
        timeline: &mut Timeline,
        bounds: Size,
        config: &PetalConfig,
    ) -> Result<Self, TimelineError> {
        Self::new(timeline, bounds, Self::init_petals(config))
    }

    pub fn init_petals(config: &PetalConfig) -> Vec<PetalInit> {
        config
            .petals
            .iter()
            .map(|slot| PetalInit::resolve(slot.icon.as_ref(), slot.action.clone()))
            .collect()
    }

    /// Replaces the petal ring and lays the new petals out circularly.
    /// Positions are assigned here once and never recomputed.
    pub fn set_petals(
        &mut self,
        timeline: &mut Timeline,
        petals: Vec<PetalInit>,
    ) -> Result<(), TimelineError> {
        for petal in self.petals.drain(..) {
            timeline.remove_layer(petal.layer);
        }

        self.petals = petals
            .into_iter()
            .map(|init| {
                let layer = timeline.add_layer(Layer::new(Size::new(PETAL_SIZE, PETAL_SIZE)));
                PetalButton::new(layer, init)
            })
            .collect();

        let layers: Vec<LayerId> = self.petals.iter().map(|p| p.layer).collect();
        layout::layout_circularly(timeline, self.container, &layers, PETAL_RADIUS)
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn control(&self) -> LayerId {
        self.control
    }

    pub fn container(&self) -> LayerId {
        self.container
    }

    pub fn petals(&self) -> &[PetalButton] {
        &self.petals
    }

    pub fn petal(&self, index: usize) -> Option<&PetalButton> {
        self.petals.get(index)
    }

    pub fn touch_began(
        &mut self,
        timeline: &mut Timeline,
        now: Duration,
    ) -> Result<(), TimelineError> {
        if self.state == MenuState::Zoomed {
            self.end_animations(timeline, now)
        } else {
            self.start_animations(timeline, now)
        }
    }

    pub fn touch_ended(
        &mut self,
        timeline: &mut Timeline,
        now: Duration,
    ) -> Result<(), TimelineError> {
        self.end_animations(timeline, now)
    }

    pub fn touch_cancelled(
        &mut self,
        timeline: &mut Timeline,
        now: Duration,
    ) -> Result<(), TimelineError> {
        self.end_animations(timeline, now)
    }

    fn start_animations(
        &mut self,
        timeline: &mut Timeline,
        now: Duration,
    ) -> Result<(), TimelineError> {
        if self.state == MenuState::Animating {
            return Ok(());
        }

        timeline.add_animation(self.control, ZOOM_IN_KEY, animation::zoom(false))?;
        timeline.add_animation(self.container, ROTATE_KEY, animation::rotate(false))?;
        self.touch_started_at = Some(now);
        self.state = MenuState::Animating;
        Ok(())
    }

    fn end_animations(
        &mut self,
        timeline: &mut Timeline,
        now: Duration,
    ) -> Result<(), TimelineError> {
        // Absolute difference: a clock anomaly reads as a long hold.
        let held = self
            .touch_started_at
            .map(|started| now.abs_diff(started))
            .unwrap_or_default();

        match self.state {
            MenuState::Animating if held >= OPEN_DURATION / 2 => {
                // Hold: the in-flight opening animation finishes on its own
                // and finalizes through its completion callback.
                self.state = MenuState::Zoomed;
            }
            MenuState::Animating | MenuState::Zoomed => {
                // Tap: reverse from the in-flight presentation value.
                let current_scale = timeline.presentation(self.control)?.scale;
                timeline.remove_all_animations(self.control)?;
                timeline.remove_all_animations(self.container)?;
                timeline.add_animation(
                    self.control,
                    ZOOM_OUT_KEY,
                    animation::zoom_out(current_scale, 1.0),
                )?;
                timeline.add_animation(self.container, REVERSE_ROTATE_KEY, animation::rotate(true))?;
                self.state = MenuState::Normal;
            }
            MenuState::Normal => {}
        }
        Ok(())
    }

    /// Feeds one animation lifecycle event back into the control. Events for
    /// animations no longer registered under their key are ignored.
    pub fn handle_animation_event(
        &mut self,
        timeline: &mut Timeline,
        event: &AnimationEvent,
    ) -> Result<(), TimelineError> {
        match event.kind {
            AnimationEventKind::Started => self.animation_started(timeline, event),
            AnimationEventKind::Stopped { finished } => {
                self.animation_stopped(timeline, event, finished)
            }
        }
    }

    fn animation_started(
        &mut self,
        timeline: &mut Timeline,
        event: &AnimationEvent,
    ) -> Result<(), TimelineError> {
        if timeline.animation_for_key(self.control, ZOOM_OUT_KEY) != Some(event.id) {
            return Ok(());
        }

        // The reverse transition begins: collapse the model state now so no
        // stale expanded state can show through.
        let control = timeline.layer_mut(self.control)?;
        control.scale = 1.0;
        control.rotation = 0.0;
        let container = timeline.layer_mut(self.container)?;
        container.scale = 1.0;
        container.rotation = 0.0;
        container.opacity = 0.0;
        Ok(())
    }

    fn animation_stopped(
        &mut self,
        timeline: &mut Timeline,
        event: &AnimationEvent,
        finished: bool,
    ) -> Result<(), TimelineError> {
        if !finished || timeline.animation_for_key(self.container, ROTATE_KEY) != Some(event.id) {
            return Ok(());
        }

        // Opening rotation ran to completion: snap the exact end state
        // rather than trusting interpolated values to persist.
        timeline.layer_mut(self.control)?.scale = SCALE_FACTOR;
        let container = timeline.layer_mut(self.container)?;
        container.rotation = ROTATION_ARC;
        container.opacity = 1.0;
        Ok(())
    }
}
