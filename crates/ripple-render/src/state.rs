//! Viewer-facing scene state and the input events that change it.
//!
//! State transitions are pure: [`SceneState::apply`] and
//! [`SceneState::advance`] take the old state by value and return the new one.

use serde::{Deserialize, Serialize};

/// Camera behaviour selected by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Free fly-through.
    #[default]
    Explore,
    /// First-person view riding the shuttle.
    ShuttleFpp,
    /// Fixed position tracking the shuttle.
    LookingAt,
    /// Fixed position and target.
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shading {
    Flat,
    Gouraud,
    #[default]
    Phong,
}

/// Viewer input, already decoded from whatever windowing layer is in use.
///
/// Continuous adjustments carry the elapsed time `dt` in seconds they were
/// held for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ToggleDayNight,
    SelectCamera(CameraMode),
    SelectShading(Shading),
    ToggleShuttleMotion,
    RaiseReflectors,
    LowerReflectors,
    ReleaseReflectors,
    ThickenFog { dt: f64 },
    ThinFog { dt: f64 },
    RaiseGamma { dt: f64 },
    LowerGamma { dt: f64 },
}

/// Fog parameters for the current lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub density: f64,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneState {
    pub day: bool,
    pub camera: CameraMode,
    pub shading: Shading,
    pub gamma: f64,
    pub fog_density_day: f64,
    pub fog_density_night: f64,
    pub shuttle_moving: bool,
    pub reflectors_up: bool,
    pub reflectors_down: bool,
    /// Shuttle position along its orbit, radians.
    pub shuttle_angle: f64,
    /// Vertical offset of the reflector beams.
    pub reflector_offset: f64,
}

impl SceneState {
    pub const DEFAULT_GAMMA: f64 = 2.2;
    pub const MIN_GAMMA: f64 = 1.0;
    /// Gamma change per second while the key is held.
    pub const GAMMA_RATE: f64 = 0.1;
    pub const DAY_FOG_DENSITY: f64 = 0.001;
    pub const NIGHT_FOG_DENSITY: f64 = 0.0001;
    /// Day fog density change per second while the key is held.
    pub const FOG_RATE: f64 = 0.001;
    pub const DAY_FOG_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
    pub const NIGHT_FOG_COLOR: [f32; 3] = [0.1, 0.02, 0.0];
    pub const SHUTTLE_ANGULAR_SPEED: f64 = 0.6;
    pub const REFLECTOR_SPEED: f64 = 0.8;
    pub const DEFAULT_REFLECTOR_OFFSET: f64 = 0.3;

    /// Apply a single input event.
    pub fn apply(self, event: &InputEvent) -> SceneState {
        let mut next = self;
        match *event {
            InputEvent::ToggleDayNight => next.day = !next.day,
            InputEvent::SelectCamera(mode) => next.camera = mode,
            InputEvent::SelectShading(shading) => next.shading = shading,
            InputEvent::ToggleShuttleMotion => next.shuttle_moving = !next.shuttle_moving,
            InputEvent::RaiseReflectors => next.reflectors_up = true,
            InputEvent::LowerReflectors => next.reflectors_down = true,
            InputEvent::ReleaseReflectors => {
                next.reflectors_up = false;
                next.reflectors_down = false;
            }
            // Only the day density is adjustable; night fog is fixed.
            InputEvent::ThickenFog { dt } => next.fog_density_day += Self::FOG_RATE * dt,
            InputEvent::ThinFog { dt } => {
                next.fog_density_day = (next.fog_density_day - Self::FOG_RATE * dt).max(0.0);
            }
            InputEvent::RaiseGamma { dt } => next.gamma += Self::GAMMA_RATE * dt,
            InputEvent::LowerGamma { dt } => {
                next.gamma = (next.gamma - Self::GAMMA_RATE * dt).max(Self::MIN_GAMMA);
            }
        }
        next
    }

    /// Apply events in order.
    pub fn apply_all<'a, I>(self, events: I) -> SceneState
    where
        I: IntoIterator<Item = &'a InputEvent>,
    {
        events.into_iter().fold(self, |state, event| state.apply(event))
    }

    /// Advance time-driven scene motion by `dt` seconds.
    pub fn advance(self, dt: f64) -> SceneState {
        let mut next = self;
        if next.shuttle_moving {
            next.shuttle_angle =
                (next.shuttle_angle + Self::SHUTTLE_ANGULAR_SPEED * dt).rem_euclid(std::f64::consts::TAU);
        }
        // Holding both directions cancels out.
        if next.reflectors_up {
            next.reflector_offset += Self::REFLECTOR_SPEED * dt;
        }
        if next.reflectors_down {
            next.reflector_offset -= Self::REFLECTOR_SPEED * dt;
        }
        next
    }

    /// Fog for the current time of day.
    pub fn fog(&self) -> Fog {
        if self.day {
            Fog {
                density: self.fog_density_day,
                color: Self::DAY_FOG_COLOR,
            }
        } else {
            Fog {
                density: self.fog_density_night,
                color: Self::NIGHT_FOG_COLOR,
            }
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            day: true,
            camera: CameraMode::default(),
            shading: Shading::default(),
            gamma: Self::DEFAULT_GAMMA,
            fog_density_day: Self::DAY_FOG_DENSITY,
            fog_density_night: Self::NIGHT_FOG_DENSITY,
            shuttle_moving: true,
            reflectors_up: false,
            reflectors_down: false,
            shuttle_angle: 0.0,
            reflector_offset: Self::DEFAULT_REFLECTOR_OFFSET,
        }
    }
}
