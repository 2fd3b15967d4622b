//! Pointer and keyboard input for the windowed host.
//!
//! [`PointerInput`] turns cursor pixels into normalized device coordinates.
//! [`ControlPanel`] stands in for a slider panel: each bound key nudges one
//! swarm parameter by its slider step, clamped to the slider range.
//!
//! | keys  | parameter | range           | step  |
//! |-------|-----------|-----------------|-------|
//! | Q / A | spread    | 0 ..= 1000      | 100   |
//! | W / S | size      | 0.01 ..= 0.5    | 0.01  |
//! | E / D | count     | 0 ..= 100000    | 1000  |
//! | R / F | speed     | 0.001 ..= 0.1   | 0.001 |

use std::ops::RangeInclusive;

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::{
    SwarmConfig, COUNT_RANGE, COUNT_STEP, SIZE_RANGE, SIZE_STEP, SPEED_RANGE, SPEED_STEP,
    SPREAD_RANGE, SPREAD_STEP,
};

/// Tracks the cursor against the window size.
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    window_size: (u32, u32),
    position: Vec2,
    ndc: Option<Vec2>,
}

impl PointerInput {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Self::default()
        }
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        if self.ndc.is_some() {
            self.ndc = to_ndc(self.position, self.window_size);
        }
    }

    /// Record a cursor position in physical pixels. Returns the new NDC, if
    /// the window has a usable size.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<Vec2> {
        self.position = Vec2::new(x, y);
        self.ndc = to_ndc(self.position, self.window_size);
        self.ndc
    }

    /// Last cursor position in pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor in NDC: origin at the centre, `x` right, `y` up.
    pub fn ndc(&self) -> Option<Vec2> {
        self.ndc
    }
}

fn to_ndc(position: Vec2, (w, h): (u32, u32)) -> Option<Vec2> {
    if w == 0 || h == 0 {
        return None;
    }
    Some(Vec2::new(
        (position.x / w as f32) * 2.0 - 1.0,
        1.0 - (position.y / h as f32) * 2.0, // Y flipped
    ))
}

/// One slider nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SpreadUp,
    SpreadDown,
    SizeUp,
    SizeDown,
    CountUp,
    CountDown,
    SpeedUp,
    SpeedDown,
}

impl Control {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        Some(match key {
            KeyCode::KeyQ => Control::SpreadUp,
            KeyCode::KeyA => Control::SpreadDown,
            KeyCode::KeyW => Control::SizeUp,
            KeyCode::KeyS => Control::SizeDown,
            KeyCode::KeyE => Control::CountUp,
            KeyCode::KeyD => Control::CountDown,
            KeyCode::KeyR => Control::SpeedUp,
            KeyCode::KeyF => Control::SpeedDown,
            _ => return None,
        })
    }
}

/// Keyboard-driven editor for a [`SwarmConfig`].
#[derive(Debug, Clone)]
pub struct ControlPanel {
    config: SwarmConfig,
}

impl ControlPanel {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config: config.clamped(),
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Apply one nudge. Returns the edited config if anything changed.
    pub fn apply(&mut self, control: Control) -> Option<SwarmConfig> {
        let mut next = self.config;
        match control {
            Control::SpreadUp => next.spread = nudge(next.spread, SPREAD_STEP, &SPREAD_RANGE),
            Control::SpreadDown => next.spread = nudge(next.spread, -SPREAD_STEP, &SPREAD_RANGE),
            Control::SizeUp => next.size = nudge(next.size, SIZE_STEP, &SIZE_RANGE),
            Control::SizeDown => next.size = nudge(next.size, -SIZE_STEP, &SIZE_RANGE),
            Control::CountUp => {
                next.count = next.count.saturating_add(COUNT_STEP).min(*COUNT_RANGE.end())
            }
            Control::CountDown => {
                next.count = next.count.saturating_sub(COUNT_STEP).max(*COUNT_RANGE.start())
            }
            Control::SpeedUp => next.speed = nudge(next.speed, SPEED_STEP, &SPEED_RANGE),
            Control::SpeedDown => next.speed = nudge(next.speed, -SPEED_STEP, &SPEED_RANGE),
        }

        if next == self.config {
            return None;
        }
        self.config = next;
        tracing::info!(
            target: "swarm::input",
            ?control,
            spread = next.spread,
            size = next.size,
            count = next.count,
            speed = next.speed,
            "swarm parameters changed"
        );
        Some(next)
    }

    /// Feed a window event. Key presses bound to a control are applied.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<SwarmConfig> {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return None;
        };
        if event.state != ElementState::Pressed {
            return None;
        }
        let PhysicalKey::Code(key) = event.physical_key else {
            return None;
        };
        Control::from_key(key).and_then(|control| self.apply(control))
    }
}

/// Step `value` and snap it to the slider grid inside `range`.
fn nudge(value: f32, step: f32, range: &RangeInclusive<f32>) -> f32 {
    let stepped = ((value + step) / step.abs()).round() * step.abs();
    stepped.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_pointer_ndc_corners() {
        let mut pointer = PointerInput::new(800, 600);
        assert_eq!(pointer.cursor_moved(400.0, 300.0), Some(Vec2::ZERO));
        assert_eq!(pointer.cursor_moved(0.0, 0.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer.cursor_moved(800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn test_pointer_without_window_size() {
        let mut pointer = PointerInput::default();
        assert_eq!(pointer.cursor_moved(10.0, 10.0), None);
        pointer.set_window_size(20, 20);
        // Resizing before any usable cursor event does not invent one.
        assert_eq!(pointer.ndc(), None);
        assert_eq!(pointer.cursor_moved(10.0, 10.0), Some(Vec2::ZERO));
    }

    #[test]
    fn test_pointer_resize_reprojects() {
        let mut pointer = PointerInput::new(100, 100);
        pointer.cursor_moved(50.0, 50.0);
        pointer.set_window_size(200, 100);
        assert_eq!(pointer.ndc(), Some(Vec2::new(-0.5, 0.0)));
        assert_eq!(pointer.position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_keys_map_to_controls() {
        assert_eq!(Control::from_key(KeyCode::KeyQ), Some(Control::SpreadUp));
        assert_eq!(Control::from_key(KeyCode::KeyF), Some(Control::SpeedDown));
        assert_eq!(Control::from_key(KeyCode::Space), None);
    }

    #[test]
    fn test_nudges_step_each_parameter() {
        let mut panel = ControlPanel::new(SwarmConfig::default());

        let c = panel.apply(Control::SpreadUp).unwrap();
        assert!(close(c.spread, 200.0));
        let c = panel.apply(Control::SizeDown).unwrap();
        assert!(close(c.size, 0.04));
        let c = panel.apply(Control::CountUp).unwrap();
        assert_eq!(c.count, 26_000);
        let c = panel.apply(Control::SpeedUp).unwrap();
        assert!(close(c.speed, 0.006));
    }

    #[test]
    fn test_nudges_clamp_at_range_ends() {
        let mut panel = ControlPanel::new(SwarmConfig {
            spread: 1000.0,
            size: 0.01,
            count: 0,
            speed: 0.1,
        });
        assert_eq!(panel.apply(Control::SpreadUp), None);
        assert_eq!(panel.apply(Control::SizeDown), None);
        assert_eq!(panel.apply(Control::CountDown), None);
        assert_eq!(panel.apply(Control::SpeedUp), None);

        let c = panel.apply(Control::CountUp).unwrap();
        assert_eq!(c.count, 1000);
    }

    #[test]
    fn test_repeated_nudges_stay_on_grid() {
        let mut panel = ControlPanel::new(SwarmConfig::default());
        for _ in 0..10 {
            panel.apply(Control::SpeedUp);
        }
        assert!(close(panel.config().speed, 0.015));
        for _ in 0..100 {
            panel.apply(Control::SpeedDown);
        }
        assert!(close(panel.config().speed, 0.001));
    }
}
