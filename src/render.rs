//! The seam between the simulation and whatever draws it.
//!
//! [`Presenter`] pushes a [`SwarmState`] into a [`RenderTarget`] once per
//! frame, uploading positions only when the store reports them dirty and
//! recreating buffers only when the store was rebuilt.

use glam::{Mat4, Vec3};

use crate::error::RenderError;
use crate::simulation::SwarmState;

/// Something that can draw a swarm.
pub trait RenderTarget {
    /// The store was rebuilt: recreate buffers for `count` particles with `colors`.
    fn retarget(&mut self, count: usize, colors: &[Vec3]);

    /// Overwrite the position buffer with flat `x, y, z` triples.
    fn upload_positions(&mut self, positions: &[f32]);

    fn set_camera(&mut self, view: Mat4, projection: Mat4);

    /// World-space diameter of one particle.
    fn set_point_size(&mut self, size: f32);

    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self) -> Result<(), RenderError>;
}

/// Tracks what a render target has already seen.
#[derive(Debug, Default)]
pub struct Presenter {
    generation: Option<u64>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the uploaded state, e.g. after the target was recreated.
    pub fn invalidate(&mut self) {
        self.generation = None;
    }

    /// Push `state` into `target` and draw one frame.
    pub fn present<T: RenderTarget + ?Sized>(
        &mut self,
        state: &mut SwarmState,
        target: &mut T,
    ) -> Result<(), RenderError> {
        let generation = state.store().generation();
        if self.generation != Some(generation) {
            let store = state.store();
            target.retarget(store.len(), store.colors());
            tracing::info!(target: "swarm::render", count = store.len(), generation, "render buffers rebuilt");
            self.generation = Some(generation);
            // Fresh buffers hold nothing yet.
            state.store_mut().mark_dirty();
        }

        if state.store_mut().take_dirty() {
            target.upload_positions(state.store().as_flat());
        }

        let camera = state.camera();
        target.set_camera(camera.view_matrix(), camera.projection_matrix());
        target.set_point_size(state.config().size);
        target.draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, SwarmConfig};
    use crate::simulation::FrameInput;

    #[derive(Debug, PartialEq)]
    enum Call {
        Retarget(usize),
        Upload(usize),
        Camera,
        PointSize(f32),
        Resize(u32, u32),
        Draw,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        fail_draw: bool,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl RenderTarget for Recorder {
        fn retarget(&mut self, count: usize, colors: &[Vec3]) {
            assert_eq!(count, colors.len());
            self.calls.push(Call::Retarget(count));
        }

        fn upload_positions(&mut self, positions: &[f32]) {
            self.calls.push(Call::Upload(positions.len()));
        }

        fn set_camera(&mut self, _view: Mat4, _projection: Mat4) {
            self.calls.push(Call::Camera);
        }

        fn set_point_size(&mut self, size: f32) {
            self.calls.push(Call::PointSize(size));
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.calls.push(Call::Resize(width, height));
        }

        fn draw(&mut self) -> Result<(), RenderError> {
            self.calls.push(Call::Draw);
            if self.fail_draw {
                Err(RenderError::SurfaceLost)
            } else {
                Ok(())
            }
        }
    }

    fn state(count: u32) -> SwarmState {
        let settings = Settings {
            swarm: SwarmConfig {
                count,
                spread: 10.0,
                speed: 0.01,
                size: 0.05,
            },
            ..Settings::default()
        };
        SwarmState::with_seed(settings, 4)
    }

    #[test]
    fn test_first_present_retargets_and_uploads() {
        let mut state = state(8);
        let mut presenter = Presenter::new();
        let mut target = Recorder::default();
        presenter.present(&mut state, &mut target).unwrap();
        assert_eq!(
            target.take(),
            vec![
                Call::Retarget(8),
                Call::Upload(24),
                Call::Camera,
                Call::PointSize(0.05),
                Call::Draw
            ]
        );
    }

    #[test]
    fn test_clean_store_skips_upload() {
        let mut state = state(8);
        let mut presenter = Presenter::new();
        let mut target = Recorder::default();
        presenter.present(&mut state, &mut target).unwrap();
        target.take();

        presenter.present(&mut state, &mut target).unwrap();
        assert_eq!(target.take(), vec![Call::Camera, Call::PointSize(0.05), Call::Draw]);
    }

    #[test]
    fn test_tick_triggers_upload_once() {
        let mut state = state(8);
        let mut presenter = Presenter::new();
        let mut target = Recorder::default();
        presenter.present(&mut state, &mut target).unwrap();
        target.take();

        state.tick(&FrameInput::default());
        presenter.present(&mut state, &mut target).unwrap();
        assert!(target.take().contains(&Call::Upload(24)));
        presenter.present(&mut state, &mut target).unwrap();
        assert!(!target.take().iter().any(|c| matches!(c, Call::Upload(_))));
    }

    #[test]
    fn test_rebuild_retargets_with_new_count() {
        let mut state = state(8);
        let mut presenter = Presenter::new();
        let mut target = Recorder::default();
        presenter.present(&mut state, &mut target).unwrap();
        target.take();

        let config = SwarmConfig {
            count: 3000,
            ..*state.config()
        };
        state.reconfigure(config);
        presenter.present(&mut state, &mut target).unwrap();
        let calls = target.take();
        assert_eq!(calls[0], Call::Retarget(3000));
        assert_eq!(calls[1], Call::Upload(9000));
    }

    #[test]
    fn test_invalidate_forces_retarget() {
        let mut state = state(2);
        let mut presenter = Presenter::new();
        let mut target = Recorder::default();
        presenter.present(&mut state, &mut target).unwrap();
        target.take();

        presenter.invalidate();
        presenter.present(&mut state, &mut target).unwrap();
        let calls = target.take();
        assert_eq!(calls[0], Call::Retarget(2));
        assert_eq!(calls[1], Call::Upload(6));
    }

    #[test]
    fn test_draw_error_is_returned() {
        let mut state = state(2);
        let mut presenter = Presenter::new();
        let mut target = Recorder {
            fail_draw: true,
            ..Default::default()
        };
        let err = presenter.present(&mut state, &mut target).unwrap_err();
        assert!(matches!(err, RenderError::SurfaceLost));
        target.resize(10, 10);
        assert_eq!(target.take().last(), Some(&Call::Resize(10, 10)));
    }
}
