//! Round-trips a model through the factory export the way the dynamic
//! loader does, without an actual shared library.

use sift_model::{export_model, Model, ModelError, Phase, StepContext};

#[derive(Default)]
struct Ramp;

impl Model for Ramp {
    fn predict(
        &mut self,
        state: &mut [f64],
        noise: &[f64],
        ctx: &StepContext,
    ) -> Result<(), ModelError> {
        for (x, w) in state.iter_mut().zip(noise) {
            *x += ctx.sys_tim as f64 + w;
        }
        Ok(())
    }
}

export_model!(Ramp::default());

#[test]
fn factory_export_round_trips_the_instance() {
    let raw = sift_model_create();
    assert!(!raw.is_null());

    // What DynamicLoader::load_path does after the symbol call.
    let mut model: Box<dyn Model> = unsafe { *Box::from_raw(raw as *mut Box<dyn Model>) };

    let mut state = vec![1.0, 2.0];
    let ctx = StepContext::new(0, 3, Phase::Predict);
    model.predict(&mut state, &[0.5, 0.0], &ctx).unwrap();
    assert_eq!(state, vec![4.5, 5.0]);
}
