//! Celebration effect on a successful hit.
//!
//! Delegates to the global `confetti` function from the canvas-confetti
//! script loaded by the app shell. Fire-and-forget: if the script is missing
//! or throws, the game carries on without the effect.

use coordplane_shared::Celebration;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = window, js_name = confetti)]
    fn confetti(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Vertical launch point as a fraction of the window height.
const ORIGIN_Y: f64 = 0.6;

fn options(c: Celebration) -> Result<JsValue, JsValue> {
    let opts = Object::new();
    Reflect::set(&opts, &"particleCount".into(), &JsValue::from(c.particle_count))?;
    Reflect::set(&opts, &"spread".into(), &JsValue::from(c.spread))?;
    let origin = Object::new();
    Reflect::set(&origin, &"y".into(), &JsValue::from(ORIGIN_Y))?;
    Reflect::set(&opts, &"origin".into(), &origin)?;
    Ok(opts.into())
}

pub fn celebrate(c: Celebration) {
    if let Err(e) = options(c).and_then(|opts| confetti(&opts)) {
        tracing::debug!(error = ?e, "Celebration effect unavailable");
    }
}
