use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use crach_mocap_core::{ClockState, Config, Session};

#[wasm_bindgen]
pub struct MocapPlayer {
    core: Session,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize with plain JS objects for maps so joint names read as properties.
fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn state_js(state: ClockState) -> Result<JsValue, JsError> {
    to_js(&state, "state")
}

#[wasm_bindgen]
impl MocapPlayer {
    /// Create a player on the built-in sample capture. Pass a partial config
    /// object or undefined/null for defaults.
    /// Example:
    ///   new MocapPlayer({ default_speed: 0.5 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MocapPlayer, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let core = Session::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(MocapPlayer { core })
    }

    /// Load a capture from a parsed JS object. On error the current capture stays.
    #[wasm_bindgen(js_name = load_capture)]
    pub fn load_capture(&mut self, data: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&data) {
            return Err(JsError::new("load_capture: data is null/undefined"));
        }
        // Stringify so the core loader sees exactly what a file upload would.
        let s = JSON::stringify(&data)
            .map_err(|e| JsError::new(&format!("load_capture stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("load_capture: stringify produced non-string"))?;
        self.load_capture_json(s)
    }

    /// Load a capture from JSON text (e.g. a FileReader result).
    #[wasm_bindgen(js_name = load_capture_json)]
    pub fn load_capture_json(&mut self, json: String) -> Result<JsValue, JsError> {
        let state = self
            .core
            .load_json(&json)
            .map_err(|e| JsError::new(&format!("load_capture error: {e}")))?;
        state_js(state)
    }

    #[wasm_bindgen(js_name = reset_to_sample)]
    pub fn reset_to_sample(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.reset_to_sample())
    }

    #[wasm_bindgen]
    pub fn play(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.play())
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.pause())
    }

    #[wasm_bindgen]
    pub fn toggle(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.toggle())
    }

    #[wasm_bindgen(js_name = set_speed)]
    pub fn set_speed(&mut self, speed: f32) -> Result<JsValue, JsError> {
        let state = self
            .core
            .set_speed(speed)
            .map_err(|e| JsError::new(&format!("set_speed error: {e}")))?;
        state_js(state)
    }

    /// Seek to a normalized position in [0, 1].
    #[wasm_bindgen]
    pub fn seek(&mut self, position: f32) -> Result<JsValue, JsError> {
        let state = self
            .core
            .seek(position)
            .map_err(|e| JsError::new(&format!("seek error: {e}")))?;
        state_js(state)
    }

    #[wasm_bindgen(js_name = step_forward)]
    pub fn step_forward(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.step_forward())
    }

    #[wasm_bindgen(js_name = step_backward)]
    pub fn step_backward(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.step_backward())
    }

    #[wasm_bindgen(js_name = seek_start)]
    pub fn seek_start(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.seek_start())
    }

    #[wasm_bindgen(js_name = seek_end)]
    pub fn seek_end(&mut self) -> Result<JsValue, JsError> {
        state_js(self.core.seek_end())
    }

    /// Advance by dt (seconds).
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) -> Result<JsValue, JsError> {
        state_js(self.core.tick(dt))
    }

    /// Advance to a requestAnimationFrame timestamp (milliseconds).
    #[wasm_bindgen(js_name = tick_at)]
    pub fn tick_at(&mut self, timestamp_ms: f64) -> Result<JsValue, JsError> {
        state_js(self.core.tick_at(timestamp_ms / 1000.0))
    }

    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        state_js(self.core.state())
    }

    /// Interpolated frame in the capture wire format.
    #[wasm_bindgen(js_name = current_frame)]
    pub fn current_frame(&self) -> Result<JsValue, JsError> {
        to_js(self.core.current_frame().as_ref(), "current_frame")
    }

    /// Markers and bones for the renderer. `scale` defaults to the configured render scale.
    #[wasm_bindgen]
    pub fn pose(&self, scale: Option<f32>) -> Result<JsValue, JsError> {
        let pose = match scale {
            Some(s) => self.core.pose(s),
            None => self.core.default_pose(),
        };
        to_js(&pose, "pose")
    }

    /// Select a joint by name, or clear the selection with null/undefined.
    #[wasm_bindgen(js_name = select_joint)]
    pub fn select_joint(&mut self, name: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&name) {
            self.core.clear_selection();
            return Ok(());
        }
        let name = name
            .as_string()
            .ok_or_else(|| JsError::new("select_joint: name must be a string or null"))?;
        self.core
            .select_joint(&name)
            .map_err(|e| JsError::new(&format!("select_joint error: {e}")))
    }

    #[wasm_bindgen(js_name = selected_joint)]
    pub fn selected_joint(&self) -> Option<String> {
        self.core.selected_joint().map(str::to_string)
    }

    #[wasm_bindgen(js_name = joint_names)]
    pub fn joint_names(&self) -> Vec<String> {
        self.core
            .capture()
            .joint_names()
            .map(str::to_string)
            .collect()
    }

    #[wasm_bindgen(js_name = frame_count)]
    pub fn frame_count(&self) -> usize {
        self.core.capture().frame_count()
    }

    /// Capture id/name/description/date/metadata.
    #[wasm_bindgen]
    pub fn info(&self) -> Result<JsValue, JsError> {
        to_js(self.core.capture().info(), "info")
    }

    #[wasm_bindgen(js_name = speed_presets)]
    pub fn speed_presets(&self) -> Vec<f32> {
        self.core.config().speed_presets.clone()
    }

    #[wasm_bindgen(js_name = data_context)]
    pub fn data_context(&self) -> String {
        self.core.data_context()
    }

    /// Connectivity table as `[{ parent, child }]`.
    #[wasm_bindgen]
    pub fn connections(&self) -> Result<JsValue, JsError> {
        to_js(self.core.connections(), "connections")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
