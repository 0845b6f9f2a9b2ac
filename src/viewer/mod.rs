//! Main `Schedule` struct - the browser entry point.
//!
//! This module provides the WASM-exported `Schedule` widget that handles:
//! - Loading a schedule document (JS object or JSON text)
//! - Accepting widget configuration
//! - Laying the grid out and mounting it under a host element
//!
//! Click and hover handlers are attached to blocks on every render - no
//! manual JavaScript wiring required.

mod dom;
mod events;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::error::ScheduleError;
use crate::layout::{lay_out_grid, GridLayout};
use crate::render::build_scene;
use crate::types::{Grid, ScheduleConfig, ScheduleDocument};
use events::Handlers;

fn js_error(e: &ScheduleError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Schedule grid widget bound to a host element
#[wasm_bindgen]
pub struct Schedule {
    element: HtmlElement,
    config: ScheduleConfig,
    grid: Grid,
    handlers: Handlers,
}

#[wasm_bindgen]
impl Schedule {
    /// Create an empty widget that renders into `element`
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement) -> Schedule {
        console_error_panic_hook::set_once();
        Schedule {
            element,
            config: ScheduleConfig::default(),
            grid: Grid::default(),
            handlers: Handlers::new(),
        }
    }

    /// Replace the configuration. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the object is malformed or a value is out of range.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: ScheduleConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
        config.validate().map_err(|e| js_error(&e))?;
        self.config = config;
        Ok(())
    }

    /// Load a schedule document given as a JS object.
    ///
    /// # Errors
    /// Returns an error if the document is malformed or a block does not fit the grid.
    pub fn load(&mut self, document: JsValue) -> Result<(), JsValue> {
        let document: ScheduleDocument = serde_wasm_bindgen::from_value(document)
            .map_err(|e| JsValue::from_str(&format!("Invalid document: {e}")))?;
        self.set_document(document).map_err(|e| js_error(&e))
    }

    /// Load a schedule document given as JSON text.
    ///
    /// # Errors
    /// Returns an error if the document is malformed or a block does not fit the grid.
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        ScheduleDocument::from_json(json)
            .and_then(|document| self.set_document(document))
            .map_err(|e| js_error(&e))
    }

    /// Lanes and offsets for every block, as a JS object
    ///
    /// # Errors
    /// Returns an error if the configuration or grid is invalid.
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        let layout = self.compute_layout().map_err(|e| js_error(&e))?;
        serde_wasm_bindgen::to_value(&layout)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Rebuild the widget's DOM from scratch.
    ///
    /// # Errors
    /// Returns an error if layout fails or the DOM rejects an operation.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let layout = self.compute_layout().map_err(|e| js_error(&e))?;
        let scene = build_scene(&self.grid, &layout, &self.config).map_err(|e| js_error(&e))?;

        // The current DOM and its handlers stay in place if building fails.
        let mounted = dom::build(&document, &scene).map_err(|e| js_error(&e))?;
        mounted.attach(&self.element).map_err(|e| js_error(&e))?;
        self.handlers = mounted.handlers;
        Ok(())
    }

    pub fn row_count(&self) -> u32 {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.grid.columns.len()
    }
}

impl Schedule {
    fn set_document(&mut self, document: ScheduleDocument) -> crate::error::Result<()> {
        let grid = document.into_grid()?;
        grid.validate()?;
        self.grid = grid;
        Ok(())
    }

    fn compute_layout(&self) -> crate::error::Result<GridLayout> {
        lay_out_grid(&self.grid, self.config.adjacent_step()?)
    }
}
