use once_cell::sync::OnceCell;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod connect_four;
pub mod display;
pub mod error;
pub mod tictactoe;
pub mod turn;
pub mod types;
pub mod wasm;

static LOGGING: OnceCell<()> = OnceCell::new();

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Sends `tracing` output to the browser console. Later calls are no-ops.
#[wasm_bindgen]
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        #[cfg(target_arch = "wasm32")]
        tracing_wasm::set_as_global_default();
    });
}
