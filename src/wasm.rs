//! Browser bindings. Each request returns the batch of display events it
//! produced so the page can apply them in order.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{ConfigOverrides, GameConfig};
use crate::connect_four::ConnectFour;
use crate::display::EventLog;
use crate::tictactoe::TicTacToe;
use crate::types::Position;

#[wasm_bindgen]
pub struct TicTacToeGame {
    engine: TicTacToe,
}

#[wasm_bindgen]
impl TicTacToeGame {
    /// `config` may be `undefined` or `{ playerA?: string, playerB?: string }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TicTacToeGame, JsError> {
        let config = decode_config(config, GameConfig::tic_tac_toe())?;
        Ok(Self {
            engine: TicTacToe::new(config),
        })
    }

    pub fn request_move(&mut self, index: u32) -> Result<JsValue, JsError> {
        let mut log = EventLog::new();
        self.engine.request_move(index as usize, &mut log);
        to_js(&log.into_events())
    }

    pub fn request_reset(&mut self) -> Result<JsValue, JsError> {
        let mut log = EventLog::new();
        self.engine.reset(&mut log);
        to_js(&log.into_events())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.snapshot())
    }
}

#[wasm_bindgen]
pub struct ConnectFourGame {
    engine: ConnectFour,
}

#[wasm_bindgen]
impl ConnectFourGame {
    /// `config` may be `undefined` or `{ playerA?: string, playerB?: string }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ConnectFourGame, JsError> {
        let config = decode_config(config, GameConfig::connect_four())?;
        Ok(Self {
            engine: ConnectFour::new(config),
        })
    }

    pub fn request_move(&mut self, col: u32) -> Result<JsValue, JsError> {
        let mut log = EventLog::new();
        self.engine.request_move(col as usize, &mut log);
        to_js(&log.into_events())
    }

    pub fn request_reset(&mut self) -> Result<JsValue, JsError> {
        let mut log = EventLog::new();
        self.engine.reset(&mut log);
        to_js(&log.into_events())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.snapshot())
    }

    pub fn open_columns(&self) -> Vec<u8> {
        self.engine.board().open_columns()
    }

    pub fn cell_label(&self, row: u8, col: u8) -> String {
        self.engine.cell_label(Position::new(row, col))
    }
}

fn decode_config(value: JsValue, defaults: GameConfig) -> Result<GameConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(defaults);
    }
    let overrides: ConfigOverrides =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()))?;
    Ok(defaults.merged(overrides)?)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
