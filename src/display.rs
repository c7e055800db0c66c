use serde::Serialize;

use crate::types::Occupant;

/// Receiver of state changes. Implemented by whatever renders the board.
pub trait DisplaySurface<P> {
    fn cell_rendered(&mut self, position: P, occupant: Occupant);
    fn status_changed(&mut self, text: &str);
    /// `true` disables every cell, `false` re-enables them.
    fn game_ended(&mut self, disabled: bool);
    /// An empty slice clears any previous highlight.
    fn line_highlighted(&mut self, positions: &[P]);
}

/// A single notification, in the shape handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayEvent<P> {
    CellRendered { position: P, occupant: Occupant },
    StatusChanged { text: String },
    GameEnded { disabled: bool },
    LineHighlighted { positions: Vec<P> },
}

/// Surface that records every notification in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<P> {
    events: Vec<DisplayEvent<P>>,
}

impl<P> EventLog<P> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[DisplayEvent<P>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<DisplayEvent<P>> {
        self.events
    }
}

impl<P> Default for EventLog<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> DisplaySurface<P> for EventLog<P> {
    fn cell_rendered(&mut self, position: P, occupant: Occupant) {
        self.events
            .push(DisplayEvent::CellRendered { position, occupant });
    }

    fn status_changed(&mut self, text: &str) {
        self.events.push(DisplayEvent::StatusChanged {
            text: text.to_string(),
        });
    }

    fn game_ended(&mut self, disabled: bool) {
        self.events.push(DisplayEvent::GameEnded { disabled });
    }

    fn line_highlighted(&mut self, positions: &[P]) {
        self.events.push(DisplayEvent::LineHighlighted {
            positions: positions.to_vec(),
        });
    }
}
