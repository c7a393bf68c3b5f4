//! Star Ship: shoot the falling fleet before it reaches your UFO.
//!
//! The library holds the headless game core; `main.rs` wires it to a terminal.

pub mod collision;
pub mod compute;
pub mod display;
pub mod entities;
pub mod fleet;
pub mod settings;
pub mod state;
