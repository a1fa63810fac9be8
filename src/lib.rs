//! Single-player snake on a fixed grid, played in the terminal.
//!
//! The rules live in [`snake`], [`food`] and [`session`] and do no I/O.
//! [`game`] drives a session from a fixed timer and the keyboard, drawing
//! through [`term`].

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;
pub mod snake;
pub mod store;
pub mod term;

pub type TermInt = u16;
