//! Desktop-style window management: floating windows with focus and
//! stacking, drag-move, eight-handle resize, minimize/maximize and edge
//! docking, driven by pointer events and rendered through ratatui.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod icons;
pub mod input;
pub mod layout;
pub mod shell;
pub mod style;
pub mod tracing_sub;
pub mod window;
