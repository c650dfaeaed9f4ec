//! Heroes Battle - tactical core of a turn-based grid strategy game

pub mod battle;
pub mod core;
