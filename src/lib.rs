//! **mazes3d** is a generation, route finding and save file library for perfect mazes built on a
//! three dimensional grid of cube cells.

#[macro_use]
extern crate error_chain;

pub mod agent;
pub mod cells;
pub mod coordinates;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod persistence;
pub mod units;
mod utils;
