//! # TacTickle
//!
//! A two-player game on a 4x4 board. Each side starts with four pieces on the
//! edge rows and slides one piece a single step orthogonally per turn. Three
//! contiguous pieces in a row, column or main diagonal win; 30 moves without
//! a winner is a draw.
//!
//! ## Modules
//!
//! - [`game`] — Rule engine: coordinates, board, validation, win/draw, state, engine
//! - [`persistence`] — Versioned JSON save files and the saves directory
//! - [`records`] — Match records of won games
//! - [`ui`] — Full-screen terminal game view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod records;
pub mod ui;
