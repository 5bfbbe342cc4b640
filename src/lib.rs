//! Core library for the timetable-tools command line application.
//!
//! A university timetable arrives as a grid: time slots down the first
//! column, weekdays across, venue rows in between. The library turns that grid
//! into one schedule per module, with every class session listed once and
//! its time slots merged into a single range.
//!
//! Responsibilities are kept narrow: spreadsheet and file adapters live under
//! [`io`], the grid walk in [`grid`], the recognised module codes in
//! [`catalog`], the session merge in [`consolidate`], and the end-to-end
//! pipelines in [`sync`].

pub mod catalog;
pub mod consolidate;
pub mod error;
pub mod finder;
pub mod grid;
pub mod io;
pub mod model;
pub mod sync;

pub use error::{Result, ToolError};
