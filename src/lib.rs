//! menutree: rebuild spreadsheet outlines as trees and serialize them into nested menu JSON.
//!
//! A grid row's depth is the column of its first non-empty cell. The
//! [`domain`] layer reconstructs the implied outline and turns it into keyed
//! choices; the outer layers load grids, apply settings and drive the CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
