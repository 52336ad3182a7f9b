/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
/// Environment variable helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;

pub use config::*;
pub use logger::*;
