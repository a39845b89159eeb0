//! Reusable screen panels.

pub mod form;
pub mod results;
pub mod status_bar;
