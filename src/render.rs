//! Report rendering (HTML).

pub mod html;
