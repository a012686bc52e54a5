//! Page modules for route-level screens.
//!
//! Each page owns route-scoped orchestration and delegates rendering
//! details to `components`.

pub mod workbench;
