//! Step definitions for task view scenarios.

mod given;
mod then;
mod when;
