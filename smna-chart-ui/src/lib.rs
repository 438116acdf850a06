//! Shared Dioxus components and D3.js bridge for the SMNA dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js overlay chart via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals around a `Dashboard`
//! - `components`: Reusable RSX components (the four controls, containers, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
