//! Photo compositing engine for the virtual fitting page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the canvas: placing a garment image over a user photo,
//! translating raw pointer, touch, and wheel events into placement changes,
//! hit-testing the rotated garment, and painting the composed scene. The host
//! JavaScript layer only wires DOM events to [`bindings::FittingRoom`] and
//! feeds decoded images in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`bindings`] | `wasm-bindgen` exports for the host page |
//! | [`transform`] | Garment placement (center, scale, rotation, intrinsic size) |
//! | [`surface`] | Viewport size, device pixel ratio, and mirroring |
//! | [`input`] | Wheel/touch helpers and the drag state machine |
//! | [`hit`] | Oriented-box hit-testing against the garment |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (scale limits, anchor, export name) |

pub mod bindings;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod surface;
pub mod transform;
