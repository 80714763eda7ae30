//! Square-and-arrow diagram engine for a fixed-size canvas.
//!
//! This crate compiles to WebAssembly for the browser and to a plain library
//! for native hosts. It owns the editing model: squares carrying four
//! sockets, orthogonally routed arrows between enabled sockets, hit-testing,
//! the drag/connect/resize gesture machine, and the storage document with
//! its load-time integrity recovery. Hosts only wire their input source to
//! [`engine::EngineCore`], run its frame callback, and keep whatever it
//! publishes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`board`] | Squares, arrows and selection with cascade rules |
//! | [`square`] | Square geometry, sockets and position clamping |
//! | [`arrow`] | Connections and their orthogonal routes |
//! | [`doc`] | Storage document and integrity-checked loading |
//! | [`store`] | Storage collaborator trait and in-memory store |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against squares and visible sockets |
//! | [`plan`] | Draw plan built once per frame |
//! | [`render`] | Paints a draw plan onto a 2D context |
//! | [`geom`] | Points, segments and routing math |
//! | [`options`] | Board dimensions, limits and colours |
//! | [`consts`] | Default values behind [`options::BoardOptions`] |

pub mod arrow;
pub mod board;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod options;
pub mod plan;
pub mod render;
pub mod square;
pub mod store;
