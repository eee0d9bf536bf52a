//! Air-drawn portal gestures: circle detection and the per-frame session.
//!
//! A user traces a circle in the air with a tracked fingertip; once the trail
//! is round enough a circular portal locks in place and can be grown while a
//! control is held. This crate is the logic behind that: it has no camera, no
//! hand tracker and no canvas. The host feeds it tracker results and user
//! signals, ticks it once per frame, and draws whatever
//! [`snapshot::Snapshot`] says.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | [`session::GestureSession`] state machine and its actions |
//! | [`classify`] | Pure circle classifier over a point sequence |
//! | [`buffer`] | Bounded FIFO of trailing fingertip points |
//! | [`particles`] | Spark particles spawned in bursts and integrated per frame |
//! | [`geometry`] | Points, viewport, and the cover transform |
//! | [`input`] | Tracker output, landmark validation, and user signals |
//! | [`snapshot`] | Render-ready copy of session state with render hints |
//! | [`driver`] | Frame clock and single-slot inference guard for the host loop |
//! | [`config`] | Tunables with defaults and environment overrides |
//! | [`consts`] | Shared numeric constants |

pub mod buffer;
pub mod classify;
pub mod config;
pub mod consts;
pub mod driver;
pub mod geometry;
pub mod input;
pub mod particles;
pub mod session;
pub mod snapshot;
