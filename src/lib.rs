// Library root
// -----------
// This crate exposes the pieces of the vintage car client. The binary
// (`main.rs`) wires them together into the interactive session.
//
// Module responsibilities:
// - `api`: HTTP transport and the endpoint URL shape.
// - `client`: create/update/delete requests and the status-to-outcome
//   mapping.
// - `probe`: the per-cycle availability check that fetches the snapshot.
// - `validate` and `builder`: prompt-until-valid field input and record
//   assembly.
// - `session`: the probe/menu/dispatch loop.
// - `ui`: the console seam plus menu and table rendering.
// - `config` and `error`: startup arguments and error types.
pub mod api;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod probe;
pub mod session;
pub mod ui;
pub mod validate;
