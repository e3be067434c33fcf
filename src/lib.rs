// Library root
// -----------
// This crate exposes a small library surface for the marketplace CLI. The
// binary (`main.rs`) uses these modules to implement the interactive app.
//
// Module responsibilities:
// - `catalog`: In-memory listing store (add, update, delete) with a
//   monotonic id allocator. Holds no I/O.
// - `api`: Encapsulates HTTP interactions with the backend (login,
//   register, current user) and the session holding the bearer token.
// - `contact`: Builds the WhatsApp deep link a buyer uses to reach a seller.
// - `router`: Screen and role enums driving the UI loop.
// - `config`: Environment-driven settings (API URL, timeout).
// - `ui`: Terminal flows built on `dialoguer`; delegates to the above.
pub mod api;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod router;
pub mod ui;
