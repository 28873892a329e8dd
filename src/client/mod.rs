//! Client-side session and data layer: a typed REST client, the screen
//! state machine, form validation, and dashboard derivations over the
//! cached product list. UI shells drive this; it performs no rendering.

pub mod api;
pub mod catalog;
pub mod error;
pub mod form;
pub mod session;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::{Session, SessionState};
