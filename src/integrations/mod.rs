//! External service integrations.

pub mod padron_client {
    pub use crate::padron_client::*;
}
