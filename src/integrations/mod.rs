//! External service integrations.

pub mod ads_client {
    pub use crate::ads_client::*;
}

pub mod graph_models {
    pub use crate::graph_models::*;
}
