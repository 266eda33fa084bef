pub mod credentials;
pub mod errors;
pub mod logging;
pub mod models;
pub mod settings;
pub mod state;
pub mod validate;
