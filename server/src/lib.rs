pub use config::*;
pub use error::*;
pub use server::*;
pub use service::*;
pub use session::*;

mod config;
mod error;
mod server;
mod service;
mod session;
