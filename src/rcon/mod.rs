//! RCON administration-protocol session management

pub mod session;

pub use session::{Connector, RconConnector, RconSession, Transport};
