//! mdb-lookup - message database lookup service
//!
//! Two cooperating servers: an HTTP gateway that serves static files and
//! bridges `/mdb-lookup` queries to a back-end record-lookup service, and
//! the back-end itself, which answers substring queries over a
//! line-oriented TCP protocol.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lineio;
pub mod lookup;
