pub mod chunk;
pub mod connection;
pub mod constants;
pub mod notify;
pub mod pda;
