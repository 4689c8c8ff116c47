pub mod connection_string;
pub mod postgres;
