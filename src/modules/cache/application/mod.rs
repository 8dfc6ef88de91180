pub mod ports;
pub mod snapshot_store;
