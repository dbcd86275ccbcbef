pub mod credential;
pub mod storage;
pub mod transfer;
pub mod trips;
