pub mod audio;
pub mod dispatch;
pub mod observability;
pub mod persistence;
pub mod storage;
