//! Client half of the system: the cloud RPC wrapper, local cache, page
//! controllers, and audio helper, rebuilt as injectable components. No
//! module-level singletons; every controller receives its dependencies at
//! construction.

pub mod api;
pub mod audio;
pub mod service;
pub mod storage;
pub mod sync;

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
