//! Infrastructure layer - Storage backends, key issuance and feed rendering

pub mod api_key;
pub mod feed;
pub mod logging;
pub mod services;
pub mod storage;
