// Adapters layer: concrete implementations for external systems (html, http, storage).

pub mod html;
pub mod http;
pub mod storage;
