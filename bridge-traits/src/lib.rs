//! # Host Bridge Traits
//!
//! Capabilities the session core needs from its host, expressed as traits so
//! each platform can supply its own implementation.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Executes one wire request, classifying
//!   connectivity and timeout failures
//! - [`SecureStore`](storage::SecureStore) - Credential persistence
//!   (Keychain/Keystore/Secret Service)
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | iOS      | TBD                 | 📋 Planned |
//! | Android  | TBD                 | 📋 Planned |
//!
//! ## Error Handling
//!
//! Transport implementations report [`BridgeError`]; secure stores report
//! [`StorageError`]. Implementations should convert platform-specific errors
//! into these types without embedding secret values in messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so a single instance can be shared
//! across async tasks behind an `Arc`.

pub mod error;
pub mod http;
pub mod log;
pub mod storage;

pub use error::{BridgeError, StorageError};

pub use http::{CachePolicy, HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use storage::SecureStore;
