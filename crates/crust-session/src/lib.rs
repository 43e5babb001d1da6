//! # crust-session: Configuration Sessions
//!
//! Wraps the pure engine in `crust-core` with everything a storefront page
//! needs around it: loading definitions from a catalog, keeping a live quote
//! while the customer clicks, and handing the finished order to a sink.
//!
//! ## Module Organization
//! ```text
//! crust_session/
//! ├── lib.rs          ◄─── You are here
//! ├── catalog/
//! │   ├── mod.rs      ◄─── CatalogService contract
//! │   ├── wire.rs     ◄─── Storefront JSON records → ProductDefinition
//! │   └── memory.rs   ◄─── In-memory catalog (fixtures, demos)
//! ├── sink.rs         ◄─── OrderSink contract + recording sink
//! ├── session.rs      ◄─── ConfigurationSession
//! ├── config.rs       ◄─── SessionConfig (env > TOML > defaults)
//! ├── telemetry.rs    ◄─── tracing subscriber setup
//! └── error.rs        ◄─── SessionError + ErrorReport for the UI
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use crust_session::{ConfigurationSession, InMemoryCatalog, RecordingSink, SessionConfig};
//!
//! # async fn demo() -> Result<(), crust_session::SessionError> {
//! let config = SessionConfig::load(None)?;
//! let json = std::fs::read_to_string("catalog.json").expect("catalog fixture");
//! let catalog = InMemoryCatalog::from_json(&json)?.with_config(&config);
//! let sink = RecordingSink::new();
//!
//! let mut session = ConfigurationSession::open_product(&catalog, "combo-family").await?;
//! session.select_variant("size", "Large")?;
//! session.toggle_topping(0, "Pepperoni")?;
//! let receipt = session.submit(&sink).await?;
//! println!("submitted {} for {}", receipt.submission_id, receipt.total);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod sink;
pub mod telemetry;

pub use catalog::memory::InMemoryCatalog;
pub use catalog::CatalogService;
pub use config::SessionConfig;
pub use error::{CatalogError, ErrorCode, ErrorReport, SessionError, SessionResult, SinkError};
pub use session::{ConfigurationSession, SubmissionReceipt};
pub use sink::{OrderSink, RecordingSink};
