//! # vybe-core
//!
//! Conversational core of the Vybe analytics bot: per-user sessions, a
//! table-driven multi-step dialog, input validators, and output chunking.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Dialog                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │ SessionStore │  │  Step Table  │──│  AnalyticsGateway   │  │
//! │  │ (per user)   │──│  + Commands  │  │  (Strategy)         │  │
//! │  └──────────────┘  └──────────────┘  └─────────────────────┘  │
//! │                           │                                   │
//! │                     Chunker / Replies                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `AnalyticsGateway` and `ChartRenderer` traits keep the data source
//! and the chart backend swappable without touching dialog logic.

pub mod chart;
pub mod chunk;
pub mod config;
pub mod dialog;
pub mod error;
pub mod gateway;
pub mod menu;
pub mod messages;
pub mod params;
pub mod reply;
pub mod session;
pub mod validate;

pub use chart::{ChartKind, ChartRenderer, ChartSpec};
pub use chunk::{Chunked, chunk};
pub use config::DialogConfig;
pub use dialog::{Dialog, DialogBuilder, Flow, Incoming, StepId};
pub use error::{BotError, ErrorKind, Result};
pub use gateway::{AnalyticsGateway, ChartImage, FlowResult};
pub use menu::MenuId;
pub use reply::{ChartArtifact, Keyboard, LinkButton, Reply, TextReply};
pub use session::{Session, SessionStore, UserId};
