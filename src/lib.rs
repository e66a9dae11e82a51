//! Client library for the QuickByte news aggregator.
//!
//! The core is [`browser::Browser`]: a single-owner state machine that
//! decides what content is displayed (top headlines, free-text search,
//! category browse, or the user's favorites), drives paginated fetches
//! through the [`gateway::NewsGateway`], and keeps a locally cached
//! favorites membership set consistent with the remote store.
//!
//! Network calls run in spawned tasks that report back over an `mpsc`
//! channel; the owning event loop applies results via
//! [`browser::Browser::handle_event`], which discards anything superseded
//! by a newer request.

pub mod browser;
pub mod config;
pub mod favorites;
pub mod gateway;
pub mod model;
pub mod session;
