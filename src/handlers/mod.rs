//! Task handlers for agentgate
//!
//! Each handler validates its input, calls one or two leaf clients and wraps the
//! result in a tagged response. Failures surface as [`TaskError`].
//!
//! ## Key Components
//!
//! - [`Analyzer`] - trait every task handler implements
//! - [`WebsiteAnalyzer`] - fetch a page and ask the language model about it
//! - [`MusicSearcher`] - search music videos
//! - [`ImageGenerator`] - generate an image from a prompt
//! - [`classify`] - route a free-form `/agent-task` payload to one of the above
//! - [`HandlerRegistry`] - owns the handlers and executes a [`Route`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use agentgate::handlers::{HandlerRegistry, classify};
//!
//! let registry = HandlerRegistry::new(clients);
//! let route = classify(&payload)?;
//! let response = registry.execute(route).await?;
//! ```

mod dispatch;
mod image;
mod music;
mod registry;
mod traits;
pub(crate) mod validation;
mod website;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{DispatchError, IMAGE_KEYWORDS, MUSIC_KEYWORDS, Route, classify};
pub use image::{ImageGenerator, MAX_PROMPT_CHARS};
pub use music::{MAX_RESULTS, MusicSearcher};
pub use registry::HandlerRegistry;
pub use traits::{Analyzer, TaskError, TaskKind};
pub use website::{MAX_CONTENT_CHARS, WebsiteAnalyzer};
