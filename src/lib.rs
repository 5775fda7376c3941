//! # Lector
//!
//! Content and vocabulary core for a voice English tutor.
//!
//! ## Architecture
//!
//! ```text
//! Webhook ─┐
//! Feed ────┼→ ContentResolver → lesson text → TutorBrief
//! Static ──┘
//!
//! VocabularyStore → WordStore (SQLite) → drills
//! ```
//!
//! Neither half ever fails its caller: sources that are down are skipped,
//! and a missing vocabulary backend yields empty results.

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires config, fetchers,
/// resolver and vocabulary store together.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Layered configuration (defaults, TOML file, environment).
pub mod config;

/// Core domain models.
///
/// - [`NewsRecord`](domain::NewsRecord): one news entry from a source
/// - [`WordRecord`](domain::WordRecord): one vocabulary entry
/// - [`ResolvedLesson`](domain::ResolvedLesson): lesson text plus its source
pub mod domain;

/// HTTP transport.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait, one GET with a timeout
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing into [`NewsRecord`](domain::NewsRecord)s.
pub mod normalizer;

/// Lesson resolution over the ordered source chain.
pub mod resolver;

/// Voice-agent instruction text built from a resolved lesson.
pub mod session;

/// Webhook and feed sources for the fallback chain.
pub mod sources;

/// SQLite persistence for vocabulary collections.
///
/// - [`WordStore`](store::WordStore): trait defining storage operations
/// - [`SqliteWordStore`](store::SqliteWordStore): SQLite implementation
pub mod store;

/// Degraded-mode vocabulary facade and drill formatting.
pub mod vocabulary;
