//! Notat - Audio Summaries and QA
//!
//! A local-first CLI tool for turning recorded audio into stored summaries
//! and asking questions about them.
//!
//! The name "Notat" comes from the Norwegian word for "note."
//!
//! # Overview
//!
//! Notat allows you to:
//! - Transcribe and summarize recorded audio files
//! - Keep summaries in a local store, keyed by filename
//! - Link summaries into a vector index for similarity retrieval
//! - Ask questions about a summary, directly or with retrieved context
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `audio` - Saving recorded audio
//! - `transcription` - Speech-to-text transcription
//! - `summarization` - Transcript summarization
//! - `pipeline` - The transcribe-then-summarize-then-store flow
//! - `store` - Summary record store
//! - `embedding` - Embedding generation
//! - `vector_index` - Vector index abstraction
//! - `linkage` - Linking records into the vector index
//! - `qa` - Question answering over stored summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use notat::pipeline::Pipeline;
//! use notat::store::SqliteRecordStore;
//! use notat::summarization::OpenAISummarizer;
//! use notat::transcription::WhisperTranscriber;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(SqliteRecordStore::in_memory()?);
//!     let pipeline = Pipeline::new(
//!         Arc::new(WhisperTranscriber::new()),
//!         Arc::new(OpenAISummarizer::new()),
//!         store,
//!     );
//!
//!     let audio = std::fs::read("lecture1.wav")?;
//!     let record = pipeline.run("lecture1", audio).await?;
//!     println!("{}", record.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod linkage;
pub mod openai;
pub mod pipeline;
pub mod qa;
pub mod store;
pub mod summarization;
pub mod transcription;
pub mod vector_index;

pub use error::{NotatError, Result};
