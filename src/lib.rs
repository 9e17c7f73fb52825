//! `usenet-import` parses historical Usenet archives (mbox and A News) into
//! normalized post records and commits them to a deduplicating store.
//!
//! The pipeline is format detection, message segmentation, header parsing,
//! timestamp normalization and an optional language filter, driven per
//! archive by [`import::ArchiveParser`].

pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod parser;
pub mod preprocess;
pub mod store;
pub mod tables;
