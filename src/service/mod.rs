// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the loader, the resolver and the batch driver.
//!
//! The loader turns an ordered list of files into one merged store, the resolver answers
//! lookups against that store, and the batch driver runs many lookups through the
//! reporting port.

pub mod batch;
pub mod loader;
pub mod resolver;

// Re-export commonly used types
pub use batch::{resolve_all, BatchOptions};
pub use loader::{
    default_home_dir, LayeredLoader, LoadedFileSet, LoaderOptions, LoaderOptionsBuilder,
    RC_FILE_BASENAME,
};
pub use resolver::{get_counterpart_mapping, map_counterpart, CounterpartMapping};
