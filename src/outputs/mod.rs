//! Output generation for collection runs.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`Collection`](crate::models::Collection) as JSON
//! - [`markdown`]: Renders the collection as a Markdown listing
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 2025-05-06/
//! │   ├── morning.json
//! │   └── evening.json
//! ├── 2025-05-06_morning.md
//! └── 2025-05-06_evening.md
//! ```

pub mod json;
pub mod markdown;
