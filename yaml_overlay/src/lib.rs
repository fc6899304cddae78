//! Layered YAML documents merged with an "overlay wins" deep merge.
//!
//! A base document is selectively overridden by later layers without those
//! layers repeating unrelated fields. Mappings merge key by key; sequences and
//! scalars are replaced wholesale. Scalars are normalised once when a document
//! is loaded, so `on`, `Yes` and `TRUE` all emerge as `true` while a quoted
//! `'on'` stays a string.
//!
//! The crate is organised in layers:
//!
//! - [`load_document`] turns bytes into a [`Node`] tree.
//! - [`merge_nodes`], [`merge_layers`] and [`LayerStack`] fold trees together
//!   without touching the filesystem.
//! - [`Patcher`] resolves `path` plus its optional `path.patch` and returns
//!   the merged document, reporting activity to a [`PatchObserver`].
//! - [`PatchedYaml`] exposes the patched document to `figment`.

mod document;
mod error;
mod merge;
mod node;
mod patch;
mod provider;
mod result_ext;

pub use document::{LoadOptions, emit, emit_bytes, load_document, load_str};
pub use error::{Location, PatchError, PatchResult};
pub use merge::{Layer, LayerStack, MergeOptions, merge_documents, merge_layers, merge_nodes};
pub use node::{Mapping, Node, Scalar};
pub use patch::{
    PATCH_SUFFIX, PatchObserver, Patcher, SilentObserver, TracingObserver, patch_path_for,
    patched_content,
};
pub use provider::PatchedYaml;
pub use result_ext::{IntoFigmentError, IoResultExt};
