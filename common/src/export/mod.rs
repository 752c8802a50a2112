//! Export core modules shared by the CLI writer.

pub mod pdf_core;

pub use pdf_core::{compose_document, DocumentPlan, Element, ImageDimensions, PagePlan};
