//! Stratum Core Types
//!
//! This crate provides the foundational types shared by the Stratum layout
//! engine and its callers:
//!
//! - **Identifiers**: String-interned, string-normalized identifiers ([`identifier::Id`])
//! - **Geometry**: Layout coordinates ([`geometry::Point`])
//! - **Graph**: Input nodes and edges, positioned output nodes ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
