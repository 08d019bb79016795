//! Core rendering logic for Dossier: fragment resolution, content
//! assembly, engine and merge drivers, and the render pipeline.

pub mod assemble;
pub mod compile;
pub mod merge;
pub mod pipeline;
pub mod resolve;
pub mod supplements;
