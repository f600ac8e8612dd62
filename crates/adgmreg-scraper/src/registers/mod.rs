//! Per-register markup parsing and output projection.
//!
//! Each register owns its selectors, list-row type, detail-region scope,
//! and normalizer. The two modules are deliberately parallel rather than
//! unified: the registers render different list columns, scope their
//! detail tables differently, and project onto different output shapes.

pub mod firms;
pub mod practitioners;
