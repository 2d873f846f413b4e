//! Declarative layout templates.
//!
//! A [`TemplateSpec`] tree is load-once configuration (deserializable from
//! JSON); [`TemplateArena::compile`] validates it and flattens it into an
//! index-addressed arena so resolved layouts can reference their parent by
//! index instead of object identity. [`TemplateSet`] holds the candidate
//! templates plus the designated fallback used when the terminal is smaller
//! than every candidate's minimums.

mod core;

pub use self::core::{
    Dim, NodeIdx, TemplateArena, TemplateError, TemplateNode, TemplateSet, TemplateSpec,
};
