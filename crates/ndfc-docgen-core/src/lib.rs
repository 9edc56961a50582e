//! NDFC documentation core library
//!
//! This library turns NDFC controller templates into Ansible module
//! documentation. It normalizes template parameter descriptors, builds the
//! `DOCUMENTATION` tree, and talks to the controller's REST API to fetch
//! templates.

pub mod builders;
pub mod client;
pub mod config;
pub mod documentation;
pub mod error;
pub mod manifest;
pub mod ruleset;
pub mod template;
pub mod utils;

pub use crate::{
    builders::DocStyle,
    client::NdfcClient,
    config::Config,
    documentation::{DocBuilder, Documentation, ModuleState},
    error::{Error, Result},
    manifest::DocManifest,
    template::{NdfcTemplate, RawTemplate, TemplateIndex, TemplateSave},
};
