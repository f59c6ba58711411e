//! CLI command implementations.

pub(crate) mod check_config;
pub(crate) mod render;

pub(crate) use check_config::CheckConfigArgs;
pub(crate) use render::RenderArgs;
