//! CLI subcommand modules.

pub(crate) mod ask;
pub(crate) mod event;
pub(crate) mod runup;
