//! Scripts for deploying the eth0 protocol contracts and running a local fork.

#![deny(clippy::missing_docs_in_private_items)]

pub mod anvil;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod env;
pub mod errors;
pub mod process;
pub mod sanctions;
pub mod script;

/// Our output utils
mod output_writer;
