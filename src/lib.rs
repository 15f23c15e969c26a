#![forbid(unsafe_code)]
#![warn(
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::format_push_string,
    clippy::get_unwrap,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::try_err,
    clippy::unreachable
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    missing_docs
)]

//! Walk-through of user-defined functions, secondary indexes and aggregation queries on an
//! Aerospike cluster.
//!
//! The demo registers the bundled Lua module `profile.lua`, creates a string index on the
//! `username` bin of `test.profile`, writes five user profiles and then looks one of them up,
//! first with a plain equality query and then with an aggregation that checks its password on
//! the server.
//!
//! # Examples
//!
//! ```rust,no_run
//! use aerospike::{Client, ClientPolicy};
//! use aerospike_profile_demo::{cli::Config, Demo};
//!
//! let config = Config::default();
//! let client = Client::new(&ClientPolicy::default(), &config.seed())
//!     .expect("Failed to connect to cluster");
//!
//! let mut stdout = std::io::stdout();
//! Demo::new(&client).run(&mut stdout).unwrap();
//! client.close().unwrap();
//! ```

#[macro_use]
extern crate aerospike;

pub use demo::{aggregate_result, Demo};
pub use profile::{Profile, Schema, PROFILES};
pub use store::{EqualityQuery, ProfileStore, UdfCall};

pub mod cli;
mod demo;
pub mod errors;
pub mod info;
pub mod profile;
mod store;
