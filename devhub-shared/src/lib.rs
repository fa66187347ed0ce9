//! Wire models shared by the DevHub web client and its tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::module_name_repetitions)]

/// Wire models exchanged with the DevHub backend.
pub mod models;
