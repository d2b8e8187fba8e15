// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Binary encoding module
//!
//! This module turns a builder snapshot into wasm binary bytes with
//! clear separation of concerns:
//!
//! - `config`: encoder options
//! - `error`: error types and handling
//! - `writer`: append-only byte writer with LEB128 support
//! - `context`: per-encode index resolution
//! - `instructions`: expression tree encoding
//! - `sections`: specialized generators for the binary sections
//! - `generator`: main orchestrator that walks the canonical order

pub mod config;
pub mod error;
pub mod generator;
pub mod sections;
pub mod writer;

pub(crate) mod context;
pub(crate) mod instructions;

// Re-export main types
pub use config::EncodeOptions;
pub use error::{EncodeError, EncodeResult};
pub use generator::{ModuleEncoder, encode_module};
pub use writer::ByteWriter;
