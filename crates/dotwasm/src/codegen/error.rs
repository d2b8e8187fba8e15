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

//! Error types for binary encoding

use crate::ast::ValueType;
use thiserror::Error;

/// Errors that can occur while encoding a module.
///
/// Any error aborts the encode; no partial output is valid. Encoding is
/// a pure function of the module snapshot, so retrying without changing
/// the module cannot succeed.
#[derive(Error, Debug)]
pub enum EncodeError {
    // Resolution errors
    #[error("cannot find index for function {index}, no prior declaration found")]
    UnknownFunction { index: u32 },

    #[error("cannot find index for function type {index}, no prior declaration found")]
    UnknownType { index: u32 },

    #[error("cannot find index for global {index}, no prior declaration found")]
    UnknownGlobal { index: u32 },

    #[error("cannot find index for memory {index}, no prior declaration found")]
    UnknownMemory { index: u32 },

    // Feature support errors
    #[error("unsupported feature: {feature}")]
    Unsupported { feature: String },

    // Encoding type errors
    #[error("{value_type}.{access} has no variant for a byte width of {byte_width}")]
    InvalidMemoryAccess {
        value_type: ValueType,
        access: &'static str,
        byte_width: u8,
    },

    #[error("memory access alignment must be a power of two (got {alignment})")]
    InvalidAlignment { alignment: u32 },
}

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;
