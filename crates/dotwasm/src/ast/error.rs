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

//! Errors raised while constructing a module

use thiserror::Error;

/// Errors that can occur while building a module.
///
/// Every invariant that is locally detectable is checked at the moment
/// of insertion, so a failed `add_*` call leaves the module unchanged.
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("a module can only contain a single memory in the wasm MVP")]
    MultipleMemories,

    #[error("function types can only have a single return value in the wasm MVP (got {count})")]
    TooManyResults { count: usize },

    #[error("imports cannot be added after functions have been declared")]
    ImportAfterFunction,

    #[error("opcode 0x{opcode:02x} is not a constant opcode")]
    InvalidConstOpcode { opcode: u8 },

    #[error("no function with index {index} has been declared")]
    UnknownFunction { index: u32 },

    #[error("no function type with index {index} has been declared")]
    UnknownType { index: u32 },

    #[error("no memory with index {index} has been declared")]
    UnknownMemory { index: u32 },
}

/// Result type for builder operations
pub type ConstructionResult<T> = Result<T, ConstructionError>;
