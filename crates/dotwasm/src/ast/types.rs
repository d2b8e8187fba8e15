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

//! WebAssembly type system definitions

use super::error::ConstructionError;
use serde::{Deserialize, Serialize};

/// Wire encoding of the `func` type constructor that opens every
/// entry of the Type section.
pub const FUNC_TYPE_FORM: u8 = 0x60;

/// Wire encoding of the `anyfunc` element type used by tables.
pub const ANYFUNC_TYPE: u8 = 0x70;

/// Wire encoding of the empty block type.
pub const EMPTY_BLOCK_TYPE: u8 = 0x40;

/// WebAssembly value types (MVP)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl ValueType {
    /// Get the one-byte wire encoding of this type
    pub fn wire_byte(&self) -> u8 {
        match self {
            Self::I32 => 0x7f,
            Self::I64 => 0x7e,
            Self::F32 => 0x7d,
            Self::F64 => 0x7c,
        }
    }

    /// Get the natural width of this type in bytes
    pub fn natural_width(&self) -> u8 {
        match self {
            Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
        }
    }

    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }

    /// Check if this is a floating-point type
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of entity an import or export refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalKind {
    Function = 0,
    Table = 1,
    Memory = 2,
    Global = 3,
}

impl ExternalKind {
    /// Get the one-byte wire encoding of this kind
    pub fn wire_byte(&self) -> u8 {
        *self as u8
    }
}

/// Size bounds for a memory (in pages) or a table (in elements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizableLimits {
    pub initial: u32,
    pub maximum: Option<u32>,
}

impl ResizableLimits {
    pub fn new(initial: u32, maximum: Option<u32>) -> Self {
        Self { initial, maximum }
    }
}

/// A function signature: ordered parameter types plus at most one
/// result type (wasm MVP restriction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionType {
    params: Vec<ValueType>,
    results: Vec<ValueType>,
}

impl FunctionType {
    /// Create a new function type.
    ///
    /// Fails with [`ConstructionError::TooManyResults`] when more than
    /// one result type is supplied.
    pub fn new(params: Vec<ValueType>, results: Vec<ValueType>) -> Result<Self, ConstructionError> {
        if results.len() > 1 {
            return Err(ConstructionError::TooManyResults { count: results.len() });
        }
        Ok(Self { params, results })
    }

    /// Create a function type with no parameters and no result
    pub fn void() -> Self {
        Self {
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Get the parameter types
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Get the result type, if the signature has one
    pub fn result(&self) -> Option<ValueType> {
        self.results.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_wire_bytes() {
        assert_eq!(ValueType::I32.wire_byte(), 0x7f);
        assert_eq!(ValueType::I64.wire_byte(), 0x7e);
        assert_eq!(ValueType::F32.wire_byte(), 0x7d);
        assert_eq!(ValueType::F64.wire_byte(), 0x7c);
    }

    #[test]
    fn test_function_type_single_result() {
        let ty = FunctionType::new(vec![ValueType::I32], vec![ValueType::I64]).unwrap();
        assert_eq!(ty.params(), &[ValueType::I32]);
        assert_eq!(ty.result(), Some(ValueType::I64));
    }

    #[test]
    fn test_function_type_rejects_multiple_results() {
        let err = FunctionType::new(vec![], vec![ValueType::I32, ValueType::I32]).unwrap_err();
        assert!(matches!(err, ConstructionError::TooManyResults { count: 2 }));
    }
}
