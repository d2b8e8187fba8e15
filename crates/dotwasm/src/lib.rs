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

//! dotwasm: WebAssembly module builder and binary encoder
//!
//! Callers assemble a [`Module`](ast::Module) by declaring types,
//! imports, functions with instruction-tree bodies, tables, memories,
//! globals, exports, and an optional start function, then request the
//! WebAssembly MVP binary encoding of the snapshot:
//!
//! ```
//! use dotwasm::ast::{Expression, FunctionType, Module, ValueType};
//! use dotwasm::codegen::{EncodeOptions, encode_module};
//!
//! let mut module = Module::new();
//! let ty = module.add_function_type(FunctionType::new(vec![], vec![ValueType::I32]).unwrap());
//! let answer = module.add_function("answer", ty, vec![], vec![Expression::I32Const(42)]).unwrap();
//! module.add_export("answer", answer).unwrap();
//!
//! let bytes = encode_module(&module, &EncodeOptions::default()).unwrap();
//! assert_eq!(&bytes[0..4], b"\0asm");
//! ```
//!
//! Building and encoding are ordinary synchronous computations: the
//! encoder never mutates the module, holds no shared state beyond its
//! own output buffer, and produces byte-identical output for repeated
//! encodes of an unmodified module.

pub mod ast;
pub mod codegen;

// Re-export the main entry points at the crate root
pub use ast::{ConstructionError, Expression, FunctionType, Module, ValueType};
pub use codegen::{EncodeError, EncodeOptions, encode_module};
