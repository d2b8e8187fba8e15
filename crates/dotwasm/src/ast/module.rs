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

//! WebAssembly module definition and builder
//!
//! A [`Module`] owns every declaration and is mutated only through its
//! `add_*` operations. Each operation validates the locally detectable
//! invariants at insertion time and returns a stable handle that later
//! declarations (call targets, exports, table elements, the start
//! function) use to reference the entity. Handles are plain indices into
//! the owning declaration list, so encode-time resolution is a direct
//! lookup rather than a deferred name search.

use super::error::{ConstructionError, ConstructionResult};
use super::instructions::Expression;
use super::types::{FunctionType, ResizableLimits, ValueType};
use serde::{Deserialize, Serialize};

/// Handle to an entry of the type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub(crate) u32);

/// Handle to a member of the function index space (function-kind imports
/// in declaration order, then declared functions in declaration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FuncId(pub(crate) u32);

/// Handle to an import entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportId(pub(crate) u32);

/// Handle to a declared table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub(crate) u32);

/// Handle to the declared memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryId(pub(crate) u32);

/// Handle to a declared global
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalId(pub(crate) u32);

impl TypeId {
    /// Position of this type in the type table
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl FuncId {
    /// Position of this function in the function index space
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl ImportId {
    /// Position of this import in the import list
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl TableId {
    /// Position of this table in the table index space
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl MemoryId {
    /// Position of this memory in the memory index space
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl GlobalId {
    /// Position of this global in the global index space
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Kind-specific payload of an import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportKind {
    Function(TypeId),
    Table(ResizableLimits),
    Memory(ResizableLimits),
    Global(ValueType),
}

/// An imported entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    /// Name used for index resolution and the name section
    pub name: String,
    /// Module half of the wire identity
    pub module: String,
    /// Field half of the wire identity
    pub field: String,
    pub kind: ImportKind,
}

/// A declared function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub ty: TypeId,
    /// Local variable types beyond the parameters
    pub locals: Vec<ValueType>,
    pub body: Vec<Expression>,
}

/// A declared table of function references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub elements: Vec<FuncId>,
    pub offset: Expression,
}

/// Payload of a data segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataPayload {
    /// UTF-8 text, written with a byte-length prefix
    Text(String),
    /// Raw bytes, written with a byte-length prefix
    Bytes(Vec<u8>),
}

impl DataPayload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// A data segment placed into the memory at an offset computed from an
/// initializer expression (typically a single constant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub payload: DataPayload,
    pub offset: Expression,
}

impl Data {
    pub fn new(payload: DataPayload, offset: Expression) -> Self {
        Self { payload, offset }
    }
}

/// The declared linear memory with its data segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub limits: ResizableLimits,
    pub segments: Vec<Data>,
}

/// A declared global variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Global {
    pub value_type: ValueType,
    pub init: Expression,
    pub mutable: bool,
}

/// The entity an export exposes; the external kind is derived from the
/// variant rather than stored separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportTarget {
    Function(FuncId),
    Memory(MemoryId),
}

impl From<FuncId> for ExportTarget {
    fn from(id: FuncId) -> Self {
        Self::Function(id)
    }
}

impl From<MemoryId> for ExportTarget {
    fn from(id: MemoryId) -> Self {
        Self::Memory(id)
    }
}

/// An exported entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub name: String,
    pub target: ExportTarget,
}

/// Complete WebAssembly module under construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub(crate) types: Vec<FunctionType>,
    pub(crate) imports: Vec<Import>,
    pub(crate) functions: Vec<Function>,
    pub(crate) tables: Vec<Table>,
    pub(crate) memories: Vec<Memory>,
    pub(crate) globals: Vec<Global>,
    pub(crate) exports: Vec<Export>,
    pub(crate) start: Option<FuncId>,
}

impl Module {
    /// Create a new empty module
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            imports: Vec::new(),
            functions: Vec::new(),
            tables: Vec::new(),
            memories: Vec::new(),
            globals: Vec::new(),
            exports: Vec::new(),
            start: None,
        }
    }

    /// Get the type table
    pub fn types(&self) -> &[FunctionType] {
        &self.types
    }

    /// Get the imports in declaration order
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Get the declared functions in declaration order
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Get the declared tables
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Get the declared memories (at most one in the MVP)
    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    /// Get the declared globals
    pub fn globals(&self) -> &[Global] {
        &self.globals
    }

    /// Get the exports in declaration order
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    /// Get the start function, if one was set
    pub fn start(&self) -> Option<FuncId> {
        self.start
    }

    /// Get the number of function-kind imports
    pub fn import_function_count(&self) -> usize {
        self.imports.iter().filter(|imp| matches!(imp.kind, ImportKind::Function(_))).count()
    }

    /// Get the total number of functions (imported + declared)
    pub fn total_function_count(&self) -> usize {
        self.import_function_count() + self.functions.len()
    }

    /// Add a function type to the type table.
    ///
    /// Types are never deduplicated: two calls with identical shapes
    /// occupy two distinct indices, and lookups go by handle, not shape.
    pub fn add_function_type(&mut self, ty: FunctionType) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Import a function with the given signature.
    ///
    /// Fails once any function has been declared, preserving the
    /// invariant that the function index space is all function-kind
    /// imports followed by all declared functions.
    pub fn add_function_import(&mut self, name: impl Into<String>, module: impl Into<String>, field: impl Into<String>, ty: TypeId) -> ConstructionResult<FuncId> {
        self.check_import_allowed()?;
        self.check_type(ty)?;
        let id = FuncId(self.import_function_count() as u32);
        self.imports.push(Import {
            name: name.into(),
            module: module.into(),
            field: field.into(),
            kind: ImportKind::Function(ty),
        });
        Ok(id)
    }

    /// Import a table of function references
    pub fn add_table_import(&mut self, name: impl Into<String>, module: impl Into<String>, field: impl Into<String>, limits: ResizableLimits) -> ConstructionResult<ImportId> {
        self.check_import_allowed()?;
        let id = ImportId(self.imports.len() as u32);
        self.imports.push(Import {
            name: name.into(),
            module: module.into(),
            field: field.into(),
            kind: ImportKind::Table(limits),
        });
        Ok(id)
    }

    /// Import a linear memory
    pub fn add_memory_import(&mut self, name: impl Into<String>, module: impl Into<String>, field: impl Into<String>, limits: ResizableLimits) -> ConstructionResult<ImportId> {
        self.check_import_allowed()?;
        let id = ImportId(self.imports.len() as u32);
        self.imports.push(Import {
            name: name.into(),
            module: module.into(),
            field: field.into(),
            kind: ImportKind::Memory(limits),
        });
        Ok(id)
    }

    /// Import an immutable global of the given value type
    pub fn add_global_import(&mut self, name: impl Into<String>, module: impl Into<String>, field: impl Into<String>, value_type: ValueType) -> ConstructionResult<ImportId> {
        self.check_import_allowed()?;
        let id = ImportId(self.imports.len() as u32);
        self.imports.push(Import {
            name: name.into(),
            module: module.into(),
            field: field.into(),
            kind: ImportKind::Global(value_type),
        });
        Ok(id)
    }

    /// Declare a function with its signature, extra locals, and body
    pub fn add_function(&mut self, name: impl Into<String>, ty: TypeId, locals: Vec<ValueType>, body: Vec<Expression>) -> ConstructionResult<FuncId> {
        self.check_type(ty)?;
        let id = FuncId(self.total_function_count() as u32);
        self.functions.push(Function {
            name: name.into(),
            ty,
            locals,
            body,
        });
        Ok(id)
    }

    /// Declare a table whose elements start at offset zero
    pub fn add_table(&mut self, elements: Vec<FuncId>) -> ConstructionResult<TableId> {
        self.add_table_with_offset(elements, Expression::I32Const(0))
    }

    /// Declare a table whose elements start at the offset computed by the
    /// given initializer expression
    pub fn add_table_with_offset(&mut self, elements: Vec<FuncId>, offset: Expression) -> ConstructionResult<TableId> {
        for element in &elements {
            self.check_function(*element)?;
        }
        let id = TableId(self.tables.len() as u32);
        self.tables.push(Table { elements, offset });
        Ok(id)
    }

    /// Declare the linear memory.
    ///
    /// Fails with [`ConstructionError::MultipleMemories`] when a memory
    /// already exists.
    pub fn add_memory(&mut self, initial: u32, maximum: Option<u32>, segments: Vec<Data>) -> ConstructionResult<MemoryId> {
        if !self.memories.is_empty() {
            return Err(ConstructionError::MultipleMemories);
        }
        let id = MemoryId(self.memories.len() as u32);
        self.memories.push(Memory {
            limits: ResizableLimits::new(initial, maximum),
            segments,
        });
        Ok(id)
    }

    /// Declare a global variable
    pub fn add_global(&mut self, value_type: ValueType, init: Expression, mutable: bool) -> GlobalId {
        let id = GlobalId(self.globals.len() as u32);
        self.globals.push(Global { value_type, init, mutable });
        id
    }

    /// Export an entity under the given external name; the external kind
    /// is derived from the target handle
    pub fn add_export(&mut self, name: impl Into<String>, target: impl Into<ExportTarget>) -> ConstructionResult<()> {
        let target = target.into();
        match target {
            ExportTarget::Function(func) => self.check_function(func)?,
            ExportTarget::Memory(memory) => self.check_memory(memory)?,
        }
        self.exports.push(Export { name: name.into(), target });
        Ok(())
    }

    /// Set the start function, overwriting any previous start target
    pub fn set_start(&mut self, func: FuncId) -> ConstructionResult<()> {
        self.check_function(func)?;
        self.start = Some(func);
        Ok(())
    }

    /// Build a call expression, capturing the callee's declared result
    /// type at construction time
    pub fn call(&self, target: FuncId, args: Vec<Expression>) -> ConstructionResult<Expression> {
        let result_type = self.function_result_type(target)?;
        Ok(Expression::Call {
            target,
            args,
            result_type,
        })
    }

    /// Get the declared result type of a member of the function index
    /// space (imported or declared)
    pub fn function_result_type(&self, func: FuncId) -> ConstructionResult<Option<ValueType>> {
        let ty = self.function_type_id(func)?;
        Ok(self.types[ty.0 as usize].result())
    }

    /// Get the type-table handle of a member of the function index space
    pub fn function_type_id(&self, func: FuncId) -> ConstructionResult<TypeId> {
        self.imports
            .iter()
            .filter_map(|import| match import.kind {
                ImportKind::Function(ty) => Some(ty),
                _ => None,
            })
            .chain(self.functions.iter().map(|function| function.ty))
            .nth(func.0 as usize)
            .ok_or(ConstructionError::UnknownFunction { index: func.0 })
    }

    fn check_import_allowed(&self) -> ConstructionResult<()> {
        if self.functions.is_empty() {
            Ok(())
        } else {
            Err(ConstructionError::ImportAfterFunction)
        }
    }

    fn check_type(&self, ty: TypeId) -> ConstructionResult<()> {
        if (ty.0 as usize) < self.types.len() {
            Ok(())
        } else {
            Err(ConstructionError::UnknownType { index: ty.0 })
        }
    }

    fn check_function(&self, func: FuncId) -> ConstructionResult<()> {
        if (func.0 as usize) < self.total_function_count() {
            Ok(())
        } else {
            Err(ConstructionError::UnknownFunction { index: func.0 })
        }
    }

    fn check_memory(&self, memory: MemoryId) -> ConstructionResult<()> {
        if (memory.0 as usize) < self.memories.len() {
            Ok(())
        } else {
            Err(ConstructionError::UnknownMemory { index: memory.0 })
        }
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}
