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

//! Main encoder orchestrating the section generators
//!
//! Walks the builder snapshot in the canonical section order and emits
//! each section only when its backing collection is non-empty. The
//! module is never mutated; encoding the same snapshot twice produces
//! byte-identical output.

use super::config::EncodeOptions;
use super::context::EncodeContext;
use super::error::{EncodeError, EncodeResult};
use super::sections::{
    CodeSectionGenerator, DataSectionGenerator, ElementSectionGenerator, ExportSectionGenerator, FunctionSectionGenerator, GlobalSectionGenerator, ImportSectionGenerator, MemorySectionGenerator,
    NameSectionGenerator, PreambleGenerator, StartSectionGenerator, TableSectionGenerator, TypeSectionGenerator,
};
use super::writer::ByteWriter;
use crate::ast::{Module, SectionId};
use tracing::debug;

/// Encoder for one module snapshot
pub struct ModuleEncoder<'m> {
    module: &'m Module,
    options: EncodeOptions,
}

impl<'m> ModuleEncoder<'m> {
    /// Create an encoder with default options
    pub fn new(module: &'m Module) -> Self {
        Self {
            module,
            options: EncodeOptions::default(),
        }
    }

    /// Create an encoder with the given options
    pub fn with_options(module: &'m Module, options: EncodeOptions) -> Self {
        Self { module, options }
    }

    /// Produce the binary encoding of the module
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        if self.options.relocatable {
            return Err(EncodeError::Unsupported {
                feature: "relocatable output".into(),
            });
        }

        let ctx = EncodeContext::new(self.module, &self.options);
        let mut output = ByteWriter::new();
        PreambleGenerator::generate(&mut output);

        if !self.module.types().is_empty() {
            emit_section(&mut output, SectionId::Type, |payload| TypeSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.imports().is_empty() {
            emit_section(&mut output, SectionId::Import, |payload| ImportSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.functions().is_empty() {
            emit_section(&mut output, SectionId::Function, |payload| FunctionSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.tables().is_empty() {
            emit_section(&mut output, SectionId::Table, |payload| TableSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.memories().is_empty() {
            emit_section(&mut output, SectionId::Memory, |payload| MemorySectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.globals().is_empty() {
            emit_section(&mut output, SectionId::Global, |payload| GlobalSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.exports().is_empty() {
            emit_section(&mut output, SectionId::Export, |payload| ExportSectionGenerator::generate(payload, &ctx))?;
        }
        if let Some(start) = self.module.start() {
            emit_section(&mut output, SectionId::Start, |payload| StartSectionGenerator::generate(payload, &ctx, start))?;
        }
        if ElementSectionGenerator::has_segments(&ctx) {
            emit_section(&mut output, SectionId::Element, |payload| ElementSectionGenerator::generate(payload, &ctx))?;
        }
        if !self.module.functions().is_empty() {
            emit_section(&mut output, SectionId::Code, |payload| CodeSectionGenerator::generate(payload, &ctx))?;
        }
        if DataSectionGenerator::has_segments(&ctx) {
            emit_section(&mut output, SectionId::Data, |payload| DataSectionGenerator::generate(payload, &ctx))?;
        }
        if ctx.options.include_names && self.module.total_function_count() > 0 {
            emit_section(&mut output, SectionId::Custom, |payload| NameSectionGenerator::generate(payload, &ctx))?;
        }

        Ok(output.into_bytes())
    }
}

/// Run a section generator against a fresh payload writer, then write
/// the section id, the payload byte length, and the payload itself
fn emit_section<F>(output: &mut ByteWriter, id: SectionId, generate: F) -> EncodeResult<()>
where
    F: FnOnce(&mut ByteWriter) -> EncodeResult<()>,
{
    let mut payload = ByteWriter::new();
    generate(&mut payload)?;

    output.write_varuint(id.wire_byte() as u64);
    output.write_varuint(payload.len() as u64);
    output.append(&payload);

    debug!(section = id.name(), bytes = payload.len(), "section emitted");
    Ok(())
}

/// Encode a module snapshot to wasm binary bytes
pub fn encode_module(module: &Module, options: &EncodeOptions) -> EncodeResult<Vec<u8>> {
    ModuleEncoder::with_options(module, options.clone()).encode()
}
