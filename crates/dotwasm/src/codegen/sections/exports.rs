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

//! Export and Start section generators

use crate::ast::{ExportTarget, ExternalKind, FuncId};
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::writer::ByteWriter;

/// Generator for the Export section: external name, kind derived from
/// the target, and the resolved index
pub struct ExportSectionGenerator;

impl ExportSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let exports = ctx.module.exports();
        writer.write_varuint(exports.len() as u64);
        for export in exports {
            writer.write_name(&export.name);
            match export.target {
                ExportTarget::Function(func) => {
                    writer.write_u8(ExternalKind::Function.wire_byte());
                    writer.write_varuint(ctx.function_index(func)? as u64);
                }
                ExportTarget::Memory(memory) => {
                    writer.write_u8(ExternalKind::Memory.wire_byte());
                    writer.write_varuint(ctx.memory_index(memory)? as u64);
                }
            }
        }
        Ok(())
    }
}

/// Generator for the Start section: the single resolved index of the
/// start function
pub struct StartSectionGenerator;

impl StartSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>, start: FuncId) -> EncodeResult<()> {
        writer.write_varuint(ctx.function_index(start)? as u64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionType, Module};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_export_entry() {
        let mut module = Module::new();
        let ty = module.add_function_type(FunctionType::void());
        let func = module.add_function("foo", ty, vec![], vec![]).unwrap();
        module.add_export("foo", func).unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        ExportSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(writer.as_slice(), &[0x01, 0x03, b'f', b'o', b'o', 0x00, 0x00]);
    }
}
