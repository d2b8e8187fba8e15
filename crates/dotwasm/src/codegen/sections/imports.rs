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

//! Import section generator

use super::write_resizable_limits;
use crate::ast::{ANYFUNC_TYPE, ExternalKind, ImportKind};
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::writer::ByteWriter;

/// Generator for the Import section: each entry is the module/field
/// name pair, the external kind, and the kind-specific type payload
pub struct ImportSectionGenerator;

impl ImportSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let imports = ctx.module.imports();
        writer.write_varuint(imports.len() as u64);
        for import in imports {
            writer.write_name(&import.module);
            writer.write_name(&import.field);
            match &import.kind {
                ImportKind::Function(ty) => {
                    writer.write_u8(ExternalKind::Function.wire_byte());
                    writer.write_varuint(ctx.type_index(*ty)? as u64);
                }
                ImportKind::Table(limits) => {
                    writer.write_u8(ExternalKind::Table.wire_byte());
                    writer.write_u8(ANYFUNC_TYPE);
                    write_resizable_limits(writer, limits);
                }
                ImportKind::Memory(limits) => {
                    writer.write_u8(ExternalKind::Memory.wire_byte());
                    write_resizable_limits(writer, limits);
                }
                ImportKind::Global(value_type) => {
                    writer.write_u8(ExternalKind::Global.wire_byte());
                    writer.write_u8(value_type.wire_byte());
                    // imported globals are immutable in the MVP
                    writer.write_u8(0);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionType, Module, ValueType};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_function_import_references_its_type_index() {
        let mut module = Module::new();
        let ty = module.add_function_type(FunctionType::new(vec![ValueType::I32], vec![ValueType::I32]).unwrap());
        module.add_function_import("foo", "env", "foo", ty).unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        ImportSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[
                0x01, // one entry
                0x03, b'e', b'n', b'v', // module name
                0x03, b'f', b'o', b'o', // field name
                0x00, 0x00, // function kind, type index 0
            ],
        );
    }

    #[test]
    fn test_global_import_payload() {
        let mut module = Module::new();
        module.add_global_import("g", "env", "g", ValueType::I64).unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        ImportSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(&writer.as_slice()[7..], &[0x03, 0x7e, 0x00]);
    }
}
