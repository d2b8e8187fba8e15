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

//! Type section generator

use crate::ast::FUNC_TYPE_FORM;
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::writer::ByteWriter;

/// Generator for the Type section: every entry is a `func` form with its
/// parameter and result types
pub struct TypeSectionGenerator;

impl TypeSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let types = ctx.module.types();
        writer.write_varuint(types.len() as u64);
        for ty in types {
            writer.write_u8(FUNC_TYPE_FORM);
            writer.write_varuint(ty.params().len() as u64);
            for param in ty.params() {
                writer.write_u8(param.wire_byte());
            }
            match ty.result() {
                Some(result) => {
                    writer.write_varuint(1);
                    writer.write_u8(result.wire_byte());
                }
                None => writer.write_varuint(0),
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
    fn test_type_entries() {
        let mut module = Module::new();
        module.add_function_type(FunctionType::new(vec![], vec![ValueType::I32]).unwrap());
        module.add_function_type(FunctionType::new(vec![ValueType::I32, ValueType::I64], vec![]).unwrap());

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        TypeSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[
                0x02, // two entries
                0x60, 0x00, 0x01, 0x7f, // (func (result i32))
                0x60, 0x02, 0x7f, 0x7e, 0x00, // (func (param i32 i64))
            ],
        );
    }
}
