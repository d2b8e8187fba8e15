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

//! Global section generator

use crate::ast::Opcode;
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::instructions::encode_expression;
use crate::codegen::writer::ByteWriter;

/// Generator for the Global section: value type, mutability flag, and
/// initializer expression per global
pub struct GlobalSectionGenerator;

impl GlobalSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let globals = ctx.module.globals();
        writer.write_varuint(globals.len() as u64);
        for global in globals {
            writer.write_u8(global.value_type.wire_byte());
            writer.write_u8(if global.mutable { 1 } else { 0 });
            encode_expression(writer, ctx, &global.init)?;
            writer.write_u8(Opcode::End.wire_byte());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Module, ValueType};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_global_entries() {
        let mut module = Module::new();
        module.add_global(ValueType::I32, Expression::I32Const(7), false);
        module.add_global(ValueType::I64, Expression::I64Const(-1), true);

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        GlobalSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[
                0x02, // two globals
                0x7f, 0x00, 0x41, 0x07, 0x0b, // (global i32 (i32.const 7))
                0x7e, 0x01, 0x42, 0x7f, 0x0b, // (global (mut i64) (i64.const -1))
            ],
        );
    }
}
