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

//! Code section generator

use crate::ast::Opcode;
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::instructions::encode_expression;
use crate::codegen::writer::ByteWriter;

/// Generator for the Code section: one body entry per declared
/// function. A body's byte length must precede it, so each body is
/// built in its own writer and appended behind its measured size.
pub struct CodeSectionGenerator;

impl CodeSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let functions = ctx.module.functions();
        writer.write_varuint(functions.len() as u64);
        for function in functions {
            let mut body = ByteWriter::new();
            body.write_varuint(function.locals.len() as u64);
            for local in &function.locals {
                body.write_varuint(1);
                body.write_u8(local.wire_byte());
            }
            for expr in &function.body {
                encode_expression(&mut body, ctx, expr)?;
            }
            body.write_u8(Opcode::End.wire_byte());

            writer.write_varuint(body.len() as u64);
            writer.append(&body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, FunctionType, Module, ValueType};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_body_is_size_prefixed() {
        let mut module = Module::new();
        let ty = module.add_function_type(FunctionType::new(vec![], vec![ValueType::I32]).unwrap());
        module.add_function("foo", ty, vec![], vec![Expression::I32Const(1)]).unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        CodeSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[
                0x01, // one body
                0x04, // body size
                0x00, // no locals
                0x41, 0x01, // i32.const 1
                0x0b, // end
            ],
        );
    }

    #[test]
    fn test_locals_are_declared_before_the_body() {
        let mut module = Module::new();
        let ty = module.add_function_type(FunctionType::void());
        module
            .add_function("foo", ty, vec![ValueType::I32, ValueType::I64], vec![])
            .unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        CodeSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[0x01, 0x06, 0x02, 0x01, 0x7f, 0x01, 0x7e, 0x0b],
        );
    }
}
