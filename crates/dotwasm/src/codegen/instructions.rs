// Dotlanth
//! Expression tree encoding
//!
//! Lowers the [`Expression`] tree to the flat postorder byte sequence of
//! the binary format: operands first, then the instruction's one-byte
//! opcode, then its immediates. The match is exhaustive over the closed
//! instruction set, so every node kind has exactly one encoding rule.

use super::context::EncodeContext;
use super::error::{EncodeError, EncodeResult};
use super::writer::ByteWriter;
use crate::ast::{EMPTY_BLOCK_TYPE, Expression, Opcode, ValueType};

/// Write a block type byte: the value type's encoding, or the empty
/// block type when the block yields nothing
fn write_block_type(writer: &mut ByteWriter, result_type: Option<ValueType>) {
    match result_type {
        Some(ty) => writer.write_u8(ty.wire_byte()),
        None => writer.write_u8(EMPTY_BLOCK_TYPE),
    }
}

/// Write the memory access immediates: the alignment exponent (log2 of
/// the alignment, falling back to the access's natural byte width when
/// the alignment is zero) followed by the plain unsigned offset
fn write_memory_access(writer: &mut ByteWriter, alignment: u32, byte_width: u8, offset: u32) -> EncodeResult<()> {
    let effective = if alignment != 0 { alignment } else { byte_width as u32 };
    if !effective.is_power_of_two() {
        return Err(EncodeError::InvalidAlignment { alignment: effective });
    }
    writer.write_varuint(effective.trailing_zeros() as u64);
    writer.write_varuint(offset as u64);
    Ok(())
}

/// Select the load opcode for a (value type, byte width, signedness)
/// combination
fn load_opcode(value_type: ValueType, byte_width: u8, signed: bool) -> EncodeResult<Opcode> {
    let opcode = match (value_type, byte_width) {
        (ValueType::I32, 1) => {
            if signed {
                Opcode::I32Load8S
            } else {
                Opcode::I32Load8U
            }
        }
        (ValueType::I32, 2) => {
            if signed {
                Opcode::I32Load16S
            } else {
                Opcode::I32Load16U
            }
        }
        (ValueType::I32, 4) => Opcode::I32Load,
        (ValueType::I64, 1) => {
            if signed {
                Opcode::I64Load8S
            } else {
                Opcode::I64Load8U
            }
        }
        (ValueType::I64, 2) => {
            if signed {
                Opcode::I64Load16S
            } else {
                Opcode::I64Load16U
            }
        }
        (ValueType::I64, 4) => {
            if signed {
                Opcode::I64Load32S
            } else {
                Opcode::I64Load32U
            }
        }
        (ValueType::I64, 8) => Opcode::I64Load,
        (ValueType::F32, 4) => Opcode::F32Load,
        (ValueType::F64, 8) => Opcode::F64Load,
        (value_type, byte_width) => {
            return Err(EncodeError::InvalidMemoryAccess {
                value_type,
                access: "load",
                byte_width,
            });
        }
    };
    Ok(opcode)
}

/// Select the store opcode for a (value type, byte width) combination;
/// stores have no signedness and floats have no narrow variants
fn store_opcode(value_type: ValueType, byte_width: u8) -> EncodeResult<Opcode> {
    let opcode = match (value_type, byte_width) {
        (ValueType::I32, 1) => Opcode::I32Store8,
        (ValueType::I32, 2) => Opcode::I32Store16,
        (ValueType::I32, 4) => Opcode::I32Store,
        (ValueType::I64, 1) => Opcode::I64Store8,
        (ValueType::I64, 2) => Opcode::I64Store16,
        (ValueType::I64, 4) => Opcode::I64Store32,
        (ValueType::I64, 8) => Opcode::I64Store,
        (ValueType::F32, 4) => Opcode::F32Store,
        (ValueType::F64, 8) => Opcode::F64Store,
        (value_type, byte_width) => {
            return Err(EncodeError::InvalidMemoryAccess {
                value_type,
                access: "store",
                byte_width,
            });
        }
    };
    Ok(opcode)
}

/// Encode one expression tree into the writer
pub(crate) fn encode_expression(writer: &mut ByteWriter, ctx: &EncodeContext<'_>, expr: &Expression) -> EncodeResult<()> {
    match expr {
        // Constant payloads: signed LEB128 for the integer forms, raw
        // IEEE bits in little-endian order for the float forms
        Expression::I32Const(value) => {
            writer.write_u8(Opcode::I32Const.wire_byte());
            writer.write_varint(*value as i64);
        }
        Expression::I64Const(value) => {
            writer.write_u8(Opcode::I64Const.wire_byte());
            writer.write_varint(*value);
        }
        Expression::F32Const(value) => {
            writer.write_u8(Opcode::F32Const.wire_byte());
            writer.write_u32_le(value.to_bits());
        }
        Expression::F64Const(value) => {
            writer.write_u8(Opcode::F64Const.wire_byte());
            writer.write_u64_le(value.to_bits());
        }

        Expression::Unreachable => writer.write_u8(Opcode::Unreachable.wire_byte()),
        Expression::Nop => writer.write_u8(Opcode::Nop.wire_byte()),

        Expression::Block { result_type, children } => {
            writer.write_u8(Opcode::Block.wire_byte());
            write_block_type(writer, *result_type);
            for child in children {
                encode_expression(writer, ctx, child)?;
            }
            writer.write_u8(Opcode::End.wire_byte());
        }
        Expression::Loop { result_type, children } => {
            writer.write_u8(Opcode::Loop.wire_byte());
            write_block_type(writer, *result_type);
            for child in children {
                encode_expression(writer, ctx, child)?;
            }
            writer.write_u8(Opcode::End.wire_byte());
        }
        Expression::If {
            condition,
            consequence,
            alternate,
        } => {
            // The arm type follows the consequence; each arm is wrapped
            // in an implicit block carrying the same type
            let result_type = consequence.result_type();
            encode_expression(writer, ctx, condition)?;
            writer.write_u8(Opcode::If.wire_byte());
            write_block_type(writer, result_type);
            writer.write_u8(Opcode::Block.wire_byte());
            write_block_type(writer, result_type);
            encode_expression(writer, ctx, consequence)?;
            writer.write_u8(Opcode::End.wire_byte());
            if let Some(alternate) = alternate {
                writer.write_u8(Opcode::Else.wire_byte());
                writer.write_u8(Opcode::Block.wire_byte());
                write_block_type(writer, result_type);
                encode_expression(writer, ctx, alternate)?;
                writer.write_u8(Opcode::End.wire_byte());
            }
            writer.write_u8(Opcode::End.wire_byte());
        }
        Expression::Br { depth } => {
            writer.write_u8(Opcode::Br.wire_byte());
            writer.write_varuint(*depth as u64);
        }
        Expression::BrIf { condition, depth } => {
            encode_expression(writer, ctx, condition)?;
            writer.write_u8(Opcode::BrIf.wire_byte());
            writer.write_varuint(*depth as u64);
        }
        Expression::BrTable { index, targets, default } => {
            encode_expression(writer, ctx, index)?;
            writer.write_u8(Opcode::BrTable.wire_byte());
            writer.write_varuint(targets.len() as u64);
            for target in targets {
                writer.write_varuint(*target as u64);
            }
            writer.write_varuint(*default as u64);
        }
        Expression::Return { value } => {
            if let Some(value) = value {
                encode_expression(writer, ctx, value)?;
            }
            writer.write_u8(Opcode::Return.wire_byte());
        }

        Expression::Call { target, args, .. } => {
            for arg in args {
                encode_expression(writer, ctx, arg)?;
            }
            writer.write_u8(Opcode::Call.wire_byte());
            writer.write_varuint(ctx.function_index(*target)? as u64);
        }
        Expression::CallIndirect { ty, target, args } => {
            for arg in args {
                encode_expression(writer, ctx, arg)?;
            }
            encode_expression(writer, ctx, target)?;
            writer.write_u8(Opcode::CallIndirect.wire_byte());
            writer.write_varuint(ctx.type_index(*ty)? as u64);
            // reserved table index, must be zero in the MVP
            writer.write_varuint(0);
        }

        Expression::Drop { target } => {
            encode_expression(writer, ctx, target)?;
            writer.write_u8(Opcode::Drop.wire_byte());
        }
        Expression::Select { first, second, condition } => {
            encode_expression(writer, ctx, first)?;
            encode_expression(writer, ctx, second)?;
            encode_expression(writer, ctx, condition)?;
            writer.write_u8(Opcode::Select.wire_byte());
        }

        Expression::GetLocal { index } => {
            writer.write_u8(Opcode::GetLocal.wire_byte());
            writer.write_varuint(*index as u64);
        }
        Expression::SetLocal { index, value } => {
            encode_expression(writer, ctx, value)?;
            writer.write_u8(Opcode::SetLocal.wire_byte());
            writer.write_varuint(*index as u64);
        }
        Expression::TeeLocal { index, value } => {
            encode_expression(writer, ctx, value)?;
            writer.write_u8(Opcode::TeeLocal.wire_byte());
            writer.write_varuint(*index as u64);
        }
        Expression::GetGlobal { global } => {
            writer.write_u8(Opcode::GetGlobal.wire_byte());
            writer.write_varuint(ctx.global_index(*global)? as u64);
        }
        Expression::SetGlobal { global, value } => {
            encode_expression(writer, ctx, value)?;
            writer.write_u8(Opcode::SetGlobal.wire_byte());
            writer.write_varuint(ctx.global_index(*global)? as u64);
        }

        Expression::Load {
            value_type,
            byte_width,
            signed,
            offset,
            alignment,
            address,
        } => {
            encode_expression(writer, ctx, address)?;
            writer.write_u8(load_opcode(*value_type, *byte_width, *signed)?.wire_byte());
            write_memory_access(writer, *alignment, *byte_width, *offset)?;
        }
        Expression::Store {
            value_type,
            byte_width,
            offset,
            alignment,
            address,
            value,
        } => {
            encode_expression(writer, ctx, address)?;
            encode_expression(writer, ctx, value)?;
            writer.write_u8(store_opcode(*value_type, *byte_width)?.wire_byte());
            write_memory_access(writer, *alignment, *byte_width, *offset)?;
        }
        Expression::MemorySize => {
            writer.write_u8(Opcode::MemorySize.wire_byte());
            // reserved memory index, single memory in MVP
            writer.write_varuint(0);
        }
        Expression::MemoryGrow { delta } => {
            encode_expression(writer, ctx, delta)?;
            writer.write_u8(Opcode::MemoryGrow.wire_byte());
            writer.write_varuint(0);
        }

        Expression::Unary { opcode, operand } => {
            encode_expression(writer, ctx, operand)?;
            writer.write_u8(opcode.wire_byte());
        }
        Expression::Binary { opcode, left, right } => {
            encode_expression(writer, ctx, left)?;
            encode_expression(writer, ctx, right)?;
            writer.write_u8(opcode.wire_byte());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Module;
    use crate::codegen::config::EncodeOptions;

    fn encode_one(expr: &Expression) -> EncodeResult<Vec<u8>> {
        let module = Module::new();
        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        encode_expression(&mut writer, &ctx, expr)?;
        Ok(writer.into_bytes())
    }

    #[test]
    fn test_constants_use_signed_payloads() {
        assert_eq!(encode_one(&Expression::I32Const(1)).unwrap(), vec![0x41, 0x01]);
        assert_eq!(encode_one(&Expression::I32Const(-1)).unwrap(), vec![0x41, 0x7f]);
        assert_eq!(encode_one(&Expression::I64Const(2)).unwrap(), vec![0x42, 0x02]);
    }

    #[test]
    fn test_float_constants_use_ieee_bits() {
        assert_eq!(encode_one(&Expression::F32Const(1.0)).unwrap(), vec![0x43, 0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_load_opcode_selection() {
        assert_eq!(load_opcode(ValueType::I32, 1, true).unwrap(), Opcode::I32Load8S);
        assert_eq!(load_opcode(ValueType::I32, 2, false).unwrap(), Opcode::I32Load16U);
        assert_eq!(load_opcode(ValueType::I64, 4, true).unwrap(), Opcode::I64Load32S);
        assert_eq!(load_opcode(ValueType::I64, 8, false).unwrap(), Opcode::I64Load);
        assert_eq!(load_opcode(ValueType::F64, 8, false).unwrap(), Opcode::F64Load);

        let err = load_opcode(ValueType::F32, 2, false).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidMemoryAccess {
                value_type: ValueType::F32,
                byte_width: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_store_opcode_selection() {
        assert_eq!(store_opcode(ValueType::I32, 4).unwrap(), Opcode::I32Store);
        assert_eq!(store_opcode(ValueType::I64, 4).unwrap(), Opcode::I64Store32);
        assert_eq!(store_opcode(ValueType::F32, 4).unwrap(), Opcode::F32Store);
        assert!(store_opcode(ValueType::I32, 8).is_err());
    }

    #[test]
    fn test_memory_access_alignment_is_an_exponent() {
        let expr = Expression::Load {
            value_type: ValueType::I32,
            byte_width: 4,
            signed: true,
            offset: 2,
            alignment: 0,
            address: Box::new(Expression::I32Const(3)),
        };
        // natural width 4 -> exponent 2
        assert_eq!(encode_one(&expr).unwrap(), vec![0x41, 0x03, 0x28, 0x02, 0x02]);
    }

    #[test]
    fn test_drop_encodes_operand_first() {
        let expr = Expression::Drop {
            target: Box::new(Expression::I32Const(1)),
        };
        assert_eq!(encode_one(&expr).unwrap(), vec![0x41, 0x01, 0x1a]);
    }

    #[test]
    fn test_if_wraps_consequence_in_implicit_block() {
        let expr = Expression::If {
            condition: Box::new(Expression::I32Const(1)),
            consequence: Box::new(Expression::Nop),
            alternate: None,
        };
        assert_eq!(
            encode_one(&expr).unwrap(),
            vec![0x41, 0x01, 0x04, 0x40, 0x02, 0x40, 0x01, 0x0b, 0x0b],
        );
    }

    #[test]
    fn test_branch_family() {
        assert_eq!(encode_one(&Expression::Br { depth: 1 }).unwrap(), vec![0x0c, 0x01]);

        let expr = Expression::BrTable {
            index: Box::new(Expression::GetLocal { index: 0 }),
            targets: vec![0, 1],
            default: 2,
        };
        assert_eq!(encode_one(&expr).unwrap(), vec![0x20, 0x00, 0x0e, 0x02, 0x00, 0x01, 0x02]);
    }
}
