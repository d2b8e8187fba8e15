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

//! Memory and Data section generators

use super::write_resizable_limits;
use crate::ast::Opcode;
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::instructions::encode_expression;
use crate::codegen::writer::ByteWriter;

/// Generator for the Memory section: page-count limits per memory
/// (at most one in the MVP)
pub struct MemorySectionGenerator;

impl MemorySectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let memories = ctx.module.memories();
        writer.write_varuint(memories.len() as u64);
        for memory in memories {
            write_resizable_limits(writer, &memory.limits);
        }
        Ok(())
    }
}

/// Generator for the Data section: the memory's segments flattened in
/// module order, each carrying its owning memory index, offset
/// expression, and length-prefixed payload bytes
pub struct DataSectionGenerator;

impl DataSectionGenerator {
    /// Check whether the module has any data segment to emit
    pub(crate) fn has_segments(ctx: &EncodeContext<'_>) -> bool {
        ctx.module.memories().iter().any(|memory| !memory.segments.is_empty())
    }

    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let segments: Vec<_> = ctx
            .module
            .memories()
            .iter()
            .enumerate()
            .flat_map(|(memory_index, memory)| memory.segments.iter().map(move |segment| (memory_index, segment)))
            .collect();

        writer.write_varuint(segments.len() as u64);
        for (memory_index, segment) in segments {
            writer.write_varuint(memory_index as u64);
            encode_expression(writer, ctx, &segment.offset)?;
            writer.write_u8(Opcode::End.wire_byte());
            let bytes = segment.payload.as_bytes();
            writer.write_varuint(bytes.len() as u64);
            writer.write_bytes(bytes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Data, DataPayload, Expression, Module};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_memory_limits() {
        let mut module = Module::new();
        module.add_memory(2, Some(4), vec![]).unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        MemorySectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(writer.as_slice(), &[0x01, 0x01, 0x02, 0x04]);
    }

    #[test]
    fn test_data_segments_carry_offset_and_payload() {
        let mut module = Module::new();
        module
            .add_memory(
                1,
                Some(1),
                vec![
                    Data::new(DataPayload::Text("hi".into()), Expression::I32Const(0)),
                    Data::new(DataPayload::Bytes(vec![0xff]), Expression::I32Const(50)),
                ],
            )
            .unwrap();

        let options = EncodeOptions::default();
        let ctx = EncodeContext::new(&module, &options);
        assert!(DataSectionGenerator::has_segments(&ctx));

        let mut writer = ByteWriter::new();
        DataSectionGenerator::generate(&mut writer, &ctx).unwrap();

        assert_eq!(
            writer.as_slice(),
            &[
                0x02, // two segments
                0x00, 0x41, 0x00, 0x0b, 0x02, b'h', b'i', // (i32.const 0) "hi"
                0x00, 0x41, 0x32, 0x0b, 0x01, 0xff, // (i32.const 50) one raw byte
            ],
        );
    }
}
