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

//! Table and Element section generators

use super::write_resizable_limits;
use crate::ast::{ANYFUNC_TYPE, Opcode, ResizableLimits};
use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::instructions::encode_expression;
use crate::codegen::writer::ByteWriter;

/// Generator for the Table section: each table declares the `anyfunc`
/// element type and limits sized to its element count. Empty tables
/// still produce an entry; they just own no element segment.
pub struct TableSectionGenerator;

impl TableSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let tables = ctx.module.tables();
        writer.write_varuint(tables.len() as u64);
        for table in tables {
            writer.write_u8(ANYFUNC_TYPE);
            write_resizable_limits(writer, &ResizableLimits::new(table.elements.len() as u32, None));
        }
        Ok(())
    }
}

/// Generator for the Element section: one segment per non-empty table,
/// carrying the owning table index, the offset expression, and the
/// resolved function indices
pub struct ElementSectionGenerator;

impl ElementSectionGenerator {
    /// Check whether the module has any element segment to emit
    pub(crate) fn has_segments(ctx: &EncodeContext<'_>) -> bool {
        ctx.module.tables().iter().any(|table| !table.elements.is_empty())
    }

    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let segments: Vec<_> = ctx
            .module
            .tables()
            .iter()
            .enumerate()
            .filter(|(_, table)| !table.elements.is_empty())
            .collect();

        writer.write_varuint(segments.len() as u64);
        for (table_index, table) in segments {
            writer.write_varuint(table_index as u64);
            encode_expression(writer, ctx, &table.offset)?;
            writer.write_u8(Opcode::End.wire_byte());
            writer.write_varuint(table.elements.len() as u64);
            for element in &table.elements {
                writer.write_varuint(ctx.function_index(*element)? as u64);
            }
        }
        Ok(())
    }
}
