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

//! Function section generator

use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::writer::ByteWriter;

/// Generator for the Function section: one type-table index per
/// declared function, in declaration order
pub struct FunctionSectionGenerator;

impl FunctionSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        let functions = ctx.module.functions();
        writer.write_varuint(functions.len() as u64);
        for function in functions {
            writer.write_varuint(ctx.type_index(function.ty)? as u64);
        }
        Ok(())
    }
}
