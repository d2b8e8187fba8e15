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

//! Custom "name" section generator

use crate::codegen::context::EncodeContext;
use crate::codegen::error::EncodeResult;
use crate::codegen::writer::ByteWriter;

/// Generator for the debug "name" custom section: one `$`-prefixed name
/// per member of the function index space (imported and declared
/// functions alike), each followed by a zero local-name count
pub struct NameSectionGenerator;

impl NameSectionGenerator {
    pub(crate) fn generate(writer: &mut ByteWriter, ctx: &EncodeContext<'_>) -> EncodeResult<()> {
        writer.write_name("name");
        let entries = ctx.function_entries();
        writer.write_varuint(entries.len() as u64);
        for entry in entries {
            writer.write_name(&format!("${}", entry.name));
            writer.write_varuint(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionType, Module};
    use crate::codegen::config::EncodeOptions;

    #[test]
    fn test_names_cover_imports_and_functions() {
        let mut module = Module::new();
        let ty = module.add_function_type(FunctionType::void());
        module.add_function_import("log", "env", "log", ty).unwrap();
        module.add_function("main", ty, vec![], vec![]).unwrap();

        let options = EncodeOptions::with_names();
        let ctx = EncodeContext::new(&module, &options);
        let mut writer = ByteWriter::new();
        NameSectionGenerator::generate(&mut writer, &ctx).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"\x04name\x02");
        expected.extend_from_slice(b"\x04$log\x00");
        expected.extend_from_slice(b"\x05$main\x00");
        assert_eq!(writer.as_slice(), &expected[..]);
    }
}
