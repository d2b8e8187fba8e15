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

//! Module preamble generator

use crate::codegen::writer::ByteWriter;

/// The `\0asm` magic number opening every wasm binary
pub const MAGIC_NUMBER: u32 = 0x6d73_6100;

/// The binary format version this encoder targets
pub const VERSION: u32 = 1;

/// Generator for the 8-byte module preamble
pub struct PreambleGenerator;

impl PreambleGenerator {
    /// Write the magic number and version, both fixed-width
    /// little-endian
    pub fn generate(writer: &mut ByteWriter) {
        writer.write_u32_le(MAGIC_NUMBER);
        writer.write_u32_le(VERSION);
    }
}
