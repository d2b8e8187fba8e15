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

//! Configuration for binary encoding

/// Options accepted by the encoder
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Whether to emit the custom "name" section with the names of the
    /// members of the function index space
    pub include_names: bool,

    /// Whether to emit relocatable output. Relocation sections are not
    /// implemented; setting this fails the encode with
    /// [`EncodeError::Unsupported`](super::error::EncodeError::Unsupported)
    /// rather than being silently ignored.
    pub relocatable: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include_names: false,
            relocatable: false,
        }
    }
}

impl EncodeOptions {
    /// Options with the name section enabled
    pub fn with_names() -> Self {
        Self {
            include_names: true,
            ..Default::default()
        }
    }
}
