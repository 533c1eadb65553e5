use crate::writer::CodeWriter;

/// Emitted verbatim at the top of every generated header/implementation
/// file, reproducing the original generator's license-plus-attribution
/// block structure without its copyrighted wording.
pub const LICENSE_HEADER: &[&str] = &[
    "// This file was generated by CPACSGen from a CPACS XML Schema.",
    "// Do not edit, all changes are lost when files are re-generated.",
    "//",
    "// Licensed under the Apache License, Version 2.0 (the \"License\")",
    "// you may not use this file except in compliance with the License.",
    "// You may obtain a copy of the License at",
    "//",
    "//     http://www.apache.org/licenses/LICENSE-2.0",
    "//",
    "// Unless required by applicable law or agreed to in writing, software",
    "// distributed under the License is distributed on an \"AS IS\" BASIS,",
    "// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
    "// See the License for the specific language governing permissions and",
    "// limitations under the License.",
];

pub fn write_license_header(w: &mut CodeWriter) {
    for line in LICENSE_HEADER {
        w.line(*line);
    }
    w.blank();
}
