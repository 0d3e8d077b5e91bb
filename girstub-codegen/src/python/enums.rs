//! Enumeration and bitfield rendering.

use super::types::{docstring, sanitize};
use girstub_schema::EnumDef;

/// Generator for enumerations and bitfields.
pub struct EnumGenerator<'a> {
    enum_def: &'a EnumDef,
    is_flags: bool,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator. Bitfields derive from `IntFlag`,
    /// enumerations from `Enum`.
    #[must_use]
    pub fn new(enum_def: &'a EnumDef, is_flags: bool) -> Self {
        Self { enum_def, is_flags }
    }

    /// Generates the enum block.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let base = if self.is_flags { "IntFlag" } else { "Enum" };

        output.push_str(&format!("class {}({}):\n", self.enum_def.name, base));
        if let Some(doc) = &self.enum_def.doc {
            output.push_str(&format!("    {}\n", docstring(doc)));
        }

        if self.enum_def.members.is_empty() {
            output.push_str("    pass\n");
        }
        for member in &self.enum_def.members {
            output.push_str(&format!("    {} = {}\n", sanitize(&member.name), member.value));
            if let Some(doc) = &member.doc {
                output.push_str(&format!("    {}\n", docstring(doc)));
            }
        }
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girstub_schema::EnumMember;

    fn align() -> EnumDef {
        let mut align = EnumDef::new("Align");
        align.doc = Some("Alignment.".to_string());
        let mut start = EnumMember::new("start", "0");
        start.doc = Some("Start.".to_string());
        align.add_member(start);
        align.add_member(EnumMember::new("2x", "1"));
        align
    }

    #[test]
    fn test_generate_enum() {
        let output = EnumGenerator::new(&align(), false).generate();
        assert_eq!(
            output,
            concat!(
                "class Align(Enum):\n",
                "    \"\"\"Alignment.\"\"\"\n",
                "    START = 0\n",
                "    \"\"\"Start.\"\"\"\n",
                "    _2X = 1\n",
                "\n",
            )
        );
    }

    #[test]
    fn test_generate_bitfield() {
        let output = EnumGenerator::new(&align(), true).generate();
        assert!(output.starts_with("class Align(IntFlag):\n"));
    }

    #[test]
    fn test_generate_empty_enum() {
        let output = EnumGenerator::new(&EnumDef::new("Empty"), false).generate();
        assert_eq!(output, "class Empty(Enum):\n    pass\n\n");
    }
}
