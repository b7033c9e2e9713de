//! Structured verifying-key constant and its textual renderings
//!
//! A serialized key is first turned into an ordered list of named fields,
//! then rendered by a [`Syntax`] in a single pass.

use crate::errors::{CodecError, Result};
use crate::key::{SerializedVk, VkRole};

/// Bytes per rendered row
const ROW_WIDTH: usize = 32;

/// Name of the leading count field
pub const NR_PUBINPUTS: &str = "nr_pubinputs";

/// Value of one constant field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(usize),
    Bytes(Vec<u8>),
    /// A slice of fixed-size byte arrays
    ByteArrays(Vec<Vec<u8>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedField {
    pub name: &'static str,
    pub value: FieldValue,
}

/// Ordered fields of a verifying-key constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantLayout {
    pub fields: Vec<NamedField>,
}

impl ConstantLayout {
    /// Build the layout, checking `IC` against the declared input count.
    pub fn from_vk(vk: &SerializedVk, public_input_count: Option<usize>) -> Result<Self> {
        let ic_key = VkRole::Ic.json_key();
        if vk.nr_pubinputs != vk.ic.len() {
            return Err(CodecError::malformed(
                ic_key,
                format!(
                    "nr_pubinputs is {} but IC has {} points",
                    vk.nr_pubinputs,
                    vk.ic.len()
                ),
            ));
        }
        if let Some(expected) = public_input_count {
            if vk.ic.len() != expected {
                return Err(CodecError::malformed(
                    ic_key,
                    format!("expected {expected} points, found {}", vk.ic.len()),
                ));
            }
        }

        let mut fields = Vec::with_capacity(VkRole::ALL.len() + 1);
        fields.push(NamedField {
            name: NR_PUBINPUTS,
            value: FieldValue::Integer(vk.nr_pubinputs),
        });
        for role in VkRole::ALL {
            let value = match role {
                VkRole::Alpha1 => FieldValue::Bytes(vk.alpha_g1.to_vec()),
                VkRole::Beta2 => FieldValue::Bytes(vk.beta_g2.to_vec()),
                VkRole::Gamma2 => FieldValue::Bytes(vk.gamma_g2.to_vec()),
                VkRole::Delta2 => FieldValue::Bytes(vk.delta_g2.to_vec()),
                VkRole::Ic => FieldValue::ByteArrays(vk.ic.iter().map(|p| p.to_vec()).collect()),
            };
            fields.push(NamedField {
                name: role.field_name(),
                value,
            });
        }
        Ok(Self { fields })
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// A target syntax for the constant
pub trait Syntax {
    /// Identifier the consumer uses for a canonical field name
    fn identifier<'a>(&self, name: &'a str) -> &'a str {
        name
    }

    fn render(&self, layout: &ConstantLayout) -> String;
}

/// Rust initializer for `groth16_solana::groth16::Groth16Verifyingkey`
#[derive(Debug, Clone, Copy, Default)]
pub struct Groth16SolanaSyntax;

impl Syntax for Groth16SolanaSyntax {
    fn identifier<'a>(&self, name: &'a str) -> &'a str {
        // groth16-solana spells this field `vk_gamme_g2`
        if name == VkRole::Gamma2.field_name() {
            "vk_gamme_g2"
        } else {
            name
        }
    }

    fn render(&self, layout: &ConstantLayout) -> String {
        let mut s = String::from("Groth16Verifyingkey {\n");
        for (i, field) in layout.fields.iter().enumerate() {
            if i > 0 {
                s.push('\n');
            }
            let name = self.identifier(field.name);
            match &field.value {
                FieldValue::Integer(n) => s.push_str(&format!("    {name}: {n},\n")),
                FieldValue::Bytes(bytes) => {
                    s.push_str(&format!("    {name}: [\n{}    ],\n", byte_rows(bytes, 2)))
                }
                FieldValue::ByteArrays(arrays) => {
                    s.push_str(&format!("    {name}: &[\n"));
                    for array in arrays {
                        s.push_str(&format!("        [\n{}        ],\n", byte_rows(array, 3)));
                    }
                    s.push_str("    ],\n");
                }
            }
        }
        s.push('}');
        s
    }
}

/// Comma-separated bytes, `ROW_WIDTH` per line, indented `depth` levels.
pub fn byte_rows(bytes: &[u8], depth: usize) -> String {
    let indent = "    ".repeat(depth);
    let mut s = String::new();
    for row in bytes.chunks(ROW_WIDTH) {
        s.push_str(&indent);
        s.push_str(&byte_list(row));
        s.push_str(",\n");
    }
    s
}

/// `a, b, c` without brackets
pub fn byte_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
