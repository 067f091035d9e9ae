use crate::assembler::ParsedInstruction;
use crate::error::AsmError;
use crate::numeric;
use crate::symbol::SymbolTable;
use crate::template::{FieldSpec, LABEL_MARKER};

/// Encode one instruction into its bit string, fields in template order.
/// Operand tokens are consumed in lockstep by every non-fixed field.
pub fn encode(
    fields: &[FieldSpec],
    instr: &ParsedInstruction,
    symbols: &SymbolTable,
    relative_mode: bool,
) -> Result<String, AsmError> {
    let expected = fields.iter().filter(|f| f.takes_operand()).count();
    if instr.operands.len() != expected {
        return Err(AsmError::ArityMismatch {
            mnemonic: instr.mnemonic.clone(),
            expected,
            found: instr.operands.len(),
            line: instr.line,
        });
    }

    let mut bits = String::new();
    let mut operands = instr.operands.iter();
    for field in fields {
        match field {
            FieldSpec::Opcode(fixed) | FieldSpec::Padding(fixed) => bits.push_str(fixed),

            FieldSpec::Operand {
                prefix,
                width,
                suffix,
            } => {
                let token = operands.next().unwrap();
                let middle = split_operand(token, prefix, suffix).ok_or_else(|| {
                    AsmError::SyntaxMismatch {
                        mnemonic: instr.mnemonic.clone(),
                        expected: field.pattern(),
                        found: token.clone(),
                        line: instr.line,
                    }
                })?;
                let value =
                    numeric::parse_literal(middle).ok_or_else(|| AsmError::InvalidLiteral {
                        token: token.clone(),
                        line: instr.line,
                    })?;
                push_bits(&mut bits, value, *width);
            }

            FieldSpec::LabelRef {
                width, relative, ..
            } => {
                let token = operands.next().unwrap();
                let target = match token.strip_prefix(LABEL_MARKER) {
                    Some(rest) => {
                        numeric::parse_literal(rest).ok_or_else(|| AsmError::InvalidLiteral {
                            token: token.clone(),
                            line: instr.line,
                        })?
                    }
                    None => symbols
                        .resolve(token)
                        .ok_or_else(|| AsmError::UndefinedLabel {
                            name: token.clone(),
                            line: instr.line,
                        })?,
                };
                let value = if *relative && relative_mode {
                    target - (instr.pc as i64 + 1)
                } else {
                    target
                };
                push_bits(&mut bits, value, *width);
            }
        }
    }
    Ok(bits)
}

/// Strip the declared prefix and suffix, returning the numeric middle
fn split_operand<'a>(token: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    token.strip_prefix(prefix)?.strip_suffix(suffix)
}

/// Low `width` bits of the two's-complement value, most significant first
fn push_bits(out: &mut String, value: i64, width: u32) {
    for i in (0..width).rev() {
        let bit = (value >> i.min(63)) & 1;
        out.push(if bit == 1 { '1' } else { '0' });
    }
}

/// Upper-case hex rendering, left-zero-padded to ceil(len/4) digits
pub fn bits_to_hex(bits: &str) -> String {
    let digits = (bits.len() + 3) / 4;
    let mut padded = "0".repeat(digits * 4 - bits.len());
    padded.push_str(bits);
    padded
        .as_bytes()
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit - b'0'));
            char::from_digit(value, 16).unwrap().to_ascii_uppercase()
        })
        .collect()
}
