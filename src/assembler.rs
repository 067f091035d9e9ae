use crate::config::{AsmConfig, Radix};
use crate::encoder;
use crate::error::AsmError;
use crate::msg::Msg;
use crate::numeric;
use crate::symbol::SymbolTable;
use crate::template::TemplateStore;

const COMMENT_MARKER: char = ';';

// ----------------------------------------------------------------------------
// Parsed instruction

#[derive(Debug, Clone)]
pub struct ParsedInstruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
    /// 1-based source line, for diagnostics
    pub line: usize,
    /// 0-based position in the instruction stream
    pub pc: usize,
}

// ----------------------------------------------------------------------------
// Assembler

pub struct Assembler {
    config: AsmConfig,
    templates: TemplateStore,
    symbols: SymbolTable,
    instrs: Vec<ParsedInstruction>,
    msgs: Vec<(Msg, usize)>,
}

impl Assembler {
    pub fn new(config: AsmConfig, templates: TemplateStore) -> Self {
        Assembler {
            config,
            templates,
            symbols: SymbolTable::new(),
            instrs: Vec::new(),
            msgs: Vec::new(),
        }
    }

    /// Phase 1: collect labels and instructions in a single forward scan.
    /// Forward references are legal because nothing is encoded until the
    /// scan has finished.
    pub fn scan(&mut self, lines: &[String]) -> Result<(), AsmError> {
        for (idx, raw) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let code = match raw.split_once(COMMENT_MARKER) {
                Some((code, _comment)) => code,
                None => raw.as_str(),
            };
            let words: Vec<&str> = code.split_whitespace().collect();

            match words.as_slice() {
                [] => {}
                [label] => {
                    // A single token is a label: either an explicit
                    // `name=value` binding or the next instruction index
                    let (name, address) = match label.split_once('=') {
                        Some((name, value)) => {
                            let value = numeric::parse_literal(value).ok_or_else(|| {
                                AsmError::InvalidLiteral {
                                    token: label.to_string(),
                                    line: line_no,
                                }
                            })?;
                            (name, value)
                        }
                        None => (*label, self.instrs.len() as i64),
                    };
                    if self.symbols.insert(name, address).is_some() {
                        self.msgs
                            .push((Msg::Warn(format!("Re-defined label: `{}`", name)), line_no));
                    }
                }
                [mnemonic, operands @ ..] => {
                    self.instrs.push(ParsedInstruction {
                        mnemonic: mnemonic.to_string(),
                        operands: operands.iter().map(|s| s.to_string()).collect(),
                        line: line_no,
                        pc: self.instrs.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Phase 2: encode every instruction in program order
    pub fn encode(&self) -> Result<Vec<String>, AsmError> {
        let mut words = Vec::with_capacity(self.instrs.len());
        for instr in &self.instrs {
            let fields =
                self.templates
                    .get(&instr.mnemonic)
                    .ok_or_else(|| AsmError::UnknownInstruction {
                        mnemonic: instr.mnemonic.clone(),
                        line: instr.line,
                    })?;
            let bits = encoder::encode(fields, instr, &self.symbols, self.config.relative_jumps)?;
            words.push(match self.config.radix {
                Radix::Bin => bits,
                Radix::Hex => encoder::bits_to_hex(&bits),
            });
        }
        Ok(words)
    }

    pub fn config(&self) -> &AsmConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn instructions(&self) -> &[ParsedInstruction] {
        &self.instrs
    }

    /// Warnings collected during the scan, with their source lines
    pub fn messages(&self) -> &[(Msg, usize)] {
        &self.msgs
    }
}
