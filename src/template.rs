use indexmap::IndexMap;

use crate::config::AsmConfig;
use crate::error::ConfigError;

// Template grammar, one instruction per line:
//   Name<opcodebits> field field ...
//   &name=bitpattern
// Fields are classified by their leading character:
//   &...  literal padding bits, or a reference to a declared constant
//   #...  label reference, a doubled ## marks a relative jump field
//   else  numeric operand; the contiguous * run gives the field width

pub const CONST_MARKER: char = '&';
pub const LABEL_MARKER: char = '#';
pub const VAR_MARKER: char = '*';

const MAX_SUBST: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Opcode(String),
    Padding(String),
    Operand {
        prefix: String,
        width: u32,
        suffix: String,
    },
    LabelRef {
        prefix: String,
        width: u32,
        relative: bool,
    },
}

impl FieldSpec {
    pub fn width(&self) -> u32 {
        match self {
            FieldSpec::Opcode(bits) | FieldSpec::Padding(bits) => bits.len() as u32,
            FieldSpec::Operand { width, .. } | FieldSpec::LabelRef { width, .. } => *width,
        }
    }

    /// Fixed fields emit their bits without consuming a source operand
    pub fn takes_operand(&self) -> bool {
        matches!(self, FieldSpec::Operand { .. } | FieldSpec::LabelRef { .. })
    }

    /// The pattern the field was declared with, for syntax diagnostics
    pub fn pattern(&self) -> String {
        match self {
            FieldSpec::Opcode(bits) => format!("<{}>", bits),
            FieldSpec::Padding(bits) => format!("{}{}", CONST_MARKER, bits),
            FieldSpec::Operand {
                prefix,
                width,
                suffix,
            } => format!(
                "{}{}{}",
                prefix,
                VAR_MARKER.to_string().repeat(*width as usize),
                suffix
            ),
            FieldSpec::LabelRef {
                prefix,
                width,
                relative,
            } => {
                let marker = if *relative { "##" } else { "#" };
                format!(
                    "{}{}{}",
                    marker,
                    prefix,
                    VAR_MARKER.to_string().repeat(*width as usize)
                )
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Template store

pub struct TemplateStore {
    templates: IndexMap<String, Vec<FieldSpec>>,
    word_width: u32,
}

impl TemplateStore {
    /// Parse the whole config text: header lines first, constants and
    /// templates after. Constants are local to loading and dropped once
    /// the store is built.
    pub fn load(lines: &[String]) -> Result<(AsmConfig, TemplateStore), ConfigError> {
        let (config, consumed) = AsmConfig::parse(lines)?;

        let mut constants: IndexMap<String, String> = IndexMap::new();
        let mut templates: IndexMap<String, Vec<FieldSpec>> = IndexMap::new();

        for line in &lines[consumed..] {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix(CONST_MARKER) {
                let (name, value) = rest
                    .split_once('=')
                    .ok_or_else(|| ConfigError::MalformedTemplate(line.to_string()))?;
                constants.insert(name.to_string(), value.to_string());
                continue;
            }
            let (name, fields) = parse_template(line, &constants)?;
            templates.insert(name, fields);
        }

        let word_width = check_word_width(&templates)?;
        Ok((
            config,
            TemplateStore {
                templates,
                word_width,
            },
        ))
    }

    pub fn get(&self, mnemonic: &str) -> Option<&[FieldSpec]> {
        self.templates.get(mnemonic).map(|fields| fields.as_slice())
    }

    /// Total bit width every template in the store emits
    pub fn word_width(&self) -> u32 {
        self.word_width
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Line parsing

fn parse_template(
    line: &str,
    constants: &IndexMap<String, String>,
) -> Result<(String, Vec<FieldSpec>), ConfigError> {
    let malformed = || ConfigError::MalformedTemplate(line.to_string());

    let open = line.find('<').ok_or_else(malformed)?;
    let close = line.find('>').filter(|c| *c > open).ok_or_else(malformed)?;

    let name = line[..open].trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(malformed());
    }
    let opcode = &line[open + 1..close];
    if !is_bit_run(opcode) {
        return Err(malformed());
    }

    let mut fields = vec![FieldSpec::Opcode(opcode.to_string())];
    for token in line[close + 1..].split_whitespace() {
        fields.push(classify_field(token, constants)?);
    }
    Ok((name.to_string(), fields))
}

fn classify_field(
    token: &str,
    constants: &IndexMap<String, String>,
) -> Result<FieldSpec, ConfigError> {
    let mut token = token.to_string();
    // A constant name expands to its stored text and is classified again;
    // the chain length is bounded to catch self-referential definitions.
    let mut depth = 0;
    loop {
        if let Some(rest) = token.strip_prefix(CONST_MARKER) {
            if is_bit_run(rest) {
                return Ok(FieldSpec::Padding(rest.to_string()));
            }
            let value = constants
                .get(rest)
                .ok_or_else(|| ConfigError::UnknownConstant(rest.to_string()))?;
            depth += 1;
            if depth > MAX_SUBST {
                return Err(ConfigError::ConstantCycle(rest.to_string()));
            }
            token = value.clone();
            continue;
        }
        return Ok(classify_plain(&token));
    }
}

fn classify_plain(token: &str) -> FieldSpec {
    if let Some(rest) = token.strip_prefix(LABEL_MARKER) {
        let (relative, rest) = match rest.strip_prefix(LABEL_MARKER) {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let (prefix, width, _) = split_var_run(rest);
        return FieldSpec::LabelRef {
            prefix,
            width,
            relative,
        };
    }
    let (prefix, width, suffix) = split_var_run(token);
    FieldSpec::Operand {
        prefix,
        width,
        suffix,
    }
}

/// Split a field pattern around its contiguous run of variable markers
fn split_var_run(text: &str) -> (String, u32, String) {
    match text.find(VAR_MARKER) {
        Some(start) => {
            let end = text[start..]
                .find(|c| c != VAR_MARKER)
                .map(|n| start + n)
                .unwrap_or(text.len());
            (
                text[..start].to_string(),
                (end - start) as u32,
                text[end..].to_string(),
            )
        }
        None => (text.to_string(), 0, String::new()),
    }
}

fn is_bit_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '0' || c == '1')
}

/// Every template must emit the same total width; the agreed width is
/// the word width of the run
fn check_word_width(templates: &IndexMap<String, Vec<FieldSpec>>) -> Result<u32, ConfigError> {
    let mut expected = None;
    for (name, fields) in templates {
        let width: u32 = fields.iter().map(|f| f.width()).sum();
        match expected {
            None => expected = Some(width),
            Some(w) if w != width => {
                return Err(ConfigError::WidthMismatch {
                    name: name.clone(),
                    width,
                    expected: w,
                })
            }
            Some(_) => {}
        }
    }
    Ok(expected.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<(AsmConfig, TemplateStore), ConfigError> {
        let lines: Vec<String> = text.lines().map(|s| s.to_string()).collect();
        TemplateStore::load(&lines)
    }

    #[test]
    fn classify_kinds() {
        let (_, store) = load("BIN\nMOV<000000> r***** &00000 #****************\n").unwrap();
        let fields = store.get("MOV").unwrap();
        assert_eq!(fields[0], FieldSpec::Opcode("000000".to_string()));
        assert_eq!(
            fields[1],
            FieldSpec::Operand {
                prefix: "r".to_string(),
                width: 5,
                suffix: String::new(),
            }
        );
        assert_eq!(fields[2], FieldSpec::Padding("00000".to_string()));
        assert_eq!(
            fields[3],
            FieldSpec::LabelRef {
                prefix: String::new(),
                width: 16,
                relative: false,
            }
        );
        assert_eq!(store.word_width(), 32);
    }

    #[test]
    fn operand_prefix_and_suffix() {
        let (_, store) = load("BIN\nOP<000> rs*****fp\n").unwrap();
        assert_eq!(
            store.get("OP").unwrap()[1],
            FieldSpec::Operand {
                prefix: "rs".to_string(),
                width: 5,
                suffix: "fp".to_string(),
            }
        );
    }

    #[test]
    fn relative_marker() {
        let (_, store) = load("BIN\nBEQ<000011> ##****\n").unwrap();
        assert_eq!(
            store.get("BEQ").unwrap()[1],
            FieldSpec::LabelRef {
                prefix: String::new(),
                width: 4,
                relative: true,
            }
        );
    }

    #[test]
    fn constant_substitution() {
        let (_, store) = load("BIN\n&FILL=&00001\nADD<010> &FILL\n").unwrap();
        assert_eq!(
            store.get("ADD").unwrap()[1],
            FieldSpec::Padding("00001".to_string())
        );
    }

    #[test]
    fn unknown_constant() {
        assert!(matches!(
            load("BIN\nADD<010> &NOPE\n"),
            Err(ConfigError::UnknownConstant(name)) if name == "NOPE"
        ));
    }

    #[test]
    fn constant_cycle() {
        assert!(matches!(
            load("BIN\n&A=&A\nADD<010> &A\n"),
            Err(ConfigError::ConstantCycle(_))
        ));
    }

    #[test]
    fn width_mismatch() {
        assert!(matches!(
            load("BIN\nA<0000> v****\nB<0000> v*****\n"),
            Err(ConfigError::WidthMismatch { expected: 8, width: 9, .. })
        ));
    }

    #[test]
    fn malformed_template() {
        assert!(matches!(
            load("BIN\nnot a template\n"),
            Err(ConfigError::MalformedTemplate(_))
        ));
        assert!(matches!(
            load("BIN\nADD<01x0>\n"),
            Err(ConfigError::MalformedTemplate(_))
        ));
    }
}
