use crate::error::ConfigError;

// Config header, line oriented:
//   HEX | BIN          required, selects the result radix
//   LOGISIM_OUT        optional, Logisim memory image wrapping
//   VHDL_OUT           optional, VHDL array wrapping
//   SALTO_RELATIVO     optional, enables relative label fields
// Flag lines appear in this order and are matched exactly; a line that
// does not match is left for the template parser.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Bin,
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    None,
    Logisim,
    Vhdl,
}

#[derive(Debug, Clone)]
pub struct AsmConfig {
    pub radix: Radix,
    pub image: ImageMode,
    pub relative_jumps: bool,
}

impl AsmConfig {
    /// Consume the header lines; returns the config and the number of
    /// lines eaten
    pub fn parse(lines: &[String]) -> Result<(AsmConfig, usize), ConfigError> {
        let first = lines.first().map(|s| s.trim()).unwrap_or("");
        let radix = match first {
            "HEX" => Radix::Hex,
            "BIN" => Radix::Bin,
            _ => return Err(ConfigError::MalformedHeader(first.to_string())),
        };

        let mut consumed = 1;
        let mut image = ImageMode::None;
        if lines.get(consumed).map(|s| s.trim()) == Some("LOGISIM_OUT") {
            image = ImageMode::Logisim;
            consumed += 1;
        }
        if lines.get(consumed).map(|s| s.trim()) == Some("VHDL_OUT") {
            image = ImageMode::Vhdl;
            consumed += 1;
        }
        let mut relative_jumps = false;
        if lines.get(consumed).map(|s| s.trim()) == Some("SALTO_RELATIVO") {
            relative_jumps = true;
            consumed += 1;
        }

        Ok((
            AsmConfig {
                radix,
                image,
                relative_jumps,
            },
            consumed,
        ))
    }
}
