use crate::config::{AsmConfig, ImageMode};

// Output wrapping around the ordered word sequence:
//   plain   - one word per line
//   logisim - `v2.0 raw` header, words space-joined 8 per line
//   vhdl    - X"..", array entries, 8 per line

pub fn render(words: &[String], config: &AsmConfig) -> String {
    match config.image {
        ImageMode::None => {
            let mut out = String::new();
            for word in words {
                out.push_str(word);
                out.push('\n');
            }
            out
        }
        ImageMode::Logisim => {
            let mut out = String::from("v2.0 raw\n");
            for chunk in words.chunks(8) {
                out.push_str(&chunk.join(" "));
                out.push('\n');
            }
            out
        }
        ImageMode::Vhdl => {
            let mut out = String::new();
            for chunk in words.chunks(8) {
                let entries: Vec<String> =
                    chunk.iter().map(|word| format!("X\"{}\"", word)).collect();
                out.push_str(&entries.join(", "));
                out.push_str(",\n");
            }
            out
        }
    }
}
