use genasm::{Assembler, TemplateStore};

fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(|s| s.to_string()).collect()
}

fn scan(config: &str, program: &str) -> Assembler {
    let (cfg, templates) = TemplateStore::load(&to_lines(config)).expect("config should load");
    let mut asm = Assembler::new(cfg, templates);
    asm.scan(&to_lines(program)).expect("scan should succeed");
    asm
}

const ISA: &str = "BIN\nMOV<0000> r**** #********\n";

#[test]
fn implicit_labels_count_instructions_only() {
    let program = "\
; labels point at the next valid instruction
top

MOV r0 #0
mid
; comment lines do not advance the counter
MOV r1 #0
end
";
    let asm = scan(ISA, program);
    assert_eq!(asm.symbols().resolve("top"), Some(0));
    assert_eq!(asm.symbols().resolve("mid"), Some(1));
    assert_eq!(asm.symbols().resolve("end"), Some(2));
    assert_eq!(asm.instructions().len(), 2);
}

#[test]
fn explicit_labels_bind_arbitrary_addresses() {
    let asm = scan(ISA, "serial=0xFF00\nneg=-4\nMOV r0 serial\n");
    assert_eq!(asm.symbols().resolve("serial"), Some(0xFF00));
    assert_eq!(asm.symbols().resolve("neg"), Some(-4));
}

#[test]
fn redefinition_overwrites_and_warns() {
    let asm = scan(ISA, "x\nMOV r0 x\nx\nMOV r0 x\n");
    assert_eq!(asm.symbols().resolve("x"), Some(1));
    assert_eq!(asm.messages().len(), 1);

    // Both references see the final binding, phase 2 runs after the scan
    let words = asm.encode().unwrap();
    assert_eq!(words[0], words[1]);
    assert_eq!(words[0], concat!("0000", "0000", "00000001"));
}

#[test]
fn program_counter_tags_follow_instruction_order() {
    let asm = scan(ISA, "MOV r0 #0\nskip\nMOV r1 #1\n");
    let pcs: Vec<usize> = asm.instructions().iter().map(|i| i.pc).collect();
    assert_eq!(pcs, [0, 1]);
    let lines: Vec<usize> = asm.instructions().iter().map(|i| i.line).collect();
    assert_eq!(lines, [1, 3]);
}
