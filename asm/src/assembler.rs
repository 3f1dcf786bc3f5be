use crate::error::Error;
use crate::label::Labels;
use crate::parser::{Code, Line, Stmt};

/// One assembly run: parsed lines plus the symbol table from pass 1.
/// All state lives here, so independent runs never interfere.
pub struct Assembler {
    lines: Vec<Line>,
    labels: Labels,
}

impl Assembler {
    /// Parse every source line and bind labels to instruction indices.
    /// The label for an instruction is its 0-based position among emitted
    /// instructions, not its source line.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut lines = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            lines.push(Line::parse(idx, raw)?);
        }

        let mut labels = Labels::new();
        let mut count: u16 = 0;
        for line in &lines {
            match line.stmt() {
                Some(Stmt::Label(name)) => labels.insert(name, count, line.no())?,
                Some(Stmt::Code(_)) => count += 1,
                None => {}
            }
        }

        Ok(Self { lines, labels })
    }

    /// Pass 2: resolve jump targets and encode. The word order matches the
    /// instruction indices used for label binding.
    pub fn encode(&self) -> Result<Vec<u16>, Error> {
        let mut program = Vec::new();
        for line in &self.lines {
            if let Some(Stmt::Code(code)) = line.stmt() {
                let inst = code.resolve(&self.labels, line.no())?;
                program.push(inst.to_bin());
            }
        }
        Ok(program)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Resolve a single instruction line for listings.
    pub fn resolve(&self, code: &Code, line_no: usize) -> Result<arch::inst::Inst, Error> {
        code.resolve(&self.labels, line_no)
    }
}

/// Both passes in one call. The first error aborts; no partial program.
pub fn assemble(source: &str) -> Result<Vec<u16>, Error> {
    Assembler::parse(source)?.encode()
}

/// Canonical hex listing: each word as two bytes high-then-low.
pub fn to_hex(program: &[u16]) -> String {
    let mut out = String::new();
    for word in program {
        out.push_str(&format!("{:02x} {:02x}\r\n", word >> 8, word & 0xFF));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn simple_program() {
        let src = "\
; blink once
regwr 0, 0x55
outrg 3, 1
halt
";
        assert_eq!(assemble(src).unwrap(), vec![0x1055, 0x300D, 0x0002]);
    }

    #[test]
    fn backward_reference() {
        let src = "\
noop
reset
loop:
outwr 1, 0
jump loop
";
        // `loop:` binds to instruction index 2
        assert_eq!(assemble(src).unwrap(), vec![0x0000, 0x0001, 0x2100, 0x5002]);
    }

    #[test]
    fn forward_reference() {
        let src = "\
jump end
noop
end:
halt
";
        assert_eq!(assemble(src).unwrap(), vec![0x5002, 0x0000, 0x0002]);
    }

    #[test]
    fn labels_index_instructions_not_lines() {
        let src = "\
; header comment

noop
; another comment
here:
halt
";
        let asm = Assembler::parse(src).unwrap();
        assert_eq!(asm.labels().get("here"), Some(1));
        assert_eq!(asm.encode().unwrap(), vec![0x0000, 0x0002]);
    }

    #[test]
    fn unknown_mnemonic_emits_nothing() {
        let src = "noop\nbogus 1\nhalt\n";
        let err = assemble(src).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ErrorKind::UnknownInstruction("bogus".to_string()));
    }

    #[test]
    fn undefined_label() {
        let err = assemble("jump nowhere\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, ErrorKind::UnknownLabel("nowhere".to_string()));
    }

    #[test]
    fn redefined_label() {
        let src = "a:\nnoop\na:\nhalt\n";
        let err = assemble(src).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, ErrorKind::RedefinedLabel("a".to_string()));
    }

    #[test]
    fn deterministic() {
        let src = "start 0x50, false\nwrc 0xAB\nstop\n";
        assert_eq!(assemble(src).unwrap(), assemble(src).unwrap());
    }

    #[test]
    fn hex_listing() {
        assert_eq!(to_hex(&[0x1255]), "12 55\r\n");
        assert_eq!(to_hex(&[0x0000, 0xA0FF]), "00 00\r\na0 ff\r\n");
    }

    #[test]
    fn i2c_sequence() {
        let src = "\
start 0x50, false   ; address the EEPROM for write
wrc 0x00            ; memory offset
start 0x50, true    ; repeated start, read
regrd 0, false      ; read one byte, NAK
stop
";
        let prog = assemble(src).unwrap();
        assert_eq!(prog[0], 0x7000 | 0x50 << 1);
        assert_eq!(prog[1], 0x8000);
        assert_eq!(prog[2], 0x7000 | 0x50 << 1 | 1);
        assert_eq!(prog[3], 0x9100);
        assert_eq!(prog[4], 0x0004);
    }
}
