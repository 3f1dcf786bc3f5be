use color_print::cformat;

/// Fully resolved instruction: every operand is a checked field value and
/// every jump target is an instruction index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    NOOP(),
    RESET(),
    HALT(),
    RTRN(),
    STOP(),
    REGWR(u16, u16),
    OUTWR(u16, u16),
    OUTRG(u16, u16),
    SIEQ(u16, u16),
    SINE(u16, u16),
    SIAND(u16, u16),
    SIOR(u16, u16),
    JUMP(u16),
    JDEC(u16, u16),
    START(u16, bool),
    WRC(u16),
    WRR(u16),
    OUTRD(u16, bool),
    REGRD(u16, bool),
    NAKJ(u16),
}

impl Inst {
    /// Encode to the 16-bit machine word. Field widths are hardware
    /// boundaries: reg is 2 bits, out is 4 bits, val and ptr are 8 bits,
    /// addr is 10 bits, booleans are the LSB.
    pub fn to_bin(&self) -> u16 {
        match *self {
            Inst::NOOP() => 0x0000,
            Inst::RESET() => 0x0001,
            Inst::HALT() => 0x0002,
            Inst::RTRN() => 0x0003,
            Inst::STOP() => 0x0004,
            Inst::REGWR(reg, val) => 0x1000 | reg << 8 | val,
            Inst::OUTWR(out, val) => 0x2000 | out << 8 | val,
            Inst::OUTRG(out, reg) => 0x3000 | out << 2 | reg,
            Inst::SIEQ(reg, val) => 0x4000 | reg << 8 | val,
            Inst::SINE(reg, val) => 0x4400 | reg << 8 | val,
            Inst::SIAND(reg, val) => 0x4800 | reg << 8 | val,
            Inst::SIOR(reg, val) => 0x4c00 | reg << 8 | val,
            Inst::JUMP(ptr) => 0x5000 | ptr,
            Inst::JDEC(reg, ptr) => 0x6000 | reg << 8 | ptr,
            Inst::START(addr, rd_nwr) => 0x7000 | addr << 1 | rd_nwr as u16,
            Inst::WRC(val) => 0x8000 | val,
            Inst::WRR(reg) => 0x8100 | reg,
            Inst::OUTRD(out, ack) => 0x9000 | out << 1 | ack as u16,
            Inst::REGRD(reg, ack) => 0x9100 | reg << 1 | ack as u16,
            Inst::NAKJ(ptr) => 0xA000 | ptr,
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        let fmt0 = |op: &str| cformat!("  <red>{:<6}</>", op);
        let fmt1 = |op: &str, a: u16| cformat!("  <red>{:<6}</><blue>{:<6}</>", op, a);
        let fmt2 =
            |op: &str, a: u16, b: u16| cformat!("  <red>{:<6}</><blue>{:<6}{:<6}</>", op, a, b);
        match *self {
            Inst::NOOP() => fmt0("noop"),
            Inst::RESET() => fmt0("reset"),
            Inst::HALT() => fmt0("halt"),
            Inst::RTRN() => fmt0("rtrn"),
            Inst::STOP() => fmt0("stop"),
            Inst::REGWR(reg, val) => fmt2("regwr", reg, val),
            Inst::OUTWR(out, val) => fmt2("outwr", out, val),
            Inst::OUTRG(out, reg) => fmt2("outrg", out, reg),
            Inst::SIEQ(reg, val) => fmt2("sieq", reg, val),
            Inst::SINE(reg, val) => fmt2("sine", reg, val),
            Inst::SIAND(reg, val) => fmt2("siand", reg, val),
            Inst::SIOR(reg, val) => fmt2("sior", reg, val),
            Inst::JUMP(ptr) => fmt1("jump", ptr),
            Inst::JDEC(reg, ptr) => fmt2("jdec", reg, ptr),
            Inst::START(addr, rd_nwr) => fmt2("start", addr, rd_nwr as u16),
            Inst::WRC(val) => fmt1("wrc", val),
            Inst::WRR(reg) => fmt1("wrr", reg),
            Inst::OUTRD(out, ack) => fmt2("outrd", out, ack as u16),
            Inst::REGRD(reg, ack) => fmt2("regrd", reg, ack as u16),
            Inst::NAKJ(ptr) => fmt1("nakj", ptr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_no_operand() {
        assert_eq!(Inst::NOOP().to_bin(), 0x0000);
        assert_eq!(Inst::RESET().to_bin(), 0x0001);
        assert_eq!(Inst::HALT().to_bin(), 0x0002);
        assert_eq!(Inst::RTRN().to_bin(), 0x0003);
        assert_eq!(Inst::STOP().to_bin(), 0x0004);
    }

    #[test]
    fn encode_reg_val() {
        assert_eq!(Inst::REGWR(2, 0x55).to_bin(), 0x1255);
        assert_eq!(Inst::OUTWR(5, 0x10).to_bin(), 0x2510);
        assert_eq!(Inst::SIEQ(0, 0xFF).to_bin(), 0x40FF);
        assert_eq!(Inst::SINE(3, 0).to_bin(), 0x4700);
        assert_eq!(Inst::SIAND(1, 0x80).to_bin(), 0x4980);
        assert_eq!(Inst::SIOR(2, 1).to_bin(), 0x4E01);
    }

    #[test]
    fn encode_packed_fields() {
        // out and reg share the low bits: 3<<2 | 1 = 0x0D
        assert_eq!(Inst::OUTRG(3, 1).to_bin(), 0x300D);
        assert_eq!(Inst::START(0x3FF, true).to_bin(), 0x7000 | 0x3FF << 1 | 1);
        assert_eq!(Inst::OUTRD(15, false).to_bin(), 0x901E);
        assert_eq!(Inst::REGRD(3, true).to_bin(), 0x9107);
    }

    #[test]
    fn encode_jumps() {
        assert_eq!(Inst::JUMP(2).to_bin(), 0x5002);
        assert_eq!(Inst::JDEC(1, 0x20).to_bin(), 0x6120);
        assert_eq!(Inst::NAKJ(0xFF).to_bin(), 0xA0FF);
    }

    #[test]
    fn encode_write_byte() {
        assert_eq!(Inst::WRC(0xAB).to_bin(), 0x80AB);
        assert_eq!(Inst::WRR(3).to_bin(), 0x8103);
    }
}
