use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OpKind {
    #[default]
    NOOP,
    RESET,
    HALT,
    RTRN,
    STOP,
    REGWR,
    OUTWR,
    OUTRG,
    SIEQ,
    SINE,
    SIAND,
    SIOR,
    JUMP,
    JDEC,
    START,
    WRC,
    WRR,
    OUTRD,
    REGRD,
    NAKJ,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown operation: `{s}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Reg,
    Out,
    Val,
    Addr,
    Bool,
    Label,
}

impl Arg {
    pub fn name(&self) -> &'static str {
        match self {
            Arg::Reg => "reg",
            Arg::Out => "out",
            Arg::Val => "val",
            Arg::Addr => "addr",
            Arg::Bool => "bool",
            Arg::Label => "label",
        }
    }
}

impl OpKind {
    pub fn arg_field(&self) -> &'static [Arg] {
        use OpKind::*;
        match self {
            NOOP | RESET | HALT | RTRN | STOP => &[],
            REGWR => &[Arg::Reg, Arg::Val],
            OUTWR => &[Arg::Out, Arg::Val],
            OUTRG => &[Arg::Out, Arg::Reg],
            SIEQ | SINE | SIAND | SIOR => &[Arg::Reg, Arg::Val],
            JUMP | NAKJ => &[Arg::Label],
            JDEC => &[Arg::Reg, Arg::Label],
            START => &[Arg::Addr, Arg::Bool],
            WRC => &[Arg::Val],
            WRR => &[Arg::Reg],
            OUTRD => &[Arg::Out, Arg::Bool],
            REGRD => &[Arg::Reg, Arg::Bool],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mnemonic() {
        assert_eq!(OpKind::parse("noop"), Ok(OpKind::NOOP));
        assert_eq!(OpKind::parse("regwr"), Ok(OpKind::REGWR));
        assert_eq!(OpKind::parse("NAKJ"), Ok(OpKind::NAKJ));
        assert!(OpKind::parse("hoge").is_err());
    }

    #[test]
    fn display_lowercase() {
        assert_eq!(OpKind::SIAND.to_string(), "siand");
        assert_eq!(OpKind::RTRN.to_string(), "rtrn");
    }
}
