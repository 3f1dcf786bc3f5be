use arch::inst::Inst;
use arch::op::OpKind;
use arch::NUM_PC;

use crate::error::{Error, ErrorKind};
use crate::eval::{eval_addr, eval_bool, eval_out, eval_reg, eval_val};
use crate::label::Labels;

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone)]
pub struct Line {
    idx: usize,
    raw: String,
    code: String,
    comment: Option<String>,
    stmt: Option<Stmt>,
}

impl Line {
    /// Split off the `;` comment and parse what is left. `idx` is 0-based.
    pub fn parse(idx: usize, raw: &str) -> Result<Self, Error> {
        let (code, comment) = match raw.split_once(';') {
            Some((code, comment)) => (code.to_string(), Some(comment.to_string())),
            None => (raw.to_string(), None),
        };
        let stmt = Stmt::parse(&code, idx + 1)?;
        Ok(Self {
            idx,
            raw: raw.to_string(),
            code,
            comment,
            stmt,
        })
    }

    pub fn no(&self) -> usize {
        self.idx + 1
    }
    pub fn raw(&self) -> &str {
        &self.raw
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    pub fn stmt(&self) -> Option<&Stmt> {
        self.stmt.as_ref()
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone)]
pub enum Stmt {
    Label(String),
    Code(Code),
}

impl Stmt {
    /// `None` for blank / comment-only lines.
    fn parse(code: &str, line: usize) -> Result<Option<Stmt>, Error> {
        // Operand lists are comma / space tolerant: split on both and drop
        // empty tokens, so `regwr 2, 0x55` == `regwr 2,0x55` == `regwr 2 0x55`.
        let words: Vec<&str> = code
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        let Some((&head, args)) = words.split_first() else {
            return Ok(None);
        };

        // main:
        if let Some(name) = head.strip_suffix(':') {
            if words.len() == 1 && is_label_name(name) {
                return Ok(Some(Stmt::Label(name.to_string())));
            }
        }

        let code = Code::parse(head, args, line)?;
        Ok(Some(Stmt::Code(code)))
    }
}

fn is_label_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// ----------------------------------------------------------------------------
// Operation

/// Parsed instruction with operands evaluated and range-checked. Jump
/// targets stay textual until pass 1 has bound every label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
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
    JUMP(String),
    JDEC(u16, String),
    START(u16, bool),
    WRC(u16),
    WRR(u16),
    OUTRD(u16, bool),
    REGRD(u16, bool),
    NAKJ(String),
}

impl Code {
    fn parse(head: &str, args: &[&str], line: usize) -> Result<Code, Error> {
        let kind = OpKind::parse(head)
            .map_err(|_| Error::new(line, head, ErrorKind::UnknownInstruction(head.to_string())))?;

        let sig = kind.arg_field();
        if args.len() != sig.len() {
            let expected = sig
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(Error::new(
                line,
                head,
                ErrorKind::BadOperands(expected),
            ));
        }

        Ok(match kind {
            OpKind::NOOP => Code::NOOP(),
            OpKind::RESET => Code::RESET(),
            OpKind::HALT => Code::HALT(),
            OpKind::RTRN => Code::RTRN(),
            OpKind::STOP => Code::STOP(),
            OpKind::REGWR => Code::REGWR(eval_reg(args[0], line)?, eval_val(args[1], line)?),
            OpKind::OUTWR => Code::OUTWR(eval_out(args[0], line)?, eval_val(args[1], line)?),
            OpKind::OUTRG => Code::OUTRG(eval_out(args[0], line)?, eval_reg(args[1], line)?),
            OpKind::SIEQ => Code::SIEQ(eval_reg(args[0], line)?, eval_val(args[1], line)?),
            OpKind::SINE => Code::SINE(eval_reg(args[0], line)?, eval_val(args[1], line)?),
            OpKind::SIAND => Code::SIAND(eval_reg(args[0], line)?, eval_val(args[1], line)?),
            OpKind::SIOR => Code::SIOR(eval_reg(args[0], line)?, eval_val(args[1], line)?),
            OpKind::JUMP => Code::JUMP(args[0].to_string()),
            OpKind::JDEC => Code::JDEC(eval_reg(args[0], line)?, args[1].to_string()),
            OpKind::START => Code::START(eval_addr(args[0], line)?, eval_bool(args[1], line)?),
            OpKind::WRC => Code::WRC(eval_val(args[0], line)?),
            OpKind::WRR => Code::WRR(eval_reg(args[0], line)?),
            OpKind::OUTRD => Code::OUTRD(eval_out(args[0], line)?, eval_bool(args[1], line)?),
            OpKind::REGRD => Code::REGRD(eval_reg(args[0], line)?, eval_bool(args[1], line)?),
            OpKind::NAKJ => Code::NAKJ(args[0].to_string()),
        })
    }
}

impl Code {
    /// Resolve label operands against the completed symbol table.
    pub fn resolve(&self, labels: &Labels, line: usize) -> Result<Inst, Error> {
        let ptr = |name: &str| -> Result<u16, Error> {
            let idx = labels
                .get(name)
                .ok_or_else(|| Error::new(line, name, ErrorKind::UnknownLabel(name.to_string())))?;
            if idx >= NUM_PC {
                return Err(Error::new(
                    line,
                    name,
                    ErrorKind::OperandRange(name.to_string(), "a jump target"),
                ));
            }
            Ok(idx)
        };
        Ok(match self {
            Code::NOOP() => Inst::NOOP(),
            Code::RESET() => Inst::RESET(),
            Code::HALT() => Inst::HALT(),
            Code::RTRN() => Inst::RTRN(),
            Code::STOP() => Inst::STOP(),
            Code::REGWR(reg, val) => Inst::REGWR(*reg, *val),
            Code::OUTWR(out, val) => Inst::OUTWR(*out, *val),
            Code::OUTRG(out, reg) => Inst::OUTRG(*out, *reg),
            Code::SIEQ(reg, val) => Inst::SIEQ(*reg, *val),
            Code::SINE(reg, val) => Inst::SINE(*reg, *val),
            Code::SIAND(reg, val) => Inst::SIAND(*reg, *val),
            Code::SIOR(reg, val) => Inst::SIOR(*reg, *val),
            Code::JUMP(name) => Inst::JUMP(ptr(name)?),
            Code::JDEC(reg, name) => Inst::JDEC(*reg, ptr(name)?),
            Code::START(addr, rd_nwr) => Inst::START(*addr, *rd_nwr),
            Code::WRC(val) => Inst::WRC(*val),
            Code::WRR(reg) => Inst::WRR(*reg),
            Code::OUTRD(out, ack) => Inst::OUTRD(*out, *ack),
            Code::REGRD(reg, ack) => Inst::REGRD(*reg, *ack),
            Code::NAKJ(name) => Inst::NAKJ(ptr(name)?),
        })
    }
}
