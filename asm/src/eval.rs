use crate::error::{Error, ErrorKind};
use arch::{NUM_ADDR, NUM_OUT, NUM_PREG, NUM_VAL};

// ----------------------------------------------------------------------------
// Expression evaluator
//
// Operands are small constant expressions: integer literals (decimal or
// 0x / 0o / 0b prefixed), parentheses, unary `-` `~`, and binary
// `| ^ & << >> + - * / %` with conventional precedence. Evaluated over i64;
// the bound check afterwards rejects anything that does not fit its field.

struct Expr<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Expr<'a> {
    fn eval(src: &'a str) -> Option<i64> {
        let mut p = Expr {
            src: src.as_bytes(),
            pos: 0,
        };
        let val = p.bit_or()?;
        if p.pos == p.src.len() {
            Some(val)
        } else {
            None
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn take(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn bit_or(&mut self) -> Option<i64> {
        let mut lhs = self.bit_xor()?;
        while self.take(b'|') {
            lhs |= self.bit_xor()?;
        }
        Some(lhs)
    }

    fn bit_xor(&mut self) -> Option<i64> {
        let mut lhs = self.bit_and()?;
        while self.take(b'^') {
            lhs ^= self.bit_and()?;
        }
        Some(lhs)
    }

    fn bit_and(&mut self) -> Option<i64> {
        let mut lhs = self.shift()?;
        while self.take(b'&') {
            lhs &= self.shift()?;
        }
        Some(lhs)
    }

    fn shift(&mut self) -> Option<i64> {
        let mut lhs = self.add()?;
        loop {
            if self.src[self.pos..].starts_with(b"<<") {
                self.pos += 2;
                lhs = lhs.checked_shl(u32::try_from(self.add()?).ok()?)?;
            } else if self.src[self.pos..].starts_with(b">>") {
                self.pos += 2;
                lhs = lhs.checked_shr(u32::try_from(self.add()?).ok()?)?;
            } else {
                return Some(lhs);
            }
        }
    }

    fn add(&mut self) -> Option<i64> {
        let mut lhs = self.mul()?;
        loop {
            if self.take(b'+') {
                lhs = lhs.checked_add(self.mul()?)?;
            } else if self.take(b'-') {
                lhs = lhs.checked_sub(self.mul()?)?;
            } else {
                return Some(lhs);
            }
        }
    }

    fn mul(&mut self) -> Option<i64> {
        let mut lhs = self.unary()?;
        loop {
            if self.take(b'*') {
                lhs = lhs.checked_mul(self.unary()?)?;
            } else if self.take(b'/') {
                lhs = lhs.checked_div(self.unary()?)?;
            } else if self.take(b'%') {
                lhs = lhs.checked_rem(self.unary()?)?;
            } else {
                return Some(lhs);
            }
        }
    }

    fn unary(&mut self) -> Option<i64> {
        if self.take(b'-') {
            return self.unary()?.checked_neg();
        }
        if self.take(b'~') {
            return Some(!self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<i64> {
        if self.take(b'(') {
            let val = self.bit_or()?;
            if self.take(b')') {
                return Some(val);
            }
            return None;
        }
        self.number()
    }

    fn number(&mut self) -> Option<i64> {
        let rest = &self.src[self.pos..];
        let (radix, skip) = match rest {
            [b'0', b'x' | b'X', ..] => (16, 2),
            [b'0', b'o' | b'O', ..] => (8, 2),
            [b'0', b'b' | b'B', ..] => (2, 2),
            _ => (10, 0),
        };
        let digits = &rest[skip..];
        let len = digits
            .iter()
            .position(|c| !c.is_ascii_alphanumeric())
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let text = std::str::from_utf8(&digits[..len]).ok()?;
        let val = i64::from_str_radix(text, radix).ok()?;
        self.pos += skip + len;
        Some(val)
    }
}

// ----------------------------------------------------------------------------
// Bounded operand validators

/// Evaluate `arg` and check `0 <= value < ub`.
pub fn eval_arg(arg: &str, ub: u16, kind: &'static str, line: usize) -> Result<u16, Error> {
    match Expr::eval(arg) {
        None => Err(Error::new(
            line,
            arg,
            ErrorKind::OperandSyntax(arg.to_string(), kind),
        )),
        Some(val) if val < 0 || val >= i64::from(ub) => Err(Error::new(
            line,
            arg,
            ErrorKind::OperandRange(arg.to_string(), kind),
        )),
        Some(val) => Ok(val as u16),
    }
}

pub fn eval_reg(arg: &str, line: usize) -> Result<u16, Error> {
    eval_arg(arg, NUM_PREG, "a program register index", line)
}

pub fn eval_out(arg: &str, line: usize) -> Result<u16, Error> {
    eval_arg(arg, NUM_OUT, "an output channel index", line)
}

pub fn eval_val(arg: &str, line: usize) -> Result<u16, Error> {
    eval_arg(arg, NUM_VAL, "a value", line)
}

pub fn eval_addr(arg: &str, line: usize) -> Result<u16, Error> {
    eval_arg(arg, NUM_ADDR, "an I2C address", line)
}

/// `true` / `false` keywords, or any integer expression (nonzero is true).
pub fn eval_bool(arg: &str, line: usize) -> Result<bool, Error> {
    if arg.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if arg.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    match Expr::eval(arg) {
        Some(val) => Ok(val != 0),
        None => Err(Error::new(
            line,
            arg,
            ErrorKind::BooleanSyntax(arg.to_string()),
        )),
    }
}
