//! Arithmetic and bitwise instructions
//!
//! Every operation reads `stage_1 <op> stage_2` and writes the result to the
//! wheel cell under the cursor. Integer math wraps on overflow; division and
//! remainder truncate towards zero.

use tessel_core::{Error, ExecContext, Result};

fn binary(ctx: &mut ExecContext<'_>, op: impl FnOnce(i64, i64) -> i64) -> Result<()> {
    let thread = ctx.thread_mut();
    let value = op(thread.stage_1, thread.stage_2);
    thread.wheel_mut().push(value);
    Ok(())
}

pub fn execute_add(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, i64::wrapping_add)
}

pub fn execute_sub(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, i64::wrapping_sub)
}

pub fn execute_mul(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, i64::wrapping_mul)
}

/// DIV - Fails with [`Error::DivisionByZero`] when stage_2 is 0
pub fn execute_div(ctx: &mut ExecContext<'_>) -> Result<()> {
    if ctx.thread().stage_2 == 0 {
        return Err(Error::DivisionByZero(ctx.thread().id()));
    }
    binary(ctx, i64::wrapping_div)
}

/// MOD - Fails with [`Error::DivisionByZero`] when stage_2 is 0
pub fn execute_mod(ctx: &mut ExecContext<'_>) -> Result<()> {
    if ctx.thread().stage_2 == 0 {
        return Err(Error::DivisionByZero(ctx.thread().id()));
    }
    binary(ctx, i64::wrapping_rem)
}

pub fn execute_and(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, |a, b| a & b)
}

pub fn execute_or(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, |a, b| a | b)
}

pub fn execute_xor(ctx: &mut ExecContext<'_>) -> Result<()> {
    binary(ctx, |a, b| a ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{Direction, SharedState, Thread, ThreadId};

    fn eval(stage_1: i64, stage_2: i64, f: fn(&mut ExecContext<'_>) -> Result<()>) -> Result<i64> {
        let mut thread = Thread::new(ThreadId(3), 0, 0, Direction::Right);
        thread.stage_1 = stage_1;
        thread.stage_2 = stage_2;
        let mut shared = SharedState::default();
        f(&mut ExecContext::new(&mut thread, &mut shared))?;
        Ok(thread.wheel().pull())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval(7, 5, execute_add).unwrap(), 12);
        assert_eq!(eval(7, 5, execute_sub).unwrap(), 2);
        assert_eq!(eval(7, 5, execute_mul).unwrap(), 35);
        assert_eq!(eval(7, 2, execute_div).unwrap(), 3);
        assert_eq!(eval(-7, 2, execute_div).unwrap(), -3);
        assert_eq!(eval(7, 5, execute_mod).unwrap(), 2);
        assert_eq!(eval(-7, 5, execute_mod).unwrap(), -2);
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(eval(0b1100, 0b1010, execute_and).unwrap(), 0b1000);
        assert_eq!(eval(0b1100, 0b1010, execute_or).unwrap(), 0b1110);
        assert_eq!(eval(0b1100, 0b1010, execute_xor).unwrap(), 0b0110);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(eval(i64::MAX, 1, execute_add).unwrap(), i64::MIN);
        assert_eq!(eval(i64::MIN, -1, execute_div).unwrap(), i64::MIN);
        assert_eq!(eval(i64::MIN, -1, execute_mod).unwrap(), 0);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            eval(1, 0, execute_div),
            Err(Error::DivisionByZero(ThreadId(3)))
        ));
        assert!(matches!(
            eval(1, 0, execute_mod),
            Err(Error::DivisionByZero(ThreadId(3)))
        ));
    }
}
