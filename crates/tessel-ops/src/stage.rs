//! Staging instructions: moving values between the wheel and the stage registers
//!
//! Operands act as masks here: a non-black operand is ANDed with the value
//! being moved, a black operand passes it through unchanged.

use tessel_core::{Color, ExecContext, Result};

/// Apply the mask convention
pub fn mask(value: i64, operand: Color) -> i64 {
    if operand.is_black() {
        value
    } else {
        value & operand.as_i64()
    }
}

pub fn execute_stage_1(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let thread = ctx.thread_mut();
    thread.stage_1 = mask(thread.wheel().pull(), operand);
    Ok(())
}

pub fn execute_stage_2(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let thread = ctx.thread_mut();
    thread.stage_2 = mask(thread.wheel().pull(), operand);
    Ok(())
}

pub fn execute_stage_1_color(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    ctx.thread_mut().stage_1 = operand.as_i64();
    Ok(())
}

pub fn execute_stage_2_color(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    ctx.thread_mut().stage_2 = operand.as_i64();
    Ok(())
}

/// SWAP_MEM - Exchange stage_1 and the wheel cell
pub fn execute_swap_mem_stage(ctx: &mut ExecContext<'_>) -> Result<()> {
    let thread = ctx.thread_mut();
    let cell = thread.wheel().pull();
    let staged = std::mem::replace(&mut thread.stage_1, cell);
    thread.wheel_mut().push(staged);
    Ok(())
}

pub fn execute_swap_stages(ctx: &mut ExecContext<'_>) -> Result<()> {
    let thread = ctx.thread_mut();
    std::mem::swap(&mut thread.stage_1, &mut thread.stage_2);
    Ok(())
}

/// SHIFT - stage_2 takes stage_1, stage_1 takes the wheel cell
pub fn execute_shift_push(ctx: &mut ExecContext<'_>) -> Result<()> {
    let thread = ctx.thread_mut();
    thread.stage_2 = thread.stage_1;
    thread.stage_1 = thread.wheel().pull();
    Ok(())
}

/// SHIFT_LEFT / SHIFT_RIGHT - Shift the stages, then move the wheel
///
/// The cursor moves `operand + 1` cells; `sign` is -1 for left, 1 for right.
pub fn execute_shift_stage(ctx: &mut ExecContext<'_>, operand: Color, sign: i64) -> Result<()> {
    execute_shift_push(ctx)?;
    let distance = operand.as_i64() + 1;
    ctx.thread_mut().wheel_mut().move_by(sign * distance);
    Ok(())
}

pub fn execute_stage_1_push(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let thread = ctx.thread_mut();
    let value = mask(thread.stage_1, operand);
    thread.wheel_mut().push(value);
    Ok(())
}

pub fn execute_stage_2_push(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let thread = ctx.thread_mut();
    let value = mask(thread.stage_2, operand);
    thread.wheel_mut().push(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{Direction, SharedState, Thread, ThreadId};

    fn thread_with_cell(value: i64) -> Thread {
        let mut thread = Thread::new(ThreadId(0), 0, 0, Direction::Right);
        thread.wheel_mut().push(value);
        thread
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(0x1234, Color::BLACK), 0x1234);
        assert_eq!(mask(0x1234, Color::new(0xFF)), 0x34);
        assert_eq!(mask(-1, Color::new(0x00FF00)), 0xFF00);
    }

    #[test]
    fn test_stage_from_wheel() {
        let mut thread = thread_with_cell(0xABCD);
        let mut shared = SharedState::default();
        let mut ctx = ExecContext::new(&mut thread, &mut shared);
        execute_stage_1(&mut ctx, Color::BLACK).unwrap();
        execute_stage_2(&mut ctx, Color::new(0x0F)).unwrap();
        assert_eq!(ctx.thread().stage_1, 0xABCD);
        assert_eq!(ctx.thread().stage_2, 0x0D);
    }

    #[test]
    fn test_stage_from_operand() {
        let mut thread = thread_with_cell(0);
        let mut shared = SharedState::default();
        let mut ctx = ExecContext::new(&mut thread, &mut shared);
        execute_stage_1_color(&mut ctx, Color::new(0x41)).unwrap();
        execute_stage_2_color(&mut ctx, Color::BLACK).unwrap();
        assert_eq!(ctx.thread().stage_1, 0x41);
        assert_eq!(ctx.thread().stage_2, 0);
    }

    #[test]
    fn test_swaps() {
        let mut thread = thread_with_cell(9);
        thread.stage_1 = 1;
        thread.stage_2 = 2;
        let mut shared = SharedState::default();
        let mut ctx = ExecContext::new(&mut thread, &mut shared);

        execute_swap_mem_stage(&mut ctx).unwrap();
        assert_eq!(ctx.thread().stage_1, 9);
        assert_eq!(ctx.thread().wheel().pull(), 1);

        execute_swap_stages(&mut ctx).unwrap();
        assert_eq!((ctx.thread().stage_1, ctx.thread().stage_2), (2, 9));
    }

    #[test]
    fn test_shift_push() {
        let mut thread = thread_with_cell(30);
        thread.stage_1 = 10;
        let mut shared = SharedState::default();
        execute_shift_push(&mut ExecContext::new(&mut thread, &mut shared)).unwrap();
        assert_eq!((thread.stage_1, thread.stage_2), (30, 10));
        assert_eq!(thread.wheel().cursor(), 0);
    }

    #[test]
    fn test_shift_stage_moves_wheel() {
        let mut thread = thread_with_cell(5);
        let mut shared = SharedState::default();
        execute_shift_stage(&mut ExecContext::new(&mut thread, &mut shared), Color::new(2), 1).unwrap();
        assert_eq!(thread.stage_1, 5);
        assert_eq!(thread.wheel().cursor(), 3);

        execute_shift_stage(&mut ExecContext::new(&mut thread, &mut shared), Color::BLACK, -1).unwrap();
        assert_eq!(thread.stage_1, 0);
        assert_eq!(thread.stage_2, 5);
        assert_eq!(thread.wheel().cursor(), 2);
    }

    #[test]
    fn test_shift_stage_large_operand() {
        let mut thread = thread_with_cell(0);
        let mut shared = SharedState::default();
        execute_shift_stage(&mut ExecContext::new(&mut thread, &mut shared), Color::new(0xFF_FFFE), -1).unwrap();
        assert_eq!(thread.wheel().cursor(), -0xFF_FFFF);
        assert_eq!(thread.wheel().materialized(), 0);
    }

    #[test]
    fn test_stage_push() {
        let mut thread = thread_with_cell(0);
        thread.stage_1 = 0x1FF;
        thread.stage_2 = 7;
        let mut shared = SharedState::default();
        let mut ctx = ExecContext::new(&mut thread, &mut shared);

        execute_stage_1_push(&mut ctx, Color::new(0xF0)).unwrap();
        assert_eq!(ctx.thread().wheel().pull(), 0xF0);
        execute_stage_2_push(&mut ctx, Color::BLACK).unwrap();
        assert_eq!(ctx.thread().wheel().pull(), 7);
    }
}
