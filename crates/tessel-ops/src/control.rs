//! Control instructions: lifecycle, turning, forking, pausing and jumps

use tessel_core::{Color, ExecContext, Result, Turn};

/// KILL - End the executing thread
pub fn execute_kill(ctx: &mut ExecContext<'_>) -> Result<()> {
    ctx.thread_mut().kill();
    Ok(())
}

pub fn execute_turn_left(ctx: &mut ExecContext<'_>) -> Result<()> {
    ctx.thread_mut().turn_left();
    Ok(())
}

pub fn execute_turn_right(ctx: &mut ExecContext<'_>) -> Result<()> {
    ctx.thread_mut().turn_right();
    Ok(())
}

pub fn execute_reverse(ctx: &mut ExecContext<'_>) -> Result<()> {
    ctx.thread_mut().reverse();
    Ok(())
}

/// FORK_LEFT / FORK_RIGHT - Spawn a turned copy of the thread
///
/// The copy joins the live sequence at the end of the cycle.
pub fn execute_fork(ctx: &mut ExecContext<'_>, turn: Turn) -> Result<()> {
    ctx.fork(turn);
    Ok(())
}

/// PAUSE - Skip the next `max(operand, 1)` cycles
pub fn execute_pause(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let cycles = u64::from(operand.value().max(1));
    tracing::trace!(thread = %ctx.thread().id(), cycles, "pause");
    ctx.thread_mut().pause(cycles);
    Ok(())
}

/// WARP - Relative jump
///
/// The red channel is the x offset and the green channel the y offset, both
/// read as two's-complement bytes. A zero offset keeps the thread in place.
pub fn execute_warp(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let dx = i64::from(operand.red() as i8);
    let dy = i64::from(operand.green() as i8);
    tracing::trace!(thread = %ctx.thread().id(), dx, dy, "warp");
    ctx.thread_mut().jump(dx, dy);
    Ok(())
}

/// BZ - Turn right when the wheel cell under the cursor is zero
pub fn execute_branch_zero(ctx: &mut ExecContext<'_>) -> Result<()> {
    if ctx.thread().wheel().pull() == 0 {
        ctx.thread_mut().turn_right();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{Direction, SharedState, Thread, ThreadId, ThreadState};

    fn fixture() -> (Thread, SharedState) {
        let mut shared = SharedState::default();
        let thread = Thread::new(shared.make_id(), 4, 4, Direction::Up);
        (thread, shared)
    }

    #[test]
    fn test_turns() {
        let (mut thread, mut shared) = fixture();
        let mut ctx = ExecContext::new(&mut thread, &mut shared);
        execute_turn_right(&mut ctx).unwrap();
        assert_eq!(ctx.thread().direction(), Direction::Right);
        execute_reverse(&mut ctx).unwrap();
        assert_eq!(ctx.thread().direction(), Direction::Left);
        execute_turn_left(&mut ctx).unwrap();
        assert_eq!(ctx.thread().direction(), Direction::Down);
    }

    #[test]
    fn test_kill() {
        let (mut thread, mut shared) = fixture();
        execute_kill(&mut ExecContext::new(&mut thread, &mut shared)).unwrap();
        assert_eq!(thread.state(), ThreadState::Ended);
    }

    #[test]
    fn test_fork_is_deferred() {
        let (mut thread, mut shared) = fixture();
        execute_fork(&mut ExecContext::new(&mut thread, &mut shared), Turn::Right).unwrap();
        assert_eq!(shared.pending_forks(), 1);
        assert_eq!(shared.make_id(), ThreadId(2));
    }

    #[test]
    fn test_pause_uses_operand() {
        let (mut thread, mut shared) = fixture();
        execute_pause(&mut ExecContext::new(&mut thread, &mut shared), Color::new(3)).unwrap();
        assert_eq!(thread.state(), ThreadState::Paused(3));
    }

    #[test]
    fn test_pause_black_operand_is_one_cycle() {
        let (mut thread, mut shared) = fixture();
        execute_pause(&mut ExecContext::new(&mut thread, &mut shared), Color::BLACK).unwrap();
        assert_eq!(thread.state(), ThreadState::Paused(1));
    }

    #[test]
    fn test_warp_signed_offsets() {
        let (mut thread, mut shared) = fixture();
        // red = -2, green = +3
        execute_warp(&mut ExecContext::new(&mut thread, &mut shared), Color::from_rgb(0xFE, 0x03, 0x77)).unwrap();
        assert_eq!(thread.position(), (2, 7));
        assert_eq!(thread.direction(), Direction::Up);
    }

    #[test]
    fn test_branch_zero() {
        let (mut thread, mut shared) = fixture();
        execute_branch_zero(&mut ExecContext::new(&mut thread, &mut shared)).unwrap();
        assert_eq!(thread.direction(), Direction::Right);

        thread.wheel_mut().push(5);
        execute_branch_zero(&mut ExecContext::new(&mut thread, &mut shared)).unwrap();
        assert_eq!(thread.direction(), Direction::Right);
    }
}
