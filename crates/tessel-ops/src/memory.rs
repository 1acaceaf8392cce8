//! Global memory instructions
//!
//! Global memory is shared by every thread. `STORE`/`LOAD` address it by the
//! number in stage_1; the `*_HERE` variants address the block the thread is
//! standing on.

use tessel_core::{ExecContext, MemoryKey, Result};

pub fn execute_store(ctx: &mut ExecContext<'_>) -> Result<()> {
    let key = MemoryKey::Index(ctx.thread().stage_1);
    let value = ctx.thread().wheel().pull();
    ctx.store(key, value);
    Ok(())
}

pub fn execute_load(ctx: &mut ExecContext<'_>) -> Result<()> {
    let value = ctx.load(MemoryKey::Index(ctx.thread().stage_1));
    ctx.thread_mut().wheel_mut().push(value);
    Ok(())
}

pub fn execute_store_here(ctx: &mut ExecContext<'_>) -> Result<()> {
    let key = ctx.here();
    let value = ctx.thread().wheel().pull();
    ctx.store(key, value);
    Ok(())
}

pub fn execute_load_here(ctx: &mut ExecContext<'_>) -> Result<()> {
    let value = ctx.load(ctx.here());
    ctx.thread_mut().wheel_mut().push(value);
    Ok(())
}
