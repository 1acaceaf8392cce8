//! Input and output instructions
//!
//! A value written as a character is converted by summing its red, green and
//! blue channels, so `#000041`, `#410000` and `#201001` all print `A`.

use crate::stage::mask;
use tessel_core::{Color, ExecContext, Result};

/// Character for a colour value (sum of its three channels)
pub fn channel_char(value: u32) -> char {
    char::from_u32(Color::new(value).channel_sum()).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Lowercase hexadecimal with a leading `-` for negative values
pub fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    }
}

fn masked_cell(ctx: &ExecContext<'_>, operand: Color) -> i64 {
    mask(ctx.thread().wheel().pull(), operand)
}

pub fn execute_output_mem_char(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let value = masked_cell(ctx, operand);
    let ch = channel_char((value & i64::from(Color::MASK)) as u32);
    ctx.write_output(ch.encode_utf8(&mut [0; 4]));
    Ok(())
}

pub fn execute_output_mem_int(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let value = masked_cell(ctx, operand);
    ctx.write_output(&value.to_string());
    Ok(())
}

pub fn execute_output_mem_hex(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let value = masked_cell(ctx, operand);
    ctx.write_output(&signed_hex(value));
    Ok(())
}

pub fn execute_output_color_char(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    let ch = channel_char(operand.value());
    ctx.write_output(ch.encode_utf8(&mut [0; 4]));
    Ok(())
}

pub fn execute_output_color_number(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    ctx.write_output(&operand.value().to_string());
    Ok(())
}

pub fn execute_output_color_hex(ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
    ctx.write_output(&format!("{:x}", operand.value()));
    Ok(())
}

/// IN_NUMBER - Push the leading decimal number of the input (0 if none)
pub fn execute_input_number(ctx: &mut ExecContext<'_>) -> Result<()> {
    let value = ctx.grab_input_number();
    ctx.thread_mut().wheel_mut().push(value);
    Ok(())
}

/// IN_CHAR - Push the next input code point, or -1 once input is exhausted
pub fn execute_input_char(ctx: &mut ExecContext<'_>) -> Result<()> {
    let value = ctx.grab_input_char().map_or(-1, i64::from);
    ctx.thread_mut().wheel_mut().push(value);
    Ok(())
}
