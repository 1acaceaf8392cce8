use anyhow::Result;
use tessel_core::isa::Instruction;
use tessel_ops::Op;

pub fn run() -> Result<()> {
    let table = tessel_ops::instruction_table()?;
    println!("{:<20} {:<10} {:<12} {:<8} FLOW", "MNEMONIC", "CATEGORY", "TEMPLATE", "OPERAND");
    for op in table.variants() {
        println!("{}", describe(*op));
    }
    Ok(())
}

fn describe(op: Op) -> String {
    let flag = |set: bool| if set { "yes" } else { "-" };
    format!(
        "{:<20} {:<10} {:<12} {:<8} {}",
        op.mnemonic(),
        op.category().to_string(),
        op.template().to_string(),
        flag(op.uses_operand()),
        flag(op.is_control_flow())
    )
}
