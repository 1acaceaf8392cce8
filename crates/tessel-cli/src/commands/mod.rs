pub mod disasm;
pub mod ops;
pub mod run;
