pub mod operands;
