pub mod evm;
pub mod word256;
