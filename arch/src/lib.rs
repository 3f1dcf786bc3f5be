pub mod inst;
pub mod op;

/// Number of internal MCU registers
pub const NUM_PREG: u16 = 4;
/// Number of output channels
pub const NUM_OUT: u16 = 16;
/// Upper bound (exclusive) for a register / output / write value
pub const NUM_VAL: u16 = 256;
/// Upper bound (exclusive) for an I2C address (10-bit addressing)
pub const NUM_ADDR: u16 = 1024;
/// Upper bound (exclusive) for the program counter
pub const NUM_PC: u16 = 256;
