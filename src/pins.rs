//! GPIO register layout and LED pin assignments for the BCM2837 board.
//!
//! Single source of truth — every module references this module rather than
//! hard-coding register offsets or pin numbers.  Offsets are in 32-bit words
//! from the start of the GPIO register window.

// ---------------------------------------------------------------------------
// Register window
// ---------------------------------------------------------------------------

/// Physical base address of the GPIO controller (BCM2837 ARM view).
pub const GPIO_BASE: u64 = 0x3F20_0000;
/// Bytes mapped from [`GPIO_BASE`]; covers GPFSEL0 through GPPUDCLK1.
pub const GPIO_WINDOW_LEN: usize = 0xA0;

// ---------------------------------------------------------------------------
// Register word offsets
// ---------------------------------------------------------------------------

/// GPFSEL0..GPFSEL5: six function-select registers, 10 pins each.
pub const GPFSEL0: usize = 0;
/// GPSET0 (pins 0-31); GPSET1 follows at `GPSET0 + 1`.
pub const GPSET0: usize = 7;
/// GPCLR0 (pins 0-31); GPCLR1 follows at `GPCLR0 + 1`.
pub const GPCLR0: usize = 10;
/// GPLEV0 (pins 0-31, read-only); GPLEV1 follows at `GPLEV0 + 1`.
pub const GPLEV0: usize = 13;

/// Smallest window (in words) that still reaches GPCLR1.
pub const MIN_WINDOW_WORDS: usize = GPCLR0 + 2;

// ---------------------------------------------------------------------------
// Function-select field geometry
// ---------------------------------------------------------------------------

/// Pins packed into one function-select register.
pub const FSEL_PINS_PER_REG: u8 = 10;
/// Width of one function-select field in bits.
pub const FSEL_FIELD_BITS: u32 = 3;
/// Mask for a single function-select field before shifting.
pub const FSEL_FIELD_MASK: u32 = 0b111;

/// Pins covered by one set/clear/level register.
pub const PINS_PER_BANK: u8 = 32;
/// Highest GPIO line on this SoC family.
pub const MAX_PIN: u8 = 53;

// ---------------------------------------------------------------------------
// LEDs
// ---------------------------------------------------------------------------

/// LED A, selected by command `'1'`.
pub const LED_A_GPIO: u8 = 16;
/// LED B, selected by command `'2'`.
pub const LED_B_GPIO: u8 = 25;
/// LED C, selected by command `'3'`.
pub const LED_C_GPIO: u8 = 21;

/// Default controlled pins in command order (A, B, C).
pub const LED_GPIOS: [u8; 3] = [LED_A_GPIO, LED_B_GPIO, LED_C_GPIO];

// ---------------------------------------------------------------------------
// Host side
// ---------------------------------------------------------------------------

/// Memory device opened by the `mmio` mapper.
pub const MEM_DEVICE: &str = "/dev/mem";
