//! HD44780 instruction opcodes and register flag masks.
//!
//! The full datasheet table is carried here, including entries the public API
//! does not currently reach, so command bytes can always be read as
//! `opcode | flags`.

// commands
pub(crate) const CMD_CLEAR: u8 = 0x01; //  Clear display, set cursor position to zero
pub(crate) const CMD_RETURNHOME: u8 = 0x02; //  Set cursor position to zero
pub(crate) const CMD_ENTRYMODESET: u8 = 0x04; //  Sets the entry mode
pub(crate) const CMD_DISPLAYCONTROL: u8 = 0x08; //  Display on/off, cursor, blink
pub(crate) const CMD_CURSORSHIFT: u8 = 0x10; //  Shifts the cursor or the display
pub(crate) const CMD_FUNCTIONSET: u8 = 0x20; //  Bus width, line count, font
pub(crate) const CMD_SETCGRAMADDR: u8 = 0x40; //  Sets the CGRAM (character generator RAM) address
pub(crate) const CMD_SETDDRAMADDR: u8 = 0x80; //  Sets the DDRAM (display data RAM) address

// flags for display entry mode
pub(crate) const ENTRYMODE_RIGHT: u8 = 0x00; //  Text flows right to left
pub(crate) const ENTRYMODE_LEFT: u8 = 0x02; //  Text flows left to right
pub(crate) const ENTRYMODE_SHIFTINCREMENT: u8 = 0x01; //  Display shifts on each write
pub(crate) const ENTRYMODE_SHIFTDECREMENT: u8 = 0x00; //  Display holds still on each write

// flags for display on/off control
pub(crate) const CNTRL_DISPLAYON: u8 = 0x04; //  Turns the display on
pub(crate) const CNTRL_DISPLAYOFF: u8 = 0x00; //  Turns the display off
pub(crate) const CNTRL_CURSORON: u8 = 0x02; //  Turns the cursor on
pub(crate) const CNTRL_CURSOROFF: u8 = 0x00; //  Turns the cursor off
pub(crate) const CNTRL_BLINKON: u8 = 0x01; //  Turns on the blinking cursor
pub(crate) const CNTRL_BLINKOFF: u8 = 0x00; //  Turns off the blinking cursor

// flags for display/cursor shift
pub(crate) const SHIFT_DISPLAYMOVE: u8 = 0x08; //  Shift the display
pub(crate) const SHIFT_CURSORMOVE: u8 = 0x00; //  Shift the cursor
pub(crate) const SHIFT_MOVERIGHT: u8 = 0x04; //  Shift to the right
pub(crate) const SHIFT_MOVELEFT: u8 = 0x00; //  Shift to the left

// flags for function set
pub(crate) const FUNCTION_8BITMODE: u8 = 0x10; //  8 bit bus width
pub(crate) const FUNCTION_4BITMODE: u8 = 0x00; //  4 bit bus width
pub(crate) const FUNCTION_2LINE: u8 = 0x08; //  Two display lines
pub(crate) const FUNCTION_1LINE: u8 = 0x00; //  One display line
pub(crate) const FUNCTION_5x10DOTS: u8 = 0x04; //  10 pixel high font
pub(crate) const FUNCTION_5x8DOTS: u8 = 0x00; //  8 pixel high font

// flags for backlight control, merged into every byte sent to the expander
pub(crate) const BACKLIGHT_ON: u8 = 0x08;
pub(crate) const BACKLIGHT_OFF: u8 = 0x00;
