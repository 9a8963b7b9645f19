//! Driver object for HD44780 controllers behind a PCF8574 expander.

use embedded_hal::{delay::DelayNs, i2c};

use crate::commands::*;
use crate::expander::Pcf8574Bits;
use crate::{DisplayError, DisplayGeometry, LineLength, PinSetup, DEFAULT_I2C_ADDRESS};

/// DDRAM base address of each logical row. The discontinuity between rows 2
/// and 3 is a property of the controller's address map, not of the geometry.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Driver for a HD44780-compatible character LCD behind a PCF8574 I2C
/// backpack. Owns the bus handle and the delay provider; all operations are
/// blocking and open-loop (the busy flag is never polled, pacing is done with
/// the datasheet minimum delays).
///
/// The controller's function, display-control and entry-mode registers are
/// mirrored as accumulator masks. Every toggle mutates one bit of its mask
/// and retransmits the full command byte, so the device configuration always
/// equals the last composed command. The backlight bit is not a controller
/// register at all; it is merged into every byte presented to the expander.
pub struct Lcd2004<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    i2c: I2C,
    delay: DELAY,
    address: u8,
    geometry: DisplayGeometry,
    function: u8,
    control: u8,
    entry_mode: u8,
    backlight: u8,
}

impl<I2C, DELAY> Lcd2004<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    /// Create a new driver using the default I2C address of the PCF8574
    /// backpack (0x27). The bus pins must already be configured for I2C
    /// signaling (alternate function, open drain) by the caller.
    pub fn new(i2c: I2C, geometry: DisplayGeometry, delay: DELAY) -> Self {
        Self::new_with_address(i2c, DEFAULT_I2C_ADDRESS, geometry, delay)
    }

    /// Create a new driver with a specific I2C address. The bus pins must
    /// already be configured for I2C signaling by the caller.
    pub fn new_with_address(i2c: I2C, address: u8, geometry: DisplayGeometry, delay: DELAY) -> Self {
        Self {
            i2c,
            delay,
            address,
            geometry,
            function: 0,
            control: 0,
            entry_mode: 0,
            backlight: BACKLIGHT_OFF,
        }
    }

    /// Create a new driver that performs one-time electrical pin setup itself,
    /// through the supplied [`PinSetup`] collaborator, before taking the bus.
    /// Use this where the board support layer does not configure the I2C pins
    /// beforehand.
    pub fn new_with_pins<P: PinSetup>(
        i2c: I2C,
        address: u8,
        geometry: DisplayGeometry,
        delay: DELAY,
        pins: &mut P,
    ) -> Self {
        pins.configure_pins();
        Self::new_with_address(i2c, address, geometry, delay)
    }

    /// Initialize the display. Must be called exactly once before any other
    /// operation.
    ///
    /// Runs the blind power-on sequence from the controller datasheet: after
    /// the power-on wait, the "function set, 8-bit" nibble is forced three
    /// times so the controller reaches a known state regardless of the bus
    /// width it was in, then the interface is switched to 4-bit and the
    /// default configuration (display on, cursor off, blink off, left-to-right
    /// entry) is programmed. No feedback is read at any point; a returned
    /// error means at least one bus write was not acknowledged, but the whole
    /// sequence will still have been attempted.
    pub fn init(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        // controller needs time after power-on before accepting anything
        self.delay.delay_ms(50);

        // establish the bus idle level with the backlight on
        self.backlight = BACKLIGHT_ON;
        let mut outcome = self.expander_write(0x00);
        self.delay.delay_ms(1);

        // force 8-bit mode three times; the controller may be in any width
        // mode and mid-nibble at this point
        outcome = outcome.and(self.send_nibble(0x03, false));
        self.delay.delay_ms(5);
        outcome = outcome.and(self.send_nibble(0x03, false));
        self.delay.delay_ms(5);
        outcome = outcome.and(self.send_nibble(0x03, false));
        self.delay.delay_us(100);

        // switch to the 4-bit interface; from here on everything is sent as
        // two nibbles
        outcome = outcome.and(self.send_nibble(0x02, false));

        self.function = FUNCTION_4BITMODE | FUNCTION_1LINE | FUNCTION_5x8DOTS;
        if self.geometry.rows() > 1 {
            self.function |= FUNCTION_2LINE;
        }
        outcome = outcome.and(self.command(CMD_FUNCTIONSET | self.function));

        self.control = CNTRL_DISPLAYON | CNTRL_CURSOROFF | CNTRL_BLINKOFF;
        outcome = outcome.and(self.command(CMD_DISPLAYCONTROL | self.control));

        outcome = outcome.and(self.clear().map(|_| ()));

        self.entry_mode = ENTRYMODE_LEFT | ENTRYMODE_SHIFTDECREMENT;
        outcome = outcome.and(self.command(CMD_ENTRYMODESET | self.entry_mode));

        outcome = outcome.and(self.home().map(|_| ()));
        outcome?;
        Ok(self)
    }

    /// Clear the display and set the cursor position to zero.
    pub fn clear(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        let outcome = self.command(CMD_CLEAR);
        // clear rewrites the whole DDRAM internally and needs extra settle time
        self.delay.delay_ms(2);
        outcome?;
        Ok(self)
    }

    /// Set the cursor position to zero and undo any display shift.
    pub fn home(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        let outcome = self.command(CMD_RETURNHOME);
        self.delay.delay_ms(2);
        outcome?;
        Ok(self)
    }

    /// Set the cursor position. Columns and rows are numbered starting from 1.
    /// Row 0 is treated as row 1 and rows beyond the configured row count are
    /// clamped to the last row; the column is not range checked.
    pub fn set_position(&mut self, column: u8, row: u8) -> Result<&mut Self, DisplayError<I2C>> {
        let row = if row == 0 {
            1
        } else if row > self.geometry.rows() {
            self.geometry.rows()
        } else {
            row
        };
        // the offset table has four entries; rows are meaningful for 1..=4
        let offset = ROW_OFFSETS[(row.clamp(1, ROW_OFFSETS.len() as u8) - 1) as usize];
        self.command(CMD_SETDDRAMADDR | offset.wrapping_add(column).wrapping_sub(1))?;
        Ok(self)
    }

    /// Write a single character at the current cursor position.
    pub fn write_char(&mut self, c: char) -> Result<&mut Self, DisplayError<I2C>> {
        self.send_byte(c as u8, true)?;
        Ok(self)
    }

    /// Write a line of text on the given row.
    ///
    /// The start column follows the current entry mode: right-to-left entry
    /// starts at the last column, left-to-right entry with autoscroll starts
    /// one past the last column, and plain left-to-right entry starts at
    /// column 1. With [`LineLength::Auto`] the text is sent up to the first
    /// newline or NUL; with [`LineLength::Fixed`] exactly that many characters
    /// are sent and newlines are transmitted as data. `Fixed(0)` positions the
    /// cursor without sending anything.
    ///
    /// Every character is attempted even if an earlier one failed; the first
    /// failure is reported after the line has been sent.
    pub fn write_line(
        &mut self,
        text: &str,
        row: u8,
        len: LineLength,
    ) -> Result<&mut Self, DisplayError<I2C>> {
        let mut outcome = if (self.entry_mode & ENTRYMODE_LEFT) == 0x00 {
            // right-to-left entry writes the line from the end
            self.set_position(self.geometry.columns(), row).map(|_| ())
        } else if (self.entry_mode & ENTRYMODE_SHIFTINCREMENT) != 0x00 {
            self.set_position(self.geometry.columns().wrapping_add(1), row)
                .map(|_| ())
        } else {
            self.set_position(1, row).map(|_| ())
        };
        match len {
            LineLength::Auto => {
                for c in text.chars() {
                    if c == '\n' || c == '\0' {
                        break;
                    }
                    outcome = outcome.and(self.send_byte(c as u8, true));
                }
            }
            LineLength::Fixed(n) => {
                for c in text.chars().take(n) {
                    outcome = outcome.and(self.send_byte(c as u8, true));
                }
            }
        }
        outcome?;
        Ok(self)
    }

    /// Print a string at the current cursor position. No positioning is done
    /// and no terminator scanning takes place; every character of `text` is
    /// sent as display data.
    pub fn print(&mut self, text: &str) -> Result<&mut Self, DisplayError<I2C>> {
        let mut outcome = Ok(());
        for c in text.chars() {
            outcome = outcome.and(self.send_byte(c as u8, true));
        }
        outcome?;
        Ok(self)
    }

    /// Turn the display on.
    pub fn display_on(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control |= CNTRL_DISPLAYON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Turn the display off.
    pub fn display_off(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control &= !CNTRL_DISPLAYON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Turn the backlight on. No controller command is involved; a single
    /// content-free expander write makes the new backlight level take effect
    /// immediately.
    pub fn backlight_on(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.backlight = BACKLIGHT_ON;
        self.expander_write(0x00)?;
        Ok(self)
    }

    /// Turn the backlight off.
    pub fn backlight_off(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.backlight = BACKLIGHT_OFF;
        self.expander_write(0x00)?;
        Ok(self)
    }

    /// Turn the underline cursor on.
    pub fn cursor_on(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control |= CNTRL_CURSORON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Turn the underline cursor off.
    pub fn cursor_off(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control &= !CNTRL_CURSORON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Turn the blinking cursor on.
    pub fn blink_on(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control |= CNTRL_BLINKON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Turn the blinking cursor off.
    pub fn blink_off(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.control &= !CNTRL_BLINKON;
        self.command(CMD_DISPLAYCONTROL | self.control)?;
        Ok(self)
    }

    /// Scroll the display one position to the left. Because of the DDRAM
    /// address map, a character scrolling off one row does not reappear on
    /// the row below it.
    pub fn scroll_left(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.command(CMD_CURSORSHIFT | SHIFT_DISPLAYMOVE | SHIFT_MOVELEFT)?;
        Ok(self)
    }

    /// Scroll the display one position to the right.
    pub fn scroll_right(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.command(CMD_CURSORSHIFT | SHIFT_DISPLAYMOVE | SHIFT_MOVERIGHT)?;
        Ok(self)
    }

    /// Set the entry mode to left-to-right.
    pub fn entry_left(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.entry_mode |= ENTRYMODE_LEFT;
        self.command(CMD_ENTRYMODESET | self.entry_mode)?;
        Ok(self)
    }

    /// Set the entry mode to right-to-left.
    pub fn entry_right(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.entry_mode &= !ENTRYMODE_LEFT;
        self.command(CMD_ENTRYMODESET | self.entry_mode)?;
        Ok(self)
    }

    /// Align text left from the cursor. Already written rows shift with it.
    pub fn align_left(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.entry_mode &= !ENTRYMODE_SHIFTINCREMENT;
        self.command(CMD_ENTRYMODESET | self.entry_mode)?;
        Ok(self)
    }

    /// Align text right from the cursor. Already written rows shift with it.
    pub fn align_right(&mut self) -> Result<&mut Self, DisplayError<I2C>> {
        self.entry_mode |= ENTRYMODE_SHIFTINCREMENT;
        self.command(CMD_ENTRYMODESET | self.entry_mode)?;
        Ok(self)
    }

    /// The display geometry this driver was constructed with.
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// The I2C address of the expander.
    pub fn i2c_address(&self) -> u8 {
        self.address
    }

    /// returns a reference to the I2C peripheral. mostly needed for testing
    fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError<I2C>> {
        self.send_byte(command, false)
    }

    /// Send one logical byte as two nibble transfers, high nibble first.
    /// Both transfers are attempted even if the first fails; the first error
    /// is kept.
    fn send_byte(&mut self, value: u8, rs: bool) -> Result<(), DisplayError<I2C>> {
        let outcome = self.send_nibble(value >> 4, rs);
        outcome.and(self.send_nibble(value & 0x0F, rs))
    }

    /// Send one nibble: present it on the bus, then pulse enable to latch it.
    /// The 1us and 50us holds are the datasheet minimums for the enable pulse
    /// width and the command settle time.
    fn send_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError<I2C>> {
        let mut bits = Pcf8574Bits(0);
        bits.set_data(nibble);
        bits.set_rs(rs as u8);
        bits.set_rw(0);
        let mut outcome = self.expander_write(bits.0);
        bits.set_enable(1);
        outcome = outcome.and(self.expander_write(bits.0));
        self.delay.delay_us(1);
        bits.set_enable(0);
        outcome = outcome.and(self.expander_write(bits.0));
        self.delay.delay_us(50);
        outcome
    }

    /// Single physical write to the expander. The current backlight level is
    /// merged into every byte that goes out on the bus.
    fn expander_write(&mut self, frame: u8) -> Result<(), DisplayError<I2C>> {
        let mut bits = Pcf8574Bits(frame);
        bits.set_backlight((self.backlight != BACKLIGHT_OFF) as u8);
        self.i2c
            .write(self.address, &[bits.0])
            .map_err(DisplayError::I2cError)
    }
}

/// Implement the `core::fmt::Write` trait for the driver, allowing it to be
/// used with the `write!` macro.
impl<I2C, DELAY> core::fmt::Write for Lcd2004<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    fn write_str(&mut self, s: &str) -> Result<(), core::fmt::Error> {
        if let Err(_e) = self.print(s) {
            return Err(core::fmt::Error);
        }
        Ok(())
    }
}

#[cfg(feature = "ufmt")]
/// Implement the `ufmt::uWrite` trait for the driver, allowing it to be used
/// with the `uwriteln!` and `uwrite!` macros.
impl<I2C, DELAY> ufmt::uWrite for Lcd2004<I2C, DELAY>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    fn write_str(&mut self, s: &str) -> Result<(), DisplayError<I2C>> {
        self.print(s)?;
        Ok(())
    }

    type Error = DisplayError<I2C>;
}
