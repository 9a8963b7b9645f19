//! This Rust `embedded-hal`-based library is a simple way to control a [HD44780](https://en.wikipedia.org/wiki/Hitachi_HD44780_LCD_controller)
//! compatible character display behind a PCF8574 I2C "backpack" in an embedded, `no_std` environment.
//! These adapters are ubiquitous on eBay and AliExpress and have no clear branding; some display
//! makers integrate the PCF8574 directly on the display board. The common wiring connects the
//! display's 4-bit data pins to P4-P7 of the expander and the control pins to P0-P3:
//!
//! | PCF8574 pin | Display signal |
//! |-------------|----------------|
//! | P0          | RS             |
//! | P1          | R/W            |
//! | P2          | E              |
//! | P3          | Backlight      |
//! | P4-P7       | D4-D7          |
//!
//! Key features include:
//! - Convenient high-level API for controlling the display, with chainable commands
//! - Row-addressed line writing with configurable length handling
//! - Backlight control
//! - `core::fmt::Write` implementation for easy use with the `write!` macro
//! - Compatible with the `embedded-hal` traits v1.0 and later
//! - Optional support for the `defmt` and `ufmt` logging frameworks
//!
//! The driver is open loop: the controller's busy flag is never read, and all pacing is done
//! with the datasheet minimum delays through the supplied `DelayNs` implementation.
//!
//! ## Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! lcd2004-i2c = { version = "0.2", features = ["defmt"] }
//! ```
//! The `features = ["defmt"]` line is optional and enables the `defmt` feature, which allows the
//! library's errors to be used with the `defmt` logging framework. Another optional feature is
//! `features = ["ufmt"]`, which enables the `ufmt` feature, allowing the `uwriteln!` and `uwrite!`
//! macros to be used.
//!
//! Then create and initialize the driver:
//! ```rust
//! use lcd2004_i2c::{DisplayGeometry, Lcd2004, LineLength};
//!
//! // board setup
//! let i2c = ...; // I2C peripheral
//! let delay = ...; // DelayNs implementation
//!
//! let mut lcd = Lcd2004::new(i2c, DisplayGeometry::LCD2004, delay);
//! if let Err(e) = lcd.init() {
//!     panic!("Error initializing LCD: {}", e);
//! }
//! ```
//! Use the display:
//! ```rust
//! // set up the display
//! lcd.backlight_on()?.clear()?.home()?;
//! // write a line on a specific row
//! lcd.write_line("Hello, world!", 1, LineLength::Auto)?;
//! // print at the current cursor position
//! lcd.print("more")?;
//! // can also use the `core::fmt::write!` macro
//! use core::fmt::Write;
//!
//! write!(lcd, "Hello, world!")?;
//! ```
//! Each method returns a `Result` that wraps the display object in `Ok()`, allowing for easy
//! chaining of commands. For example:
//! ```rust
//! lcd.backlight_on()?.clear()?.home()?.print("Hello, world!")?;
//! ```
#![no_std]
#![allow(dead_code)]
use core::fmt::Display;

use embedded_hal::i2c;

mod commands;
mod driver;
mod expander;

pub use driver::Lcd2004;

/// Factory default address of the PCF8574 on the common backpack boards.
/// Boards with the address jumpers bridged use 0x20..=0x27; the PCF8574A
/// variant answers at 0x38..=0x3F.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x27;

#[derive(Debug, PartialEq, Copy, Clone)]
/// Errors that can occur when using the display
pub enum DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    /// I2C error returned from the underlying I2C implementation
    I2cError(I2C::Error),
    /// Formatting error
    FormattingError(core::fmt::Error),
}

impl<I2C> From<core::fmt::Error> for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn from(err: core::fmt::Error) -> Self {
        DisplayError::FormattingError(err)
    }
}

impl<I2C> From<&DisplayError<I2C>> for &'static str
where
    I2C: i2c::I2c,
{
    fn from(err: &DisplayError<I2C>) -> Self {
        match err {
            DisplayError::I2cError(_) => "I2C error",
            DisplayError::FormattingError(_) => "Formatting error",
        }
    }
}

#[cfg(feature = "defmt")]
impl<I2C> defmt::Format for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl<I2C> ufmt::uDisplay for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl<I2C> Display for DisplayError<I2C>
where
    I2C: i2c::I2c,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}

/// Column and row count of the attached display. The driver supports any
/// geometry with 1 to 4 rows; the two module sizes this backpack wiring is
/// most often paired with are provided as constants.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DisplayGeometry {
    columns: u8,
    rows: u8,
}

impl DisplayGeometry {
    /// 20 columns by 4 rows
    pub const LCD2004: DisplayGeometry = DisplayGeometry::new(20, 4);
    /// 16 columns by 2 rows
    pub const LCD1602: DisplayGeometry = DisplayGeometry::new(16, 2);

    /// Create a geometry with the given column and row counts. Rows beyond 4
    /// have no address in the controller's DDRAM map and are clamped by the
    /// positioning operations.
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self { columns, rows }
    }

    pub const fn columns(&self) -> u8 {
        self.columns
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }
}

impl Display for DisplayGeometry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayGeometry {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}x{}", self.columns, self.rows);
    }
}

#[cfg(feature = "ufmt")]
impl ufmt::uDisplay for DisplayGeometry {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(w, "{}x{}", self.columns, self.rows)
    }
}

/// How much of the text [`Lcd2004::write_line`] sends.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LineLength {
    /// Send characters up to the first newline or NUL, or to the end of the
    /// text.
    Auto,
    /// Send exactly this many characters; newlines are transmitted as display
    /// data. `Fixed(0)` positions the cursor without sending anything. Counts
    /// beyond the text length stop at the end of the text.
    Fixed(usize),
}

/// One-time electrical setup of the I2C pins, for boards where nothing else
/// configures them before the driver takes the bus. Passed to
/// [`Lcd2004::new_with_pins`]; implementations typically select the alternate
/// function and open-drain mode on the two GPIO lines.
pub trait PinSetup {
    fn configure_pins(&mut self);
}
