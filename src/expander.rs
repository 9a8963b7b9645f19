//! Wire format of the byte presented to the PCF8574 expander.

use bitfield::bitfield;

// Bit assignment of the expander port pins on the common LCD backpack wiring.
// The upper four pins carry the data nibble, the lower four the control lines.
bitfield! {
    pub struct Pcf8574Bits(u8);
    impl Debug;
    impl BitAnd;
    pub rs, set_rs: 0, 0;
    pub rw, set_rw: 1, 1;
    pub enable, set_enable: 2, 2;
    pub backlight, set_backlight: 3, 3;
    pub data, set_data: 7, 4;
}

impl Clone for Pcf8574Bits {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcf8574_bit_layout() {
        let mut bits = Pcf8574Bits(0);
        bits.set_rs(1);
        bits.set_rw(0);
        bits.set_enable(1);
        bits.set_backlight(1);
        bits.set_data(0b1010);
        assert_eq!(bits.0, 0b1010_1101);

        bits.set_rs(0);
        bits.set_rw(1);
        bits.set_enable(0);
        bits.set_backlight(0);
        bits.set_data(0b0101);
        assert_eq!(bits.0, 0b0101_0010);
        assert_eq!(bits.data(), 0b0101);
    }
}
