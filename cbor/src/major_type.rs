/// The 3-bit category carried in the top bits of every CBOR initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MajorType {
    UInt = 0,
    NegInt = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    /// Simple values and floating-point numbers
    Simple = 7,
}

impl MajorType {
    /// Extract the major type from the top three bits of an initial byte.
    pub const fn from_initial_byte(b: u8) -> Self {
        match b >> 5 {
            0 => Self::UInt,
            1 => Self::NegInt,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }

    /// Combine the major type with a 5-bit additional information value.
    pub const fn initial_byte(self, additional: u8) -> u8 {
        ((self as u8) << 5) | (additional & 0x1F)
    }
}

impl From<MajorType> for u8 {
    fn from(major: MajorType) -> Self {
        major as u8
    }
}

impl TryFrom<u8> for MajorType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 7 {
            Ok(Self::from_initial_byte(value << 5))
        } else {
            Err(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        for v in 0u8..=7 {
            let major = MajorType::try_from(v).unwrap();
            assert_eq!(u8::from(major), v);
            assert_eq!(MajorType::from_initial_byte(major.initial_byte(31)), major);
        }
        assert_eq!(MajorType::try_from(8), Err(8));
        assert_eq!(MajorType::Array.initial_byte(25), 0x99);
    }
}
