use crate::{BitReader, datatypes::ScaledValue, error::BitReadError};

/// Shape of the Earth (Code Table 3.2) with the radius or axes it may
/// specify.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EarthShapeDefinition {
    pub shape_of_the_earth: u8,
    pub radius: ScaledValue,
    pub major_axis: ScaledValue,
    pub minor_axis: ScaledValue,
}

impl EarthShapeDefinition {
    /// Returns the major and minor radii in metres.
    pub fn radii(&self) -> Option<(f64, f64)> {
        let radii = match self.shape_of_the_earth {
            0 => (6367470.0, 6367470.0),
            1 => {
                let radius = self.radius.value()?;
                (radius, radius)
            }
            2 => (6378160.0, 6356775.0),
            3 => {
                let (major, minor) = self.radii_defined()?;
                (major * 1000., minor * 1000.)
            }
            4 => (6378137.0, 6356752.314),
            5 => (6378137.0, 6356752.3142),
            6 => (6371229.0, 6371229.0),
            7 => self.radii_defined()?,
            8 => (6371200.0, 6371200.0),
            _ => return None,
        };
        Some(radii)
    }

    fn radii_defined(&self) -> Option<(f64, f64)> {
        Some((self.major_axis.value()?, self.minor_axis.value()?))
    }

    pub(crate) fn from_reader<T: AsRef<[u8]>>(
        reader: &mut BitReader<T>,
    ) -> Result<Self, BitReadError> {
        Ok(Self {
            shape_of_the_earth: reader.read()?,
            radius: reader.read_scaled()?,
            major_axis: reader.read_scaled()?,
            minor_axis: reader.read_scaled()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_for_shape_1() {
        let earth = EarthShapeDefinition {
            shape_of_the_earth: 1,
            radius: ScaledValue::new(0, 6371200),
            major_axis: ScaledValue::new(0, 0),
            minor_axis: ScaledValue::new(0, 0),
        };
        assert_eq!(earth.radii(), Some((6_371_200., 6_371_200.)));
    }

    #[test]
    fn radii_for_shape_3_are_given_in_km() {
        let earth = EarthShapeDefinition {
            shape_of_the_earth: 3,
            radius: ScaledValue::new(i8::MIN + 1, i32::MIN + 1),
            major_axis: ScaledValue::new(0, 6378),
            minor_axis: ScaledValue::new(0, 6357),
        };
        assert_eq!(earth.radii(), Some((6_378_000., 6_357_000.)));
    }

    #[test]
    fn reading_earth_shape() {
        let bytes = [
            0x06, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff,
        ];
        let mut reader = BitReader::new(bytes);
        let earth = EarthShapeDefinition::from_reader(&mut reader).unwrap();
        assert_eq!(earth.shape_of_the_earth, 6);
        assert!(earth.radius.is_missing());
        assert_eq!(earth.radii(), Some((6371229.0, 6371229.0)));
        assert_eq!(reader.remaining_bits(), 0);
    }
}
