use alloc::string::{String, ToString};
use core::{fmt, num::NonZeroUsize};

use serde::{
    de,
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeStruct, SerializeTuple},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{BitString, FixedWidthConfig};

/// A `serde_support` impl
impl Serialize for BitString {
    /// Serializes `self` in a platform independent way. In human readable form,
    /// it serializes into a struct named "BitString" with two fields "bw" and
    /// "bits". "bw" is the bitwidth in decimal, and "bits" are the significant
    /// binary digits, MSB first, with leading zeros stripped ("0" for zero).
    /// Other forms use a tuple of the same two elements.
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name which would be "BitString".
    /// use ilm::prelude::*;
    /// use ron::to_string;
    ///
    /// let x: BitString = "00001001".parse().unwrap();
    /// assert_eq!(to_string(&x).unwrap(), "(bw:8,bits:\"1001\")");
    /// ```
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bits = match self.strip_leading_zeros() {
            Some(norm) => norm.to_string(),
            None => "0".to_string(),
        };
        if serializer.is_human_readable() {
            let mut s = serializer.serialize_struct("BitString", 2)?;
            s.serialize_field("bw", &self.bw())?;
            s.serialize_field("bits", &bits)?;
            s.end()
        } else {
            let mut s = serializer.serialize_tuple(2)?;
            s.serialize_element(&self.bw())?;
            s.serialize_element(&bits)?;
            s.end()
        }
    }
}

const FIELDS: &[&str] = &["bw", "bits"];

/// Helper for the deserialization impl
enum Field {
    Bw,
    Bits,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`bw` or `bits`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Field, E>
            where
                E: de::Error,
            {
                match value {
                    "bw" => Ok(Field::Bw),
                    "bits" => Ok(Field::Bits),
                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// Checks `w` and fits the significant binary digits `bits` into it
fn bit_string_from_parts<E: de::Error>(w: usize, bits: &str) -> Result<BitString, E> {
    let w = NonZeroUsize::new(w).ok_or_else(|| E::custom("`bw` field should be nonzero"))?;
    let sig: BitString = bits.parse().map_err(E::custom)?;
    if sig.sig() > w.get() {
        return Err(E::custom(
            "`bits` field has more significant bits than the `bw` field allows",
        ))
    }
    Ok(sig.zero_resize(w))
}

struct BitStringVisitor;

impl<'de> Visitor<'de> for BitStringVisitor {
    type Value = BitString;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "struct BitString consisting of a decimal bitwidth \"bw\" and a binary unsigned \
             integer \"bits\"",
        )
    }

    fn visit_map<V>(self, mut map: V) -> Result<BitString, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut w: Option<usize> = None;
        let mut bits: Option<String> = None;
        while let Some(key) = map.next_key()? {
            match key {
                Field::Bw => {
                    if w.is_some() {
                        return Err(de::Error::duplicate_field("bw"))
                    }
                    w = Some(map.next_value()?);
                }
                Field::Bits => {
                    if bits.is_some() {
                        return Err(de::Error::duplicate_field("bits"))
                    }
                    bits = Some(map.next_value()?);
                }
            }
        }
        let w = w.ok_or_else(|| de::Error::missing_field("bw"))?;
        let bits = bits.ok_or_else(|| de::Error::missing_field("bits"))?;
        bit_string_from_parts(w, &bits)
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<BitString, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let w: usize = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let bits: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        bit_string_from_parts(w, &bits)
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for BitString {
    /// Deserializes `self` in a platform independent way.
    ///
    /// ```
    /// use ilm::prelude::*;
    /// use ron::from_str;
    ///
    /// let x: BitString = from_str("(bw:8,bits:\"1001\")").unwrap();
    /// assert_eq!(x.to_string(), "00001001");
    /// ```
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_struct("BitString", FIELDS, BitStringVisitor)
        } else {
            deserializer.deserialize_tuple(2, BitStringVisitor)
        }
    }
}

/// A `serde_support` impl
impl Serialize for FixedWidthConfig {
    /// Serializes into a struct named "FixedWidthConfig" with the fields
    /// "input_bits", "output_bits", and "correction_iterations"
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("FixedWidthConfig", 3)?;
        s.serialize_field("input_bits", &self.input_bits().get())?;
        s.serialize_field("output_bits", &self.output_bits().get())?;
        s.serialize_field("correction_iterations", &self.correction_iterations().get())?;
        s.end()
    }
}

const CONFIG_FIELDS: &[&str] = &["input_bits", "output_bits", "correction_iterations"];

/// Helper for the deserialization impl
enum ConfigField {
    InputBits,
    OutputBits,
    CorrectionIterations,
}

impl<'de> Deserialize<'de> for ConfigField {
    fn deserialize<D>(deserializer: D) -> Result<ConfigField, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConfigFieldVisitor;

        impl<'de> Visitor<'de> for ConfigFieldVisitor {
            type Value = ConfigField;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`input_bits`, `output_bits`, or `correction_iterations`")
            }

            fn visit_str<E>(self, value: &str) -> Result<ConfigField, E>
            where
                E: de::Error,
            {
                match value {
                    "input_bits" => Ok(ConfigField::InputBits),
                    "output_bits" => Ok(ConfigField::OutputBits),
                    "correction_iterations" => Ok(ConfigField::CorrectionIterations),
                    _ => Err(de::Error::unknown_field(value, CONFIG_FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(ConfigFieldVisitor)
    }
}

struct ConfigVisitor;

impl<'de> Visitor<'de> for ConfigVisitor {
    type Value = FixedWidthConfig;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "struct FixedWidthConfig consisting of positive \"input_bits\", \"output_bits\", and \
             \"correction_iterations\"",
        )
    }

    fn visit_map<V>(self, mut map: V) -> Result<FixedWidthConfig, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut input_bits: Option<usize> = None;
        let mut output_bits: Option<usize> = None;
        let mut correction_iterations: Option<usize> = None;
        while let Some(key) = map.next_key()? {
            let (slot, name) = match key {
                ConfigField::InputBits => (&mut input_bits, "input_bits"),
                ConfigField::OutputBits => (&mut output_bits, "output_bits"),
                ConfigField::CorrectionIterations => {
                    (&mut correction_iterations, "correction_iterations")
                }
            };
            if slot.is_some() {
                return Err(de::Error::duplicate_field(name))
            }
            *slot = Some(map.next_value()?);
        }
        let input_bits = input_bits.ok_or_else(|| de::Error::missing_field("input_bits"))?;
        let output_bits = output_bits.ok_or_else(|| de::Error::missing_field("output_bits"))?;
        let correction_iterations = correction_iterations
            .ok_or_else(|| de::Error::missing_field("correction_iterations"))?;
        FixedWidthConfig::new(input_bits, output_bits, correction_iterations)
            .map_err(de::Error::custom)
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<FixedWidthConfig, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut parts = [0usize; 3];
        for (i, part) in parts.iter_mut().enumerate() {
            *part = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        FixedWidthConfig::new(parts[0], parts[1], parts[2]).map_err(de::Error::custom)
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for FixedWidthConfig {
    /// Deserializes and validates a configuration, so that a zero width or
    /// iteration count is rejected at load time.
    ///
    /// ```
    /// use ilm::prelude::*;
    /// use ron::from_str;
    ///
    /// let config: FixedWidthConfig =
    ///     from_str("(input_bits:4,output_bits:8,correction_iterations:2)").unwrap();
    /// assert_eq!(config, FixedWidthConfig::new(4, 8, 2).unwrap());
    /// assert!(
    ///     from_str::<FixedWidthConfig>("(input_bits:0,output_bits:8,correction_iterations:2)")
    ///         .is_err()
    /// );
    /// ```
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("FixedWidthConfig", CONFIG_FIELDS, ConfigVisitor)
    }
}
