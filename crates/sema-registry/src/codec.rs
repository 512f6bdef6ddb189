//! Avro codec façade.
//!
//! Wraps a compiled `apache-avro` schema together with the specification
//! text it was built from. A specification is valid iff a codec can be
//! built from it; everything downstream (the schema map, encode/decode,
//! the CLI's pre-publish validation) goes through [`AvroCodec::compile`].

use apache_avro::Schema;

use crate::error::{Error, Result};

pub use apache_avro::types::Value as AvroValue;

/// A compiled Avro schema supporting binary↔native conversion.
pub struct AvroCodec {
    schema: Schema,
    specification: String,
}

impl std::fmt::Debug for AvroCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvroCodec")
            .field("specification", &self.specification)
            .finish()
    }
}

impl AvroCodec {
    /// Compiles a specification into a codec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] when the text does not parse as an
    /// Avro schema.
    pub fn compile(specification: &str) -> Result<Self> {
        let schema = Schema::parse_str(specification).map_err(|e| Error::InvalidSpec {
            message: e.to_string(),
        })?;
        Ok(Self {
            schema,
            specification: specification.to_string(),
        })
    }

    /// Returns the specification text this codec was compiled from.
    #[must_use]
    pub fn specification(&self) -> &str {
        &self.specification
    }

    /// Returns the compiled schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Encodes a native value to Avro binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Codec`] when the value does not conform to the
    /// schema.
    pub fn encode(&self, datum: AvroValue) -> Result<Vec<u8>> {
        apache_avro::to_avro_datum(&self.schema, datum).map_err(|e| Error::codec(e.to_string()))
    }

    /// Decodes Avro binary into a native value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Codec`] when the bytes are not a datum of this
    /// schema.
    pub fn decode(&self, mut datum: &[u8]) -> Result<AvroValue> {
        apache_avro::from_avro_datum(&self.schema, &mut datum, None)
            .map_err(|e| Error::codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_SPEC: &str = r#"{
        "type": "record",
        "name": "Row",
        "fields": [
            {"name": "id", "type": "long"},
            {"name": "name", "type": "string"}
        ]
    }"#;

    fn row(id: i64, name: &str) -> AvroValue {
        AvroValue::Record(vec![
            ("id".to_string(), AvroValue::Long(id)),
            ("name".to_string(), AvroValue::String(name.to_string())),
        ])
    }

    #[test]
    fn compile_rejects_malformed_specs() {
        let err = AvroCodec::compile("{not avro").unwrap_err();
        assert!(matches!(err, Error::InvalidSpec { .. }));
    }

    #[test]
    fn compile_keeps_original_text() {
        let codec = AvroCodec::compile(RECORD_SPEC).unwrap();
        assert_eq!(codec.specification(), RECORD_SPEC);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let codec = AvroCodec::compile(RECORD_SPEC).unwrap();
        let binary = codec.encode(row(7, "x")).unwrap();
        let decoded = codec.decode(&binary).unwrap();
        assert_eq!(decoded, row(7, "x"));
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = AvroCodec::compile(RECORD_SPEC).unwrap();
        // A truncated datum: a long is present but the string is cut off.
        let err = codec.decode(&[0x0e]).unwrap_err();
        assert!(matches!(err, Error::Codec { .. }));
    }

    #[test]
    fn encode_rejects_nonconforming_values() {
        let codec = AvroCodec::compile(RECORD_SPEC).unwrap();
        let err = codec.encode(AvroValue::Boolean(true)).unwrap_err();
        assert!(matches!(err, Error::Codec { .. }));
    }
}
