use axum::body::Bytes;

/// Boundary the dictation client expects on every response
pub const RESPONSE_BOUNDARY: &str = "--Nuance_NMSP_vutc5w1XobDdefsYG3wq";

/// Field name of every result frame
pub const RESULT_FIELD: &str = "QueryResult";

/// Incremental `multipart/form-data` encoder.
///
/// Each call to [`FrameWriter::field`] yields one self-contained part that
/// can be written to the response as soon as it is produced.
#[derive(Debug)]
pub struct FrameWriter {
    boundary: String,
    wrote_part: bool,
}

impl FrameWriter {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            wrote_part: false,
        }
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode one form field.
    pub fn field(&mut self, name: &str, value: &[u8]) -> Bytes {
        let delimiter = if self.wrote_part {
            format!("\r\n--{}\r\n", self.boundary)
        } else {
            format!("--{}\r\n", self.boundary)
        };
        self.wrote_part = true;

        let header = format!(
            "{}Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            delimiter,
            escape_quotes(name)
        );

        let mut part = Vec::with_capacity(header.len() + value.len());
        part.extend_from_slice(header.as_bytes());
        part.extend_from_slice(value);
        Bytes::from(part)
    }

    /// Encode the closing delimiter.
    pub fn close(&self) -> Bytes {
        Bytes::from(format!("\r\n--{}--\r\n", self.boundary))
    }
}

fn escape_quotes(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
