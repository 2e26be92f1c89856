//! User-selected file models and data-URI decoding.

use std::{fmt, future::Future, pin::Pin, rc::Rc};

use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Clone, PartialEq, Eq)]
/// One file handed over by the platform file picker.
///
/// The declared MIME type is taken from the picker as-is; content is never sniffed.
pub struct CandidateFile {
    /// File name as reported by the picker.
    pub name: String,
    /// Declared MIME type (for example `image/png`).
    pub mime_type: String,
    /// Raw file contents, shared between the accepted set and in-flight uploads.
    pub bytes: Rc<[u8]>,
}

impl CandidateFile {
    /// Creates a candidate file from owned bytes.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: Rc::from(bytes),
        }
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Encodes `bytes` as a base64 `data:` URI, the same form `FileReader.readAsDataURL` produces.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Object-safe boxed future used by [`ImageDecoder`].
pub type ImageDecodeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service decoding a selected file into a self-contained displayable URI.
pub trait ImageDecoder {
    /// Decodes one file. Independent calls may complete in any order.
    fn decode<'a>(
        &'a self,
        file: &'a CandidateFile,
    ) -> ImageDecodeFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Decoder producing base64 data URIs from the file bytes.
pub struct DataUrlImageDecoder;

impl ImageDecoder for DataUrlImageDecoder {
    fn decode<'a>(
        &'a self,
        file: &'a CandidateFile,
    ) -> ImageDecodeFuture<'a, Result<String, String>> {
        Box::pin(async move { Ok(encode_data_url(&file.mime_type, &file.bytes)) })
    }
}
