//! Link tokens: compact, URL-safe encodings of level text for sharing.
//!
//! A token is the format version tag followed by the URL-safe, unpadded
//! base64 encoding of the Brotli-compressed UTF-8 level text:
//!
//! ```text
//! token := "1" base64url(brotli(text))
//! ```
//!
//! Compression parameters only affect the token size. Any token produced by
//! any [`LinkCodec`] decodes with every other.

use std::io::Write;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use brotli::{BrotliDecompressStream, BrotliResult, BrotliState, HeapAlloc, HuffmanCode};
use log::{debug, trace};
use thiserror::Error;

/// Version tag at the start of every token this codec writes.
pub const FORMAT_VERSION: char = '1';

/// Upper bound on decompressed level text, in bytes.
pub const MAX_DECOMPRESSED_LEN: usize = 1024 * 1024;

const BUFFER_SIZE: usize = 4096;

/// Reasons a link token cannot be turned back into level text.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported link format version `{0}`")]
    UnsupportedVersion(char),

    #[error("link token is empty or truncated")]
    Truncated,

    #[error("link token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("link token holds corrupted compressed data")]
    Corrupted,

    #[error("link token has {0} byte(s) after the end of the compressed level")]
    TrailingData(usize),

    #[error("decompressed level exceeds {MAX_DECOMPRESSED_LEN} bytes")]
    TooLarge,

    #[error("decompressed level is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Brotli settings used when writing tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCodec {
    quality: u32,
    window: u32,
}

impl LinkCodec {
    pub const MAX_QUALITY: u32 = 11;
    pub const MIN_WINDOW: u32 = 10;
    pub const MAX_WINDOW: u32 = 24;

    /// Creates a codec, clamping `quality` to `0..=11` and `window` (log2 of
    /// the window size) to `10..=24`.
    pub fn new(quality: u32, window: u32) -> Self {
        Self {
            quality: quality.min(Self::MAX_QUALITY),
            window: window.clamp(Self::MIN_WINDOW, Self::MAX_WINDOW),
        }
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// Encodes level text as a link token.
    pub fn compress(&self, text: &str) -> String {
        let mut compressed = Vec::new();
        {
            let mut writer =
                brotli::CompressorWriter::new(&mut compressed, BUFFER_SIZE, self.quality, self.window);
            writer
                .write_all(text.as_bytes())
                .expect("writing to an in-memory buffer cannot fail");
        }

        let mut token = String::with_capacity(1 + compressed.len() * 4 / 3 + 4);
        token.push(FORMAT_VERSION);
        URL_SAFE_NO_PAD.encode_string(&compressed, &mut token);

        debug!(
            text_len = text.len(),
            token_len = token.len(),
            quality = self.quality;
            "Level compressed"
        );
        token
    }

    /// Decodes a link token back into level text.
    ///
    /// # Errors
    ///
    /// Fails with a [`CodecError`] for an unknown version tag, an empty
    /// payload, invalid base64, corrupted or truncated Brotli data, bytes
    /// after the end of the Brotli stream, text larger than [`MAX_DECOMPRESSED_LEN`] or text that is not UTF-8.
    pub fn decompress(&self, token: &str) -> Result<String, CodecError> {
        let token = token.trim();
        let mut chars = token.chars();
        let version = chars.next().ok_or(CodecError::Truncated)?;
        if version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let payload = chars.as_str();
        if payload.is_empty() {
            return Err(CodecError::Truncated);
        }
        let compressed = URL_SAFE_NO_PAD.decode(payload)?;
        trace!(compressed_len = compressed.len(); "Link payload decoded");

        let bytes = inflate(&compressed)?;
        let text = String::from_utf8(bytes)?;
        debug!(text_len = text.len(); "Level decompressed");
        Ok(text)
    }
}

/// Runs the Brotli decoder over the whole payload.
///
/// The stream must end exactly at the end of `compressed`.
fn inflate(compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut state = BrotliState::new(
        HeapAlloc::<u8>::default(),
        HeapAlloc::<u32>::default(),
        HeapAlloc::<HuffmanCode>::default(),
    );
    let mut available_in = compressed.len();
    let mut input_offset = 0;
    let mut total_out = 0;
    let mut chunk = [0u8; BUFFER_SIZE];
    let mut bytes = Vec::new();

    loop {
        let mut available_out = chunk.len();
        let mut output_offset = 0;
        let result = BrotliDecompressStream(
            &mut available_in,
            &mut input_offset,
            compressed,
            &mut available_out,
            &mut output_offset,
            &mut chunk,
            &mut total_out,
            &mut state,
        );

        bytes.extend_from_slice(&chunk[..output_offset]);
        if bytes.len() > MAX_DECOMPRESSED_LEN {
            return Err(CodecError::TooLarge);
        }

        match result {
            BrotliResult::NeedsMoreOutput => {}
            BrotliResult::ResultSuccess if available_in == 0 => return Ok(bytes),
            BrotliResult::ResultSuccess => return Err(CodecError::TrailingData(available_in)),
            BrotliResult::NeedsMoreInput => return Err(CodecError::Truncated),
            BrotliResult::ResultFailure => return Err(CodecError::Corrupted),
        }
    }
}

impl Default for LinkCodec {
    fn default() -> Self {
        Self::new(Self::MAX_QUALITY, 22)
    }
}

/// Encodes level text with the default codec.
pub fn compress(text: &str) -> String {
    LinkCodec::default().compress(text)
}

/// Decodes a link token with the default codec.
///
/// # Errors
///
/// See [`LinkCodec::decompress`].
pub fn decompress(token: &str) -> Result<String, CodecError> {
    LinkCodec::default().decompress(token)
}
