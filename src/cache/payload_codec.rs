//! Codec del payload cacheado
//!
//! El payload crudo de Eligible se guarda comprimido como stream zlib,
//! el mismo formato que escribía el backend anterior en `cached_plan`.

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

use crate::utils::errors::{AppError, AppResult};

/// Comprimir el payload para guardarlo en la base de datos
pub fn compress(raw: &[u8]) -> AppResult<Vec<u8>> {
    encode_into(Vec::with_capacity(raw.len() / 4 + 16), raw)
}

fn encode_into<W: Write>(sink: W, raw: &[u8]) -> AppResult<W> {
    let mut encoder = ZlibEncoder::new(sink, Compression::default());
    encoder.write_all(raw).map_err(encoding_error)?;
    encoder.finish().map_err(encoding_error)
}

fn encoding_error(e: std::io::Error) -> AppError {
    AppError::CacheEncoding(e.to_string())
}

/// Descomprimir un payload leído de la base de datos.
///
/// Un stream truncado o escrito por otro codec devuelve `CorruptCache`;
/// solo se acepta el payload si el stream zlib termina correctamente.
pub fn decompress(blob: &[u8]) -> AppResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut raw: Vec<u8> = Vec::with_capacity(blob.len().saturating_mul(4));

    loop {
        if raw.len() == raw.capacity() {
            raw.reserve(raw.capacity().max(1024));
        }

        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&blob[consumed..], &mut raw, FlushDecompress::Finish)
            .map_err(|e| AppError::CorruptCache(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(raw),
            Status::Ok | Status::BufError => {
                let input_exhausted = inflater.total_in() as usize == blob.len();
                if input_exhausted && raw.len() < raw.capacity() {
                    return Err(AppError::CorruptCache("truncated zlib stream".to_string()));
                }
            }
        }
    }
}
