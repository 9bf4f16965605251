// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wire codec for the "create photo record" instruction.
//!
//! ```text
//! discriminator (8)
//! hash (32)
//! storage_uri_len (u32 LE) | storage_uri (UTF-8)
//! location_len    (u32 LE) | location    (UTF-8)
//! [timestamp_len  (u32 LE) | timestamp   (UTF-8)]
//! ```

pub mod discriminator;
pub mod encode;
pub mod decode;

pub use discriminator::{compute_discriminator, CREATE_PHOTO_DISCRIMINATOR};
pub use encode::encode_create_photo;
pub use decode::{
    decode_create_photo, DecodeOutcome, DecoderChain, InstructionDecoder, PositionalDecoder,
    SchemaDecoder,
};
