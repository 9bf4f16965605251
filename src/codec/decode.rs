// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Instruction decoding.
//!
//! Decoding never fails: a payload either yields the photo arguments or is
//! skipped. Skips cover foreign instructions (wrong discriminator) as well as
//! truncated or otherwise malformed payloads.
//!
//! Strategies are tried in order. The schema decoder is strict and knows the
//! argument layouts the program has shipped; the positional decoder is the
//! lenient fallback for payloads that drift from those layouts.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::discriminator::has_discriminator;
use crate::config::{DISCRIMINATOR_LEN, HASH_LEN};
use crate::types::{Hash32, PhotoArgs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Decoded(PhotoArgs),
    Skip,
}

impl DecodeOutcome {
    pub fn into_option(self) -> Option<PhotoArgs> {
        match self {
            DecodeOutcome::Decoded(args) => Some(args),
            DecodeOutcome::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, DecodeOutcome::Skip)
    }
}

/// One way of turning raw instruction data into photo arguments.
pub trait InstructionDecoder: Send + Sync {
    fn name(&self) -> &'static str;
    fn decode(&self, data: &[u8]) -> DecodeOutcome;
}

fn read_u32(buf: &[u8], offset: &mut usize) -> Option<u32> {
    let bytes = read_bytes(buf, offset, 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

fn read_bytes<'a>(buf: &'a [u8], offset: &mut usize, len: usize) -> Option<&'a [u8]> {
    let end = offset.checked_add(len)?;
    if end > buf.len() {
        return None;
    }
    let out = &buf[*offset..end];
    *offset = end;
    Some(out)
}

fn read_prefixed<'a>(buf: &'a [u8], offset: &mut usize) -> Option<&'a [u8]> {
    let len = read_u32(buf, offset)? as usize;
    read_bytes(buf, offset, len)
}

fn read_hash(buf: &[u8], offset: &mut usize) -> Option<Hash32> {
    let bytes = read_bytes(buf, offset, HASH_LEN)?;
    Hash32::from_slice(bytes).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Hash32,
    Str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hash,
    StorageUri,
    Location,
    Timestamp,
}

/// A declared argument layout, in wire order.
#[derive(Debug, Clone, Copy)]
pub struct ArgSchema {
    pub name: &'static str,
    pub fields: &'static [(Field, FieldKind)],
}

pub const CREATE_PHOTO_WITH_TIMESTAMP: ArgSchema = ArgSchema {
    name: "create_photo_data",
    fields: &[
        (Field::Hash, FieldKind::Hash32),
        (Field::StorageUri, FieldKind::Str),
        (Field::Location, FieldKind::Str),
        (Field::Timestamp, FieldKind::Str),
    ],
};

pub const CREATE_PHOTO_LEGACY: ArgSchema = ArgSchema {
    name: "create_photo_data_v1",
    fields: &[
        (Field::Hash, FieldKind::Hash32),
        (Field::StorageUri, FieldKind::Str),
        (Field::Location, FieldKind::Str),
    ],
};

/// Layouts the program has shipped, newest first.
pub const CREATE_PHOTO_SCHEMAS: &[ArgSchema] = &[CREATE_PHOTO_WITH_TIMESTAMP, CREATE_PHOTO_LEGACY];

/// Walks a declared schema. Strings must be valid UTF-8 and the payload must
/// be consumed exactly.
pub struct SchemaDecoder {
    schemas: &'static [ArgSchema],
}

impl SchemaDecoder {
    pub const fn new(schemas: &'static [ArgSchema]) -> Self {
        Self { schemas }
    }

    pub const fn create_photo() -> Self {
        Self::new(CREATE_PHOTO_SCHEMAS)
    }

    fn decode_schema(schema: &ArgSchema, data: &[u8]) -> Option<PhotoArgs> {
        let mut offset = DISCRIMINATOR_LEN;
        let mut hash = None;
        let mut storage_uri = None;
        let mut location = None;
        let mut timestamp = None;

        for (field, kind) in schema.fields {
            match kind {
                FieldKind::Hash32 => {
                    let h = read_hash(data, &mut offset)?;
                    if *field == Field::Hash {
                        hash = Some(h);
                    }
                }
                FieldKind::Str => {
                    let raw = read_prefixed(data, &mut offset)?;
                    let s = core::str::from_utf8(raw).ok()?.to_owned();
                    match field {
                        Field::StorageUri => storage_uri = Some(s),
                        Field::Location => location = Some(s),
                        Field::Timestamp => timestamp = Some(s),
                        Field::Hash => return None,
                    }
                }
            }
        }

        if offset != data.len() {
            return None;
        }

        Some(PhotoArgs {
            hash: hash?,
            storage_uri: storage_uri?,
            location: location?,
            timestamp,
        })
    }
}

impl InstructionDecoder for SchemaDecoder {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn decode(&self, data: &[u8]) -> DecodeOutcome {
        if !has_discriminator(data) {
            return DecodeOutcome::Skip;
        }
        self.schemas
            .iter()
            .find_map(|schema| Self::decode_schema(schema, data))
            .map(DecodeOutcome::Decoded)
            .unwrap_or(DecodeOutcome::Skip)
    }
}

/// Reads fields by position. The timestamp is optional, trailing bytes are
/// ignored and invalid UTF-8 is replaced rather than rejected. Every length
/// prefix is still bounds-checked.
pub struct PositionalDecoder;

impl PositionalDecoder {
    fn decode_fields(data: &[u8]) -> Option<PhotoArgs> {
        let mut offset = DISCRIMINATOR_LEN;
        let hash = read_hash(data, &mut offset)?;
        let storage_uri = lossy(read_prefixed(data, &mut offset)?);
        let location = lossy(read_prefixed(data, &mut offset)?);

        let timestamp = if offset == data.len() {
            None
        } else {
            Some(lossy(read_prefixed(data, &mut offset)?))
        };

        Some(PhotoArgs { hash, storage_uri, location, timestamp })
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl InstructionDecoder for PositionalDecoder {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn decode(&self, data: &[u8]) -> DecodeOutcome {
        if !has_discriminator(data) {
            return DecodeOutcome::Skip;
        }
        Self::decode_fields(data)
            .map(DecodeOutcome::Decoded)
            .unwrap_or(DecodeOutcome::Skip)
    }
}

static SCHEMA: SchemaDecoder = SchemaDecoder::create_photo();
static POSITIONAL: PositionalDecoder = PositionalDecoder;
static DEFAULT_STRATEGIES: [&dyn InstructionDecoder; 2] = [&SCHEMA, &POSITIONAL];

/// Decodes with the default strategy order: schema, then positional.
pub fn decode_create_photo(data: &[u8]) -> DecodeOutcome {
    DEFAULT_STRATEGIES
        .iter()
        .find_map(|d| d.decode(data).into_option())
        .map(DecodeOutcome::Decoded)
        .unwrap_or(DecodeOutcome::Skip)
}

/// An ordered, configurable list of decoder strategies.
pub struct DecoderChain {
    strategies: Vec<Box<dyn InstructionDecoder>>,
}

impl DecoderChain {
    pub fn new(strategies: Vec<Box<dyn InstructionDecoder>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns the first successful decode and the name of the strategy that produced it.
    pub fn decode_named(&self, data: &[u8]) -> Option<(&'static str, PhotoArgs)> {
        self.strategies
            .iter()
            .find_map(|s| s.decode(data).into_option().map(|args| (s.name(), args)))
    }

    pub fn decode(&self, data: &[u8]) -> DecodeOutcome {
        self.decode_named(data)
            .map(|(_, args)| DecodeOutcome::Decoded(args))
            .unwrap_or(DecodeOutcome::Skip)
    }
}

impl Default for DecoderChain {
    fn default() -> Self {
        Self::new(alloc::vec![
            Box::new(SchemaDecoder::create_photo()) as Box<dyn InstructionDecoder>,
            Box::new(PositionalDecoder),
        ])
    }
}
