//! One-way digests applied to form fields at submit time.
//!
//! Inputs are stripped of every carriage return and line feed before they are
//! hashed, so a note typed on one platform signs the same as on another.

use std::borrow::Cow;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub trait ContentHasher {
    /// Lowercase hex digest of `input` after line-break stripping.
    fn digest(&self, input: &str) -> String;
}

pub fn strip_line_breaks(input: &str) -> Cow<'_, str> {
    if input.contains(['\r', '\n']) {
        Cow::Owned(input.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(input)
    }
}

pub struct DigestHasher<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHasher<D> {
    pub fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> ContentHasher for DigestHasher<D> {
    fn digest(&self, input: &str) -> String {
        let normalized = strip_line_breaks(input);
        hex::encode(D::digest(normalized.as_bytes()))
    }
}

pub type Md5Hasher = DigestHasher<md5::Md5>;
pub type Sha256Hasher = DigestHasher<Sha256>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// What the note server verifies against today.
    #[default]
    Md5,
    Sha256,
}

impl HashAlgorithm {
    pub fn hasher(self) -> Box<dyn ContentHasher> {
        match self {
            HashAlgorithm::Md5 => Box::new(Md5Hasher::new()),
            HashAlgorithm::Sha256 => Box::new(Sha256Hasher::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}
