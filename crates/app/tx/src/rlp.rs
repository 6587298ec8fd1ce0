//! RLP helpers shared by the transaction codecs.
//!
//! Encoding goes through `alloy_rlp`. Decoding walks headers by hand so that
//! numeric fields with leading zero bytes are normalised instead of rejected.

use alloy_primitives::{Address, U256};
use alloy_rlp::{Encodable, Header};
use klay_primitives::{trim_leading_zeros, SignatureData};

use crate::error::{TxError, TxResult};

/// RLP list of heterogeneous items.
pub fn encode_list(items: &[&dyn Encodable]) -> Vec<u8> {
    let payload_length: usize = items.iter().map(|item| item.length()).sum();
    let mut out = Vec::with_capacity(payload_length + alloy_rlp::length_of_length(payload_length));
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for item in items {
        item.encode(&mut out);
    }
    out
}

/// Signature list as emitted on the wire: an empty list becomes `[EMPTY]`.
pub fn wire_signatures(signatures: &[SignatureData]) -> Vec<SignatureData> {
    if signatures.is_empty() {
        vec![SignatureData::EMPTY]
    } else {
        signatures.to_vec()
    }
}

/// Cursor over the items of one RLP list.
pub struct ListDecoder<'a> {
    payload: &'a [u8],
}

impl<'a> ListDecoder<'a> {
    /// Opens the list at the front of `buf`, advancing `buf` past it.
    pub fn open(buf: &mut &'a [u8]) -> TxResult<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        let payload = take(buf, header.payload_length)?;
        Ok(Self { payload })
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Fails if items remain.
    pub fn finish(self) -> TxResult<()> {
        if self.payload.is_empty() {
            Ok(())
        } else {
            Err(TxError::TrailingBytes(self.payload.len()))
        }
    }

    pub fn list(&mut self) -> TxResult<ListDecoder<'a>> {
        ListDecoder::open(&mut self.payload)
    }

    /// Raw contents of the next byte string.
    pub fn bytes(&mut self) -> TxResult<&'a [u8]> {
        let header = Header::decode(&mut self.payload)?;
        if header.list {
            return Err(alloy_rlp::Error::UnexpectedList.into());
        }
        take(&mut self.payload, header.payload_length)
    }

    /// Next byte string as an integer, ignoring leading zero bytes.
    pub fn u64(&mut self, field: &'static str) -> TxResult<u64> {
        let bytes = trim_leading_zeros(self.bytes()?);
        if bytes.len() > 8 {
            return Err(TxError::InvalidField {
                field,
                reason: format!("{} bytes overflow u64", bytes.len()),
            });
        }
        let mut buf = [0u8; 8];
        buf[8 - bytes.len()..].copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }

    /// Next byte string as a 256-bit integer, ignoring leading zero bytes.
    pub fn u256(&mut self, field: &'static str) -> TxResult<U256> {
        let bytes = trim_leading_zeros(self.bytes()?);
        if bytes.len() > 32 {
            return Err(TxError::InvalidField {
                field,
                reason: format!("{} bytes overflow u256", bytes.len()),
            });
        }
        Ok(U256::from_be_slice(bytes))
    }

    pub fn address(&mut self, field: &'static str) -> TxResult<Address> {
        self.optional_address(field)?
            .ok_or(TxError::MissingField(field))
    }

    /// An empty string decodes to `None`.
    pub fn optional_address(&mut self, field: &'static str) -> TxResult<Option<Address>> {
        match self.bytes()? {
            [] => Ok(None),
            bytes if bytes.len() == 20 => Ok(Some(Address::from_slice(bytes))),
            bytes => Err(TxError::InvalidField {
                field,
                reason: format!("expected 20 bytes, got {}", bytes.len()),
            }),
        }
    }

    /// Signature list; empty placeholder signatures are dropped.
    pub fn signatures(&mut self, field: &'static str) -> TxResult<Vec<SignatureData>> {
        let mut list = self.list()?;
        let mut signatures = Vec::new();
        while !list.is_empty() {
            let mut triple = list.list()?;
            let v = triple.bytes()?;
            let r = triple.bytes()?;
            let s = triple.bytes()?;
            triple.finish()?;
            let signature = SignatureData::from_be_components(v, r, s).map_err(|e| {
                TxError::InvalidField {
                    field,
                    reason: e.to_string(),
                }
            })?;
            if !signature.is_empty() {
                signatures.push(signature);
            }
        }
        Ok(signatures)
    }
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> TxResult<&'a [u8]> {
    if buf.len() < len {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (head, tail) = buf.split_at(len);
    *buf = tail;
    Ok(head)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;

    #[test]
    fn test_encode_list_matches_alloy() {
        let a = 7u64;
        let b = Bytes::from_static(b"dog");
        let encoded = encode_list(&[&a, &b]);
        // [7, "dog"]
        assert_eq!(encoded, vec![0xc5, 0x07, 0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn test_padded_integers_are_normalised() {
        // [0x0001, 0x00]
        let raw = [0xc4, 0x82, 0x00, 0x01, 0x00];
        let mut buf = &raw[..];
        let mut list = ListDecoder::open(&mut buf).unwrap();
        assert_eq!(list.u64("a").unwrap(), 1);
        assert_eq!(list.u256("b").unwrap(), U256::ZERO);
        list.finish().unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_single_byte_string() {
        let raw = [0xc1, 0x49];
        let mut buf = &raw[..];
        let mut list = ListDecoder::open(&mut buf).unwrap();
        assert_eq!(list.u64("tag").unwrap(), 0x49);
    }

    #[test]
    fn test_empty_signatures_are_dropped() {
        // [[[0x01, "", ""]]]
        let wrapped = encode_list(&[&vec![SignatureData::EMPTY]]);
        let mut buf = wrapped.as_slice();
        let mut outer = ListDecoder::open(&mut buf).unwrap();
        assert!(outer.signatures("signatures").unwrap().is_empty());
        outer.finish().unwrap();
    }

    #[test]
    fn test_truncated_input_fails() {
        let raw = [0xc5, 0x07];
        let mut buf = &raw[..];
        assert!(ListDecoder::open(&mut buf).is_err());
    }
}
