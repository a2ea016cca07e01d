//! Wire codec for the five transaction envelopes.
//!
//! Decoding is first-byte dispatch: a list header (`0xc0..=0xff`) is a
//! legacy transaction, `0x01` through `0x04` select the typed envelopes,
//! and anything else is [`DecodeError::UnknownEnvelope`]. For typed
//! envelopes the remainder after the type byte must be a single,
//! fully-consumed RLP list.
//!
//! Every envelope is accepted in both its signed and unsigned layout (the
//! unsigned layout is the signing preimage's field set), and re-encoding a
//! decoded transaction reproduces the input bytes exactly.

use alloy_primitives::Bytes;
use txwire_core::{DecodeError, DecodeResult, RlpResult};
use txwire_crypto::Signature;
use txwire_rlp::{
    self as rlp, item_address, item_b256, item_bytes, item_list, item_optional_address, item_u256,
    item_u64, Item,
};

use crate::types::{
    AccessListEntry, AccessListTx, Authorization, BlobTx, DynamicFeeTx, LegacyTx, SetCodeTx,
    Transaction,
};

// ============================================================================
// Decoding
// ============================================================================

/// Decode a wire transaction.
///
/// # Errors
///
/// See [`DecodeError`]; every malformed input maps to a typed kind and
/// nothing panics.
///
/// # Example
///
/// ```rust
/// use txwire_tx::{decode_transaction, Transaction};
///
/// let raw = hex::decode(
///     "01e10180018252089412121212121212121212121212121212121212128080c0800101",
/// )
/// .unwrap();
/// let tx = decode_transaction(&raw).unwrap();
/// assert!(matches!(tx, Transaction::AccessList(_)));
/// ```
pub fn decode_transaction(raw: &[u8]) -> DecodeResult<Transaction> {
    let first = *raw.first().ok_or(DecodeError::Truncated)?;
    match first {
        0xc0..=0xff => decode_legacy(raw),
        0x01 => decode_access_list(&raw[1..]),
        0x02 => decode_dynamic_fee(&raw[1..]),
        0x03 => decode_blob(&raw[1..]),
        0x04 => decode_set_code(&raw[1..]),
        type_byte => Err(DecodeError::UnknownEnvelope { type_byte }),
    }
}

/// Decode a payload into the items of its envelope list.
fn envelope_items(payload: &[u8]) -> DecodeResult<Vec<Item>> {
    let item = rlp::decode(payload)?;
    match item {
        Item::List(items) => Ok(items),
        Item::Bytes(_) => Err(DecodeError::non_canonical_rlp(
            "envelope payload is not a list",
        )),
    }
}

/// Map a field-level grammar error to its decode kind.
fn field<T>(result: RlpResult<T>, name: &'static str) -> DecodeResult<T> {
    result.map_err(|err| DecodeError::from_rlp(err, name))
}

fn decode_legacy(raw: &[u8]) -> DecodeResult<Transaction> {
    let items = envelope_items(raw)?;
    let (fields, signature) = if items.len() == 6 {
        (items.as_slice(), None)
    } else if items.len() == 9 {
        let sig = decode_legacy_signature(&items[6], &items[7], &items[8])?;
        (&items[..6], Some(sig))
    } else {
        return Err(DecodeError::WrongFieldCount {
            expected: "6 or 9",
            got: items.len(),
        });
    };
    Ok(Transaction::Legacy(LegacyTx {
        nonce: field(item_u64(&fields[0]), "nonce")?,
        gas_price: field(item_u256(&fields[1]), "gas_price")?,
        gas_limit: field(item_u64(&fields[2]), "gas_limit")?,
        to: field(item_optional_address(&fields[3]), "to")?,
        value: field(item_u256(&fields[4]), "value")?,
        data: Bytes::from(field(item_bytes(&fields[5]), "data")?),
        signature,
    }))
}

fn decode_access_list(payload: &[u8]) -> DecodeResult<Transaction> {
    let items = envelope_items(payload)?;
    let (fields, signature) = split_typed(&items, 8, "8 or 11")?;
    Ok(Transaction::AccessList(AccessListTx {
        chain_id: field(item_u64(&fields[0]), "chain_id")?,
        nonce: field(item_u64(&fields[1]), "nonce")?,
        gas_price: field(item_u256(&fields[2]), "gas_price")?,
        gas_limit: field(item_u64(&fields[3]), "gas_limit")?,
        to: field(item_optional_address(&fields[4]), "to")?,
        value: field(item_u256(&fields[5]), "value")?,
        data: Bytes::from(field(item_bytes(&fields[6]), "data")?),
        access_list: decode_access_list_field(&fields[7])?,
        signature,
    }))
}

fn decode_dynamic_fee(payload: &[u8]) -> DecodeResult<Transaction> {
    let items = envelope_items(payload)?;
    let (fields, signature) = split_typed(&items, 9, "9 or 12")?;
    Ok(Transaction::DynamicFee(DynamicFeeTx {
        chain_id: field(item_u64(&fields[0]), "chain_id")?,
        nonce: field(item_u64(&fields[1]), "nonce")?,
        max_priority_fee_per_gas: field(item_u256(&fields[2]), "max_priority_fee_per_gas")?,
        max_fee_per_gas: field(item_u256(&fields[3]), "max_fee_per_gas")?,
        gas_limit: field(item_u64(&fields[4]), "gas_limit")?,
        to: field(item_optional_address(&fields[5]), "to")?,
        value: field(item_u256(&fields[6]), "value")?,
        data: Bytes::from(field(item_bytes(&fields[7]), "data")?),
        access_list: decode_access_list_field(&fields[8])?,
        signature,
    }))
}

fn decode_blob(payload: &[u8]) -> DecodeResult<Transaction> {
    let items = envelope_items(payload)?;
    let (fields, signature) = split_typed(&items, 11, "11 or 14")?;
    Ok(Transaction::Blob(BlobTx {
        chain_id: field(item_u64(&fields[0]), "chain_id")?,
        nonce: field(item_u64(&fields[1]), "nonce")?,
        max_priority_fee_per_gas: field(item_u256(&fields[2]), "max_priority_fee_per_gas")?,
        max_fee_per_gas: field(item_u256(&fields[3]), "max_fee_per_gas")?,
        gas_limit: field(item_u64(&fields[4]), "gas_limit")?,
        to: field(item_optional_address(&fields[5]), "to")?,
        value: field(item_u256(&fields[6]), "value")?,
        data: Bytes::from(field(item_bytes(&fields[7]), "data")?),
        access_list: decode_access_list_field(&fields[8])?,
        max_fee_per_blob_gas: field(item_u256(&fields[9]), "max_fee_per_blob_gas")?,
        blob_versioned_hashes: decode_versioned_hashes(&fields[10])?,
        signature,
    }))
}

fn decode_set_code(payload: &[u8]) -> DecodeResult<Transaction> {
    let items = envelope_items(payload)?;
    let (fields, signature) = split_typed(&items, 10, "10 or 13")?;
    Ok(Transaction::SetCode(SetCodeTx {
        chain_id: field(item_u64(&fields[0]), "chain_id")?,
        nonce: field(item_u64(&fields[1]), "nonce")?,
        max_priority_fee_per_gas: field(item_u256(&fields[2]), "max_priority_fee_per_gas")?,
        max_fee_per_gas: field(item_u256(&fields[3]), "max_fee_per_gas")?,
        gas_limit: field(item_u64(&fields[4]), "gas_limit")?,
        to: field(item_optional_address(&fields[5]), "to")?,
        value: field(item_u256(&fields[6]), "value")?,
        data: Bytes::from(field(item_bytes(&fields[7]), "data")?),
        access_list: decode_access_list_field(&fields[8])?,
        authorization_list: decode_authorization_list(&fields[9])?,
        signature,
    }))
}

/// Split a typed envelope's items into unsigned fields and an optional
/// signature, accepting exactly `unsigned` or `unsigned + 3` items.
fn split_typed<'a>(
    items: &'a [Item],
    unsigned: usize,
    expected: &'static str,
) -> DecodeResult<(&'a [Item], Option<Signature>)> {
    if items.len() == unsigned {
        Ok((items, None))
    } else if items.len() == unsigned + 3 {
        let sig = decode_typed_signature(
            &items[unsigned],
            &items[unsigned + 1],
            &items[unsigned + 2],
        )?;
        Ok((&items[..unsigned], Some(sig)))
    } else {
        Err(DecodeError::WrongFieldCount {
            expected,
            got: items.len(),
        })
    }
}

/// Legacy `(v, r, s)`: `v` is `{27, 28}` or at least 35.
fn decode_legacy_signature(v: &Item, r: &Item, s: &Item) -> DecodeResult<Signature> {
    let v = field(item_u64(v), "v")?;
    if v != 27 && v != 28 && v < 35 {
        return Err(DecodeError::malformed_signature(format!(
            "legacy v {v} matches no encoding"
        )));
    }
    finish_signature(Signature::new(v, field(item_u256(r), "r")?, field(item_u256(s), "s")?))
}

/// Typed `(y_parity, r, s)`: the parity must be literally 0 or 1. A bare
/// `v` value in the parity slot is rejected, never reduced mod 2.
fn decode_typed_signature(parity: &Item, r: &Item, s: &Item) -> DecodeResult<Signature> {
    let parity = field(item_u64(parity), "y_parity")?;
    if parity > 1 {
        return Err(DecodeError::malformed_signature(format!(
            "y_parity must be 0 or 1, got {parity}"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let parity = parity as u8;
    finish_signature(Signature::from_parity(
        parity,
        field(item_u256(r), "r")?,
        field(item_u256(s), "s")?,
    ))
}

/// Range-check the scalars of a decoded signature.
fn finish_signature(signature: Signature) -> DecodeResult<Signature> {
    if signature.is_valid() {
        Ok(signature)
    } else {
        Err(DecodeError::malformed_signature(
            "signature scalar out of range",
        ))
    }
}

/// Decode the `access_list` field: a list of `(address, [storage_key])`
/// pairs.
fn decode_access_list_field(item: &Item) -> DecodeResult<Vec<AccessListEntry>> {
    fn invalid(context: impl Into<String>) -> DecodeError {
        DecodeError::invalid_access_list(context)
    }

    let entries = item
        .as_list()
        .map_err(|_| invalid("access list is not a list"))?;
    entries
        .iter()
        .map(|entry| {
            let pair = entry.as_list().map_err(|_| invalid("entry is not a list"))?;
            let [address, keys] = pair else {
                return Err(invalid(format!(
                    "entry has {} items, expected 2",
                    pair.len()
                )));
            };
            let address = item_address(address).map_err(|e| invalid(format!("address: {e}")))?;
            let storage_keys = item_list(keys)
                .map_err(|_| invalid("storage keys are not a list"))?
                .iter()
                .map(|key| item_b256(key).map_err(|e| invalid(format!("storage key: {e}"))))
                .collect::<DecodeResult<Vec<_>>>()?;
            Ok(AccessListEntry {
                address,
                storage_keys,
            })
        })
        .collect()
}

/// Decode the versioned blob hashes: a list of 32-byte values.
fn decode_versioned_hashes(item: &Item) -> DecodeResult<Vec<alloy_primitives::B256>> {
    item.as_list()
        .map_err(|_| DecodeError::non_canonical_rlp("blob_versioned_hashes is not a list"))?
        .iter()
        .map(|hash| field(item_b256(hash), "blob_versioned_hash"))
        .collect()
}

/// Decode the `authorization_list` field of a set-code transaction.
fn decode_authorization_list(item: &Item) -> DecodeResult<Vec<Authorization>> {
    fn invalid(context: impl Into<String>) -> DecodeError {
        DecodeError::invalid_authorization(context)
    }

    item.as_list()
        .map_err(|_| invalid("authorization list is not a list"))?
        .iter()
        .map(|tuple| {
            let parts = tuple
                .as_list()
                .map_err(|_| invalid("authorization is not a list"))?;
            let [chain_id, address, nonce, y_parity, r, s] = parts else {
                return Err(invalid(format!(
                    "authorization has {} items, expected 6",
                    parts.len()
                )));
            };

            let chain_id = item_u64(chain_id).map_err(|e| invalid(format!("chain_id: {e}")))?;
            let address = item_address(address).map_err(|e| invalid(format!("address: {e}")))?;

            // The nonce is a zero-or-one element list: empty means absent,
            // which is distinct from a nonce of zero.
            let nonce = match nonce
                .as_list()
                .map_err(|_| invalid("nonce must be a list of 0 or 1 items"))?
            {
                [] => None,
                [value] => Some(item_u64(value).map_err(|e| invalid(format!("nonce: {e}")))?),
                more => {
                    return Err(invalid(format!(
                        "nonce list has {} items, expected 0 or 1",
                        more.len()
                    )))
                }
            };

            let y_parity = item_u64(y_parity).map_err(|e| invalid(format!("y_parity: {e}")))?;
            if y_parity > 1 {
                return Err(invalid(format!("y_parity must be 0 or 1, got {y_parity}")));
            }
            let r = item_u256(r).map_err(|e| invalid(format!("r: {e}")))?;
            let s = item_u256(s).map_err(|e| invalid(format!("s: {e}")))?;
            if !Signature::from_parity(0, r, s).is_valid() {
                return Err(invalid("signature scalar out of range"));
            }

            #[allow(clippy::cast_possible_truncation)]
            let y_parity = y_parity as u8;
            Ok(Authorization {
                chain_id,
                address,
                nonce,
                y_parity,
                r,
                s,
            })
        })
        .collect()
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a transaction to the bytes a canonical node would broadcast.
///
/// Unsigned transactions encode their unsigned layout; signed ones append
/// the signature fields. [`decode_transaction`] inverts this exactly.
#[must_use]
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    match tx.type_byte() {
        None => rlp::encode(&Item::list(envelope_fields(tx))),
        Some(type_byte) => {
            let mut out = vec![type_byte];
            rlp::encode_into(&Item::list(envelope_fields(tx)), &mut out);
            out
        }
    }
}

/// All items of the envelope list: the unsigned fields, plus the signature
/// fields when present.
fn envelope_fields(tx: &Transaction) -> Vec<Item> {
    let mut items = unsigned_fields(tx);
    if let Some(sig) = tx.signature() {
        items.push(Item::from_u64(sig.v));
        items.push(Item::from_u256(&sig.r));
        items.push(Item::from_u256(&sig.s));
    }
    items
}

/// The unsigned field items of an envelope, in wire order. This is also
/// the field set the signing preimage covers.
pub(crate) fn unsigned_fields(tx: &Transaction) -> Vec<Item> {
    match tx {
        Transaction::Legacy(t) => vec![
            Item::from_u64(t.nonce),
            Item::from_u256(&t.gas_price),
            Item::from_u64(t.gas_limit),
            Item::from_optional_address(t.to.as_ref()),
            Item::from_u256(&t.value),
            Item::bytes(t.data.to_vec()),
        ],
        Transaction::AccessList(t) => vec![
            Item::from_u64(t.chain_id),
            Item::from_u64(t.nonce),
            Item::from_u256(&t.gas_price),
            Item::from_u64(t.gas_limit),
            Item::from_optional_address(t.to.as_ref()),
            Item::from_u256(&t.value),
            Item::bytes(t.data.to_vec()),
            access_list_item(&t.access_list),
        ],
        Transaction::DynamicFee(t) => vec![
            Item::from_u64(t.chain_id),
            Item::from_u64(t.nonce),
            Item::from_u256(&t.max_priority_fee_per_gas),
            Item::from_u256(&t.max_fee_per_gas),
            Item::from_u64(t.gas_limit),
            Item::from_optional_address(t.to.as_ref()),
            Item::from_u256(&t.value),
            Item::bytes(t.data.to_vec()),
            access_list_item(&t.access_list),
        ],
        Transaction::Blob(t) => vec![
            Item::from_u64(t.chain_id),
            Item::from_u64(t.nonce),
            Item::from_u256(&t.max_priority_fee_per_gas),
            Item::from_u256(&t.max_fee_per_gas),
            Item::from_u64(t.gas_limit),
            Item::from_optional_address(t.to.as_ref()),
            Item::from_u256(&t.value),
            Item::bytes(t.data.to_vec()),
            access_list_item(&t.access_list),
            Item::from_u256(&t.max_fee_per_blob_gas),
            Item::list(t.blob_versioned_hashes.iter().map(Item::from_b256).collect()),
        ],
        Transaction::SetCode(t) => vec![
            Item::from_u64(t.chain_id),
            Item::from_u64(t.nonce),
            Item::from_u256(&t.max_priority_fee_per_gas),
            Item::from_u256(&t.max_fee_per_gas),
            Item::from_u64(t.gas_limit),
            Item::from_optional_address(t.to.as_ref()),
            Item::from_u256(&t.value),
            Item::bytes(t.data.to_vec()),
            access_list_item(&t.access_list),
            Item::list(t.authorization_list.iter().map(authorization_item).collect()),
        ],
    }
}

fn access_list_item(entries: &[AccessListEntry]) -> Item {
    Item::list(
        entries
            .iter()
            .map(|entry| {
                Item::list(vec![
                    Item::from_address(&entry.address),
                    Item::list(entry.storage_keys.iter().map(Item::from_b256).collect()),
                ])
            })
            .collect(),
    )
}

fn authorization_item(auth: &Authorization) -> Item {
    Item::list(vec![
        Item::from_u64(auth.chain_id),
        Item::from_address(&auth.address),
        match auth.nonce {
            None => Item::empty_list(),
            Some(nonce) => Item::list(vec![Item::from_u64(nonce)]),
        },
        Item::from_u64(u64::from(auth.y_parity)),
        Item::from_u256(&auth.r),
        Item::from_u256(&auth.s),
    ])
}

// ============================================================================
// Tests
// ============================================================================
