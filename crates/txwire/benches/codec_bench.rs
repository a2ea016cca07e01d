//! Performance benchmarks for transaction decoding and encoding.
//!
//! This module benchmarks the wire codec for the envelope shapes that
//! dominate real traffic:
//! - Legacy transfers
//! - Dynamic-fee transactions, with and without access lists
//! - Blob transactions

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use txwire::{
    decode_transaction, encode_transaction, AccessListEntry, Address, BlobTx, Bytes, DynamicFeeTx,
    SecretKey, Transaction, B256, U256,
};

/// A signed legacy transfer (the replay-protection EIP's worked example).
fn legacy_raw() -> Vec<u8> {
    hex::decode(
        "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83",
    )
    .unwrap()
}

/// A signed dynamic-fee transaction with a configurable access list.
fn dynamic_fee_raw(access_list_entries: usize) -> Vec<u8> {
    let key = SecretKey::new([0x46; 32]);
    let access_list = (0..access_list_entries)
        .map(|i| AccessListEntry {
            #[allow(clippy::cast_possible_truncation)]
            address: Address::from([i as u8; 20]),
            storage_keys: vec![B256::from([0x01; 32]), B256::from([0x02; 32])],
        })
        .collect();
    let tx = Transaction::DynamicFee(DynamicFeeTx {
        chain_id: 1,
        nonce: 42,
        max_priority_fee_per_gas: U256::from(1_000_000_000u64),
        max_fee_per_gas: U256::from(30_000_000_000u64),
        gas_limit: 120_000,
        to: Some(Address::from([0x12; 20])),
        value: U256::from(1_000_000_000_000_000u64),
        data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb]),
        access_list,
        signature: None,
    })
    .sign_with(&key, None)
    .unwrap();
    encode_transaction(&tx)
}

/// A signed blob transaction with two versioned hashes.
fn blob_raw() -> Vec<u8> {
    let key = SecretKey::new([0x46; 32]);
    let tx = Transaction::Blob(BlobTx {
        chain_id: 1,
        nonce: 7,
        max_priority_fee_per_gas: U256::from(1_000_000_000u64),
        max_fee_per_gas: U256::from(30_000_000_000u64),
        gas_limit: 21_000,
        to: Some(Address::from([0x12; 20])),
        value: U256::ZERO,
        data: Bytes::new(),
        access_list: vec![],
        max_fee_per_blob_gas: U256::from(1_000_000_000u64),
        blob_versioned_hashes: vec![B256::from([0x01; 32]), B256::from([0x02; 32])],
        signature: None,
    })
    .sign_with(&key, None)
    .unwrap();
    encode_transaction(&tx)
}

/// Benchmark decoding per envelope shape, reporting byte throughput.
fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, raw) in [
        ("legacy", legacy_raw()),
        ("dynamic_fee", dynamic_fee_raw(0)),
        ("dynamic_fee_access_list", dynamic_fee_raw(4)),
        ("blob", blob_raw()),
    ] {
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, raw| {
            b.iter(|| decode_transaction(black_box(raw)).unwrap());
        });
    }
    group.finish();
}

/// Benchmark encoding the decoded form back to wire bytes.
fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, raw) in [
        ("legacy", legacy_raw()),
        ("dynamic_fee_access_list", dynamic_fee_raw(4)),
        ("blob", blob_raw()),
    ] {
        let tx = decode_transaction(&raw).unwrap();
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &tx, |b, tx| {
            b.iter(|| encode_transaction(black_box(tx)));
        });
    }
    group.finish();
}

/// Benchmark the full decode -> recover -> encode pipeline a relay node
/// runs per gossiped transaction.
fn benchmark_decode_recover(c: &mut Criterion) {
    let raw = legacy_raw();
    c.bench_function("pipeline/decode_recover_encode", |b| {
        b.iter(|| {
            let tx = decode_transaction(black_box(&raw)).unwrap();
            let sender = tx.recover_sender().unwrap();
            black_box((encode_transaction(&tx), sender))
        });
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_encode,
    benchmark_decode_recover
);
criterion_main!(benches);
