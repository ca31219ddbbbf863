//! # Resolver Benchmarks
//!
//! | Path | Work |
//! |------|------|
//! | `signature_hash` | keccak over the packed preimage |
//! | `recover_signer` | secp256k1 public key recovery |
//! | `resolve_with_proof` | decode, verify and signer lookup through a proxy |
//! | `namehash` | label hashing for typical names |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ens_01_dns_codec::namehash;
use ens_02_signature_verification::{recover_signer, signature_hash, TestSigner};
use ens_03_offchain_resolver::{
    BlockContext, Deployment, Host, InitParams, OffchainResolver, ResolverCall,
};
use shared_types::abi::{encode_addr_call, encode_addr_result, encode_resolve_call};
use shared_types::{keccak256, Address};
use std::sync::Arc;
use std::time::Duration;

const DEPLOYER: Address = Address::from_low_u64(0xd0);
const OWNER: Address = Address::from_low_u64(1);

fn bench_signature_scheme(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature-scheme");
    group.measurement_time(Duration::from_secs(5));

    let target = Address::from_low_u64(0xabc);
    for size in [32usize, 256, 4096] {
        let request = vec![0x11; size];
        let result = vec![0x22; size];
        group.throughput(Throughput::Bytes((2 * size) as u64));
        group.bench_with_input(
            BenchmarkId::new("signature_hash", size),
            &(request, result),
            |b, (request, result)| {
                b.iter(|| black_box(signature_hash(target, 1_000, request, result)))
            },
        );
    }

    let signer = TestSigner::from_seed(1);
    let digest = keccak256(b"benchmark digest");
    let signature = signer.sign_digest(&digest);
    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(recover_signer(&digest, &signature)))
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    let signer = TestSigner::from_seed(1);
    let mut host = Host::new(BlockContext {
        number: 1,
        timestamp: 1_700_000_000,
    });
    let implementation = host
        .deploy_code(DEPLOYER, Arc::new(OffchainResolver::new()), Deployment::Implementation)
        .unwrap();

    for signers in [1usize, 100] {
        let mut trusted: Vec<Address> = (0..signers as u64 - 1)
            .map(|i| Address::from_low_u64(0x1000 + i))
            .collect();
        trusted.push(signer.address());

        let proxy = host
            .deploy_proxy(
                DEPLOYER,
                implementation,
                Some(ResolverCall::Initialize(InitParams::simple(
                    "https://gw/{sender}/{data}.json",
                    trusted,
                    OWNER,
                ))),
            )
            .unwrap();

        let request = encode_resolve_call(
            &ens_01_dns_codec::encode("alice.eth").unwrap(),
            encode_addr_call(namehash("alice.eth")).as_slice(),
        );
        let response = signer.sign_response(
            proxy,
            request.as_slice(),
            encode_addr_result(OWNER).as_slice(),
            1_700_000_300,
        );
        let call = ResolverCall::ResolveWithProof {
            response,
            extra_data: request,
        };

        group.bench_with_input(
            BenchmarkId::new("resolve_with_proof", signers),
            &call,
            |b, call| b.iter(|| black_box(host.call(Address::ZERO, proxy, call))),
        );
    }

    for name in ["eth", "alice.eth", "sub.domain.of.alice.eth"] {
        group.bench_with_input(BenchmarkId::new("namehash", name), name, |b, name| {
            b.iter(|| black_box(namehash(name)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_signature_scheme, bench_resolution);
criterion_main!(benches);
