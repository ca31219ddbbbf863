//! # Forged Gateway Responses
//!
//! A signed answer is bound to one resolver, one request, one result and one
//! expiry. Changing any of them must break verification.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ens_02_signature_verification::{EcdsaSignature, SignatureError, SignedResponse, TestSigner};
    use ens_03_offchain_resolver::{ResolverCall, ResolverError};
    use shared_types::abi::encode_addr_result;
    use shared_types::{Address, Bytes};

    const ALICE: Address = Address::from_low_u64(0xa11ce);
    const MALLORY: Address = Address::from_low_u64(0x6666);

    fn tamper(response: &Bytes, edit: impl FnOnce(&mut SignedResponse)) -> Bytes {
        let mut decoded = SignedResponse::decode(response.as_slice()).unwrap();
        edit(&mut decoded);
        decoded.encode()
    }

    fn edit_signature(response: &Bytes, edit: impl FnOnce(&mut EcdsaSignature)) -> Bytes {
        tamper(response, |decoded| {
            let mut sig = EcdsaSignature::from_bytes(decoded.signature.as_slice()).unwrap();
            edit(&mut sig);
            decoded.signature = Bytes::from_slice(&sig.to_bytes());
        })
    }

    #[test]
    fn test_replay_against_another_resolver() {
        // Two deployments trusting the same signer.
        let mut world = World::delegated();
        let second = world
            .host
            .deploy_proxy(
                DEPLOYER,
                world.implementation,
                Some(ResolverCall::Initialize(
                    ens_03_offchain_resolver::InitParams::simple(
                        GATEWAY_URL,
                        vec![world.signer.address()],
                        OWNER,
                    ),
                )),
            )
            .unwrap();

        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, second, &lookup, MALLORY);

        assert!(matches!(
            world.prove(&lookup, response.clone()),
            Err(ResolverError::UnauthorizedSigner { .. })
        ));

        // The same answer is fine where it was meant to go.
        let accepted = world.host.call(
            STRANGER,
            second,
            &ResolverCall::ResolveWithProof {
                response,
                extra_data: lookup.extra_data.clone(),
            },
        );
        assert!(accepted.is_ok());
    }

    #[test]
    fn test_answer_for_another_name() {
        let world = World::delegated();
        let alice = world.lookup("alice.eth");
        let bob = world.lookup("bob.eth");
        let response = world.answer(&world.signer, world.proxy, &alice, ALICE);

        assert!(matches!(
            world.prove(&bob, response),
            Err(ResolverError::UnauthorizedSigner { .. })
        ));
    }

    #[test]
    fn test_result_swap() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);

        let forged = tamper(&response, |r| r.result = encode_addr_result(MALLORY));
        assert!(matches!(
            world.prove(&lookup, forged),
            Err(ResolverError::UnauthorizedSigner { .. })
        ));
    }

    #[test]
    fn test_expiry_extension() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);

        let forged = tamper(&response, |r| r.expires += 365 * 24 * 3600);
        assert!(matches!(
            world.prove(&lookup, forged),
            Err(ResolverError::UnauthorizedSigner { .. })
        ));
    }

    #[test]
    fn test_stale_answer_is_refused_before_recovery() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);

        // Garbage signature, but expired: expiry wins.
        let stale = tamper(&response, |r| {
            r.expires = 1;
            r.signature = Bytes::from_slice(&[0u8; 3]);
        });
        assert_eq!(
            world.prove(&lookup, stale),
            Err(ResolverError::SignatureExpired {
                expires: 1,
                now: world.now()
            })
        );
    }

    #[test]
    fn test_high_s_twin_is_refused() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);

        let twin = edit_signature(&response, |sig| {
            sig.s = invert_s(&sig.s);
            sig.v = if sig.v == 27 { 28 } else { 27 };
        });
        assert_eq!(
            world.prove(&lookup, twin),
            Err(ResolverError::InvalidSignature(
                SignatureError::MalleableSignature
            ))
        );
    }

    #[test]
    fn test_malformed_signatures() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);

        let bad_v = edit_signature(&response, |sig| sig.v = 29);
        assert_eq!(
            world.prove(&lookup, bad_v),
            Err(ResolverError::InvalidSignature(
                SignatureError::InvalidRecoveryId(29)
            ))
        );

        let short = tamper(&response, |r| {
            r.signature = Bytes::from_slice(&r.signature.as_slice()[..64]);
        });
        assert_eq!(
            world.prove(&lookup, short),
            Err(ResolverError::InvalidSignature(SignatureError::InvalidLength(
                64
            )))
        );

        let zero_r = edit_signature(&response, |sig| sig.r = [0u8; 32]);
        assert!(matches!(
            world.prove(&lookup, zero_r),
            Err(ResolverError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_garbage_response() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");

        assert!(matches!(
            world.prove(&lookup, Bytes::from_slice(b"not abi")),
            Err(ResolverError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_untrusted_signer() {
        let world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let rogue = TestSigner::from_seed(666);
        let response = world.answer(&rogue, world.proxy, &lookup, MALLORY);

        assert_eq!(
            world.prove(&lookup, response),
            Err(ResolverError::UnauthorizedSigner {
                signer: rogue.address()
            })
        );
    }

    #[test]
    fn test_revoked_signer_answers_die_immediately() {
        let mut world = World::delegated();
        let lookup = world.lookup("alice.eth");
        let response = world.answer(&world.signer, world.proxy, &lookup, ALICE);
        assert!(world.prove(&lookup, response.clone()).is_ok());

        let signer = world.signer.address();
        world
            .send(SIGNER_MANAGER, ResolverCall::RemoveSigners(vec![signer]))
            .unwrap();

        assert_eq!(
            world.prove(&lookup, response),
            Err(ResolverError::UnauthorizedSigner { signer })
        );
    }
}
